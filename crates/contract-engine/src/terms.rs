//! Defined-term extraction and occurrence indexing
//!
//! Terms come only from `definition` sections: first every quoted
//! `"Term" means ...` definition, then any other capitalized run in those
//! sections. The first definition of a term wins. Occurrences are then
//! gathered from every section by whole-word, case-sensitive search.

use crate::patterns::{
    capitalized_runs, find_whole_word, placeholder_ranges, DEFINITION_LEAD_PATTERN,
    QUOTED_DEFINITION_PATTERN,
};
use shared_types::{DefinedTerm, Section, SectionId, SectionType, TermOccurrence};

pub fn extract_terms(tree: &[Section]) -> Vec<DefinedTerm> {
    let definitions: Vec<(&Section, String)> = tree
        .iter()
        .filter(|s| s.section_type == SectionType::Definition)
        .map(|s| (s, s.concatenated()))
        .collect();

    let mut terms = Vec::new();

    for (section, content) in &definitions {
        for caps in QUOTED_DEFINITION_PATTERN.captures_iter(content) {
            let (Some(quoted), Some(definition)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let term = quoted.as_str().trim();
            if term.is_empty() {
                continue;
            }
            let lead = quoted.as_str().len() - quoted.as_str().trim_start().len();
            insert_first(
                &mut terms,
                term,
                trim_definition(definition.as_str()),
                &section.id,
                quoted.start() + lead,
            );
        }
    }

    for (section, content) in &definitions {
        let mut claimed: Vec<(usize, usize)> = QUOTED_DEFINITION_PATTERN
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| (m.start(), m.end()))
            .collect();
        claimed.extend(placeholder_ranges(content));

        for run in capitalized_runs(content) {
            if claimed
                .iter()
                .any(|(start, end)| run.offset >= *start && run.offset < *end)
            {
                continue;
            }
            let definition = definition_after(content, run.offset + run.text.len());
            insert_first(&mut terms, run.text, definition, &section.id, run.offset);
        }
    }

    index_occurrences(tree, &mut terms);
    terms
}

fn insert_first(
    terms: &mut Vec<DefinedTerm>,
    term: &str,
    definition: &str,
    section_id: &SectionId,
    offset: usize,
) {
    if terms.iter().any(|t| t.term == term) {
        return;
    }
    terms.push(DefinedTerm {
        term: term.to_string(),
        definition: definition.to_string(),
        defined_in: section_id.clone(),
        defining_offset: offset,
        occurrences: Vec::new(),
    });
}

/// Text following a fallback term, up to the next period or line break.
fn definition_after(content: &str, end: usize) -> &str {
    let rest = content.get(end..).unwrap_or("");
    let lead = DEFINITION_LEAD_PATTERN.find(rest).map_or(0, |m| m.end());
    let rest = &rest[lead..];
    let sentence = rest
        .find(['.', '\n'])
        .map(|stop| &rest[..stop])
        .unwrap_or(rest);
    trim_definition(sentence)
}

/// List separators (`;`, `,`) at the end of a definition are not part of it.
fn trim_definition(text: &str) -> &str {
    text.trim().trim_end_matches([';', ',']).trim_end()
}

/// Record every use of every term in document order, skipping the defining mention.
fn index_occurrences(tree: &[Section], terms: &mut [DefinedTerm]) {
    let contents: Vec<String> = tree.iter().map(Section::concatenated).collect();

    for term in terms.iter_mut() {
        for (section, content) in tree.iter().zip(&contents) {
            for offset in find_whole_word(content, &term.term) {
                if section.id == term.defined_in && offset == term.defining_offset {
                    continue;
                }
                term.occurrences.push(TermOccurrence {
                    section_id: section.id.clone(),
                    offset,
                });
            }
        }
    }
}
