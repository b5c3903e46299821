//! Unfilled template placeholders: `[Party Name]` and `{{effective_date}}`

use crate::patterns::{BRACKET_PLACEHOLDER_PATTERN, DOUBLE_BRACE_PLACEHOLDER_PATTERN};
use shared_types::{Placeholder, PlaceholderKind, Section, SectionId};

/// Placeholders in one section's concatenated content, by offset.
pub fn scan_text(section_id: &SectionId, text: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();

    for caps in BRACKET_PLACEHOLDER_PATTERN.captures_iter(text) {
        // `[label](target)` is a link
        if caps.get(2).is_some() {
            continue;
        }
        if let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) {
            push(&mut found, section_id, whole.start(), inner.as_str(), PlaceholderKind::Bracket);
        }
    }

    for caps in DOUBLE_BRACE_PLACEHOLDER_PATTERN.captures_iter(text) {
        if let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) {
            push(
                &mut found,
                section_id,
                whole.start(),
                inner.as_str(),
                PlaceholderKind::DoubleBrace,
            );
        }
    }

    found.sort_by_key(|p| p.offset);
    found
}

fn push(
    found: &mut Vec<Placeholder>,
    section_id: &SectionId,
    offset: usize,
    inner: &str,
    kind: PlaceholderKind,
) {
    let name = inner.trim();
    if name.is_empty() {
        return;
    }
    found.push(Placeholder {
        section_id: section_id.clone(),
        offset,
        name: name.to_string(),
        kind,
    });
}

/// Every placeholder in the tree, in document order.
pub fn scan(tree: &[Section]) -> Vec<Placeholder> {
    tree.iter()
        .flat_map(|section| scan_text(&section.id, &section.concatenated()))
        .collect()
}
