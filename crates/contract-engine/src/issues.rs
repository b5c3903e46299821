//! Issue detection over a classified, annotated tree

use crate::annotator::risk_phrases_in;
use crate::config::EngineConfig;
use crate::patterns::{self, find_whole_word, term_candidates};
use shared_types::{
    DefinedTerm, Issue, IssueType, RiskLevel, Section, SectionType, Severity,
};

pub struct IssueDetector<'a> {
    config: &'a EngineConfig,
}

impl<'a> IssueDetector<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Issues in section order. Within a section: undefined terms by offset,
    /// then ambiguous language, then the high-risk flag.
    pub fn detect(&self, tree: &[Section], terms: &[DefinedTerm]) -> Vec<Issue> {
        let mut issues = Vec::new();

        for section in tree {
            let content = section.concatenated();

            if matches!(
                section.section_type,
                SectionType::Clause | SectionType::Paragraph
            ) {
                for candidate in term_candidates(&content) {
                    if !is_covered(candidate.text, terms) {
                        push(
                            &mut issues,
                            section,
                            IssueType::UndefinedTerm,
                            Severity::Medium,
                            format!(
                                "Undefined term \"{}\" is used but not defined in a Definitions section",
                                candidate.text
                            ),
                        );
                    }
                }
            }

            let ambiguous = self.ambiguous_words(&content);
            if !ambiguous.is_empty() {
                let quoted: Vec<String> = ambiguous.iter().map(|w| format!("\"{}\"", w)).collect();
                push(
                    &mut issues,
                    section,
                    IssueType::AmbiguousLanguage,
                    Severity::Low,
                    format!("Ambiguous language: {}", quoted.join(", ")),
                );
            }

            if section.section_type == SectionType::Clause
                && section.metadata.risk_level == Some(RiskLevel::High)
            {
                let phrases = risk_phrases_in(&content, self.config);
                push(
                    &mut issues,
                    section,
                    IssueType::HighRiskClause,
                    Severity::High,
                    format!("High-risk clause: contains {}", phrases.join(", ")),
                );
            }
        }

        issues
    }

    /// Vocabulary entries present as whole words, including their adverb form.
    fn ambiguous_words(&self, content: &str) -> Vec<&'a str> {
        let normalized = patterns::normalize(content);
        self.config
            .ambiguous_terms
            .iter()
            .filter(|term| {
                let term = patterns::normalize(term);
                patterns::contains_phrase(&normalized, &term)
                    || patterns::adverb_form(&term)
                        .is_some_and(|adverb| patterns::contains_phrase(&normalized, &adverb))
            })
            .map(String::as_str)
            .collect()
    }
}

fn push(
    issues: &mut Vec<Issue>,
    section: &Section,
    issue_type: IssueType,
    severity: Severity,
    message: String,
) {
    issues.push(Issue {
        id: issues.len() + 1,
        section_id: section.id.clone(),
        issue_type,
        message,
        severity,
    });
}

/// A candidate is covered when it is a defined term or contains one as whole words.
fn is_covered(candidate: &str, terms: &[DefinedTerm]) -> bool {
    terms
        .iter()
        .any(|t| candidate == t.term || find_whole_word(candidate, &t.term).next().is_some())
}
