//! Clause risk and metadata annotation

use crate::config::EngineConfig;
use crate::patterns::{self, contains_phrase};
use shared_types::{ClauseType, RiskLevel, Section, SectionMetadata, SectionType};

/// Distinct risk phrases present in `content`, in vocabulary order.
pub fn risk_phrases_in<'c>(content: &str, config: &'c EngineConfig) -> Vec<&'c str> {
    let normalized = patterns::normalize(content);
    config
        .risk_phrases
        .iter()
        .filter(|phrase| contains_phrase(&normalized, phrase))
        .map(String::as_str)
        .collect()
}

pub fn risk_level(distinct_phrases: usize, high_risk_threshold: usize) -> RiskLevel {
    if distinct_phrases > high_risk_threshold {
        RiskLevel::High
    } else if distinct_phrases > 0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn clause_type(content: &str, config: &EngineConfig) -> ClauseType {
    let normalized = patterns::normalize(content);
    if config
        .standard_markers
        .iter()
        .any(|marker| contains_phrase(&normalized, marker))
    {
        ClauseType::Standard
    } else {
        ClauseType::Custom
    }
}

/// True when the content uses at least one capitalized multi-word term.
///
/// Leading function words are stripped from each run first, so
/// `The Supplier` counts as the single word `Supplier` and does not qualify.
pub fn has_defined_terms(content: &str) -> bool {
    !patterns::term_candidates(content).is_empty()
}

pub fn annotate(section: &Section, config: &EngineConfig) -> SectionMetadata {
    let mut metadata = SectionMetadata::default();

    match section.section_type {
        SectionType::Clause => {
            let content = section.concatenated();
            let phrases = risk_phrases_in(&content, config).len();
            metadata.risk_level = Some(risk_level(phrases, config.high_risk_threshold));
            metadata.clause_type = Some(clause_type(&content, config));
            metadata.has_defined_terms = Some(has_defined_terms(&content));
        }
        SectionType::Signature => {
            metadata.is_required = Some(true);
        }
        _ => {}
    }

    metadata
}

pub fn annotate_tree(tree: &mut [Section], config: &EngineConfig) {
    for section in tree.iter_mut() {
        section.metadata = annotate(section, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::SectionId;

    fn section(section_type: SectionType, content: &str) -> Section {
        Section {
            id: SectionId::new("s-test"),
            level: 2,
            title: String::new(),
            content: content.lines().map(String::from).collect(),
            section_type,
            parent_id: None,
            metadata: SectionMetadata::default(),
            start_line: 0,
            end_line: 0,
        }
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(risk_level(0, 2), RiskLevel::Low);
        assert_eq!(risk_level(1, 2), RiskLevel::Medium);
        assert_eq!(risk_level(2, 2), RiskLevel::Medium);
        assert_eq!(risk_level(3, 2), RiskLevel::High);
    }

    #[test]
    fn test_risk_phrases_counted_once() {
        let config = EngineConfig::default();
        let text = "Sole discretion applies. In its sole discretion, without limitation.";
        assert_eq!(
            risk_phrases_in(text, &config),
            vec!["sole discretion", "without limitation"]
        );
    }

    #[test]
    fn test_high_risk_clause_metadata() {
        let config = EngineConfig::default();
        let clause = section(
            SectionType::Clause,
            "The Supplier shall not be liable for delay.\nIn its sole discretion the Customer\nshall indemnify and hold harmless the Supplier.",
        );
        let metadata = annotate(&clause, &config);
        assert_eq!(metadata.risk_level, Some(RiskLevel::High));
        assert_eq!(metadata.clause_type, Some(ClauseType::Custom));
        assert_eq!(metadata.has_defined_terms, Some(false));
        assert!(metadata.is_editable);
    }

    #[test]
    fn test_standard_clause_with_defined_terms() {
        let config = EngineConfig::default();
        let clause = section(
            SectionType::Clause,
            "On customary terms the Buyer shall pay the Purchase Price.",
        );
        let metadata = annotate(&clause, &config);
        assert_eq!(metadata.clause_type, Some(ClauseType::Standard));
        assert_eq!(metadata.has_defined_terms, Some(true));
        assert_eq!(metadata.risk_level, Some(RiskLevel::Low));
    }

    #[test]
    fn test_label_runs_are_not_defined_terms() {
        assert!(!has_defined_terms("Effective Date: to be agreed"));
        assert!(has_defined_terms("from the Effective Date onwards"));
    }

    #[test]
    fn test_non_clause_metadata() {
        let config = EngineConfig::default();
        let paragraph = annotate(&section(SectionType::Paragraph, "sole discretion"), &config);
        assert_eq!(paragraph, SectionMetadata::default());

        let signature = annotate(&section(SectionType::Signature, "Signed by"), &config);
        assert_eq!(signature.is_required, Some(true));
        assert_eq!(signature.risk_level, None);
    }
}
