//! Heuristic vocabularies used by the classifier, annotator and issue detector
//!
//! The defaults reproduce the built-in vocabularies in [`crate::patterns`]. A
//! deployment can override any of them from TOML:
//!
//! ```toml
//! high_risk_threshold = 1
//! ambiguous_terms = ["reasonable", "promptly", "best efforts"]
//! ```

use crate::error::{EngineError, EngineResult};
use crate::patterns::{
    self, find_whole_word, AMBIGUOUS_TERMS, DEFINITION_HEADINGS, RISK_PHRASES, STANDARD_MARKERS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Phrases counted towards a clause's risk level
    pub risk_phrases: Vec<String>,
    /// A clause is high risk when it holds strictly more distinct phrases than this
    pub high_risk_threshold: usize,
    /// Words flagged as ambiguous language
    pub ambiguous_terms: Vec<String>,
    /// Heading titles that open a definitions scope
    pub definition_headings: Vec<String>,
    /// Words marking a clause as standard rather than custom
    pub standard_markers: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_phrases: owned(RISK_PHRASES),
            high_risk_threshold: 2,
            ambiguous_terms: owned(AMBIGUOUS_TERMS),
            definition_headings: owned(DEFINITION_HEADINGS),
            standard_markers: owned(STANDARD_MARKERS),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.risk_phrases.is_empty() {
            return Err(EngineError::Config(
                "risk_phrases must not be empty".to_string(),
            ));
        }
        if self.high_risk_threshold == 0 {
            return Err(EngineError::Config(
                "high_risk_threshold must be at least 1".to_string(),
            ));
        }

        let vocabularies = [
            ("risk_phrases", &self.risk_phrases),
            ("ambiguous_terms", &self.ambiguous_terms),
            ("definition_headings", &self.definition_headings),
            ("standard_markers", &self.standard_markers),
        ];
        for (name, entries) in vocabularies {
            if entries.iter().any(|e| e.trim().is_empty()) {
                return Err(EngineError::Config(format!(
                    "{} contains a blank entry",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Whether a heading title opens a definitions scope (`1. Definitions`,
    /// `Definitions and Interpretation`, ...).
    pub fn is_definitions_heading(&self, title: &str) -> bool {
        let title = patterns::normalize(title);
        self.definition_headings
            .iter()
            .any(|marker| find_whole_word(&title, &patterns::normalize(marker)).next().is_some())
    }
}
