//! Structure and annotation engine for contract drafts
//!
//! Raw text flows one way through the pipeline:
//!
//! 1. [`structure`] builds the section forest from heading markers
//! 2. [`classifier`] types every body section
//! 3. [`annotator`] adds clause risk and metadata
//! 4. [`terms`] extracts defined terms and indexes their uses
//! 5. [`issues`] reports undefined terms, ambiguous language and risky clauses
//!
//! Edits never touch the tree: [`serialize`] produces new raw text, which is
//! parsed again from the top.
//!
//! ```
//! let result = contract_engine::parse("# Title\n\nHello world");
//! assert_eq!(result.tree.len(), 2);
//! assert!(result.issues.is_empty());
//! ```

pub mod annotator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod issues;
pub mod outline;
pub mod patterns;
pub mod placeholders;
pub mod report;
pub mod serializer;
pub mod structure;
pub mod terms;
pub mod tree;

pub use classifier::{ClassificationRule, ClassifyContext, SectionClassifier};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use outline::{FoldState, Outline, OutlineEntry};
pub use report::{ParseResult, ParseSummary, ReviewStatus};
pub use serializer::{extract_section, render_document, serialize};

use issues::IssueDetector;
use tracing::{debug, instrument};

/// Engine entry point. Holds the vocabularies and classification rules; every
/// call is a pure function of its input.
pub struct Engine {
    config: EngineConfig,
    classifier: SectionClassifier,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            classifier: SectionClassifier::default(),
        }
    }

    /// Replace the classification rules.
    pub fn with_classifier(mut self, classifier: SectionClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline. Never fails: unrecognized content becomes a
    /// paragraph and missing structure yields empty collections.
    #[instrument(skip_all, fields(bytes = raw.len()))]
    pub fn parse(&self, raw: &str) -> ParseResult {
        let mut tree = structure::build(raw);
        debug!(sections = tree.len(), "structure built");

        self.classifier.classify_tree(&mut tree, &self.config);
        annotator::annotate_tree(&mut tree, &self.config);

        let terms = terms::extract_terms(&tree);
        debug!(terms = terms.len(), "terms extracted");

        let issues = IssueDetector::new(&self.config).detect(&tree, &terms);
        debug!(issues = issues.len(), "issues detected");

        let placeholders = placeholders::scan(&tree);

        ParseResult {
            tree,
            terms,
            issues,
            placeholders,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse with the default vocabularies.
pub fn parse(raw: &str) -> ParseResult {
    Engine::default().parse(raw)
}
