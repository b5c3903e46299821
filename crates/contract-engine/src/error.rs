use shared_types::SectionId;
use thiserror::Error;

/// Errors surfaced by the engine's section-scoped operations and config loading.
///
/// Parsing itself never fails; malformed input degrades to paragraphs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The id does not belong to the supplied tree. Re-derive it from the
    /// latest parse result instead of retrying with the stale id.
    #[error("Section not found: {section_id}")]
    SectionNotFound { section_id: SectionId },

    #[error("Invalid engine configuration: {0}")]
    Config(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
