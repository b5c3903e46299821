pub mod types;

pub use types::{
    ClauseType, DefinedTerm, Issue, IssueType, Placeholder, PlaceholderKind, RiskLevel, Section,
    SectionId, SectionMetadata, SectionType, Severity, TermOccurrence,
};
