use std::fmt;

/// Identity of a section within a parsed document.
///
/// Ids are fingerprints of a section's position in the heading hierarchy, so the
/// same heading keeps the same id across re-parses of edited text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Heading,
    Paragraph,
    Clause,
    Signature,
    Definition,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Heading => "heading",
            SectionType::Paragraph => "paragraph",
            SectionType::Clause => "clause",
            SectionType::Signature => "signature",
            SectionType::Definition => "definition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    Standard,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Per-section annotations. Clause-only fields stay `None` on other section types.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_type: Option<ClauseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_defined_terms: Option<bool>,
    pub is_editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

impl Default for SectionMetadata {
    fn default() -> Self {
        Self {
            clause_type: None,
            risk_level: None,
            has_defined_terms: None,
            is_editable: true,
            is_required: None,
        }
    }
}

/// A contiguous span of document lines placed in the heading hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    /// 1-6 for headings; body sections sit one level below their parent heading
    pub level: u8,
    /// Heading text without the `#` markers (empty for body sections)
    pub title: String,
    /// Body lines, verbatim (empty for headings)
    pub content: Vec<String>,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub parent_id: Option<SectionId>,
    pub metadata: SectionMetadata,
    pub start_line: usize,
    pub end_line: usize,
}

impl Section {
    pub fn is_heading(&self) -> bool {
        self.section_type == SectionType::Heading
    }

    /// Content lines joined with `\n`; term and placeholder offsets index into this.
    pub fn concatenated(&self) -> String {
        self.content.join("\n")
    }

    /// The text a caller edits for this section: the markup line of a heading,
    /// or the joined content of a body section.
    pub fn text(&self) -> String {
        if self.is_heading() {
            format!("{} {}", "#".repeat(self.level as usize), self.title)
        } else {
            self.concatenated()
        }
    }

    /// Number of source lines the section spans, or 0 for an inverted range.
    pub fn line_count(&self) -> usize {
        self.end_line
            .checked_sub(self.start_line)
            .map_or(0, |span| span + 1)
    }
}

/// A single non-defining use of a defined term.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermOccurrence {
    pub section_id: SectionId,
    /// Byte offset into the owning section's concatenated content
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinedTerm {
    pub term: String,
    pub definition: String,
    /// Section holding the winning (first) definition
    pub defined_in: SectionId,
    /// Offset of the defining mention inside `defined_in`
    pub defining_offset: usize,
    /// Every other use, in document order
    pub occurrences: Vec<TermOccurrence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    UndefinedTerm,
    AmbiguousLanguage,
    HighRiskClause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Monotonic within one parse pass, starting at 1
    pub id: usize,
    pub section_id: SectionId,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    /// `[Party Name]`
    Bracket,
    /// `{{effective_date}}`
    DoubleBrace,
}

/// An unfilled template slot left in the document text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub section_id: SectionId,
    /// Byte offset of the opening delimiter in the concatenated content
    pub offset: usize,
    /// Inner text, trimmed
    pub name: String,
    pub kind: PlaceholderKind,
}

impl Placeholder {
    /// Length in bytes of the placeholder including its delimiters.
    pub fn span_len(&self, concatenated: &str) -> usize {
        let close = match self.kind {
            PlaceholderKind::Bracket => "]",
            PlaceholderKind::DoubleBrace => "}}",
        };
        concatenated
            .get(self.offset..)
            .and_then(|rest| rest.find(close))
            .map(|end| end + close.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraph(content: &[&str]) -> Section {
        Section {
            id: SectionId::new("s-1"),
            level: 1,
            title: String::new(),
            content: content.iter().map(|l| l.to_string()).collect(),
            section_type: SectionType::Paragraph,
            parent_id: None,
            metadata: SectionMetadata::default(),
            start_line: 4,
            end_line: 4 + content.len() - 1,
        }
    }

    #[test]
    fn test_heading_text_restores_markup() {
        let heading = Section {
            title: "Definitions".to_string(),
            level: 2,
            content: Vec::new(),
            section_type: SectionType::Heading,
            end_line: 4,
            ..paragraph(&["x"])
        };
        assert_eq!(heading.text(), "## Definitions");
        assert!(heading.is_heading());
    }

    #[test]
    fn test_body_text_is_joined_content() {
        let section = paragraph(&["First line", "", "Second paragraph"]);
        assert_eq!(section.text(), "First line\n\nSecond paragraph");
        assert_eq!(section.line_count(), 3);
    }

    #[test]
    fn test_section_serializes_with_presentation_field_names() {
        let section = paragraph(&["Hello world"]);
        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["parentId"], serde_json::Value::Null);
        assert_eq!(json["startLine"], 4);
        assert_eq!(json["metadata"]["isEditable"], true);
        // Clause-only metadata is omitted entirely
        assert!(json["metadata"].get("riskLevel").is_none());
    }

    #[test]
    fn test_issue_type_field_name() {
        let issue = Issue {
            id: 1,
            section_id: SectionId::new("s-1"),
            issue_type: IssueType::HighRiskClause,
            message: "High-risk clause".to_string(),
            severity: Severity::High,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "high_risk_clause");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["sectionId"], "s-1");
    }

    #[test]
    fn test_severity_ordering_and_parse() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!(Severity::parse("MEDIUM"), Some(Severity::Medium));
        assert_eq!(Severity::parse("critical"), None);
    }

    #[test]
    fn test_placeholder_len_covers_delimiters() {
        let text = "between {{effective_date}} and [Party Name]";
        let brace = Placeholder {
            section_id: SectionId::new("s-1"),
            offset: 8,
            name: "effective_date".to_string(),
            kind: PlaceholderKind::DoubleBrace,
        };
        assert_eq!(&text[8..8 + brace.span_len(text)], "{{effective_date}}");

        let bracket = Placeholder {
            offset: 31,
            name: "Party Name".to_string(),
            kind: PlaceholderKind::Bracket,
            ..brace
        };
        assert_eq!(&text[31..31 + bracket.span_len(text)], "[Party Name]");

        // Offsets from a stale tree do not panic
        let stale = Placeholder {
            offset: 200,
            ..bracket
        };
        assert_eq!(stale.span_len(text), 0);
    }

    #[test]
    fn test_line_count_of_inverted_range() {
        let section = Section {
            start_line: 9,
            end_line: 2,
            ..paragraph(&["x"])
        };
        assert_eq!(section.line_count(), 0);
    }
}
