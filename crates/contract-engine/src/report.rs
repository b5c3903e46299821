//! Parse result and its summary report

use crate::outline::Outline;
use serde::{Deserialize, Serialize};
use shared_types::{
    DefinedTerm, Issue, Placeholder, RiskLevel, Section, SectionType, Severity,
};

/// Everything derived from one raw text. Empty collections mean "none found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub tree: Vec<Section>,
    pub terms: Vec<DefinedTerm>,
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub placeholders: Vec<Placeholder>,
}

/// Overall review status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// No issues found
    Clean,
    /// Issues found, none of high severity
    NeedsReview,
    /// At least one high-severity issue
    HighRisk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub sections: usize,
    pub headings: usize,
    pub paragraphs: usize,
    pub clauses: usize,
    pub signatures: usize,
    pub definitions: usize,
    pub high_risk_clauses: usize,
    pub medium_risk_clauses: usize,
    pub low_risk_clauses: usize,
    pub terms: usize,
    pub unused_terms: usize,
    pub high_issues: usize,
    pub medium_issues: usize,
    pub low_issues: usize,
    pub placeholders: usize,
    pub status: ReviewStatus,
}

impl ParseResult {
    pub fn outline(&self) -> Outline {
        Outline::project(&self.tree)
    }

    pub fn summary(&self) -> ParseSummary {
        let count_type = |t: SectionType| self.tree.iter().filter(|s| s.section_type == t).count();
        let count_risk = |r: RiskLevel| {
            self.tree
                .iter()
                .filter(|s| s.metadata.risk_level == Some(r))
                .count()
        };
        let count_severity = |sev: Severity| self.issues.iter().filter(|i| i.severity == sev).count();

        let high_issues = count_severity(Severity::High);
        let status = if self.issues.is_empty() {
            ReviewStatus::Clean
        } else if high_issues > 0 {
            ReviewStatus::HighRisk
        } else {
            ReviewStatus::NeedsReview
        };

        ParseSummary {
            sections: self.tree.len(),
            headings: count_type(SectionType::Heading),
            paragraphs: count_type(SectionType::Paragraph),
            clauses: count_type(SectionType::Clause),
            signatures: count_type(SectionType::Signature),
            definitions: count_type(SectionType::Definition),
            high_risk_clauses: count_risk(RiskLevel::High),
            medium_risk_clauses: count_risk(RiskLevel::Medium),
            low_risk_clauses: count_risk(RiskLevel::Low),
            terms: self.terms.len(),
            unused_terms: self.terms.iter().filter(|t| t.occurrences.is_empty()).count(),
            high_issues,
            medium_issues: count_severity(Severity::Medium),
            low_issues: count_severity(Severity::Low),
            placeholders: self.placeholders.len(),
            status,
        }
    }

    /// Human-readable report.
    pub fn to_text(&self) -> String {
        let summary = self.summary();
        let mut output = String::new();

        output.push_str("Contract Analysis Report\n");
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        output.push_str(&format!("Status: {:?}\n", summary.status));
        output.push_str(&format!(
            "Sections: {} ({} headings, {} clauses, {} paragraphs, {} definitions, {} signatures)\n",
            summary.sections,
            summary.headings,
            summary.clauses,
            summary.paragraphs,
            summary.definitions,
            summary.signatures
        ));
        output.push_str(&format!(
            "Clause risk: {} high, {} medium, {} low\n",
            summary.high_risk_clauses, summary.medium_risk_clauses, summary.low_risk_clauses
        ));
        output.push_str(&format!(
            "Defined terms: {} ({} unused)\n",
            summary.terms, summary.unused_terms
        ));
        output.push_str(&format!("Placeholders: {}\n\n", summary.placeholders));

        output.push_str("Issues:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');

        if self.issues.is_empty() {
            output.push_str("No issues found\n");
        }
        for issue in &self.issues {
            let marker = match issue.severity {
                Severity::High => "✗ HIGH",
                Severity::Medium => "⚠ MED ",
                Severity::Low => "- LOW ",
            };
            output.push_str(&format!(
                "{} #{} [{}] {}\n",
                marker, issue.id, issue.section_id, issue.message
            ));
        }

        if !self.terms.is_empty() {
            output.push_str("\nDefined Terms:\n");
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for term in &self.terms {
                output.push_str(&format!(
                    "{} ({} uses): {}\n",
                    term.term,
                    term.occurrences.len(),
                    term.definition
                ));
            }
        }

        if !self.placeholders.is_empty() {
            output.push_str("\nUnfilled Placeholders:\n");
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for placeholder in &self.placeholders {
                output.push_str(&format!(
                    "{} [{}]\n",
                    placeholder.name, placeholder.section_id
                ));
            }
        }

        output
    }
}
