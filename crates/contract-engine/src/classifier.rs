//! Section classifier
//!
//! Body sections are typed by the first matching rule in an ordered list. The
//! rules are kept outside the structure builder so new ones can be pushed
//! without touching tree construction. Anything no rule claims is a paragraph.

use crate::config::EngineConfig;
use crate::patterns::{
    CAPITALIZED_OPENER_PATTERN, DEONTIC_PATTERN, EXECUTION_PATTERN, LETTERED_CLAUSE_PATTERN,
    NUMBERED_CLAUSE_PATTERN, QUOTED_DEFINITION_PATTERN,
};
use shared_types::{Section, SectionId, SectionType};
use std::collections::HashMap;
use tracing::trace;

/// What a rule gets to look at for one body section.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext<'a> {
    /// Concatenated content of the section
    pub content: &'a str,
    /// Whether an ancestor heading opens a definitions scope
    pub in_definitions: bool,
}

/// A predicate that claims a section for one type.
pub trait ClassificationRule: Send + Sync {
    /// Short rule name for logs
    fn name(&self) -> &str;

    /// Type assigned when the rule matches
    fn section_type(&self) -> SectionType;

    fn matches(&self, ctx: &ClassifyContext<'_>) -> bool;
}

/// `"Term" means ...` inside a definitions scope.
pub struct QuotedDefinitionRule;

impl ClassificationRule for QuotedDefinitionRule {
    fn name(&self) -> &str {
        "quoted_definition"
    }

    fn section_type(&self) -> SectionType {
        SectionType::Definition
    }

    fn matches(&self, ctx: &ClassifyContext<'_>) -> bool {
        ctx.in_definitions && QUOTED_DEFINITION_PATTERN.is_match(ctx.content)
    }
}

/// Execution blocks: signature lines, `IN WITNESS WHEREOF`.
pub struct ExecutionRule;

impl ClassificationRule for ExecutionRule {
    fn name(&self) -> &str {
        "execution"
    }

    fn section_type(&self) -> SectionType {
        SectionType::Signature
    }

    fn matches(&self, ctx: &ClassifyContext<'_>) -> bool {
        EXECUTION_PATTERN.is_match(ctx.content)
    }
}

/// Numbered or lettered sub-clauses, capitalized openers and deontic verbs.
pub struct ClauseMarkerRule;

impl ClassificationRule for ClauseMarkerRule {
    fn name(&self) -> &str {
        "clause_marker"
    }

    fn section_type(&self) -> SectionType {
        SectionType::Clause
    }

    fn matches(&self, ctx: &ClassifyContext<'_>) -> bool {
        NUMBERED_CLAUSE_PATTERN.is_match(ctx.content)
            || LETTERED_CLAUSE_PATTERN.is_match(ctx.content)
            || CAPITALIZED_OPENER_PATTERN.is_match(ctx.content)
            || DEONTIC_PATTERN.is_match(ctx.content)
    }
}

pub struct SectionClassifier {
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl Default for SectionClassifier {
    fn default() -> Self {
        Self::new(vec![
            Box::new(QuotedDefinitionRule),
            Box::new(ExecutionRule),
            Box::new(ClauseMarkerRule),
        ])
    }
}

impl SectionClassifier {
    /// A classifier with exactly these rules, tried in order.
    pub fn new(rules: Vec<Box<dyn ClassificationRule>>) -> Self {
        Self { rules }
    }

    /// Append a rule after the existing ones.
    pub fn push_rule(&mut self, rule: Box<dyn ClassificationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn classify(&self, ctx: &ClassifyContext<'_>) -> SectionType {
        self.rules
            .iter()
            .find(|rule| rule.matches(ctx))
            .map(|rule| rule.section_type())
            .unwrap_or(SectionType::Paragraph)
    }

    /// Type every body section of `tree` in place. Headings are left alone.
    pub fn classify_tree(&self, tree: &mut [Section], config: &EngineConfig) {
        let scopes = definition_scopes(tree, config);

        for (section, in_definitions) in tree.iter_mut().zip(scopes) {
            if section.is_heading() {
                continue;
            }
            let content = section.concatenated();
            let ctx = ClassifyContext {
                content: &content,
                in_definitions,
            };
            section.section_type = self.classify(&ctx);
            trace!(
                section_id = %section.id,
                section_type = section.section_type.as_str(),
                in_definitions,
                "classified section"
            );
        }
    }
}

/// For each section, whether it sits under a definitions heading. A heading
/// counts as its own scope so its body children inherit it.
fn definition_scopes(tree: &[Section], config: &EngineConfig) -> Vec<bool> {
    let mut by_id: HashMap<&SectionId, bool> = HashMap::new();
    let mut scopes = Vec::with_capacity(tree.len());

    for section in tree {
        let inherited = section
            .parent_id
            .as_ref()
            .and_then(|p| by_id.get(p).copied())
            .unwrap_or(false);
        let own = section.is_heading() && config.is_definitions_heading(&section.title);
        by_id.insert(&section.id, inherited || own);
        scopes.push(inherited);
    }

    scopes
}
