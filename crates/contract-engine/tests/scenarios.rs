use contract_engine::{parse, serialize, FoldState, Outline};
use pretty_assertions::assert_eq;
use shared_types::{IssueType, RiskLevel, SectionType};

#[test]
fn title_and_greeting() {
    let result = parse("# Title\n\nHello world");

    assert_eq!(result.tree.len(), 2);
    let heading = &result.tree[0];
    assert_eq!(heading.section_type, SectionType::Heading);
    assert_eq!(heading.level, 1);
    assert_eq!(heading.title, "Title");

    let paragraph = &result.tree[1];
    assert_eq!(paragraph.section_type, SectionType::Paragraph);
    assert_eq!(paragraph.content, vec!["Hello world".to_string()]);
    assert_eq!(paragraph.parent_id.as_ref(), Some(&heading.id));

    assert!(result.issues.is_empty());
    assert!(result.terms.is_empty());
}

#[test]
fn defined_term_used_in_later_clause() {
    let raw = "## Definitions\n\n\"Confidential Information\" means any information disclosed.\n\n## Obligations\n\nThe Recipient shall keep Confidential Information secret.";
    let result = parse(raw);

    assert_eq!(result.terms.len(), 1);
    let term = &result.terms[0];
    assert_eq!(term.term, "Confidential Information");
    assert_eq!(term.occurrences.len(), 1);

    let clause = result
        .tree
        .iter()
        .find(|s| s.section_type == SectionType::Clause)
        .unwrap();
    let occurrence = &term.occurrences[0];
    assert_eq!(occurrence.section_id, clause.id);
    let text = clause.concatenated();
    assert_eq!(
        &text[occurrence.offset..occurrence.offset + term.term.len()],
        "Confidential Information"
    );

    assert!(!result
        .issues
        .iter()
        .any(|i| i.issue_type == IssueType::UndefinedTerm && i.message.contains("Confidential Information")));
}

#[test]
fn high_risk_clause() {
    let raw = "# Liability\n\nThe Supplier shall not be liable for indirect loss, acts in its sole discretion, and the Customer shall indemnify and hold harmless the Supplier.";
    let result = parse(raw);

    let clause = &result.tree[1];
    assert_eq!(clause.section_type, SectionType::Clause);
    assert_eq!(clause.metadata.risk_level, Some(RiskLevel::High));

    let high_risk: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.issue_type == IssueType::HighRiskClause)
        .collect();
    assert_eq!(high_risk.len(), 1);
    assert_eq!(high_risk[0].section_id, clause.id);
}

#[test]
fn undefined_party_reference() {
    let raw = "# Definitions\n\n\"Goods\" means the products listed in the order.\n\n# Delivery\n\nParty A shall deliver the Goods to the warehouse.";
    let result = parse(raw);

    let undefined: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.issue_type == IssueType::UndefinedTerm)
        .collect();
    assert_eq!(undefined.len(), 1);
    assert!(undefined[0].message.contains("Party A"));
}

#[test]
fn serialize_preserves_siblings() {
    let raw = "# Agreement\n\nThis agreement is made today.\n\n## Payment\n\n1.1 The Buyer shall pay within 30 days.\n\n## Termination\n\nEither party may terminate on notice.\n\n# Schedule\n\nList of goods.";
    let before = parse(raw);
    let target = before
        .tree
        .iter()
        .find(|s| s.content.iter().any(|l| l.contains("pay within")))
        .unwrap();

    let edited = serialize(
        &before.tree,
        &target.id,
        "1.1 The Buyer shall pay within 14 days.\n1.2 Late payment accrues interest.",
    )
    .unwrap();
    let after = parse(&edited);

    assert_eq!(before.tree.len(), after.tree.len());
    for (old, new) in before.tree.iter().zip(&after.tree) {
        assert_eq!(old.id, new.id);
        if old.id != target.id {
            assert_eq!(old.content, new.content);
        }
    }
}

#[test]
fn fold_state_follows_sections_across_edits() {
    let raw = "# Agreement\n## Payment\nPay.\n## Termination\nEnd.";
    let before = parse(raw);
    let termination = before
        .tree
        .iter()
        .find(|s| s.title == "Termination")
        .unwrap()
        .id
        .clone();

    let mut folds = FoldState::new();
    folds.collapse(&termination);

    // Insert a new heading ahead of the folded one
    let payment = before.tree.iter().find(|s| s.title == "Payment").unwrap();
    let edited = serialize(&before.tree, &payment.id, "## Payment\n## Interest").unwrap();
    let after = parse(&edited);
    folds.retain_known(&after.tree);

    assert!(folds.is_collapsed(&termination));
    let outline = Outline::project(&after.tree);
    let titles: Vec<&str> = folds
        .visible(&outline)
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Agreement", "Payment", "Interest", "Termination"]);
}
