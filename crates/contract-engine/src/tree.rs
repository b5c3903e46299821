//! Lookups over a section list in document order
//!
//! Trees may come back from callers (for example as JSON from a UI), so walks
//! along `parent_id` are bounded by the tree length instead of trusting the
//! links to be acyclic.

use shared_types::{Section, SectionId};

pub fn find<'t>(tree: &'t [Section], id: &SectionId) -> Option<&'t Section> {
    tree.iter().find(|s| &s.id == id)
}

pub fn position(tree: &[Section], id: &SectionId) -> Option<usize> {
    tree.iter().position(|s| &s.id == id)
}

/// Ancestors of `id`, nearest first. Empty for unknown ids and roots.
pub fn ancestors<'t>(tree: &'t [Section], id: &SectionId) -> Vec<&'t Section> {
    let mut chain = Vec::new();
    let mut current = find(tree, id).and_then(|s| s.parent_id.as_ref());

    while let Some(parent_id) = current {
        if chain.len() >= tree.len() {
            break;
        }
        let Some(parent) = find(tree, parent_id) else {
            break;
        };
        chain.push(parent);
        current = parent.parent_id.as_ref();
    }

    chain
}

/// Direct children of `id`, in document order.
pub fn children<'t>(tree: &'t [Section], id: &SectionId) -> Vec<&'t Section> {
    tree.iter()
        .filter(|s| s.parent_id.as_ref() == Some(id))
        .collect()
}

/// Number of ancestors; `None` when `id` is not in the tree.
pub fn depth(tree: &[Section], id: &SectionId) -> Option<usize> {
    find(tree, id).map(|_| ancestors(tree, id).len())
}

/// The section and all of its descendants. Descendants always follow their
/// ancestor contiguously in document order.
pub fn subtree<'t>(tree: &'t [Section], id: &SectionId) -> Option<&'t [Section]> {
    let start = position(tree, id)?;
    let mut members: Vec<&SectionId> = vec![&tree[start].id];
    let mut end = start + 1;

    while let Some(section) = tree.get(end) {
        match &section.parent_id {
            Some(parent) if members.contains(&parent) => {
                members.push(&section.id);
                end += 1;
            }
            _ => break,
        }
    }

    Some(&tree[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure;
    use pretty_assertions::assert_eq;

    const DOC: &str = "# One\nintro\n## Two\n### Three\nbody\n## Four\n# Five";

    fn titles(sections: &[&Section]) -> Vec<String> {
        sections.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = structure::build(DOC);
        let body = &tree[4];
        assert_eq!(titles(&ancestors(&tree, &body.id)), vec!["Three", "Two", "One"]);
        assert_eq!(depth(&tree, &body.id), Some(3));
        assert!(ancestors(&tree, &tree[0].id).is_empty());
    }

    #[test]
    fn test_children_and_find() {
        let tree = structure::build(DOC);
        let one = &tree[0];
        let kids = children(&tree, &one.id);
        assert_eq!(kids.len(), 3);
        assert_eq!(kids[1].title, "Two");
        assert_eq!(find(&tree, &SectionId::new("s-missing")), None);
        assert_eq!(depth(&tree, &SectionId::new("s-missing")), None);
    }

    #[test]
    fn test_subtree_is_contiguous() {
        let tree = structure::build(DOC);
        let two = subtree(&tree, &tree[2].id).unwrap();
        let names: Vec<&str> = two.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(names, vec!["Two", "Three", ""]);

        let one = subtree(&tree, &tree[0].id).unwrap();
        assert_eq!(one.len(), 6);
    }

    #[test]
    fn test_cyclic_links_terminate() {
        let mut tree = structure::build("# A\n## B");
        tree[0].parent_id = Some(tree[1].id.clone());
        assert!(ancestors(&tree, &tree[1].id).len() <= tree.len());
    }
}
