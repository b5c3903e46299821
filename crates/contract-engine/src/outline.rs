//! Headings-only projection of a parsed tree, plus caller-owned fold state
//!
//! The outline is derived from the same structure builder output as the full
//! tree. Fold state is keyed by section id and never touched by parsing.

use crate::error::{EngineError, EngineResult};
use crate::tree;
use serde::{Deserialize, Serialize};
use shared_types::{Section, SectionId};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub id: SectionId,
    pub level: u8,
    pub title: String,
    pub parent_id: Option<SectionId>,
    /// Number of heading ancestors
    pub depth: usize,
    /// Number of direct heading children
    pub child_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

impl Outline {
    /// Keep only headings, in document order.
    pub fn project(tree: &[Section]) -> Self {
        let mut entries: Vec<OutlineEntry> = Vec::new();
        let mut index: HashMap<SectionId, usize> = HashMap::new();

        for section in tree.iter().filter(|s| s.is_heading()) {
            let parent = section
                .parent_id
                .as_ref()
                .and_then(|p| index.get(p).copied());
            let depth = parent.map(|i| entries[i].depth + 1).unwrap_or(0);
            if let Some(i) = parent {
                entries[i].child_count += 1;
            }

            index.insert(section.id.clone(), entries.len());
            entries.push(OutlineEntry {
                id: section.id.clone(),
                level: section.level,
                title: section.title.clone(),
                parent_id: section.parent_id.clone(),
                depth,
                child_count: 0,
            });
        }

        Self { entries }
    }

    pub fn get(&self, id: &SectionId) -> Option<&OutlineEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indented plain-text rendering, one heading per line.
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}{} [{}]", "  ".repeat(e.depth), e.title, e.id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collapsed section ids. Owned by the caller and kept across re-parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoldState {
    collapsed: BTreeSet<SectionId>,
}

impl FoldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collapse(&mut self, id: &SectionId) {
        self.collapsed.insert(id.clone());
    }

    pub fn expand(&mut self, id: &SectionId) {
        self.collapsed.remove(id);
    }

    /// Flip the fold of `id`; returns whether it is now collapsed.
    pub fn toggle(&mut self, id: &SectionId) -> bool {
        if self.collapsed.remove(id) {
            false
        } else {
            self.collapsed.insert(id.clone());
            true
        }
    }

    pub fn is_collapsed(&self, id: &SectionId) -> bool {
        self.collapsed.contains(id)
    }

    pub fn collapsed(&self) -> impl Iterator<Item = &SectionId> {
        self.collapsed.iter()
    }

    pub fn collapse_all(&mut self, outline: &Outline) {
        self.collapsed
            .extend(outline.entries.iter().map(|e| e.id.clone()));
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Entries with no collapsed ancestor. A collapsed entry is itself visible.
    pub fn visible<'o>(&self, outline: &'o Outline) -> Vec<&'o OutlineEntry> {
        let mut hidden: HashMap<&SectionId, bool> = HashMap::new();
        let mut visible = Vec::new();

        for entry in &outline.entries {
            let under_fold = entry
                .parent_id
                .as_ref()
                .map(|p| self.is_collapsed(p) || hidden.get(p).copied().unwrap_or(false))
                .unwrap_or(false);
            hidden.insert(&entry.id, under_fold);
            if !under_fold {
                visible.push(entry);
            }
        }

        visible
    }

    /// Expand every collapsed ancestor of `id` so it can be scrolled into view.
    /// Returns the ids that were expanded, nearest ancestor first.
    pub fn scroll_to(&mut self, tree: &[Section], id: &SectionId) -> EngineResult<Vec<SectionId>> {
        if tree::find(tree, id).is_none() {
            return Err(EngineError::SectionNotFound {
                section_id: id.clone(),
            });
        }

        let mut expanded = Vec::new();
        for ancestor in tree::ancestors(tree, id) {
            if self.collapsed.remove(&ancestor.id) {
                expanded.push(ancestor.id.clone());
            }
        }
        Ok(expanded)
    }

    /// Forget folds for sections that no longer exist.
    pub fn retain_known(&mut self, tree: &[Section]) {
        self.collapsed
            .retain(|id| tree.iter().any(|s| &s.id == id));
    }
}
