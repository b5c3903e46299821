//! Structure builder: raw text to a forest of sections
//!
//! Lines matching the heading pattern open heading sections. Everything else
//! is buffered and flushed as a body section whenever the next heading starts
//! or the input ends. Blank lines before the first buffered line are dropped;
//! later blank lines stay part of the body.

use crate::patterns::HEADING_PATTERN;
use sha2::{Digest, Sha256};
use shared_types::{Section, SectionId, SectionMetadata, SectionType};
use std::collections::HashMap;

const BODY_KIND: &str = "body";
const HEADING_KIND: &str = "heading";

/// Split raw text into lines, tolerating CRLF input.
pub fn lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Build the section forest for `raw` in document order.
pub fn build(raw: &str) -> Vec<Section> {
    let mut builder = StructureBuilder::default();
    for (index, line) in lines(raw).enumerate() {
        builder.push_line(index, line);
    }
    builder.finish()
}

#[derive(Debug, Clone)]
struct OpenHeading {
    level: u8,
    id: SectionId,
}

#[derive(Default)]
struct StructureBuilder {
    sections: Vec<Section>,
    open: Vec<OpenHeading>,
    buffer: Vec<String>,
    buffer_start: usize,
    ids: IdAllocator,
}

impl StructureBuilder {
    fn push_line(&mut self, index: usize, line: &str) {
        if let Some(caps) = HEADING_PATTERN.captures(line) {
            let level = caps[1].len() as u8;
            let title = caps[2].trim_end().to_string();
            self.open_heading(index, level, title);
        } else if line.trim().is_empty() {
            if !self.buffer.is_empty() {
                self.buffer.push(line.to_string());
            }
        } else {
            if self.buffer.is_empty() {
                self.buffer_start = index;
            }
            self.buffer.push(line.to_string());
        }
    }

    fn open_heading(&mut self, index: usize, level: u8, title: String) {
        self.flush();

        // Levels need not be contiguous: a level-3 heading nests under an open level-1
        while self.open.last().is_some_and(|h| h.level >= level) {
            self.open.pop();
        }
        let parent_id = self.open.last().map(|h| h.id.clone());
        let id = self
            .ids
            .allocate(parent_id.as_ref(), HEADING_KIND, level, &title);

        self.open.push(OpenHeading {
            level,
            id: id.clone(),
        });
        self.sections.push(Section {
            id,
            level,
            title,
            content: Vec::new(),
            section_type: SectionType::Heading,
            parent_id,
            metadata: SectionMetadata::default(),
            start_line: index,
            end_line: index,
        });
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = std::mem::take(&mut self.buffer);
        let parent = self.open.last();
        let level = parent.map(|h| h.level.saturating_add(1)).unwrap_or(1);
        let parent_id = parent.map(|h| h.id.clone());
        let id = self.ids.allocate(parent_id.as_ref(), BODY_KIND, level, "");

        self.sections.push(Section {
            id,
            level,
            title: String::new(),
            start_line: self.buffer_start,
            end_line: self.buffer_start + content.len() - 1,
            content,
            section_type: SectionType::Paragraph,
            parent_id,
            metadata: SectionMetadata::default(),
        });
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush();
        self.sections
    }
}

/// Hands out position-independent section ids.
///
/// An id fingerprints the parent id, kind, level, title and how many earlier
/// siblings share that key, so inserting or deleting an unrelated section does
/// not shift it.
#[derive(Default)]
struct IdAllocator {
    seen: HashMap<(Option<SectionId>, &'static str, u8, String), u32>,
}

impl IdAllocator {
    fn allocate(
        &mut self,
        parent: Option<&SectionId>,
        kind: &'static str,
        level: u8,
        title: &str,
    ) -> SectionId {
        let ordinal = self
            .seen
            .entry((parent.cloned(), kind, level, title.to_string()))
            .or_insert(0);
        let id = fingerprint(parent, kind, level, title, *ordinal);
        *ordinal += 1;
        id
    }
}

fn fingerprint(
    parent: Option<&SectionId>,
    kind: &str,
    level: u8,
    title: &str,
    ordinal: u32,
) -> SectionId {
    let mut hasher = Sha256::new();
    hasher.update(parent.map(SectionId::as_str).unwrap_or("").as_bytes());
    hasher.update([0u8]);
    hasher.update(kind.as_bytes());
    hasher.update([0u8, level]);
    hasher.update(title.as_bytes());
    hasher.update([0u8]);
    hasher.update(ordinal.to_le_bytes());
    let digest = hasher.finalize();
    SectionId::new(format!("s-{}", hex::encode(&digest[..8])))
}
