//! Section tree back to flat text
//!
//! Editing goes through here only: replace one section's text, flatten the
//! tree, and re-parse the result. Blank lines the structure builder dropped
//! are restored from the gaps between section line ranges.

use crate::error::{EngineError, EngineResult};
use crate::tree;
use shared_types::{Section, SectionId};
use tracing::{debug, instrument, warn};

/// Replace the text of `section_id` (see [`Section::text`]) with `new_content`
/// and return the whole document. An empty `new_content` removes the section's
/// lines.
#[instrument(skip_all, fields(section_id = %section_id, sections = tree.len()))]
pub fn serialize(tree: &[Section], section_id: &SectionId, new_content: &str) -> EngineResult<String> {
    if tree::find(tree, section_id).is_none() {
        warn!("serialize requested for a section that is not in the tree");
        return Err(EngineError::SectionNotFound {
            section_id: section_id.clone(),
        });
    }

    let raw = render(tree, 0, Some((section_id, new_content)));
    debug!(bytes = raw.len(), "document serialized");
    Ok(raw)
}

/// The whole document as flat text.
pub fn render_document(tree: &[Section]) -> String {
    render(tree, 0, None)
}

/// A heading with all of its descendants, or a single body section, as flat text.
pub fn extract_section(tree: &[Section], section_id: &SectionId) -> EngineResult<String> {
    let sections = tree::subtree(tree, section_id).ok_or_else(|| EngineError::SectionNotFound {
        section_id: section_id.clone(),
    })?;
    Ok(render(sections, sections[0].start_line, None))
}

/// Flatten `sections`, emitting blank lines for gaps between line ranges.
/// `first_line` is the line the output starts at.
fn render(
    sections: &[Section],
    first_line: usize,
    replacement: Option<(&SectionId, &str)>,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut next_line = first_line;

    for section in sections {
        let gap = section.start_line.saturating_sub(next_line);
        lines.extend(std::iter::repeat(String::new()).take(gap));
        next_line = next_line.max(section.end_line.saturating_add(1));

        match replacement {
            Some((id, text)) if *id == section.id => {
                if !text.is_empty() {
                    lines.extend(text.split('\n').map(String::from));
                }
            }
            _ if section.is_heading() => lines.push(section.text()),
            _ => lines.extend(section.content.iter().cloned()),
        }
    }

    lines.join("\n")
}
