//! Section extraction
//!
//! A section runs from its heading line up to (not including) the next heading
//! of equal or higher rank. Deeper headings belong to the section.

use std::ops::Range;

use crate::markdown::{self, HeadingInfo};

/// Located section: target heading and its byte span in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: HeadingInfo,
    pub start: usize,
    pub end: usize,
}

impl Section {
    /// Section text, trimmed
    pub fn text<'a>(&self, content: &'a str) -> &'a str {
        content[self.start..self.end].trim()
    }
}

/// Strip a leading `#`/whitespace run from a heading query
fn normalize_query(text_or_id: &str) -> &str {
    text_or_id
        .trim_start_matches(|c: char| c == '#' || c.is_whitespace())
        .trim()
}

/// Locate a section among `headings`, searching only headings that start
/// inside `bounds` and come after line `after_line`.
fn locate_in(
    headings: &[HeadingInfo],
    query: &str,
    bounds: Range<usize>,
    after_line: Option<usize>,
) -> Option<Section> {
    let candidates: Vec<HeadingInfo> = headings
        .iter()
        .filter(|h| bounds.contains(&h.offset))
        .filter(|h| after_line.map_or(true, |line| h.line_index > line))
        .cloned()
        .collect();

    let target = markdown::find_heading(&candidates, query)?.clone();
    Some(span_of(headings, target, bounds.end))
}

/// Section for `target`, ending at the next heading of equal or higher rank
fn span_of(headings: &[HeadingInfo], target: HeadingInfo, limit: usize) -> Section {
    let end = headings
        .iter()
        .find(|h| h.line_index > target.line_index && h.level <= target.level)
        .map_or(limit, |h| h.offset)
        .min(limit);

    Section {
        start: target.offset,
        end,
        heading: target,
    }
}

/// Locate the section for `text_or_id` in `content`
pub fn locate_section(content: &str, text_or_id: &str) -> Option<Section> {
    let query = normalize_query(text_or_id);
    let headings = markdown::detect_headings(content);
    locate_in(&headings, query, 0..content.len(), None)
}

/// Locate a nested section by walking `heading_path` from the outermost heading
pub fn locate_nested_section<S: AsRef<str>>(content: &str, heading_path: &[S]) -> Option<Section> {
    let headings = markdown::detect_headings(content);
    let mut bounds = 0..content.len();
    let mut after_line = None;
    let mut section = None;

    for segment in heading_path {
        let query = normalize_query(segment.as_ref());
        let found = locate_in(&headings, query, bounds.clone(), after_line)?;
        bounds = found.start..found.end;
        after_line = Some(found.heading.line_index);
        section = Some(found);
    }

    section
}

/// Extract the section for a heading text or custom id.
///
/// An empty query means no section filter: the whole content is returned.
pub fn extract_section(content: &str, text_or_id: &str) -> Option<String> {
    if normalize_query(text_or_id).is_empty() {
        return Some(content.to_string());
    }

    locate_section(content, text_or_id).map(|section| section.text(content).to_string())
}

/// Extract the innermost section addressed by `heading_path`.
///
/// Each segment is looked up only within the span of the previous one.
pub fn extract_nested_section<S: AsRef<str>>(content: &str, heading_path: &[S]) -> Option<String> {
    match heading_path {
        [] => Some(content.to_string()),
        [single] => extract_section(content, single.as_ref()),
        _ => locate_nested_section(content, heading_path).map(|section| section.text(content).to_string()),
    }
}

/// Every heading in document order, each with the span of its section
pub fn outline(content: &str) -> Vec<Section> {
    let headings = markdown::detect_headings(content);
    headings
        .iter()
        .map(|h| span_of(&headings, h.clone(), content.len()))
        .collect()
}
