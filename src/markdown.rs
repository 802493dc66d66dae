//! Markdown heading detection
//!
//! Only ATX headings (`#` runs at line start) are recognized. A heading may end
//! with a custom id annotation: `## Setup {#install}`. There is no awareness of
//! fenced code blocks; a matching line inside a fence is still a heading.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,7})\s+([^{]+)(?:\s+\{#([a-zA-Z0-9_-]+)\})?$").expect("heading pattern is valid")
});

/// Represents a markdown heading line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingInfo {
    /// Heading level (1-7)
    pub level: usize,
    /// Heading text without the id annotation
    pub text: String,
    /// The line as it appears in the document
    pub raw_line: String,
    /// Zero-based line number
    pub line_index: usize,
    /// Byte offset of the start of the line
    pub offset: usize,
    /// Custom id from a trailing `{#id}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Parse a single line as a heading, if it is one
pub fn parse_heading_line(line: &str) -> Option<(usize, String, Option<String>)> {
    let caps = HEADING_PATTERN.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    let text = caps.get(2)?.as_str().trim().to_string();
    let id = caps.get(3).map(|m| m.as_str().to_string());
    Some((level, text, id))
}

/// Detect all headings in document order
pub fn detect_headings(content: &str) -> Vec<HeadingInfo> {
    let mut headings = Vec::new();
    let mut offset = 0;

    for (line_index, segment) in content.split_inclusive('\n').enumerate() {
        let line = segment.trim_end_matches('\n').trim_end_matches('\r');

        if let Some((level, text, id)) = parse_heading_line(line) {
            headings.push(HeadingInfo {
                level,
                text,
                raw_line: line.to_string(),
                line_index,
                offset,
                id,
            });
        }

        offset += segment.len();
    }

    headings
}

/// First heading whose custom id equals `id` exactly
pub fn find_by_id<'a>(headings: &'a [HeadingInfo], id: &str) -> Option<&'a HeadingInfo> {
    headings.iter().find(|h| h.id.as_deref() == Some(id))
}

/// First heading whose text equals `text`, ignoring case
pub fn find_by_text<'a>(headings: &'a [HeadingInfo], text: &str) -> Option<&'a HeadingInfo> {
    let wanted = text.to_lowercase();
    headings.iter().find(|h| h.text.to_lowercase() == wanted)
}

/// Look a heading up by custom id, then by text
pub fn find_heading<'a>(headings: &'a [HeadingInfo], text_or_id: &str) -> Option<&'a HeadingInfo> {
    find_by_id(headings, text_or_id).or_else(|| find_by_text(headings, text_or_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_headings() {
        let content = "# Main Title\nintro\n## Section 1\n### Subsection\ntext";
        let headings = detect_headings(content);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].text, "Main Title");
        assert_eq!(headings[0].line_index, 0);
        assert_eq!(headings[1].level, 2);
        assert_eq!(headings[1].line_index, 2);
        assert_eq!(headings[2].level, 3);
        assert_eq!(headings[2].raw_line, "### Subsection");
    }

    #[test]
    fn test_heading_offsets() {
        let content = "intro\n## A\nbody\n## B\n";
        let headings = detect_headings(content);
        assert_eq!(headings[0].offset, 6);
        assert_eq!(&content[headings[1].offset..], "## B\n");
    }

    #[test]
    fn test_crlf_lines() {
        let headings = detect_headings("# One\r\ntext\r\n## Two {#two}\r\n");
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text, "One");
        assert_eq!(headings[1].id.as_deref(), Some("two"));
    }

    #[test]
    fn test_custom_id() {
        let (level, text, id) = parse_heading_line("## Getting Started {#start_here}").unwrap();
        assert_eq!(level, 2);
        assert_eq!(text, "Getting Started");
        assert_eq!(id.as_deref(), Some("start_here"));
    }

    #[test]
    fn test_level_seven_and_beyond() {
        assert_eq!(parse_heading_line("####### Deep").map(|h| h.0), Some(7));
        assert!(parse_heading_line("######## Too deep").is_none());
    }

    #[test]
    fn test_not_headings() {
        assert!(parse_heading_line("#NoSpace").is_none());
        assert!(parse_heading_line("text # not heading").is_none());
        assert!(parse_heading_line(" # indented").is_none());
        assert!(parse_heading_line("## Brace {not an id}").is_none());
        assert!(parse_heading_line("##").is_none());
    }

    #[test]
    fn test_heading_text_with_hash() {
        let (_, text, id) = parse_heading_line("## Section # 1").unwrap();
        assert_eq!(text, "Section # 1");
        assert_eq!(id, None);
    }

    #[test]
    fn test_find_heading_prefers_id() {
        let headings = detect_headings("## Intro {#main}\nA\n## main\nB");
        let found = find_heading(&headings, "main").unwrap();
        assert_eq!(found.text, "Intro");
        assert_eq!(find_by_text(&headings, "MAIN").unwrap().line_index, 2);
    }

    #[test]
    fn test_find_by_id_is_case_sensitive() {
        let headings = detect_headings("## Intro {#Main}");
        assert!(find_by_id(&headings, "main").is_none());
        assert!(find_by_id(&headings, "Main").is_some());
    }

    #[test]
    fn test_find_heading_first_duplicate() {
        let headings = detect_headings("## Dup\nA\n## Dup\nB");
        assert_eq!(find_heading(&headings, "dup").unwrap().line_index, 0);
    }
}
