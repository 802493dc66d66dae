//! Reference token parsing
//!
//! A reference is an inline `![[...]]` marker. Three shapes exist:
//!
//! - `![[path]]` includes the whole file
//! - `![[path#heading]]` includes one section (heading text or custom id)
//! - `![[path#parent#child]]` includes a section nested under another
//!
//! Parsing never fails; it degrades to the most conservative classification.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Pattern used to discover reference spans in a document
pub static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[(.*?)(?:#(.*?))?\]\]").expect("reference pattern is valid"));

const OPEN: &str = "![[";
const CLOSE: &str = "]]";

/// Shape of a reference token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    FileOnly,
    SingleHeading,
    NestedHeading,
}

/// Parsed reference token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceToken {
    pub kind: RefKind,
    /// Referenced file, trimmed; empty for malformed tokens
    pub file_path: String,
    /// Heading path; `None` iff `kind` is `FileOnly`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_path: Option<Vec<String>>,
    /// Exact matched text
    pub original_text: String,
}

impl ReferenceToken {
    fn file_only(file_path: String, original_text: String) -> Self {
        Self {
            kind: RefKind::FileOnly,
            file_path,
            heading_path: None,
            original_text,
        }
    }

    /// True when the token carries no usable file path
    pub fn is_malformed(&self) -> bool {
        self.file_path.is_empty()
    }
}

/// A reference token together with its byte span in the scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    pub start: usize,
    pub end: usize,
    pub token: ReferenceToken,
}

/// Parse the first `![[...]]` span in `token`
pub fn parse(token: &str) -> ReferenceToken {
    let Some(open) = token.find(OPEN) else {
        return ReferenceToken::file_only(String::new(), token.to_string());
    };
    let after_open = &token[open + OPEN.len()..];
    let Some(close) = after_open.find(CLOSE) else {
        return ReferenceToken::file_only(String::new(), token.to_string());
    };

    let inner = &after_open[..close];
    let original_text = token[open..open + OPEN.len() + close + CLOSE.len()].to_string();

    let Some(hash) = inner.find('#') else {
        return ReferenceToken::file_only(inner.trim().to_string(), original_text);
    };

    let file_path = inner[..hash].trim().to_string();
    let heading_path = split_heading_path(&inner[hash + 1..]);

    match heading_path.len() {
        // Dangling `#`: no section filter
        0 => ReferenceToken::file_only(file_path, original_text),
        1 => ReferenceToken {
            kind: RefKind::SingleHeading,
            file_path,
            heading_path: Some(heading_path),
            original_text,
        },
        _ => ReferenceToken {
            kind: RefKind::NestedHeading,
            file_path,
            heading_path: Some(heading_path),
            original_text,
        },
    }
}

/// Split the part after the first `#` into heading path segments.
///
/// A `"# "` sequence marks heading text that itself contains a hash
/// (`Section # 1`), so the whole remainder is kept as one segment.
fn split_heading_path(heading_content: &str) -> Vec<String> {
    if heading_content.contains("# ") {
        let heading = heading_content.trim();
        return if heading.is_empty() {
            Vec::new()
        } else {
            vec![heading.to_string()]
        };
    }

    heading_content
        .split('#')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find every reference token in `text`, left to right, non-overlapping
pub fn find_references(text: &str) -> Vec<ReferenceMatch> {
    REFERENCE_PATTERN
        .find_iter(text)
        .map(|m| ReferenceMatch {
            start: m.start(),
            end: m.end(),
            token: parse(m.as_str()),
        })
        .collect()
}

/// Whether `text` contains at least one reference token
pub fn has_references(text: &str) -> bool {
    REFERENCE_PATTERN.is_match(text)
}
