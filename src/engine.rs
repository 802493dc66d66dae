//! ExpansionEngine - recursive reference expansion
//!
//! Replaces every `![[...]]` token in a text with the content it points at,
//! expanding references inside included content recursively.
//!
//! Guard rails:
//! - a file already on the current inclusion chain is a cycle and is not entered
//! - past the configured depth, content is included without further expansion
//! - files above the size ceiling are never read
//!
//! Failures at one token are rendered inline and never affect its siblings.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants as C;
use crate::error::{EmbedError, ErrorKind, ExpandResult, Result};
use crate::logger::Logger;
use crate::reader::FileReader;
use crate::reference::{self, ReferenceToken, REFERENCE_PATTERN};
use crate::resolver::{FileResolver, FileResult};
use crate::section;
use crate::util;

// === Options and State ===

/// Limits applied during one expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Largest file (in bytes) that may be included
    pub max_file_size: u64,
    /// Number of nested inclusion levels that are expanded
    pub max_depth: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_file_size: C::DEFAULT_MAX_FILE_SIZE,
            max_depth: C::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Inclusion chain of one recursion branch.
///
/// Descending copies the state, so siblings never see each other's files
/// while children inherit their ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    visited: HashSet<PathBuf>,
    depth: usize,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose chain already contains the document being expanded
    pub fn rooted_at(path: impl Into<PathBuf>) -> Self {
        let mut state = Self::new();
        state.visited.insert(path.into());
        state
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_visited(&self, path: &Path) -> bool {
        self.visited.contains(path)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// State for expanding the content of `path` one level down
    pub fn descend(&self, path: PathBuf) -> Self {
        let mut visited = self.visited.clone();
        visited.insert(path);
        Self {
            visited,
            depth: self.depth + 1,
        }
    }
}

// === Markers ===

fn not_found_marker(file_path: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("[{}: {}]", C::MARKER_NOT_FOUND, file_path)
    } else {
        format!(
            "[{}: {} (did you mean: {})]",
            C::MARKER_NOT_FOUND,
            file_path,
            suggestions.join(", ")
        )
    }
}

fn too_large_marker(file_path: &str, size: u64, limit: u64) -> String {
    format!(
        "[{}: {} ({} bytes, limit {} bytes)]",
        C::MARKER_TOO_LARGE,
        file_path,
        size,
        limit
    )
}

fn circular_marker(original_text: &str) -> String {
    format!("[{}: {}]", C::MARKER_CIRCULAR, original_text)
}

fn read_error_marker(file_path: &str, err: &EmbedError) -> String {
    format!("[{}: {}: {}]", C::MARKER_READ_ERROR, file_path, err)
}

// === ExpansionEngine ===

/// Expands reference tokens using injected collaborators
pub struct ExpansionEngine<'a> {
    resolver: &'a dyn FileResolver,
    reader: &'a dyn FileReader,
    logger: &'a dyn Logger,
    options: ExpandOptions,
}

impl<'a> ExpansionEngine<'a> {
    /// Create a new ExpansionEngine
    pub fn new(
        resolver: &'a dyn FileResolver,
        reader: &'a dyn FileReader,
        logger: &'a dyn Logger,
        options: ExpandOptions,
    ) -> Self {
        Self {
            resolver,
            reader,
            logger,
            options,
        }
    }

    /// Expand every reference in `text`, resolving relative to `base_path`.
    ///
    /// Only failures that are not token-local are returned as errors.
    pub fn expand(&self, text: &str, base_path: &Path) -> Result<String> {
        self.expand_from(text, base_path, &ExpansionState::new())
    }

    /// Expand `text` continuing from an existing inclusion chain
    pub fn expand_from(&self, text: &str, base_path: &Path, state: &ExpansionState) -> Result<String> {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for m in REFERENCE_PATTERN.find_iter(text) {
            output.push_str(&text[last..m.start()]);
            let token = reference::parse(m.as_str());
            let replacement = self.expand_token(&token, base_path, state)?;
            output.push_str(&replacement);
            last = m.end();
        }

        output.push_str(&text[last..]);
        Ok(output)
    }

    /// Like [`expand`](Self::expand), with every failure folded into the result
    pub fn expand_files(&self, text: &str, base_path: &Path) -> ExpandResult {
        self.expand_files_from(text, base_path, &ExpansionState::new())
    }

    pub fn expand_files_from(&self, text: &str, base_path: &Path, state: &ExpansionState) -> ExpandResult {
        let result = self.expand_from(text, base_path, state);
        if let Err(err) = &result {
            self.logger.error(&format!("Expansion failed: {}", err));
        }
        result.into()
    }

    /// Produce the replacement text for one token
    fn expand_token(&self, token: &ReferenceToken, base_path: &Path, state: &ExpansionState) -> Result<String> {
        if token.is_malformed() {
            debug!(token = %token.original_text, "Skipping malformed reference");
            return Ok(token.original_text.clone());
        }

        let resolved = match self.resolver.resolve_file_path(&token.file_path, base_path) {
            FileResult::Found(path) => path,
            FileResult::Error(reason) => {
                let suggestions = self.resolver.get_suggestions(&token.file_path);
                self.logger.warn(&format!(
                    "{}: {} ({})",
                    ErrorKind::NotFound,
                    token.file_path,
                    reason
                ));
                return Ok(not_found_marker(&token.file_path, &suggestions));
            }
        };

        if state.is_visited(&resolved) {
            self.logger.warn(&format!(
                "{}: {} includes itself through {}",
                ErrorKind::CircularReference,
                util::display_path(&resolved),
                token.original_text
            ));
            return Ok(circular_marker(&token.original_text));
        }

        let shallow = state.depth() + 1 > self.options.max_depth;

        let size = match self.reader.stat_size(&resolved) {
            Ok(size) => size,
            Err(err) => return self.read_failure(token, err),
        };
        if size > self.options.max_file_size {
            self.logger.warn(&format!(
                "{}: {} is {} bytes, limit is {} bytes",
                ErrorKind::OversizedFile,
                token.file_path,
                size,
                self.options.max_file_size
            ));
            return Ok(too_large_marker(&token.file_path, size, self.options.max_file_size));
        }

        let content = match self.reader.read_text(&resolved) {
            Ok(content) => content,
            Err(err) => return self.read_failure(token, err),
        };

        let content = match token.heading_path.as_deref() {
            None => content,
            Some(heading_path) => match section::extract_nested_section(&content, heading_path) {
                Some(section) => section,
                None => {
                    self.logger.warn(&format!(
                        "{}: '{}' in {}",
                        ErrorKind::HeadingNotFound,
                        heading_path.join("#"),
                        token.file_path
                    ));
                    return Ok(token.original_text.clone());
                }
            },
        };

        if shallow {
            if reference::has_references(&content) {
                self.logger.warn(&format!(
                    "{}: references in {} left unexpanded (max depth {})",
                    ErrorKind::RecursionDepthExceeded,
                    token.file_path,
                    self.options.max_depth
                ));
            }
            return Ok(content);
        }

        debug!(
            path = %util::display_path(&resolved),
            depth = state.depth() + 1,
            "Expanding included file"
        );
        let child_base = util::parent_dir(&resolved);
        let child_state = state.descend(resolved);
        self.expand_from(&content, &child_base, &child_state)
    }

    /// Token-local read failures become a marker; anything else escalates
    fn read_failure(&self, token: &ReferenceToken, err: EmbedError) -> Result<String> {
        if !err.is_token_local() {
            return Err(err);
        }
        self.logger.warn(&format!("{}: {}: {}", err.kind, token.file_path, err));
        Ok(read_error_marker(&token.file_path, &err))
    }
}
