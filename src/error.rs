//! Error types for reference expansion
//!
//! Every failure is an [`EmbedError`]: a [`ErrorKind`] tag plus a readable
//! message. The engine matches on the kind to decide whether a failure stays
//! local to one reference token or aborts the whole expansion call.

use serde::Serialize;
use thiserror::Error;

/// Classification of an expansion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Token parsed to an empty file path
    MalformedReference,
    /// Resolver could not locate the referenced file
    NotFound,
    /// Heading (or nested heading path) not present in the file
    HeadingNotFound,
    /// File size exceeds the configured ceiling
    OversizedFile,
    /// File already on the active inclusion chain
    CircularReference,
    /// Configured recursion depth reached
    RecursionDepthExceeded,
    /// Filesystem failure while reading
    Io,
    /// Invalid configuration value or file
    Config,
    /// Anything else; indicates a logic fault rather than bad data
    Unexpected,
}

impl ErrorKind {
    /// Whether the engine recovers from this kind at the token that raised it.
    ///
    /// Token-local failures are rendered inline and never abort sibling
    /// references. The remaining kinds escalate to a call-level failure.
    pub fn is_token_local(self) -> bool {
        !matches!(self, ErrorKind::Config | ErrorKind::Unexpected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MalformedReference => "malformed reference",
            ErrorKind::NotFound => "not found",
            ErrorKind::HeadingNotFound => "heading not found",
            ErrorKind::OversizedFile => "file too large",
            ErrorKind::CircularReference => "circular reference",
            ErrorKind::RecursionDepthExceeded => "recursion depth exceeded",
            ErrorKind::Io => "I/O error",
            ErrorKind::Config => "configuration error",
            ErrorKind::Unexpected => "unexpected error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by expansion and its collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EmbedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl EmbedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    pub fn is_token_local(&self) -> bool {
        self.kind.is_token_local()
    }
}

impl From<std::io::Error> for EmbedError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            _ => ErrorKind::Io,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<serde_yaml::Error> for EmbedError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config(format!("Invalid config: {}", err))
    }
}

impl From<EmbedError> for std::io::Error {
    fn from(err: EmbedError) -> Self {
        std::io::Error::other(err)
    }
}

pub type Result<T> = std::result::Result<T, EmbedError>;

/// Outcome of a top-level expansion that never panics or propagates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpandResult {
    Success { content: String },
    Failure { error: String },
}

impl ExpandResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExpandResult::Success { .. })
    }

    /// Expanded content, if the call succeeded
    pub fn content(&self) -> Option<&str> {
        match self {
            ExpandResult::Success { content } => Some(content),
            ExpandResult::Failure { .. } => None,
        }
    }
}

impl From<Result<String>> for ExpandResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(content) => ExpandResult::Success { content },
            Err(err) => ExpandResult::Failure {
                error: err.to_string(),
            },
        }
    }
}
