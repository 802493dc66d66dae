//! Logger collaborator
//!
//! The engine reports token-local failures through a [`Logger`] it is given,
//! so hosts decide where warnings go.

use std::cell::RefCell;

/// Sink for warnings and errors raised during expansion
pub trait Logger {
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "emx_embed", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "emx_embed", "{}", message);
    }
}

/// Severity of a recorded message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Error,
}

/// Records messages in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: RefCell<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Level::Error)
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn warn(&self, message: &str) {
        self.entries.borrow_mut().push((Level::Warn, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries.borrow_mut().push((Level::Error, message.to_string()));
    }
}
