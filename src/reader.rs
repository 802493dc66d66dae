//! File reading collaborators
//!
//! [`FsReader`] reads straight from disk. [`CachedReader`] keeps decoded
//! contents keyed by path and modification time, so an unchanged file is
//! read once across many expansions.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

/// Reads files for the engine
pub trait FileReader {
    /// Size of the file in bytes
    fn stat_size(&self, path: &Path) -> Result<u64>;

    /// Full file content decoded as UTF-8
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Uncached filesystem reader
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl FileReader for FsReader {
    fn stat_size(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    modified: SystemTime,
    content: String,
}

/// Filesystem reader with a content cache keyed by path and mtime
#[derive(Debug, Default)]
pub struct CachedReader {
    entries: RefCell<HashMap<PathBuf, CacheEntry>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl CachedReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reads served from the cache
    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    /// Number of reads that went to disk
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl FileReader for CachedReader {
    fn stat_size(&self, path: &Path) -> Result<u64> {
        FsReader.stat_size(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let modified = fs::metadata(path)?.modified()?;

        if let Some(entry) = self.entries.borrow().get(path) {
            if entry.modified == modified {
                self.hits.set(self.hits.get() + 1);
                return Ok(entry.content.clone());
            }
        }

        self.misses.set(self.misses.get() + 1);
        let content = fs::read_to_string(path)?;
        self.entries.borrow_mut().insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                content: content.clone(),
            },
        );
        Ok(content)
    }
}
