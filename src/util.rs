//! Path helpers shared by the resolver and the CLI

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Normalize a reference path: trim and use forward slashes
pub fn normalize_reference(reference: &str) -> String {
    reference.trim().replace('\\', "/")
}

/// Whether the final path component carries an extension
pub fn has_extension(reference: &str) -> bool {
    Path::new(reference).extension().is_some()
}

/// Canonicalize without UNC prefixes on Windows; falls back to the input
pub fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Check that `path` stays inside `root` once both are canonicalized
pub fn is_within(path: &Path, root: &Path) -> bool {
    canonical(path).starts_with(canonical(root))
}

/// Directory containing `file`, or `.` when it has none
pub fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read a text file, naming the file in the error
pub fn read_text_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).map_err(|e| {
        io::Error::new(e.kind(), format!("Failed to read '{}': {}", display_path(path), e))
    })
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
