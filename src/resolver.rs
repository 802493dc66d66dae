//! File resolution module
//!
//! Maps the path inside a reference to a file on disk.
//!
//! Resolution rules (in order):
//! 1. Absolute path → used as is
//! 2. Relative to the including file's directory
//! 3. Relative to the workspace root
//!
//! With a root configured, a candidate that lands outside it is skipped.
//!
//! Each candidate is tried verbatim, then with every configured extension
//! when the reference has none (`notes/idea` → `notes/idea.md`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants as C;
use crate::util;

/// Resolution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResult {
    /// Absolute path of the resolved file
    Found(PathBuf),
    /// Reason the reference could not be resolved
    Error(String),
}

impl FileResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            FileResult::Found(path) => Some(path),
            FileResult::Error(_) => None,
        }
    }
}

/// Resolves reference paths to files
pub trait FileResolver {
    /// Resolve `reference` as seen from the directory `base_path`
    fn resolve_file_path(&self, reference: &str, base_path: &Path) -> FileResult;

    /// Paths that look like what `reference` meant; empty when nothing matches
    fn get_suggestions(&self, reference: &str) -> Vec<String>;
}

/// Filesystem resolver, optionally confined to a workspace root
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: Option<PathBuf>,
    extensions: Vec<String>,
}

impl FsResolver {
    pub fn new(root: Option<PathBuf>, extensions: Vec<String>) -> Self {
        let root = root.map(|r| util::canonical(&r));
        Self { root, extensions }
    }

    /// Resolver with a workspace root and the default `.md` extension
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(Some(root.into()), vec![C::MARKDOWN_EXTENSION.to_string()])
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Candidate locations in priority order
    fn candidates(&self, reference: &str, base_path: &Path) -> Vec<PathBuf> {
        let reference_path = Path::new(reference);
        if reference_path.is_absolute() {
            return vec![reference_path.to_path_buf()];
        }

        let mut candidates = vec![base_path.join(reference)];
        if let Some(root) = &self.root {
            let from_root = root.join(reference);
            if !candidates.contains(&from_root) {
                candidates.push(from_root);
            }
        }
        candidates
    }

    /// Try a candidate verbatim and then with each extension
    fn find_file(&self, candidate: &Path, reference: &str) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }
        if util::has_extension(reference) {
            return None;
        }

        self.extensions.iter().find_map(|ext| {
            let mut with_ext = candidate.as_os_str().to_owned();
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            with_ext.is_file().then_some(with_ext)
        })
    }

    fn collect_files(&self, dir: &Path, depth: usize, files: &mut Vec<PathBuf>) {
        if depth > C::SUGGESTION_WALK_DEPTH {
            return;
        }
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.filter_map(|e| e.ok()) {
            // Skip hidden files and directories
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                self.collect_files(&path, depth + 1, files);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
}

impl Default for FsResolver {
    fn default() -> Self {
        Self::new(None, vec![C::MARKDOWN_EXTENSION.to_string()])
    }
}

impl FileResolver for FsResolver {
    fn resolve_file_path(&self, reference: &str, base_path: &Path) -> FileResult {
        let reference = util::normalize_reference(reference);
        if reference.is_empty() {
            return FileResult::Error("Empty file reference".to_string());
        }

        let mut outside = None;
        for candidate in self.candidates(&reference, base_path) {
            let Some(found) = self.find_file(&candidate, &reference) else {
                continue;
            };
            let resolved = util::canonical(&found);
            match &self.root {
                Some(root) if !util::is_within(&resolved, root) => {
                    outside.get_or_insert(resolved);
                }
                _ => return FileResult::Found(resolved),
            }
        }

        match outside {
            Some(path) => FileResult::Error(format!(
                "File is outside the workspace: {}",
                util::display_path(&path)
            )),
            None => FileResult::Error(format!("File not found: {}", reference)),
        }
    }

    fn get_suggestions(&self, reference: &str) -> Vec<String> {
        let Some(root) = &self.root else {
            return Vec::new();
        };

        let reference = util::normalize_reference(reference);
        let wanted = Path::new(&reference)
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut files = Vec::new();
        self.collect_files(root, 0, &mut files);

        let mut suggestions: Vec<String> = files
            .iter()
            .filter(|path| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().to_lowercase().starts_with(&wanted))
                    .unwrap_or(false)
            })
            .map(|path| util::display_path(path.strip_prefix(root).unwrap_or(path)))
            .collect();

        suggestions.sort();
        suggestions.truncate(C::MAX_SUGGESTIONS);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("notes/deep")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::write(root.join("index.md"), "# Index").unwrap();
        fs::write(root.join("notes/idea.md"), "idea").unwrap();
        fs::write(root.join("notes/ideas-list.md"), "list").unwrap();
        fs::write(root.join("notes/deep/nested.md"), "nested").unwrap();
        fs::write(root.join(".hidden/idea.md"), "hidden").unwrap();
        temp_dir
    }

    #[test]
    fn test_resolve_relative_to_base() {
        let temp_dir = workspace();
        let resolver = FsResolver::with_root(temp_dir.path());
        let base = temp_dir.path().join("notes");

        let result = resolver.resolve_file_path("idea.md", &base);
        assert_eq!(result, FileResult::Found(util::canonical(&base.join("idea.md"))));
    }

    #[test]
    fn test_resolve_relative_to_root() {
        let temp_dir = workspace();
        let resolver = FsResolver::with_root(temp_dir.path());
        let base = temp_dir.path().join("notes/deep");

        let result = resolver.resolve_file_path("index.md", &base);
        assert!(result.path().unwrap().ends_with("index.md"));
    }

    #[test]
    fn test_resolve_infers_extension() {
        let temp_dir = workspace();
        let resolver = FsResolver::with_root(temp_dir.path());

        let result = resolver.resolve_file_path("notes\\deep\\nested", temp_dir.path());
        assert!(result.path().unwrap().ends_with("nested.md"));
    }

    #[test]
    fn test_resolve_missing() {
        let temp_dir = workspace();
        let resolver = FsResolver::with_root(temp_dir.path());

        match resolver.resolve_file_path("missing.md", temp_dir.path()) {
            FileResult::Error(msg) => assert!(msg.contains("missing.md")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_outside_root_rejected() {
        let temp_dir = workspace();
        let resolver = FsResolver::with_root(temp_dir.path().join("notes"));

        let result = resolver.resolve_file_path("../index.md", &temp_dir.path().join("notes"));
        match result {
            FileResult::Error(msg) => assert!(msg.contains("outside the workspace")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_skips_base_candidate_outside_root() {
        let temp_dir = workspace();
        let notes = temp_dir.path().join("notes");
        fs::write(notes.join("index.md"), "notes index").unwrap();
        let resolver = FsResolver::with_root(notes.clone());

        // `<base>/index.md` exists but lies outside the root; the root copy wins
        let result = resolver.resolve_file_path("index.md", temp_dir.path());
        assert_eq!(
            result,
            FileResult::Found(dunce::canonicalize(notes.join("index.md")).unwrap())
        );
    }

    #[test]
    fn test_resolve_without_root_allows_any_path() {
        let temp_dir = workspace();
        let resolver = FsResolver::default();

        let result = resolver.resolve_file_path("../index.md", &temp_dir.path().join("notes"));
        assert!(result.path().is_some());
    }

    #[test]
    fn test_suggestions() {
        let temp_dir = workspace();
        let resolver = FsResolver::with_root(temp_dir.path());

        let suggestions = resolver.get_suggestions("other/Idea.md");
        assert_eq!(suggestions, vec!["notes/idea.md", "notes/ideas-list.md"]);
        assert!(resolver.get_suggestions("zzz").is_empty());
    }

    #[test]
    fn test_suggestions_without_root() {
        assert!(FsResolver::default().get_suggestions("idea").is_empty());
    }
}
