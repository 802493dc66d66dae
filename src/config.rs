//! Configuration loading
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. YAML config file (`--config`, `$EMX_EMBED_CONFIG`, `./.emx-embed.yaml`,
//!    or `<config dir>/emx-embed/config.yaml`, first one found)
//! 3. Environment variables (`EMX_EMBED_MAX_FILE_SIZE`, `EMX_EMBED_MAX_DEPTH`, `EMX_EMBED_ROOT`)
//!
//! CLI flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::engine::ExpandOptions;
use crate::error::{EmbedError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Largest file (in bytes) that may be included
    pub max_file_size: u64,
    /// Number of nested inclusion levels that are expanded
    pub max_depth: usize,
    /// Workspace root; resolved files must stay inside it
    pub root: Option<PathBuf>,
    /// Extensions tried for references without one
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: C::DEFAULT_MAX_FILE_SIZE,
            max_depth: C::DEFAULT_MAX_DEPTH,
            root: None,
            extensions: vec![C::MARKDOWN_EXTENSION.to_string()],
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EmbedError::config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load config from the first available source, then apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_dir = dirs::config_dir();
        Self::load_with(
            explicit,
            |key| std::env::var(key).ok(),
            Path::new("."),
            user_dir.as_deref(),
        )
    }

    /// [`Config::load`] with the variable lookup, working directory and user
    /// config directory supplied by the caller
    pub fn load_with<F>(
        explicit: Option<&Path>,
        lookup: F,
        cwd: &Path,
        user_dir: Option<&Path>,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::locate_with(explicit, &lookup, cwd, user_dir) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_with(&lookup)?;
        Ok(config)
    }

    /// Config file to use, if any: explicit path, `$EMX_EMBED_CONFIG`,
    /// `<cwd>/.emx-embed.yaml`, then `<user_dir>/emx-embed/config.yaml`
    pub fn locate_with<F>(
        explicit: Option<&Path>,
        lookup: F,
        cwd: &Path,
        user_dir: Option<&Path>,
    ) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Some(path) = lookup(C::ENV_CONFIG).filter(|s| !s.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }

        let local = cwd.join(C::CONFIG_FILENAME);
        if local.is_file() {
            return Some(local);
        }

        user_dir
            .map(|dir| dir.join(C::CONFIG_DIR_NAME).join(C::CONFIG_DIR_FILENAME))
            .filter(|path| path.is_file())
    }

    /// Apply overrides from a variable lookup; empty values are ignored
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        if let Some(value) = get(C::ENV_MAX_FILE_SIZE) {
            self.max_file_size = parse_number(C::ENV_MAX_FILE_SIZE, &value)?;
        }
        if let Some(value) = get(C::ENV_MAX_DEPTH) {
            self.max_depth = parse_number(C::ENV_MAX_DEPTH, &value)?;
        }
        if let Some(value) = get(C::ENV_ROOT) {
            self.root = Some(PathBuf::from(value));
        }
        Ok(())
    }

    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            max_file_size: self.max_file_size,
            max_depth: self.max_depth,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| EmbedError::config(format!("{} must be a non-negative integer, got {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_file_size, 5 * 1024 * 1024);
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.extensions, vec![".md"]);
        assert_eq!(config.expand_options(), ExpandOptions::default());
    }

    #[test]
    fn test_yaml_partial() {
        let config = Config::from_yaml_str("max_depth: 3\nroot: /notes\n").unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.root, Some(PathBuf::from("/notes")));
        assert_eq!(config.max_file_size, C::DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_yaml_empty() {
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_yaml_invalid() {
        let err = Config::from_yaml_str("max_depth: lots").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "max_file_size: 1048576\nextensions: [\".md\", \".txt\"]\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.max_file_size, 1024 * 1024);
        assert_eq!(config.extensions, vec![".md", ".txt"]);

        let err = Config::from_file(&temp_dir.path().join("missing.yaml")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("embed.yaml");
        fs::write(&path, "max_depth: 4\n").unwrap();

        let config = Config::load_with(Some(&path), env(&[]), temp_dir.path(), None).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_file_size, C::DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_load_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("embed.yaml");
        fs::write(&path, "max_depth: 4\nmax_file_size: 100\n").unwrap();

        let config = Config::load_with(
            Some(&path),
            env(&[(C::ENV_MAX_DEPTH, "7")]),
            temp_dir.path(),
            None,
        )
        .unwrap();
        assert_eq!(config.max_depth, 7);
        assert_eq!(config.max_file_size, 100);
    }

    #[test]
    fn test_load_without_any_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_with(None, env(&[]), temp_dir.path(), Some(temp_dir.path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_locate_priority() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let cwd = root.join("cwd");
        let user = root.join("user");
        fs::create_dir_all(&cwd).unwrap();
        fs::create_dir_all(user.join(C::CONFIG_DIR_NAME)).unwrap();

        let explicit = root.join("explicit.yaml");
        let from_env = root.join("env.yaml");
        let local = cwd.join(C::CONFIG_FILENAME);
        let user_file = user.join(C::CONFIG_DIR_NAME).join(C::CONFIG_DIR_FILENAME);
        for path in [&explicit, &from_env, &local, &user_file] {
            fs::write(path, "max_depth: 2\n").unwrap();
        }
        let env_path = from_env.to_string_lossy().to_string();
        let (explicit, from_env, local) = (explicit.as_path(), from_env.as_path(), local.as_path());
        let (user, user_file) = (user.as_path(), user_file.as_path());

        // (explicit, $EMX_EMBED_CONFIG, local file present, user dir, expected)
        let cases: Vec<(Option<&Path>, Option<&str>, bool, Option<&Path>, Option<&Path>)> = vec![
            (Some(explicit), Some(env_path.as_str()), true, Some(user), Some(explicit)),
            (None, Some(env_path.as_str()), true, Some(user), Some(from_env)),
            (None, Some(""), true, Some(user), Some(local)),
            (None, None, true, Some(user), Some(local)),
            (None, None, false, Some(user), Some(user_file)),
            (None, None, false, None, None),
            (None, None, false, Some(cwd.as_path()), None),
        ];

        for (i, (explicit, env_value, local_present, user_dir, expected)) in cases.into_iter().enumerate() {
            let pairs: Vec<(&str, &str)> = env_value.map(|v| (C::ENV_CONFIG, v)).into_iter().collect();
            let dir = if local_present { cwd.as_path() } else { root };
            let found = Config::locate_with(explicit, env(&pairs), dir, user_dir);
            assert_eq!(found.as_deref(), expected, "case {}", i);
        }
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_with(env(&[
                (C::ENV_MAX_FILE_SIZE, "1024"),
                (C::ENV_MAX_DEPTH, " 2 "),
                (C::ENV_ROOT, "/ws"),
            ]))
            .unwrap();

        assert_eq!(config.max_file_size, 1024);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.root, Some(PathBuf::from("/ws")));
    }

    #[test]
    fn test_env_empty_values_ignored() {
        let mut config = Config::default();
        config
            .apply_env_with(env(&[(C::ENV_MAX_DEPTH, ""), (C::ENV_ROOT, "  ")]))
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_invalid_number() {
        let mut config = Config::default();
        let err = config
            .apply_env_with(env(&[(C::ENV_MAX_DEPTH, "-1")]))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(err.message.contains(C::ENV_MAX_DEPTH));
    }
}
