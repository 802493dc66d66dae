//! Constants for emx-embed
//!
//! Default limits, inline marker texts, and environment/config names shared
//! by the library and the CLI.

// === Limits ===

/// Default maximum size of an included file: 5 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Default maximum number of nested inclusion levels
pub const DEFAULT_MAX_DEPTH: usize = 1;

/// How deep `FsResolver` walks the workspace when collecting suggestions
pub const SUGGESTION_WALK_DEPTH: usize = 8;

/// Maximum number of suggestions reported for a missing file
pub const MAX_SUGGESTIONS: usize = 5;

// === File Names and Extensions ===

/// Default file extension tried for references without one
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Config file looked up in the working directory
pub const CONFIG_FILENAME: &str = ".emx-embed.yaml";

/// Config directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "emx-embed";

/// Config file name inside `CONFIG_DIR_NAME`
pub const CONFIG_DIR_FILENAME: &str = "config.yaml";

// === Environment Variables ===

pub const ENV_CONFIG: &str = "EMX_EMBED_CONFIG";
pub const ENV_MAX_FILE_SIZE: &str = "EMX_EMBED_MAX_FILE_SIZE";
pub const ENV_MAX_DEPTH: &str = "EMX_EMBED_MAX_DEPTH";
pub const ENV_ROOT: &str = "EMX_EMBED_ROOT";

// === Inline Markers ===

/// Prefix of the marker replacing a reference whose file cannot be found
pub const MARKER_NOT_FOUND: &str = "File not found";

/// Prefix of the marker replacing a reference to an oversized file
pub const MARKER_TOO_LARGE: &str = "File too large";

/// Prefix of the marker replacing a reference that closes a cycle
pub const MARKER_CIRCULAR: &str = "Circular reference";

/// Prefix of the marker replacing a reference whose file could not be read
pub const MARKER_READ_ERROR: &str = "Error reading file";
