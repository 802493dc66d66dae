use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// emx-embed - Expand ![[file#heading]] references in markdown notes
///
/// # Quick Reference
///
/// ```bash
/// emx-embed expand prompt.md                 # Expand to stdout
/// emx-embed expand prompt.md -o out.md       # Expand to a file
/// emx-embed expand prompt.md -p topic=Rust   # Fill {{topic}} after expansion
/// emx-embed --json expand prompt.md          # {"status":"success","content":"..."}
/// emx-embed refs prompt.md                   # List references
/// emx-embed headings notes/book.md           # List headings (level, line, id)
/// emx-embed section book.md "Chapter 1" Setup   # Print a nested section
/// emx-embed params prompt.md                 # List {{placeholders}}
/// ```
///
/// ## Reference Syntax
///
/// - `![[notes/idea]]`: whole file (`.md` is tried when no extension is given)
/// - `![[notes/idea.md#Summary]]`: one section, by heading text or `{#id}`
/// - `![[book.md#Chapter 1#Setup]]`: section nested under another
///
/// ## Environment Variables
///
/// - `EMX_EMBED_CONFIG`: Config file path (default: ./.emx-embed.yaml)
/// - `EMX_EMBED_MAX_FILE_SIZE`: Largest includable file in bytes (default: 5 MiB)
/// - `EMX_EMBED_MAX_DEPTH`: Nested inclusion levels (default: 1)
/// - `EMX_EMBED_ROOT`: Workspace root; references may not leave it
#[derive(Parser, Debug)]
#[command(name = "emx-embed")]
#[command(version = "0.1.0")]
#[command(about = "Expand ![[file#heading]] references in markdown notes")]
pub struct Cli {
    /// Config file (default: ./.emx-embed.yaml or $EMX_EMBED_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Workspace root; resolved files must stay inside it
    #[arg(long, global = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Number of nested inclusion levels to expand
    #[arg(long, global = true, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Largest file that may be included, in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Output in JSON format (for scripting/LLM usage)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Show debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand all references in a file
    #[command(alias = "x")]
    Expand {
        /// File to expand
        file: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Placeholder value, as name=value (repeatable)
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// List references found in a file
    Refs {
        file: PathBuf,
    },

    /// List headings found in a file
    #[command(alias = "h")]
    Headings {
        file: PathBuf,
    },

    /// Print the section under a heading (give several for a nested section)
    Section {
        file: PathBuf,

        /// Heading text or custom id, outermost first
        #[arg(required = true)]
        headings: Vec<String>,
    },

    /// List {{placeholders}} in a file
    Params {
        file: PathBuf,
    },
}
