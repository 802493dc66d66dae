pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod logger;
pub mod markdown;
pub mod params;
pub mod reader;
pub mod reference;
pub mod resolver;
pub mod section;
pub mod util;

pub use cli::{Cli, Command};
pub use config::Config;
pub use engine::{ExpandOptions, ExpansionEngine, ExpansionState};
pub use error::{EmbedError, ErrorKind, ExpandResult, Result};
pub use logger::{Logger, MemoryLogger, TracingLogger};
pub use markdown::{detect_headings, find_by_id, find_by_text, find_heading, HeadingInfo};
pub use reader::{CachedReader, FileReader, FsReader};
pub use reference::{find_references, parse as parse_reference, RefKind, ReferenceToken};
pub use resolver::{FileResolver, FileResult, FsResolver};
pub use section::{extract_nested_section, extract_section};
