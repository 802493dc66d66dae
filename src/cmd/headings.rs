//! Headings command module

use std::io;
use std::path::Path;

use emx_embed::{detect_headings, section, util};

pub fn run(json: bool, file: &Path) -> io::Result<()> {
    let content = util::read_text_file(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detect_headings(&content))?);
        return Ok(());
    }

    for entry in section::outline(&content) {
        let heading = &entry.heading;
        let first = heading.line_index + 1;
        let last = content[..entry.end].trim_end().lines().count();
        let indent = "  ".repeat(heading.level.saturating_sub(1));
        match &heading.id {
            Some(id) => println!("{:>5}-{:<5} {}{} {{#{}}}", first, last, indent, heading.text, id),
            None => println!("{:>5}-{:<5} {}{}", first, last, indent, heading.text),
        }
    }

    Ok(())
}
