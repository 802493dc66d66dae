//! Refs command module

use std::io;
use std::path::Path;

use emx_embed::{find_references, util, RefKind};

pub fn run(json: bool, file: &Path) -> io::Result<()> {
    let content = util::read_text_file(file)?;
    let tokens: Vec<_> = find_references(&content).into_iter().map(|m| m.token).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    for token in &tokens {
        let kind = match token.kind {
            RefKind::FileOnly => "file",
            RefKind::SingleHeading => "heading",
            RefKind::NestedHeading => "nested",
        };
        match &token.heading_path {
            Some(path) => println!("{}\t{}\t{}", kind, token.file_path, path.join(" > ")),
            None => println!("{}\t{}", kind, token.file_path),
        }
    }

    Ok(())
}
