//! Section command module

use std::io;
use std::path::Path;

use emx_embed::{extract_nested_section, util};

pub fn run(json: bool, file: &Path, headings: &[String]) -> io::Result<()> {
    let content = util::read_text_file(file)?;

    let Some(section) = extract_nested_section(&content, headings) else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Heading '{}' not found in {}", headings.join("#"), util::display_path(file)),
        ));
    };

    if json {
        println!("{}", serde_json::json!({ "section": section }));
    } else {
        println!("{}", section);
    }
    Ok(())
}
