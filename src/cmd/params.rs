//! Params command module

use std::io;
use std::path::Path;

use emx_embed::{params::find_params, util};

pub fn run(json: bool, file: &Path) -> io::Result<()> {
    let content = util::read_text_file(file)?;
    let names = find_params(&content);

    if json {
        println!("{}", serde_json::to_string(&names)?);
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}
