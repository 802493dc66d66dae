//! Expand command module

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use emx_embed::{params, util};
use emx_embed::{CachedReader, Config, ExpandResult, ExpansionEngine, ExpansionState, FsResolver, TracingLogger};

pub fn run(
    config: &Config,
    json: bool,
    file: &Path,
    output: Option<&Path>,
    param_args: &[String],
) -> io::Result<()> {
    let result = expand_document(config, file, param_args);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    match result {
        ExpandResult::Success { content } => {
            if let Some(path) = output {
                fs::write(path, &content)?;
                eprintln!("Wrote {}", util::display_path(path));
            } else if !json {
                print!("{}", content);
            }
            Ok(())
        }
        ExpandResult::Failure { error } => Err(io::Error::other(error)),
    }
}

/// Parameters and document text; failures here are reported like expansion failures
fn prepare(file: &Path, param_args: &[String]) -> emx_embed::Result<(HashMap<String, String>, String)> {
    let values = param_args
        .iter()
        .map(|arg| params::parse_param_arg(arg))
        .collect::<emx_embed::Result<HashMap<_, _>>>()?;
    let content = util::read_text_file(file)?;
    Ok((values, content))
}

fn expand_document(config: &Config, file: &Path, param_args: &[String]) -> ExpandResult {
    let (values, content) = match prepare(file, param_args) {
        Ok(prepared) => prepared,
        Err(err) => return ExpandResult::from(Err(err)),
    };
    let file = util::canonical(file);
    let base = util::parent_dir(&file);

    let resolver = FsResolver::new(config.root.clone(), config.extensions.clone());
    let reader = CachedReader::new();
    let logger = TracingLogger;
    let engine = ExpansionEngine::new(&resolver, &reader, &logger, config.expand_options());

    // The document itself is on the inclusion chain, so self-references are cycles
    let state = ExpansionState::rooted_at(file.clone());
    match engine.expand_files_from(&content, &base, &state) {
        ExpandResult::Success { content } => ExpandResult::Success {
            content: params::substitute_params(&content, &values),
        },
        failure => failure,
    }
}
