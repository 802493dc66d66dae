use std::io;

use clap::Parser;
use emx_embed::{Cli, Command, Config};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let config = load_config(&cli)?;

    match cli.command {
        Command::Expand { file, output, params } => {
            cmd::expand::run(&config, cli.json, &file, output.as_deref(), &params)
        }
        Command::Refs { file } => cmd::refs::run(cli.json, &file),
        Command::Headings { file } => cmd::headings::run(cli.json, &file),
        Command::Section { file, headings } => cmd::section::run(cli.json, &file, &headings),
        Command::Params { file } => cmd::params::run(cli.json, &file),
    }
}

/// Install the stderr subscriber; JSON output keeps stderr to errors unless verbose
fn init_logging(cli: &Cli) -> io::Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || cli.json {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)
}

/// Config file and environment first, CLI flags on top
fn load_config(cli: &Cli) -> io::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        config.root = Some(root.clone());
    }
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(max_size) = cli.max_size {
        config.max_file_size = max_size;
    }
    Ok(config)
}

mod cmd {
    pub mod expand;
    pub mod headings;
    pub mod params;
    pub mod refs;
    pub mod section;
}
