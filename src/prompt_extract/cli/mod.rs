//! # CLI Layer
//!
//! - `setup.rs`: clap definitions and how flags override the loaded configuration
//! - `print.rs`: the console report
//!
//! `run` wires them to the library: resolve the working directory, load configuration,
//! install logging, then drive the pipeline one step at a time so the selected log is
//! announced before it is read.

mod print;
mod setup;

use clap::Parser;
use prompt_extract::api::PromptExtractor;
use prompt_extract::config::ExtractConfig;
use prompt_extract::error::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use print::print_error;
use print::{print_selected, print_summary};
use setup::Cli;

/// Takes precedence over `--verbose`.
const LOG_ENV: &str = "PROMPT_EXTRACT_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let mut config = match &cli.config {
        Some(path) => ExtractConfig::from_file(path)?,
        None => ExtractConfig::load(&root)?,
    };
    cli.apply(&mut config);

    let api = PromptExtractor::new(root, config)?;
    let source = api.locate()?;

    if cli.stdout {
        let regions = api.extract(&source)?;
        print!("{}", api.render(&regions)?);
        return Ok(());
    }

    print_selected(&source);
    let regions = api.extract(&source)?;
    let output = api.write_document(&regions)?;
    let shown = output.strip_prefix(api.root()).unwrap_or(&output);
    print_summary(shown, &regions);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "prompt_extract=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
