use chrono::{Local, NaiveDate};
use clap::Parser;
use prompt_extract::config::{ExtractConfig, Selection, TrailingRegion};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prompt-extract", bin_name = "prompt-extract", version)]
#[command(
    about = "Extract full prompts from the newest test-output-debug-*.log into a Markdown review document",
    long_about = None
)]
pub struct Cli {
    /// Directory holding the debug logs; the document is written there too
    #[arg(short = 'C', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Configuration file (defaults to prompt-extract.json in the working directory, if any)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output file name
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Extraction date shown in the document header
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date, conflicts_with = "today")]
    pub date: Option<NaiveDate>,

    /// Use today's date in the document header
    #[arg(long)]
    pub today: bool,

    /// Keep a prompt left open at the end of the log instead of dropping it
    #[arg(long)]
    pub flush_trailing: bool,

    /// Pick the log with the newest modification time instead of the greatest name
    #[arg(long)]
    pub by_mtime: bool,

    /// Print the document to stdout instead of writing the output file
    #[arg(long)]
    pub stdout: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{value}: {e}"))
}

impl Cli {
    /// Command-line flags take precedence over the configuration file.
    pub fn apply(&self, config: &mut ExtractConfig) {
        if let Some(output) = &self.output {
            config.document.output_file = output.clone();
        }
        if let Some(date) = self.date {
            config.document.extraction_date = date;
        } else if self.today {
            config.document.extraction_date = Local::now().date_naive();
        }
        if self.flush_trailing {
            config.trailing = TrailingRegion::Flush;
        }
        if self.by_mtime {
            config.input.selection = Selection::Modified;
        }
    }
}
