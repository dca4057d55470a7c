//! The binary is intentionally thin: argument parsing, logging setup, the console report and
//! exit codes live in `cli/`, and all extraction logic lives in the library.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        cli::print_error(&e);
        std::process::exit(1);
    }
}
