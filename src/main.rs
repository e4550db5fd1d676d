//! petgen - Command-line tool for configuring desktop pet interactions

use std::process::ExitCode;

use petgen::cli;

fn main() -> ExitCode {
    cli::run()
}
