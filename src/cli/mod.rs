//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod presets;
mod simulate;
mod validate;
mod wizard;

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;
use tracing_subscriber::EnvFilter;

use crate::codegen::ModuleFormat;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, PetgenConfig};

pub use presets::PresetAction;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PETGEN_LOG";

/// Check if a path looks like a JSON document.
pub fn is_json_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("json"))
}

/// Find all JSON documents in a directory (recursively).
pub fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*.json", dir.display());
    match glob(&pattern) {
        Ok(paths) => {
            let mut files: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
            files.sort();
            files
        }
        Err(_) => Vec::new(),
    }
}

/// petgen - Desktop pet interaction configurator
#[derive(Parser)]
#[command(name = "petgen")]
#[command(about = "petgen - Configure desktop pet interactions and generate client code")]
#[command(version)]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this petgen.toml instead of searching for one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an interaction configuration interactively
    Wizard {
        /// Preset library to offer
        #[arg(long, value_name = "FILE")]
        presets: Option<PathBuf>,

        /// Default output directory for exports
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Compile an interaction document to a JavaScript controller
    Generate {
        /// Interaction document ({"interactions": [...]})
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the generated class
        #[arg(long, value_name = "NAME")]
        class_name: Option<String>,

        /// Hold time before a long press fires
        #[arg(long, value_name = "MS")]
        long_press_delay: Option<u32>,

        /// How the class is exported
        #[arg(long, value_enum)]
        format: Option<ModuleFormat>,
    },

    /// Emit the built-in starter interactions
    Defaults {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit JavaScript instead of the JSON document
        #[arg(long)]
        code: bool,
    },

    /// Inspect and export preset bundles
    Presets {
        /// Preset library file
        #[arg(long, global = true, value_name = "FILE")]
        presets: Option<PathBuf>,

        #[command(subcommand)]
        action: PresetAction,
    },

    /// Check interaction or preset documents for problems
    Validate {
        /// Files to validate
        files: Vec<PathBuf>,

        /// Also validate every .json file under this directory
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay mouse events against a configuration and report what fires
    Simulate {
        /// Interaction document
        input: PathBuf,

        /// Comma-separated EVENT@MS steps, e.g. "mousedown@0,tick@900"
        #[arg(long, value_name = "SCRIPT")]
        events: String,

        /// Hold time before a long press fires
        #[arg(long, value_name = "MS")]
        long_press_delay: Option<u32>,

        /// Output activations as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Initialize tracing on stderr.
///
/// The filter comes from `PETGEN_LOG`, then `RUST_LOG`, defaulting to `warn`.
/// `--verbose` forces `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when run from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the project configuration and apply overrides, reporting failures.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<PetgenConfig, ExitCode> {
    let mut config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(config)
}

/// Write `content` to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            tracing::info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Wizard { presets, output } => {
            let overrides = CliOverrides { presets, out_dir: output, ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => wizard::run_wizard(&config),
                Err(code) => code,
            }
        }
        Commands::Generate { input, output, class_name, long_press_delay, format } => {
            let overrides = CliOverrides {
                class_name,
                long_press_delay_ms: long_press_delay,
                module_format: format,
                ..Default::default()
            };
            match resolve_config(config_path, &overrides) {
                Ok(config) => generate::run_generate(&input, output.as_deref(), &config),
                Err(code) => code,
            }
        }
        Commands::Defaults { output, code } => {
            match resolve_config(config_path, &CliOverrides::default()) {
                Ok(config) => generate::run_defaults(output.as_deref(), code, &config),
                Err(code) => code,
            }
        }
        Commands::Presets { presets, action } => {
            let explicit = presets.is_some();
            let overrides = CliOverrides { presets, ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => presets::run_presets(action, explicit, &config),
                Err(code) => code,
            }
        }
        Commands::Validate { files, dir, strict, json } => {
            validate::run_validate(&files, dir.as_deref(), strict, json)
        }
        Commands::Simulate { input, events, long_press_delay, json } => {
            let overrides =
                CliOverrides { long_press_delay_ms: long_press_delay, ..Default::default() };
            match resolve_config(config_path, &overrides) {
                Ok(config) => simulate::run_simulate(&input, &events, json, &config),
                Err(code) => code,
            }
        }
    }
}
