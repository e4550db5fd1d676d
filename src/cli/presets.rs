//! Preset library commands

use clap::Subcommand;
use std::process::ExitCode;

use super::generate::emit;
use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::config::PetgenConfig;
use crate::models::Interaction;
use crate::presets::{PresetError, PresetLibrary};
use crate::suggest::{closest, did_you_mean};

#[derive(Subcommand)]
pub enum PresetAction {
    /// List available presets
    List,
    /// Show the interactions of a preset
    Show {
        /// Preset key
        key: String,
    },
    /// Export a preset as an interaction document or client code
    Export {
        /// Preset key
        key: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Emit JavaScript instead of the JSON document
        #[arg(long)]
        code: bool,
    },
}

/// Execute a presets subcommand.
///
/// A library passed with `--presets` must exist; the configured default may
/// be absent, which reads as an empty library.
pub fn run_presets(action: PresetAction, explicit: bool, config: &PetgenConfig) -> ExitCode {
    let path = &config.presets.path;
    let loaded = if explicit { PresetLibrary::load(path) } else { PresetLibrary::load_or_empty(path) };
    let library = match loaded {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Error: {}: {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match action {
        PresetAction::List => {
            if library.is_empty() {
                println!("No presets found at {}", path.display());
                return ExitCode::from(EXIT_SUCCESS);
            }
            println!("Presets in {}:", path.display());
            for key in library.keys() {
                if let Some(preset) = library.get(key) {
                    println!(
                        "  {:<16} {} ({} interaction{})",
                        key,
                        preset.display_name(key),
                        preset.interactions.len(),
                        if preset.interactions.len() == 1 { "" } else { "s" }
                    );
                    if !preset.description.is_empty() {
                        println!("  {:<16} {}", "", preset.description);
                    }
                }
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PresetAction::Show { key } => {
            let Some(preset) = library.get(&key) else {
                return not_found(&library, &key);
            };
            println!("Preset: {} ({})", preset.display_name(&key), key);
            if !preset.description.is_empty() {
                println!("{}", preset.description);
            }
            println!();
            for (index, entry) in preset.interactions.iter().enumerate() {
                match Interaction::from_value(entry) {
                    Ok(i) => println!(
                        "  {}. {}: {} -> {} ({}, {}ms){}",
                        index + 1,
                        i.name,
                        i.trigger,
                        i.action,
                        i.effect.effect_type,
                        i.effect.duration,
                        if i.enabled { "" } else { " [disabled]" }
                    ),
                    Err(e) => println!("  {}. <invalid: {}>", index + 1, e),
                }
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PresetAction::Export { key, output, code } => {
            let (registry, outcome) = match library.registry_for(&key) {
                Ok(result) => result,
                Err(PresetError::NotFound(_)) => return not_found(&library, &key),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_ERROR);
                }
            };
            for skipped in &outcome.skipped {
                eprintln!("Warning: skipped interaction #{}: {}", skipped.index + 1, skipped.error);
            }

            let content = if code {
                registry.generate_client_code(&config.codegen.to_options())
            } else {
                match registry.to_json(config.output.pretty) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::from(EXIT_ERROR);
                    }
                }
            };
            emit(output.as_deref(), &content)
        }
    }
}

fn not_found(library: &PresetLibrary, key: &str) -> ExitCode {
    eprintln!("Error: {}", PresetError::NotFound(key.to_string()));
    let keys: Vec<&str> = library.keys().collect();
    if let Some(hint) = did_you_mean(&closest(key, &keys, 3)) {
        eprintln!("{}", hint);
    }
    if !keys.is_empty() {
        eprintln!();
        eprintln!("Available presets:");
        for k in keys {
            eprintln!("  {}", k);
        }
    }
    ExitCode::from(EXIT_ERROR)
}
