//! Interactive wizard command

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::authoring::{AuthoringSession, SessionSettings, TerminalPrompter};
use crate::config::PetgenConfig;
use crate::presets::PresetLibrary;

/// Execute the wizard command
pub fn run_wizard(config: &PetgenConfig) -> ExitCode {
    let library = match PresetLibrary::load_or_empty(&config.presets.path) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Error: {}: {}", config.presets.path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut prompter = TerminalPrompter::stdio();
    let session = AuthoringSession::new(&mut prompter, library, SessionSettings::from(config));
    match session.run() {
        Ok(outcome) => {
            tracing::debug!(
                interactions = outcome.registry.len(),
                files = outcome.written.len(),
                "wizard finished"
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
