//! Code generation commands (generate, defaults)

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::{write_output, EXIT_ERROR, EXIT_SUCCESS};
use crate::codegen::ClientCodeGenerator;
use crate::config::PetgenConfig;
use crate::defaults::default_registry;
use crate::registry::InteractionRegistry;

/// Read an interaction document into a registry, reporting failures.
pub(crate) fn load_registry(input: &Path) -> Result<InteractionRegistry, ExitCode> {
    let content = match fs::read_to_string(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", input.display(), e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };

    let mut registry = InteractionRegistry::new();
    if let Err(e) = registry.import_json(&content) {
        eprintln!("Error: {}: {}", input.display(), e);
        return Err(ExitCode::from(EXIT_ERROR));
    }

    let duplicates = registry.duplicate_names();
    if !duplicates.is_empty() {
        tracing::warn!(names = ?duplicates, "duplicate interaction names; lookups resolve to the first");
    }
    Ok(registry)
}

/// Execute the generate command
pub fn run_generate(input: &Path, output: Option<&Path>, config: &PetgenConfig) -> ExitCode {
    let registry = match load_registry(input) {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    let generator = ClientCodeGenerator::new(config.codegen.to_options());
    let code = generator.generate(&registry);
    tracing::debug!(
        interactions = registry.len(),
        enabled = registry.enabled().count(),
        class = %generator.options().class_name,
        "generated client code"
    );

    emit(output, &code)
}

/// Execute the defaults command
pub fn run_defaults(output: Option<&Path>, code: bool, config: &PetgenConfig) -> ExitCode {
    let registry = default_registry();
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

    emit(output, &content)
}

pub(crate) fn emit(output: Option<&Path>, content: &str) -> ExitCode {
    match write_output(output, content) {
        Ok(()) => {
            if let Some(path) = output {
                eprintln!("Wrote {}", path.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Cannot write output: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
