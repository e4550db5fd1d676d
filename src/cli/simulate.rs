//! Simulate command implementation

use std::path::Path;
use std::process::ExitCode;

use super::generate::load_registry;
use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::codegen::binding::NativeEvent;
use crate::config::PetgenConfig;
use crate::runtime::{parse_script, Activation, PetRuntime, ScriptError};
use crate::suggest::{closest, did_you_mean};

fn activation_json(activation: &Activation) -> serde_json::Value {
    serde_json::json!({
        "at_ms": activation.at_ms,
        "name": activation.name,
        "trigger": activation.trigger,
        "action": activation.action,
        "effect": activation.effect,
        "sound": activation.sound,
        "message": activation.message,
    })
}

/// Execute the simulate command
pub fn run_simulate(input: &Path, events: &str, json: bool, config: &PetgenConfig) -> ExitCode {
    let steps = match parse_script(events) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let ScriptError::UnknownEvent(name) = &e {
                let mut names: Vec<&str> = NativeEvent::ALL.iter().map(NativeEvent::dom_name).collect();
                names.push("tick");
                if let Some(hint) = did_you_mean(&closest(name, &names, 2)) {
                    eprintln!("{}", hint);
                }
            }
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let registry = match load_registry(input) {
        Ok(registry) => registry,
        Err(code) => return code,
    };

    let mut runtime =
        PetRuntime::new(&registry).with_long_press_delay(config.codegen.long_press_delay_ms);
    let fired = runtime.run_script(&steps);
    tracing::debug!(steps = steps.len(), activations = fired.len(), "simulation finished");

    if json {
        let output: Vec<_> = fired.iter().map(activation_json).collect();
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    if fired.is_empty() {
        println!("No interactions fired.");
        return ExitCode::from(EXIT_SUCCESS);
    }
    for activation in &fired {
        let mut line = format!(
            "{:>6}ms  {}  {} -> {} ({})",
            activation.at_ms,
            activation.name,
            activation.trigger,
            activation.action,
            activation.effect
        );
        if let Some(sound) = &activation.sound {
            line.push_str(&format!("  sound={}", sound));
        }
        if let Some(message) = &activation.message {
            line.push_str(&format!("  \"{}\"", message));
        }
        println!("{}", line);
    }
    ExitCode::from(EXIT_SUCCESS)
}
