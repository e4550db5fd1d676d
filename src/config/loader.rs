//! Configuration loading and discovery for `petgen.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::PetgenConfig;
use crate::codegen::ModuleFormat;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "petgen.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse petgen.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the preset library path
    pub presets: Option<PathBuf>,
    /// Override output directory
    pub out_dir: Option<PathBuf>,
    /// Override the generated class name
    pub class_name: Option<String>,
    /// Override the long-press delay
    pub long_press_delay_ms: Option<u32>,
    /// Override the module format
    pub module_format: Option<ModuleFormat>,
    /// Override registry name uniqueness
    pub unique_names: Option<bool>,
}

/// Find petgen.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for petgen.toml
/// 2. Check XDG_CONFIG_HOME/petgen/petgen.toml (or ~/.config/petgen/petgen.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find petgen.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("petgen").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find petgen.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a petgen.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
pub fn load_config(path: Option<&Path>) -> Result<PetgenConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
///
/// A relative preset path is resolved against the directory holding the file.
fn load_config_file(path: &Path) -> Result<PetgenConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: PetgenConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    if let Some(root) = project_root(path) {
        config.presets.path = resolve_path(root, &config.presets.path);
    }
    tracing::debug!(path = %path.display(), "loaded configuration");

    Ok(config)
}

/// Configuration used when no petgen.toml is found.
pub fn default_config() -> PetgenConfig {
    PetgenConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PetgenConfig, overrides: &CliOverrides) {
    if let Some(ref presets) = overrides.presets {
        config.presets.path = presets.clone();
    }
    if let Some(ref out_dir) = overrides.out_dir {
        config.output.dir = out_dir.clone();
    }
    if let Some(ref class_name) = overrides.class_name {
        config.codegen.class_name = class_name.clone();
    }
    if let Some(delay) = overrides.long_press_delay_ms {
        config.codegen.long_press_delay_ms = delay;
    }
    if let Some(format) = overrides.module_format {
        config.codegen.module_format = format;
    }
    if let Some(unique) = overrides.unique_names {
        config.registry.unique_names = unique;
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
