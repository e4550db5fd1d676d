//! Configuration schema types for `petgen.toml`
//!
//! Every section and key is optional; missing values take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codegen::{
    is_valid_identifier, CodegenOptions, ModuleFormat, DEFAULT_CLASS_NAME,
    DEFAULT_LONG_PRESS_DELAY_MS,
};
use crate::presets::DEFAULT_PRESETS_FILE;

/// Preset library location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsConfig {
    /// Path to the preset document, relative to the config file
    #[serde(default = "default_presets_path")]
    pub path: PathBuf,
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self { path: default_presets_path() }
    }
}

fn default_presets_path() -> PathBuf {
    PathBuf::from(DEFAULT_PRESETS_FILE)
}

/// Where exported files are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output directory
    #[serde(default = "default_out_dir")]
    pub dir: PathBuf,
    /// File name of the exported interaction document
    #[serde(default = "default_config_file")]
    pub config_file: String,
    /// File name of the generated client code
    #[serde(default = "default_code_file")]
    pub code_file: String,
    /// Pretty-print exported JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            config_file: default_config_file(),
            code_file: default_code_file(),
            pretty: true,
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_config_file() -> String {
    "pet_interactions.json".to_string()
}

fn default_code_file() -> String {
    "pet_interactions.js".to_string()
}

fn default_true() -> bool {
    true
}

/// Client code generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Name of the generated controller class
    #[serde(default = "default_class_name")]
    pub class_name: String,
    /// Hold time before a long press fires, in milliseconds
    #[serde(default = "default_long_press_delay")]
    pub long_press_delay_ms: u32,
    /// How the class is exported: script, esm, commonjs
    #[serde(default)]
    pub module_format: ModuleFormat,
    /// Append a usage example comment
    #[serde(default = "default_true")]
    pub usage_comment: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            class_name: default_class_name(),
            long_press_delay_ms: default_long_press_delay(),
            module_format: ModuleFormat::default(),
            usage_comment: true,
        }
    }
}

fn default_class_name() -> String {
    DEFAULT_CLASS_NAME.to_string()
}

fn default_long_press_delay() -> u32 {
    DEFAULT_LONG_PRESS_DELAY_MS
}

impl CodegenConfig {
    /// Generator options for these settings.
    pub fn to_options(&self) -> CodegenOptions {
        CodegenOptions {
            class_name: self.class_name.clone(),
            long_press_delay_ms: self.long_press_delay_ms,
            module_format: self.module_format,
            usage_comment: self.usage_comment,
        }
    }
}

/// Registry behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Reject interactions whose name is already registered
    #[serde(default)]
    pub unique_names: bool,
}

/// Complete `petgen.toml` configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetgenConfig {
    #[serde(default)]
    pub presets: PresetsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl PetgenConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !is_valid_identifier(&self.codegen.class_name) {
            errors.push(format!(
                "codegen.class_name '{}' is not a valid JavaScript identifier",
                self.codegen.class_name
            ));
        }
        if self.codegen.long_press_delay_ms == 0 {
            errors.push("codegen.long_press_delay_ms must be greater than 0".to_string());
        }
        for (key, name) in
            [("output.config_file", &self.output.config_file), ("output.code_file", &self.output.code_file)]
        {
            if name.is_empty() {
                errors.push(format!("{} must not be empty", key));
            } else if name.contains('/') || name.contains('\\') {
                errors.push(format!("{} must be a file name, not a path: '{}'", key, name));
            }
        }
        if self.output.config_file == self.output.code_file && !self.output.config_file.is_empty() {
            errors.push("output.config_file and output.code_file must differ".to_string());
        }

        errors
    }
}
