//! Interactive authoring flow
//!
//! Walks an operator from an empty registry to an exported configuration:
//!
//! ```text
//! Start -> ModeSelect -> [PresetSelect] -> [CustomQuestions] -> Summary -> ExportSelect -> End
//! ```
//!
//! All input goes through a [`Prompter`], so the same session runs against a
//! terminal or a scripted reader in tests.

pub mod categories;
pub mod prompt;

pub use categories::Category;
pub use prompt::{Prompter, TerminalPrompter};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codegen::{ClientCodeGenerator, CodegenOptions};
use crate::config::PetgenConfig;
use crate::models::Interaction;
use crate::presets::{PresetError, PresetLibrary};
use crate::registry::InteractionRegistry;

/// Error that aborts an authoring session.
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// Input could not be obtained
    #[error("input error: {0}")]
    Input(String),
    /// Reading a prompt or writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The registry could not be serialized
    #[error("failed to serialize interactions: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Step of the authoring flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start,
    ModeSelect,
    PresetSelect,
    CustomQuestions,
    Summary,
    ExportSelect,
    End,
}

/// How the registry is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One preset bundle
    Preset,
    /// Guided questions only
    Custom,
    /// A preset bundle, then optional guided questions
    Hybrid,
}

impl Mode {
    const ALL: [Mode; 3] = [Mode::Preset, Mode::Custom, Mode::Hybrid];

    fn label(&self) -> &'static str {
        match self {
            Mode::Preset => "Use a preset (quick)",
            Mode::Custom => "Custom configuration (flexible)",
            Mode::Hybrid => "Hybrid (start from a preset, then customize)",
        }
    }
}

/// What the session writes at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportChoice {
    Json,
    Code,
    Both,
    None,
}

impl ExportChoice {
    const ALL: [ExportChoice; 4] =
        [ExportChoice::Json, ExportChoice::Code, ExportChoice::Both, ExportChoice::None];

    fn label(&self) -> &'static str {
        match self {
            ExportChoice::Json => "Export the JSON configuration",
            ExportChoice::Code => "Export the JavaScript code",
            ExportChoice::Both => "Export both",
            ExportChoice::None => "Don't export",
        }
    }

    fn writes_json(&self) -> bool {
        matches!(self, ExportChoice::Json | ExportChoice::Both)
    }

    fn writes_code(&self) -> bool {
        matches!(self, ExportChoice::Code | ExportChoice::Both)
    }
}

/// Settings a session needs from the project configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Directory used when the operator leaves the output prompt blank
    pub out_dir: PathBuf,
    pub config_file: String,
    pub code_file: String,
    pub pretty: bool,
    pub codegen: CodegenOptions,
    /// Skip custom rules whose name is already registered
    pub unique_names: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&PetgenConfig::default())
    }
}

impl From<&PetgenConfig> for SessionSettings {
    fn from(config: &PetgenConfig) -> Self {
        Self {
            out_dir: config.output.dir.clone(),
            config_file: config.output.config_file.clone(),
            code_file: config.output.code_file.clone(),
            pretty: config.output.pretty,
            codegen: config.codegen.to_options(),
            unique_names: config.registry.unique_names,
        }
    }
}

/// Result of a finished session.
#[derive(Debug)]
pub struct AuthoringOutcome {
    pub registry: InteractionRegistry,
    /// Files written during export
    pub written: Vec<PathBuf>,
}

/// One run of the authoring flow.
pub struct AuthoringSession<'p> {
    prompter: &'p mut dyn Prompter,
    library: PresetLibrary,
    settings: SessionSettings,
    registry: InteractionRegistry,
    state: State,
    mode: Mode,
    written: Vec<PathBuf>,
}

impl<'p> AuthoringSession<'p> {
    pub fn new(
        prompter: &'p mut dyn Prompter,
        library: PresetLibrary,
        settings: SessionSettings,
    ) -> Self {
        Self {
            prompter,
            library,
            settings,
            registry: InteractionRegistry::new(),
            state: State::Start,
            mode: Mode::Custom,
            written: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn registry(&self) -> &InteractionRegistry {
        &self.registry
    }

    /// Drive the flow until [`State::End`].
    pub fn run(mut self) -> Result<AuthoringOutcome, AuthoringError> {
        while self.state != State::End {
            self.step()?;
        }
        Ok(AuthoringOutcome { registry: self.registry, written: self.written })
    }

    /// Execute the current state and move to the next one.
    pub fn step(&mut self) -> Result<State, AuthoringError> {
        let next = match self.state {
            State::Start => {
                self.welcome()?;
                State::ModeSelect
            }
            State::ModeSelect => {
                let labels: Vec<&str> = Mode::ALL.iter().map(Mode::label).collect();
                let choice =
                    self.prompter.ask_choice("How would you like to configure interactions?", &labels)?;
                self.mode = Mode::ALL[choice];
                match self.mode {
                    Mode::Custom => State::CustomQuestions,
                    Mode::Preset | Mode::Hybrid => State::PresetSelect,
                }
            }
            State::PresetSelect => {
                self.select_preset()?;
                if self.mode == Mode::Hybrid {
                    self.prompter.say("\nYou can keep customizing from here.")?;
                    if self.prompter.ask_yes_no("Add more interactions?")? {
                        State::CustomQuestions
                    } else {
                        State::Summary
                    }
                } else {
                    State::Summary
                }
            }
            State::CustomQuestions => {
                self.ask_custom()?;
                State::Summary
            }
            State::Summary => {
                self.summary()?;
                State::ExportSelect
            }
            State::ExportSelect => {
                let labels: Vec<&str> = ExportChoice::ALL.iter().map(ExportChoice::label).collect();
                let choice = self.prompter.ask_choice("Export the configuration?", &labels)?;
                self.export(ExportChoice::ALL[choice])?;
                self.farewell()?;
                State::End
            }
            State::End => State::End,
        };
        tracing::debug!(from = ?self.state, to = ?next, "authoring transition");
        self.state = next;
        Ok(next)
    }

    fn welcome(&mut self) -> Result<(), AuthoringError> {
        self.prompter.say(&format!("\n{}", "=".repeat(60)))?;
        self.prompter.say("   Desktop pet interaction wizard")?;
        self.prompter.say(&"=".repeat(60))?;
        if !self.library.is_empty() {
            self.prompter.say(&format!("Loaded {} preset(s)", self.library.len()))?;
        }
        Ok(())
    }

    fn select_preset(&mut self) -> Result<(), AuthoringError> {
        if self.library.is_empty() {
            self.prompter.say("No presets are available; skipping preset selection.")?;
            return Ok(());
        }

        let keys: Vec<String> = self.library.keys().map(String::from).collect();
        self.prompter.say("\nAvailable presets:")?;
        for (i, key) in keys.iter().enumerate() {
            if let Some(preset) = self.library.get(key) {
                let description = if preset.description.is_empty() {
                    "no description"
                } else {
                    preset.description.as_str()
                };
                self.prompter.say(&format!(
                    "{}. {}\n   {}\n   {} interaction(s)",
                    i + 1,
                    preset.display_name(key),
                    description,
                    preset.interactions.len()
                ))?;
            }
        }

        let labels: Vec<&str> = keys
            .iter()
            .map(|key| self.library.get(key).map_or(key.as_str(), |p| p.display_name(key)))
            .collect();
        let choice = self.prompter.ask_choice("Choose a preset", &labels)?;
        self.apply_preset(&keys[choice])
    }

    /// Load preset `key` into the session registry, reporting the outcome.
    ///
    /// An unknown key is reported and leaves the registry unchanged.
    pub fn apply_preset(&mut self, key: &str) -> Result<(), AuthoringError> {
        match self.library.load_into(key, &mut self.registry) {
            Ok(outcome) => {
                for skipped in &outcome.skipped {
                    self.prompter.say(&format!(
                        "Skipped interaction #{}: {}",
                        skipped.index + 1,
                        skipped.error
                    ))?;
                }
                self.prompter.say(&format!("Loaded {} interaction(s)", outcome.loaded))?;
            }
            Err(error @ PresetError::NotFound(_)) => {
                tracing::warn!(%error, "preset selection failed");
                self.prompter.say(&format!("{}", error))?;
            }
            Err(error) => {
                tracing::warn!(%error, "preset could not be loaded");
                self.prompter.say(&format!("Failed to load preset: {}", error))?;
            }
        }
        Ok(())
    }

    fn ask_custom(&mut self) -> Result<(), AuthoringError> {
        self.prompter.say("\nLet's configure the interactions.")?;
        for category in Category::ALL {
            if self.prompter.ask_yes_no(category.question())? {
                let interaction = category.configure(&mut *self.prompter)?;
                self.add_rule(interaction)?;
            }
        }
        Ok(())
    }

    fn add_rule(&mut self, interaction: Interaction) -> Result<(), AuthoringError> {
        if self.settings.unique_names && self.registry.contains(&interaction.name) {
            tracing::warn!(name = %interaction.name, "duplicate interaction not added");
            self.prompter
                .say(&format!("'{}' already exists; not added", interaction.name))?;
            return Ok(());
        }
        self.prompter.say(&format!("Configured {}", interaction.name))?;
        self.registry.add(interaction);
        Ok(())
    }

    fn summary(&mut self) -> Result<(), AuthoringError> {
        self.prompter.say(&format!("\n{}", "=".repeat(60)))?;
        self.prompter.say("   Summary")?;
        self.prompter.say(&"=".repeat(60))?;

        if self.registry.is_empty() {
            self.prompter.say("No interactions configured")?;
            return Ok(());
        }

        self.prompter.say(&format!("\n{} interaction(s) configured:\n", self.registry.len()))?;
        let lines: Vec<String> = self
            .registry
            .iter()
            .enumerate()
            .map(|(i, interaction)| describe(i + 1, interaction))
            .collect();
        for line in lines {
            self.prompter.say(&line)?;
        }
        Ok(())
    }

    fn export(&mut self, choice: ExportChoice) -> Result<(), AuthoringError> {
        if choice == ExportChoice::None {
            return Ok(());
        }

        let default_dir = self.settings.out_dir.display().to_string();
        let dir = PathBuf::from(self.prompter.ask_text("Output directory", &default_dir)?);
        fs::create_dir_all(&dir)?;

        if choice.writes_json() {
            let document = self.registry.export_config();
            let json = if self.settings.pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            let path = dir.join(&self.settings.config_file);
            self.write(&path, json)?;
        }
        if choice.writes_code() {
            let code = ClientCodeGenerator::new(self.settings.codegen.clone()).generate(&self.registry);
            let path = dir.join(&self.settings.code_file);
            self.write(&path, code)?;
        }
        Ok(())
    }

    fn write(&mut self, path: &Path, content: String) -> Result<(), AuthoringError> {
        fs::write(path, content)?;
        tracing::info!(path = %path.display(), "exported");
        self.prompter.say(&format!("Wrote {}", path.display()))?;
        self.written.push(path.to_path_buf());
        Ok(())
    }

    fn farewell(&mut self) -> Result<(), AuthoringError> {
        self.prompter.say(&format!("\n{}", "=".repeat(60)))?;
        self.prompter.say("   Done!")?;
        self.prompter.say(&"=".repeat(60))
    }
}

/// Multi-line summary entry for one interaction.
fn describe(position: usize, interaction: &Interaction) -> String {
    let mut text = format!(
        "{}. {}\n   trigger: {}\n   action: {}\n   effect: {} ({}ms)",
        position,
        interaction.name,
        interaction.trigger,
        interaction.action,
        interaction.effect.effect_type,
        interaction.effect.duration
    );
    if interaction.sound.enabled {
        if let Some(file) = &interaction.sound.file {
            text.push_str(&format!("\n   sound: {} (volume {})", file, interaction.sound.volume));
        }
    }
    if let Some(message) = &interaction.feedback.message {
        text.push_str(&format!("\n   feedback: {}", message));
    }
    if !interaction.enabled {
        text.push_str("\n   (disabled)");
    }
    text.push('\n');
    text
}
