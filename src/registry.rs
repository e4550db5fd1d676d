//! Interaction registry for one pet instance
//!
//! The registry owns an ordered list of [`Interaction`]s. Registration order
//! is meaningful: interactions sharing a trigger fire in the order they were
//! added. Name lookups resolve to the first match, so a registry built with
//! [`InteractionRegistry::add`] may hold duplicate names; use
//! [`InteractionRegistry::try_add`] to reject them instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::codegen::{ClientCodeGenerator, CodegenOptions};
use crate::models::{json_kind, Interaction, InteractionError};

/// Exported form of a registry: `{"interactions": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub interactions: Vec<Interaction>,
}

/// Error from registry mutation or import.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An entry of the imported document is malformed
    #[error("interaction #{index} is malformed: {source}")]
    Import {
        index: usize,
        #[source]
        source: InteractionError,
    },
    /// The imported document does not have the expected shape
    #[error("invalid interaction document: {0}")]
    InvalidDocument(String),
    /// An interaction with this name is already registered
    #[error("an interaction named '{0}' is already registered")]
    DuplicateName(String),
    /// Serialization of the registry failed
    #[error("failed to serialize interactions: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Ordered collection of interactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionRegistry {
    interactions: Vec<Interaction>,
}

impl InteractionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { interactions: Vec::new() }
    }

    /// Append an interaction. Duplicate names are kept.
    pub fn add(&mut self, interaction: Interaction) {
        if self.contains(&interaction.name) {
            tracing::debug!(name = %interaction.name, "registering duplicate interaction name");
        }
        self.interactions.push(interaction);
    }

    /// Append an interaction unless one with the same name is registered.
    pub fn try_add(&mut self, interaction: Interaction) -> Result<(), RegistryError> {
        if self.contains(&interaction.name) {
            return Err(RegistryError::DuplicateName(interaction.name));
        }
        self.interactions.push(interaction);
        Ok(())
    }

    /// Remove the first interaction named `name`.
    ///
    /// Returns whether an interaction was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.interactions.remove(index);
                true
            }
            None => false,
        }
    }

    /// First interaction named `name`.
    pub fn get(&self, name: &str) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.name == name)
    }

    /// Mutable access to the first interaction named `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Interaction> {
        self.interactions.iter_mut().find(|i| i.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Enable the first interaction named `name`; false if none exists.
    pub fn enable(&mut self, name: &str) -> bool {
        self.set_enabled(name, true)
    }

    /// Disable the first interaction named `name`; false if none exists.
    pub fn disable(&mut self, name: &str) -> bool {
        self.set_enabled(name, false)
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.get_mut(name) {
            Some(interaction) => {
                interaction.enabled = enabled;
                true
            }
            None => false,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.interactions.iter().position(|i| i.name == name)
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Interactions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter()
    }

    /// Enabled interactions in registration order.
    pub fn enabled(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().filter(|i| i.enabled)
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Names that occur more than once, in order of first appearance.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (index, interaction) in self.interactions.iter().enumerate() {
            let name = interaction.name.as_str();
            let seen_before = self.interactions[..index].iter().any(|i| i.name == name);
            if seen_before && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Snapshot of every interaction, disabled ones included.
    pub fn export_config(&self) -> ConfigDocument {
        ConfigDocument { interactions: self.interactions.clone() }
    }

    /// Document form of [`Self::export_config`].
    pub fn export_value(&self) -> Value {
        let entries: Vec<Value> = self.interactions.iter().map(Interaction::to_value).collect();
        serde_json::json!({ "interactions": entries })
    }

    /// Serialize the exported document to a JSON string.
    pub fn to_json(&self, pretty: bool) -> Result<String, RegistryError> {
        let document = self.export_config();
        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    /// Replace every interaction with those in `document`.
    ///
    /// All entries are parsed before anything is replaced: when an entry is
    /// malformed the error is returned and the registry keeps its previous
    /// contents. A document without an `interactions` key imports nothing.
    pub fn import_config(&mut self, document: &Value) -> Result<(), RegistryError> {
        let object = document.as_object().ok_or_else(|| {
            RegistryError::InvalidDocument(format!("expected an object, found {}", json_kind(document)))
        })?;

        let entries = match object.get("interactions") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(other) => {
                return Err(RegistryError::InvalidDocument(format!(
                    "'interactions' must be an array, found {}",
                    json_kind(other)
                )))
            }
        };

        let parsed = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Interaction::from_value(entry).map_err(|source| RegistryError::Import { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.interactions = parsed;
        Ok(())
    }

    /// Parse a JSON string and import it. See [`Self::import_config`].
    pub fn import_json(&mut self, json: &str) -> Result<(), RegistryError> {
        let document: Value = serde_json::from_str(json)
            .map_err(|e| RegistryError::InvalidDocument(e.to_string()))?;
        self.import_config(&document)
    }

    /// Compile the enabled interactions into a self-contained client module.
    pub fn generate_client_code(&self, options: &CodegenOptions) -> String {
        ClientCodeGenerator::new(options.clone()).generate(self)
    }
}

impl FromIterator<Interaction> for InteractionRegistry {
    fn from_iter<T: IntoIterator<Item = Interaction>>(iter: T) -> Self {
        Self { interactions: iter.into_iter().collect() }
    }
}
