//! Preset library: named, pre-authored bundles of interactions
//!
//! Presets are read from an `interaction_presets.json` document:
//!
//! ```json
//! {
//!   "presets": {
//!     "playful": {
//!       "name": "Playful",
//!       "description": "Bouncy reactions to every touch",
//!       "interactions": [ { "name": "click_bounce", "trigger": "click", ... } ]
//!     }
//!   },
//!   "interaction_templates": { },
//!   "sound_library": { }
//! }
//! ```
//!
//! Loading a preset is lenient: malformed entries are skipped and reported
//! while the rest of the bundle is registered.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::{Interaction, InteractionError};
use crate::registry::InteractionRegistry;

/// Default preset file name, looked up next to the project.
pub const DEFAULT_PRESETS_FILE: &str = "interaction_presets.json";

/// Error reading or using the preset library.
#[derive(Debug, Error)]
pub enum PresetError {
    /// File I/O error
    #[error("failed to read presets: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error
    #[error("failed to parse presets: {0}")]
    Parse(#[from] serde_json::Error),
    /// Requested preset key does not exist
    #[error("preset '{0}' not found")]
    NotFound(String),
}

/// One named bundle of interactions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw entries, parsed one by one when the preset is loaded
    #[serde(default)]
    pub interactions: Vec<Value>,
}

impl Preset {
    /// Display name, falling back to the preset key.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        if self.name.is_empty() {
            key
        } else {
            &self.name
        }
    }
}

/// The whole preset document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PresetLibrary {
    /// Presets keyed by name, in document order
    #[serde(default, with = "ordered_presets")]
    pub presets: Vec<(String, Preset)>,
    #[serde(default)]
    pub interaction_templates: BTreeMap<String, Value>,
    #[serde(default)]
    pub sound_library: BTreeMap<String, Value>,
}

/// A preset entry that could not be loaded.
#[derive(Debug)]
pub struct SkippedEntry {
    /// Position of the entry in the preset's list
    pub index: usize,
    pub error: InteractionError,
}

/// Outcome of loading a preset into a registry.
#[derive(Debug, Default)]
pub struct PresetLoad {
    /// Number of interactions registered
    pub loaded: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl PresetLibrary {
    /// Parse a preset document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a preset document from a file.
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let content = fs::read_to_string(path)?;
        let library = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), presets = library.presets.len(), "loaded preset library");
        Ok(library)
    }

    /// Load a preset document, treating a missing file as an empty library.
    pub fn load_or_empty(path: &Path) -> Result<Self, PresetError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no preset library found");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Preset keys in listing order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.presets.iter().find(|(k, _)| k == key).map(|(_, preset)| preset)
    }

    /// Register every well-formed interaction of preset `key` into `registry`.
    ///
    /// Malformed entries are skipped and returned in [`PresetLoad::skipped`].
    /// An unknown key leaves the registry untouched.
    pub fn load_into(
        &self,
        key: &str,
        registry: &mut InteractionRegistry,
    ) -> Result<PresetLoad, PresetError> {
        let preset = self.get(key).ok_or_else(|| PresetError::NotFound(key.to_string()))?;
        let mut outcome = PresetLoad::default();

        for (index, entry) in preset.interactions.iter().enumerate() {
            match Interaction::from_value(entry) {
                Ok(interaction) => {
                    registry.add(interaction);
                    outcome.loaded += 1;
                }
                Err(error) => {
                    tracing::warn!(preset = key, index, %error, "skipping malformed preset interaction");
                    outcome.skipped.push(SkippedEntry { index, error });
                }
            }
        }

        Ok(outcome)
    }

    /// Build a fresh registry from preset `key`.
    pub fn registry_for(&self, key: &str) -> Result<(InteractionRegistry, PresetLoad), PresetError> {
        let mut registry = InteractionRegistry::new();
        let outcome = self.load_into(key, &mut registry)?;
        Ok((registry, outcome))
    }
}

/// The `presets` object as an ordered list of entries.
///
/// A repeated key replaces the earlier value in place.
mod ordered_presets {
    use super::Preset;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(presets: &[(String, Preset)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(presets.len()))?;
        for (key, preset) in presets {
            map.serialize_entry(key, preset)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, Preset)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PresetsVisitor;

        impl<'de> Visitor<'de> for PresetsVisitor {
            type Value = Vec<(String, Preset)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping preset keys to presets")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut presets: Vec<(String, Preset)> = Vec::new();
                while let Some((key, preset)) = map.next_entry::<String, Preset>()? {
                    match presets.iter_mut().find(|(k, _)| *k == key) {
                        Some(existing) => existing.1 = preset,
                        None => presets.push((key, preset)),
                    }
                }
                Ok(presets)
            }
        }

        deserializer.deserialize_map(PresetsVisitor)
    }
}
