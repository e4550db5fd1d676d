//! petgen - Desktop pet interaction configurator
//!
//! This library provides functionality to:
//! - Model interactions as trigger → action → visual effect → sound → feedback rules
//! - Keep them in an ordered registry that imports and exports a JSON document
//! - Compile a registry into a self-contained JavaScript controller class
//! - Author a configuration from preset bundles or a guided question flow

pub mod authoring;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod defaults;
pub mod models;
pub mod presets;
pub mod registry;
pub mod runtime;
pub mod suggest;
pub mod validate;

pub use models::{
    ActionType, EffectType, FeedbackConfig, Interaction, InteractionError, SoundEffect,
    TriggerType, VisualEffect,
};
pub use registry::{InteractionRegistry, RegistryError};
