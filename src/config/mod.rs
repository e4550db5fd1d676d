//! Project configuration
//!
//! Provides types and loading for the `petgen.toml` configuration file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
