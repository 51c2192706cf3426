//! Turnkit Settings Crate
//!
//! Handles job configuration: turning parameters plus output locations,
//! persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings};
pub use error::{SettingsError, SettingsResult};
