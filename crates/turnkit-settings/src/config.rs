//! Job configuration
//!
//! A [`Config`] pairs the turning parameters with where the results go. Files
//! are JSON or TOML, chosen by extension, and validated on load and save.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use turnkit_camtools::{TurningError, TurningParameters};

/// Where generated files are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for generated programs and previews
    pub directory: PathBuf,
    /// File name of the generated OpenSBP program
    pub program_file_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            program_file_name: "turning-machine.sbp".to_string(),
        }
    }
}

impl OutputSettings {
    /// Full path of the generated program
    pub fn program_path(&self) -> PathBuf {
        self.directory.join(&self.program_file_name)
    }
}

/// Complete job configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Turning parameters
    pub turning: TurningParameters,
    /// Output locations
    pub output: OutputSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(format!(
            "{} (config file must be .json or .toml)",
            path.display()
        ))),
    }
}

impl Config {
    /// Default config file location (`<config dir>/turnkit/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("turnkit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.turning
            .validate()
            .map_err(|e| SettingsError::Invalid(TurningError::from(e)))?;

        if self.output.program_file_name.trim().is_empty() {
            return Err(SettingsError::SaveError(
                "program file name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
