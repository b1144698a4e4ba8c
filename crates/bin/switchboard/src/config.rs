//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `switchboard.toml` in the working directory unless a path is
//! given explicitly. Every field has a default so the file is optional; the
//! default device set is the five rooms the remote ships with. Environment
//! variables take precedence over file values.

use std::path::Path;

use serde::Deserialize;
use switchboard_app::remote::UndoPolicy;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_PATH: &str = "switchboard.toml";

/// Menu keys `0` and `9` are reserved for exit and undo, so devices can
/// only occupy `1..=8`.
pub const MAX_DEVICES: usize = 8;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Remote behaviour.
    pub remote: RemoteConfig,
    /// Devices to wire, in menu order.
    pub devices: Vec<DeviceConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub undo_policy: UndoPolicy,
}

/// One controllable device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    /// Initial state.
    #[serde(default)]
    pub on: bool,
}

impl DeviceConfig {
    fn off(name: &str) -> Self {
        Self {
            name: name.to_string(),
            on: false,
        }
    }
}

impl Config {
    /// Load configuration from `path` (or [`DEFAULT_PATH`]) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly given
    /// file cannot be read, or if the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_optional_file(Path::new(DEFAULT_PATH))?,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("SWITCHBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("SWITCHBOARD_UNDO_POLICY") {
            self.remote.undo_policy = UndoPolicy::from_name(&val).ok_or_else(|| {
                ConfigError::Validation(format!("unknown undo policy '{val}'"))
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.devices.is_empty() {
            return Err(ConfigError::Validation(
                "at least one device is required".to_string(),
            ));
        }
        if self.devices.len() > MAX_DEVICES {
            return Err(ConfigError::Validation(format!(
                "at most {MAX_DEVICES} devices are supported, got {}",
                self.devices.len()
            )));
        }
        for (index, device) in self.devices.iter().enumerate() {
            if device.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "device #{} has an empty name",
                    index + 1
                )));
            }
            if self.devices[..index].iter().any(|d| d.name == device.name) {
                return Err(ConfigError::Validation(format!(
                    "device '{}' is declared twice",
                    device.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            remote: RemoteConfig::default(),
            devices: [
                "Luz da sala",
                "Luz da cozinha",
                "Ventilador de teto da sala",
                "Porta da garagem",
                "Som",
            ]
            .into_iter()
            .map(DeviceConfig::off)
            .collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
