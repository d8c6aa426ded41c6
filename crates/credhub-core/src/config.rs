//! Configuration management for the CredHub client.
//!
//! This module provides layered configuration support with:
//! - File-based configuration (`~/.credhub/config.json`, YAML or JSON)
//! - Environment variable overrides
//!
//! ## Configuration Layers
//!
//! Configuration values are resolved in this priority order:
//! 1. Environment variables
//! 2. Values loaded from file
//!
//! Anything unset in both layers falls back to the serde defaults of
//! [`CliConfig`].
//!
//! ## Example
//!
//! ```no_run
//! use credhub_core::config::{CliConfig, Config};
//!
//! let config = Config::load(CliConfig::default_path()?)?.with_env();
//! let api_url = CliConfig::from_config(&config)?.server.api_url;
//! # Ok::<(), credhub_core::CredhubError>(())
//! ```

use credhub_types::{CredhubError, LogConfig, Result, ServerConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::util::data::{deep_merge, set_path};

/// Configuration layer priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// Values loaded from file
    Loaded = 1,
    /// Values from environment variables
    Environment = 2,
}

/// How an environment variable's text is turned into a config value.
#[derive(Debug, Clone, Copy)]
enum EnvValue {
    Text,
    Upper,
    Lower,
    Flag,
}

/// Environment variables consulted by [`Config::with_env`], and the dotted
/// key each one overrides.
const ENV_OVERRIDES: &[(&str, &str, EnvValue)] = &[
    ("CREDHUB_SERVER", "api_url", EnvValue::Text),
    ("CREDHUB_ACCESS_TOKEN", "access_token", EnvValue::Text),
    ("CREDHUB_CA_CERT", "ca_cert", EnvValue::Text),
    ("CREDHUB_SKIP_TLS_VALIDATION", "skip_tls_validation", EnvValue::Flag),
    ("CREDHUB_LOG_LEVEL", "log.level", EnvValue::Upper),
    ("CREDHUB_LOG_FORMAT", "log.format", EnvValue::Lower),
];

/// Low-level layered configuration.
///
/// For the typed view used by the command line, see [`CliConfig`].
#[derive(Clone, Debug, Default)]
pub struct Config {
    layers: HashMap<ConfigLayer, Value>,
    file_path: Option<PathBuf>,
}

impl Config {
    /// Create a new configuration from a file path.
    ///
    /// If the file doesn't exist, an empty configuration is created.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut layers = HashMap::new();

        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| CredhubError::Config(format!("Failed to read config file: {}", e)))?;

            if !content.trim().is_empty() {
                let value: Value = serde_yaml::from_str(&content).map_err(|e| {
                    CredhubError::Config(format!("Failed to parse {}: {}", path.display(), e))
                })?;

                layers.insert(ConfigLayer::Loaded, value);
            }
        }

        Ok(Self {
            layers,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_vars(std::env::vars())
    }

    /// Apply overrides from an explicit set of environment variables.
    ///
    /// Variables that are not recognised, or are set to an empty string,
    /// are ignored.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut env_layer = Value::Object(Default::default());
        let mut found = false;

        for (name, raw) in vars {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }

            let Some((_, key, kind)) = ENV_OVERRIDES
                .iter()
                .find(|(var, _, _)| *var == name.as_ref())
            else {
                continue;
            };

            let value = match kind {
                EnvValue::Text => Value::String(raw.to_string()),
                EnvValue::Upper => Value::String(raw.to_uppercase()),
                EnvValue::Lower => Value::String(raw.to_lowercase()),
                EnvValue::Flag => Value::Bool(matches!(
                    raw.to_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )),
            };

            set_path(&mut env_layer, key, value);
            found = true;
        }

        if found {
            self.layers.insert(ConfigLayer::Environment, env_layer);
        }
        self
    }

    /// Path of the file this configuration was loaded from.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Get merged data from all layers.
    pub fn merged_data(&self) -> Value {
        let layers = [ConfigLayer::Loaded, ConfigLayer::Environment];

        let mut merged = Value::Object(serde_json::Map::new());

        for layer in &layers {
            if let Some(layer_data) = self.layers.get(layer) {
                merged = deep_merge(merged, layer_data.clone());
            }
        }

        merged
    }
}

/// Typed client configuration (`~/.credhub/config.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Server connection settings
    #[serde(flatten)]
    pub server: ServerConfig,

    /// Log configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load configuration from the default location plus the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from a specific path plus the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&Config::load(path)?.with_env())
    }

    /// Build the typed view of an already-layered configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        serde_json::from_value(config.merged_data()).map_err(|e| match config.file_path() {
            Some(path) => CredhubError::Config(format!("Invalid client config {}: {}", path.display(), e)),
            None => CredhubError::Config(format!("Invalid client config: {}", e)),
        })
    }

    /// Get the default path for the client configuration.
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".credhub").join("config.json"))
            .ok_or_else(|| CredhubError::Config("Could not determine home directory".to_string()))
    }

    /// The API URL to target.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when neither the config file nor
    /// `CREDHUB_SERVER` names a server.
    pub fn api_url(&self) -> Result<&str> {
        self.server.api_url.as_deref().ok_or_else(|| {
            CredhubError::Config(
                "API location is not set. Set CREDHUB_SERVER or api_url in ~/.credhub/config.json"
                    .to_string(),
            )
        })
    }

    /// Read the extra CA bundle, if one is configured.
    pub fn ca_cert_pem(&self) -> Result<Option<String>> {
        match &self.server.ca_cert {
            Some(path) => fs::read_to_string(path).map(Some).map_err(|e| {
                CredhubError::Config(format!("Failed to read CA certificate {}: {}", path.display(), e))
            }),
            None => Ok(None),
        }
    }
}
