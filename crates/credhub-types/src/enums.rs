//! Common enumerations used throughout the CredHub client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{CredhubError, Result};

/// Log level enumeration for the logging system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// No logging
    #[serde(alias = "OFF")]
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    #[serde(alias = "WARNING")]
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Detailed trace messages
    Trace,
}

impl LogLevel {
    /// The equivalent `tracing` filter directive.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warn
    }
}

/// Kind of secret the server is asked to generate.
///
/// The lowercase name is the wire value of the `type` field in both the
/// generation request and the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretType {
    /// Random password
    #[default]
    Password,
    /// SSH key pair
    Ssh,
    /// RSA key pair
    Rsa,
    /// X.509 certificate, optionally signed by a named CA
    Certificate,
}

impl SecretType {
    /// All secret types, in the order they are listed in help output.
    pub const ALL: [SecretType; 4] = [
        SecretType::Password,
        SecretType::Ssh,
        SecretType::Rsa,
        SecretType::Certificate,
    ];

    /// Wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretType::Password => "password",
            SecretType::Ssh => "ssh",
            SecretType::Rsa => "rsa",
            SecretType::Certificate => "certificate",
        }
    }
}

impl FromStr for SecretType {
    type Err = CredhubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "password" => Ok(SecretType::Password),
            "ssh" => Ok(SecretType::Ssh),
            "rsa" => Ok(SecretType::Rsa),
            "certificate" => Ok(SecretType::Certificate),
            _ => Err(CredhubError::Validation(format!(
                "Invalid secret type '{}': expected one of {}",
                s,
                SecretType::ALL.map(|kind| kind.as_str()).join(", ")
            ))),
        }
    }
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
