//! # CredHub Types
//!
//! Core types and enums shared across all CredHub client crates.
//!
//! This crate provides:
//!
//! - The [`SecretType`] discriminant for generated secrets
//! - Log level and log format enums used by configuration
//! - Configuration value types for the server connection and logging
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use credhub_types::SecretType;
//!
//! let kind: SecretType = "ssh".parse().unwrap();
//! assert_eq!(kind, SecretType::Ssh);
//! assert_eq!(SecretType::default(), SecretType::Password);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod config;

// Re-export common types for convenience
pub use errors::{CredhubError, Result};
pub use enums::{LogLevel, SecretType};
pub use config::{LogConfig, LogFormat, ServerConfig};
