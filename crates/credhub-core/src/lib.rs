//! # CredHub Core
//!
//! Configuration management and logging for the CredHub client.
//!
//! This crate provides:
//!
//! - **Configuration**: layered configuration (config file, environment variables)
//! - **Logging**: `tracing` subscriber setup that keeps stdout free for command output
//! - **Data**: JSON merge and dotted-path helpers used by the config layers
//!
//! ## Example
//!
//! ```no_run
//! use credhub_core::{config::CliConfig, log};
//!
//! let config = CliConfig::load()?;
//! log::init(&config.log, false)?;
//! let api_url = config.api_url()?;
//! # Ok::<(), credhub_core::CredhubError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;

// Re-export commonly used items
pub use config::{CliConfig, Config};
pub use credhub_types::{CredhubError, Result};

/// Client application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Client application name
pub const APP_NAME: &str = "credhub";
