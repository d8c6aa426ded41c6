//! # CredHub Services
//!
//! Transport for the CredHub API.
//!
//! This crate provides:
//! - **CredhubClient**: async HTTP client for the CredHub server
//! - **SecretGenerator**: the seam commands use to ask for a generated secret

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod credhub;
pub mod traits;

pub use credhub::{CredhubClient, CredhubConfig};
pub use traits::SecretGenerator;
