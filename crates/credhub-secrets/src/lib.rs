//! # CredHub Secrets
//!
//! Client-side model of secret generation.
//!
//! - [`request`]: flat user options to a validated, type-specific generation request
//! - [`response`]: decoding of the server's generated-secret payload
//! - [`render`]: JSON and human-readable output for a generated secret
//! - [`translate`]: non-success responses to user-facing errors
//!
//! Every operation here is a pure transform over call-local data.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod request;
pub mod response;
pub mod render;
pub mod translate;

pub use request::{
    CertificateParams, GenerationOptions, GenerationParameters, GenerationRequest,
    PasswordParams, RsaParams, SshParams,
};
pub use response::GenerationResponse;
pub use render::{render, OutputMode};
pub use translate::translate;
