//! Service trait definitions.

use async_trait::async_trait;
use credhub_secrets::{GenerationRequest, GenerationResponse};
use credhub_types::Result;

/// Anything that can turn a generation request into a generated secret.
///
/// Implementers send exactly one request per call and never retry.
#[async_trait]
pub trait SecretGenerator: Send + Sync {
    /// Ask the server to generate the secret described by `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
