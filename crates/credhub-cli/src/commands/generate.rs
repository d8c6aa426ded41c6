//! Generate command.

use anyhow::Result;
use credhub_core::CliConfig;
use credhub_secrets::{render, GenerationRequest, OutputMode};
use credhub_services::{CredhubClient, CredhubConfig, SecretGenerator};
use tracing::info;

use crate::cli::GenerateArgs;
use crate::ui::progress;

/// Execute the generate command.
pub async fn execute(args: &GenerateArgs, config: &CliConfig) -> Result<()> {
    // Invalid flags never reach the server.
    let request = args.options().build()?;
    let mode = OutputMode::from_json_flag(args.output_json);

    let client = CredhubClient::new(CredhubConfig {
        url: config.api_url()?.to_string(),
        access_token: config.server.access_token.clone(),
        ca_cert: config.ca_cert_pem()?,
        insecure: config.server.skip_tls_validation,
    })?;

    let output = generate(&client, &request, mode).await?;
    println!("{}", output);

    Ok(())
}

/// Ask `generator` for the secret and render the result.
pub async fn generate(
    generator: &dyn SecretGenerator,
    request: &GenerationRequest,
    mode: OutputMode,
) -> Result<String> {
    info!(
        name = request.name(),
        secret_type = %request.secret_type(),
        overwrite = request.overwrite(),
        "generating credential"
    );

    let pb = match mode {
        OutputMode::Human => Some(progress::spinner(&format!("Generating {}...", request.name()))),
        OutputMode::Json => None,
    };

    let result = generator.generate(request).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(render(&result?, mode)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use credhub_secrets::{GenerationOptions, GenerationResponse};
    use credhub_types::{CredhubError, SecretType};
    use std::sync::Mutex;

    /// Records requests and answers with a canned result.
    struct FakeGenerator {
        reply: fn() -> credhub_types::Result<GenerationResponse>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl FakeGenerator {
        fn new(reply: fn() -> credhub_types::Result<GenerationResponse>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SecretGenerator for FakeGenerator {
        async fn generate(&self, request: &GenerationRequest) -> credhub_types::Result<GenerationResponse> {
            self.seen.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn potatoes() -> credhub_types::Result<GenerationResponse> {
        Ok(GenerationResponse::Password {
            updated_at: "2016-01-01T12:00:00Z".to_string(),
            value: "potatoes".to_string(),
        })
    }

    #[tokio::test]
    async fn test_generate_renders_json() {
        let generator = FakeGenerator::new(potatoes);
        let request = GenerationOptions::new("my-password").build().unwrap();

        let output = generate(&generator, &request, OutputMode::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["type"], "password");
        assert_eq!(value["value"], "potatoes");
        assert_eq!(value["updated_at"], "2016-01-01T12:00:00Z");

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name(), "my-password");
        assert_eq!(seen[0].secret_type(), SecretType::Password);
    }

    #[tokio::test]
    async fn test_generate_renders_human() {
        let generator = FakeGenerator::new(potatoes);
        let request = GenerationOptions::new("my-password").build().unwrap();

        let output = generate(&generator, &request, OutputMode::Human).await.unwrap();

        assert!(output.starts_with("Type:          password\n"));
        assert!(output.contains("Value:         potatoes"));
    }

    #[tokio::test]
    async fn test_server_error_passes_through() {
        let generator = FakeGenerator::new(|| Err(CredhubError::Server("you fail.".to_string())));
        let request = GenerationOptions::new("my-password").build().unwrap();

        let err = generate(&generator, &request, OutputMode::Json).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CredhubError>(),
            Some(CredhubError::Server(m)) if m == "you fail."
        ));
    }
}
