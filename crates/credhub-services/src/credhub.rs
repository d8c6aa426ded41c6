//! CredHub client implementation.

use async_trait::async_trait;
use credhub_secrets::{translate, GenerationRequest, GenerationResponse};
use credhub_types::{CredhubError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::traits::SecretGenerator;

/// CredHub client configuration.
#[derive(Debug, Clone, Default)]
pub struct CredhubConfig {
    /// CredHub URL
    pub url: String,
    /// Bearer token sent with every request
    pub access_token: Option<String>,
    /// Additional trusted CA certificate (PEM)
    pub ca_cert: Option<String>,
    /// Skip TLS verification
    pub insecure: bool,
}

/// CredHub client for generating credentials.
pub struct CredhubClient {
    client: Client,
    base_url: Url,
    auth_header: Option<String>,
}

impl CredhubClient {
    /// Create a new CredHub client.
    pub fn new(config: CredhubConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url).map_err(|e| {
            CredhubError::Config(format!("Invalid CredHub URL '{}': {}", config.url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CredhubError::Config(format!(
                "Invalid CredHub URL '{}': not an http(s) location",
                config.url
            )));
        }

        let auth_header = config
            .access_token
            .as_ref()
            .map(|token| format!("Bearer {}", token));

        let mut builder = Client::builder().timeout(Duration::from_secs(30));

        if let Some(ref ca_cert) = config.ca_cert {
            let cert = reqwest::Certificate::from_pem(ca_cert.as_bytes())
                .map_err(|e| CredhubError::Config(format!("Invalid CA cert: {}", e)))?;
            builder = builder.add_root_certificate(cert);
        }

        if config.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| CredhubError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth_header,
        })
    }

    /// URL of the data endpoint for `name`, below any path of the base URL.
    ///
    /// Each `/`-separated part of the name becomes one percent-encoded path
    /// segment, so `?`, `#` and `%` stay part of the name.
    fn data_url(&self, name: &str) -> Result<Url> {
        let invalid = || CredhubError::Config(format!("Invalid CredHub URL '{}'", self.base_url));

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["api", "v1", "data"])
            .extend(name.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    /// Send a request and return the raw body of a success response.
    async fn request(
        &self,
        method: reqwest::Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<Vec<u8>> {
        tracing::debug!(%method, %url, "sending CredHub request");

        let mut req = self
            .client
            .request(method, url)
            .header("Content-Type", "application/json");

        if let Some(ref auth_header) = self.auth_header {
            req = req.header("Authorization", auth_header);
        }

        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await.map_err(|e| {
            CredhubError::Transport(format!(
                "Unable to reach the CredHub server at {}: {}",
                self.base_url, e
            ))
        })?;

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "CredHub responded");

        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(translate(status.as_u16(), &error_text));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CredhubError::Transport(format!("Failed to read response: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SecretGenerator for CredhubClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let url = self.data_url(request.name())?;
        let body = serde_json::to_value(request)?;

        let raw = self.request(reqwest::Method::POST, url, Some(body)).await?;

        let response = GenerationResponse::from_slice(&raw)?;
        tracing::info!(
            name = request.name(),
            secret_type = %response.secret_type(),
            "generated secret"
        );
        Ok(response)
    }
}
