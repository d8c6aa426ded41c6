//! Output rendering for generated secrets.

use credhub_types::Result;

use crate::response::GenerationResponse;

/// Width of the label column in human-readable output.
const LABEL_WIDTH: usize = 15;

/// How a generated secret is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Labelled lines for a person to read
    #[default]
    Human,
    /// A single JSON object for machine consumption
    Json,
}

impl OutputMode {
    /// `Json` when `json` is set, `Human` otherwise.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// Render a generated secret.
///
/// Pure and deterministic: the same response and mode always produce the
/// same text. Only the fields of the response's own variant appear.
pub fn render(response: &GenerationResponse, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputMode::Human => Ok(render_human(response)),
    }
}

fn render_human(response: &GenerationResponse) -> String {
    let mut lines = vec![line("Type:", response.secret_type().as_str())];

    match response {
        GenerationResponse::Password { value, .. } => {
            lines.push(line("Value:", value));
        }
        GenerationResponse::Ssh { public_key, private_key, .. }
        | GenerationResponse::Rsa { public_key, private_key, .. } => {
            lines.push(line("Public Key:", public_key));
            lines.push(line("Private Key:", private_key));
        }
        GenerationResponse::Certificate { ca, certificate, private_key, .. } => {
            if let Some(ca) = ca {
                lines.push(line("CA:", ca));
            }
            lines.push(line("Certificate:", certificate));
            lines.push(line("Private Key:", private_key));
        }
    }

    lines.push(line("Updated:", response.updated_at()));
    lines.join("\n")
}

fn line(label: &str, value: &str) -> String {
    format!("{:<width$}{}", label, value, width = LABEL_WIDTH)
}
