//! Generated secret responses.

use credhub_types::{CredhubError, Result, SecretType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level keys the server may add that carry nothing to render.
const IGNORED_KEYS: [&str; 3] = ["name", "id", "version_created_at"];

/// A secret generated by the server, discriminated by its `type` tag.
///
/// Serializes to the flat JSON shape shown by `--output-json`: `type`,
/// `updated_at`, then the fields of the variant and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerationResponse {
    /// Generated password
    Password {
        /// Last update timestamp, as sent by the server
        updated_at: String,
        /// The password
        value: String,
    },
    /// Generated SSH key pair
    Ssh {
        /// Last update timestamp, as sent by the server
        updated_at: String,
        /// Public key
        public_key: String,
        /// Private key
        private_key: String,
    },
    /// Generated RSA key pair
    Rsa {
        /// Last update timestamp, as sent by the server
        updated_at: String,
        /// Public key PEM
        public_key: String,
        /// Private key PEM
        private_key: String,
    },
    /// Generated X.509 certificate
    Certificate {
        /// Last update timestamp, as sent by the server
        updated_at: String,
        /// Signing CA certificate; null for self-signed certificates
        ca: Option<String>,
        /// Certificate PEM
        certificate: String,
        /// Private key PEM
        private_key: String,
    },
}

impl GenerationResponse {
    /// Decode a success response body.
    ///
    /// Type-specific fields may be flat or nested under `value`, e.g.
    /// `{"type": "ssh", "value": {"public_key": ..}}`.
    ///
    /// # Errors
    ///
    /// Returns a response shape error if the body is not a JSON object of a
    /// recognised secret type with all of that type's fields.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let mut object: Map<String, Value> = match serde_json::from_slice(body) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                return Err(CredhubError::ResponseShape(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
            Err(e) => return Err(CredhubError::ResponseShape(e.to_string())),
        };

        if let Some(Value::Object(nested)) = object.get("value") {
            let nested = nested.clone();
            object.remove("value");
            for (key, value) in nested {
                object.entry(key).or_insert(value);
            }
        }

        for key in IGNORED_KEYS {
            object.remove(key);
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|e| CredhubError::ResponseShape(e.to_string()))
    }

    /// The secret type of this response.
    pub fn secret_type(&self) -> SecretType {
        match self {
            GenerationResponse::Password { .. } => SecretType::Password,
            GenerationResponse::Ssh { .. } => SecretType::Ssh,
            GenerationResponse::Rsa { .. } => SecretType::Rsa,
            GenerationResponse::Certificate { .. } => SecretType::Certificate,
        }
    }

    /// Timestamp of the generation.
    pub fn updated_at(&self) -> &str {
        match self {
            GenerationResponse::Password { updated_at, .. }
            | GenerationResponse::Ssh { updated_at, .. }
            | GenerationResponse::Rsa { updated_at, .. }
            | GenerationResponse::Certificate { updated_at, .. } => updated_at,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMESTAMP: &str = "2016-01-01T12:00:00Z";

    #[test]
    fn test_password_response() {
        let body = format!(
            r#"{{"type":"password","id":"5a2edd4f","name":"my-password","updated_at":"{TIMESTAMP}","value":"potatoes"}}"#
        );
        let response = GenerationResponse::from_slice(body.as_bytes()).unwrap();
        assert_eq!(
            response,
            GenerationResponse::Password {
                updated_at: TIMESTAMP.to_string(),
                value: "potatoes".to_string(),
            }
        );
        assert_eq!(response.secret_type(), SecretType::Password);
        assert_eq!(response.updated_at(), TIMESTAMP);
    }

    #[test]
    fn test_nested_key_pair_response() {
        let body = format!(
            r#"{{"type":"ssh","name":"foo-ssh-key","updated_at":"{TIMESTAMP}","value":{{"public_key":"some-public-key","private_key":"some-private-key"}}}}"#
        );
        let response = GenerationResponse::from_slice(body.as_bytes()).unwrap();
        assert_eq!(
            response,
            GenerationResponse::Ssh {
                updated_at: TIMESTAMP.to_string(),
                public_key: "some-public-key".to_string(),
                private_key: "some-private-key".to_string(),
            }
        );
    }

    #[test]
    fn test_flat_rsa_response() {
        let body = format!(
            r#"{{"type":"rsa","updated_at":"{TIMESTAMP}","public_key":"pub","private_key":"priv"}}"#
        );
        let response = GenerationResponse::from_slice(body.as_bytes()).unwrap();
        assert_eq!(response.secret_type(), SecretType::Rsa);
    }

    #[test]
    fn test_self_signed_certificate_has_null_ca() {
        let body = format!(
            r#"{{"type":"certificate","updated_at":"{TIMESTAMP}","value":{{"ca":null,"certificate":"my-cert","private_key":"my-priv"}}}}"#
        );
        match GenerationResponse::from_slice(body.as_bytes()).unwrap() {
            GenerationResponse::Certificate { ca, certificate, .. } => {
                assert_eq!(ca, None);
                assert_eq!(certificate, "my-cert");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_unrecognised_shapes_are_rejected() {
        let bodies = [
            "not json".to_string(),
            "[1, 2]".to_string(),
            format!(r#"{{"type":"value","updated_at":"{TIMESTAMP}","value":"x"}}"#),
            format!(r#"{{"updated_at":"{TIMESTAMP}","value":"x"}}"#),
            format!(r#"{{"type":"ssh","updated_at":"{TIMESTAMP}","value":{{"public_key":"pub"}}}}"#),
            r#"{"type":"password","value":"potatoes"}"#.to_string(),
        ];

        for body in bodies {
            let err = GenerationResponse::from_slice(body.as_bytes()).unwrap_err();
            assert!(
                matches!(err, CredhubError::ResponseShape(_)),
                "expected a shape error for {body}, got {err:?}"
            );
        }
    }
}
