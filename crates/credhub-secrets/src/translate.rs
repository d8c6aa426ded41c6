//! Translation of non-success responses into user-facing errors.

use credhub_types::CredhubError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// Turn a non-success response into an error.
///
/// A body of the form `{"error": "<msg>"}` yields [`CredhubError::Server`]
/// carrying `<msg>` exactly. Any other body means the failure happened
/// below the application layer and yields a generic
/// [`CredhubError::Transport`].
pub fn translate(status: u16, body: &str) -> CredhubError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            tracing::debug!(status, "server rejected the request");
            CredhubError::Server(envelope.error)
        }
        Err(e) => {
            tracing::debug!(status, error = %e, "unrecognised error body");
            CredhubError::Transport(format!(
                "Unable to complete the request: the server responded with status {}",
                status
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_verbatim() {
        let err = translate(400, r#"{"error": "you fail."}"#);
        assert!(matches!(err, CredhubError::Server(ref m) if m == "you fail."));
        assert_eq!(err.to_string(), "you fail.");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let err = translate(
            403,
            r#"{"error": "The request could not be completed because the credential does not exist.", "error_description": "x"}"#,
        );
        assert_eq!(
            err.to_string(),
            "The request could not be completed because the credential does not exist."
        );
    }

    #[test]
    fn test_unstructured_body_is_transport_error() {
        for body in ["<html>Bad Gateway</html>", "", r#"{"message": "nope"}"#, r#"{"error": 5}"#] {
            let err = translate(502, body);
            assert!(matches!(err, CredhubError::Transport(_)), "body {body:?} gave {err:?}");
            assert!(err.to_string().contains("502"));
        }
    }
}
