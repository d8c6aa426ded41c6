//! Error types for CredHub client operations.

use thiserror::Error;

/// The main error type for CredHub client operations.
///
/// Every variant is fatal to the current command. The four kinds that
/// concern secret generation are [`Validation`](CredhubError::Validation),
/// [`Server`](CredhubError::Server), [`Transport`](CredhubError::Transport)
/// and [`ResponseShape`](CredhubError::ResponseShape).
#[derive(Error, Debug)]
pub enum CredhubError {
    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or missing input, detected before any request is sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Message supplied by the server in a non-success response.
    ///
    /// Displayed verbatim: the server's wording is authoritative.
    #[error("{0}")]
    Server(String),

    /// The request never completed, or failed below the application layer
    #[error("{0}")]
    Transport(String),

    /// A success response whose body matches no known secret shape
    #[error("Unexpected response from server: {0}")]
    ResponseShape(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl CredhubError {
    /// Process exit code for this error.
    ///
    /// Every failure terminates the command with the same non-zero code.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether the message came from the server and must be shown unframed.
    pub fn is_server_message(&self) -> bool {
        matches!(self, CredhubError::Server(_))
    }
}

/// A specialized Result type for CredHub client operations.
pub type Result<T> = std::result::Result<T, CredhubError>;

/// Helper macro to bail out with a CredhubError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if name.is_empty() {
///     bail!(Validation, "name required");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::CredhubError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::CredhubError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::CredhubError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::CredhubError::Other(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(name: &str) -> Result<()> {
        if name.is_empty() {
            bail!(Validation, "name required");
        }
        Ok(())
    }

    #[test]
    fn test_server_message_is_unframed() {
        let err = CredhubError::Server("you fail.".to_string());
        assert_eq!(err.to_string(), "you fail.");
        assert!(err.is_server_message());
    }

    #[test]
    fn test_every_error_exits_with_one() {
        let errors = [
            CredhubError::Validation("name required".to_string()),
            CredhubError::Server("you fail.".to_string()),
            CredhubError::Transport("connection refused".to_string()),
            CredhubError::ResponseShape("unknown variant".to_string()),
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_bail_macro() {
        let err = validate("").unwrap_err();
        assert!(matches!(err, CredhubError::Validation(ref m) if m == "name required"));
        assert_eq!(err.to_string(), "Validation error: name required");
        assert!(validate("my-password").is_ok());
    }
}
