//! Error types for the `AgriMarket` admin console

use std::{error::Error as StdError, fmt};

/// Main error type for the `AgriMarket` admin console
#[derive(Debug)]
pub enum Error {
    /// Network failure (no usable response from the API)
    Network(String),

    /// Authentication failure (explicit rejection by the API)
    Authentication(String),

    /// Client-side validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Resource not found
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// API rejected the request with an error body
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Human-readable message from the API
        message: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Api { status, message } => write!(f, "API error ({status}): {message}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl Error {
    /// Whether the error should send the operator back to the login page
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_api_status() {
        let err = Error::Api {
            status: 403,
            message: "Cannot suspend superuser account".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (403): Cannot suspend superuser account"
        );
    }

    #[test]
    fn display_formats_validation_field() {
        let err = Error::Validation {
            field: "username".to_string(),
            message: "must not be empty".to_string(),
        };
        assert_eq!(err.to_string(), "Validation error: username - must not be empty");
    }

    #[test]
    fn serialization_error_has_source() {
        let json_err = serde_json::from_str::<i64>("not a number").unwrap_err();
        let err = Error::from(json_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn authentication_predicate() {
        assert!(Error::Authentication("session expired".into()).is_authentication());
        assert!(!Error::Network("timed out".into()).is_authentication());
    }
}
