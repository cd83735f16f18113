//! Error types for client configuration.
//!
//! This module contains the error type returned when building an
//! [`ApiConfig`](crate::ApiConfig) or one of its validated values.
//!
//! # Example
//!
//! ```rust
//! use rest_model::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring an API client.
///
/// Each variant carries enough context to produce an actionable message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "ftp//broken".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp//broken"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let _: &dyn std::error::Error = &error;
    }
}
