//! Transport-level error types.
//!
//! Every failure raised by an [`ApiClient`](crate::clients::ApiClient) is an
//! [`ApiError`]. The model layer never translates these; they reach the
//! caller of a verb operation unchanged.
//!
//! - [`HttpResponseError`]: server error responses (5xx)
//! - [`InvalidRequestError`]: `_method` or `_path` missing or malformed
//! - [`ApiError`]: unified error type for all transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_model::clients::{ApiClient, ApiError};
//!
//! match client.request(params) {
//!     Ok(envelope) => println!("data: {}", envelope.data),
//!     Err(ApiError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(ApiError::Network(e)) => println!("Network error: {e}"),
//!     Err(ApiError::Parse(e)) => println!("Invalid JSON: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when the API answers with a server error status.
///
/// # Example
///
/// ```rust
/// use rest_model::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 503,
///     message: r#"{"error":"Service unavailable"}"#.to_string(),
///     path: "users/7".to_string(),
/// };
/// assert!(error.to_string().contains("503"));
/// ```
#[derive(Debug, Error)]
#[error("Request to '{path}' failed with status {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body, as text.
    pub message: String,
    /// The request path that failed.
    pub path: String,
}

/// Error returned when the request parameters cannot form an HTTP request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// The `_method` parameter is absent.
    #[error("Request parameters are missing '_method'.")]
    MissingMethod,

    /// The `_method` parameter is not a supported HTTP verb.
    #[error("Invalid Http method {method}.")]
    InvalidMethod {
        /// The value that was provided.
        method: String,
    },

    /// The `_path` parameter is absent or not a string.
    #[error("Request parameters are missing a string '_path'.")]
    MissingPath,
}

/// Unified error type for transport failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a server error status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// A network or transport-level failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request parameters were invalid.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// A failure raised by a custom [`ApiClient`](crate::clients::ApiClient).
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
    assert_send_sync::<HttpResponseError>();
    assert_send_sync::<InvalidRequestError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_message_includes_status_and_path() {
        let error = HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            path: "users/popular".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("500"));
        assert!(message.contains("users/popular"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_invalid_method_error_names_method() {
        let error = InvalidRequestError::InvalidMethod {
            method: "trace".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid Http method trace.");
    }

    #[test]
    fn test_api_error_from_conversions() {
        let error: ApiError = InvalidRequestError::MissingPath.into();
        assert!(matches!(
            error,
            ApiError::InvalidRequest(InvalidRequestError::MissingPath)
        ));

        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: ApiError = parse.into();
        assert!(matches!(error, ApiError::Parse(_)));

        let boxed: Box<dyn std::error::Error + Send + Sync> = "socket closed".into();
        let error: ApiError = boxed.into();
        assert_eq!(error.to_string(), "socket closed");
    }
}
