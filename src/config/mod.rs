//! Configuration types for the HTTP API client.
//!
//! # Overview
//!
//! - [`ApiConfig`]: settings used by [`HttpApiClient`](crate::clients::HttpApiClient)
//! - [`ApiConfigBuilder`]: a builder for constructing [`ApiConfig`] instances
//! - [`BaseUrl`]: a validated base URL newtype
//!
//! Per-model settings (default parameters, client binding) are not part of
//! this configuration; they live on each [`ModelType`](crate::model::ModelType).
//!
//! # Example
//!
//! ```rust
//! use rest_model::{ApiConfig, BaseUrl};
//! use std::time::Duration;
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for [`HttpApiClient`](crate::clients::HttpApiClient).
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the extra headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// `base_url` is required.
///
/// # Defaults
///
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (the transport default)
/// - `headers`: empty
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request. Later values replace earlier ones.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(ApiConfig {
            base_url,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            headers: self.headers,
        })
    }
}
