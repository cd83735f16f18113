//! Validated newtype wrappers for configuration values.
//!
//! Values are validated on construction; invalid input is rejected with a
//! [`ConfigError`].

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL for API requests.
///
/// The URL must carry an alphabetic scheme and a non-empty host. Any path
/// on the URL is kept and request paths are appended after it.
///
/// # Example
///
/// ```rust
/// use rest_model::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.example.com");
/// assert_eq!(url.as_ref(), "https://api.example.com/v1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// Surrounding whitespace and trailing slashes are removed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme,
    /// a non-alphabetic scheme, or an empty host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a request path onto this base URL with exactly one separator.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.url.clone()
        } else {
            format!("{}/{path}", self.url)
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Self::new(url).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://api.example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "api.example.com");

        // With port
        let url = BaseUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");

        // With path
        let url = BaseUrl::new("https://api.example.com/v2").unwrap();
        assert_eq!(url.host_name(), "api.example.com");
        assert_eq!(url.as_ref(), "https://api.example.com/v2");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        // No scheme
        assert!(BaseUrl::new("api.example.com").is_err());

        // Empty host
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("https://:8080").is_err());

        // Invalid scheme
        assert!(BaseUrl::new("://example.com").is_err());
        assert!(BaseUrl::new("ht-tp://example.com").is_err());
    }

    #[test]
    fn test_base_url_strips_trailing_slashes() {
        let url = BaseUrl::new("  https://api.example.com/v1//  ").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com/v1");
    }

    #[test]
    fn test_join_uses_single_separator() {
        let url = BaseUrl::new("https://api.example.com/v1").unwrap();
        assert_eq!(url.join("users/7"), "https://api.example.com/v1/users/7");
        assert_eq!(url.join("/users/7"), "https://api.example.com/v1/users/7");
        assert_eq!(url.join(""), "https://api.example.com/v1");
    }

    #[test]
    fn test_base_url_serde_validates() {
        let url: BaseUrl = serde_json::from_str(r#""https://api.example.com""#).unwrap();
        assert_eq!(url.host_name(), "api.example.com");
        assert_eq!(
            serde_json::to_string(&url).unwrap(),
            r#""https://api.example.com""#
        );

        let result: Result<BaseUrl, _> = serde_json::from_str(r#""no-scheme""#);
        assert!(result.is_err());
    }
}
