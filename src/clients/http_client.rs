//! Blocking HTTP implementation of [`ApiClient`].
//!
//! [`HttpApiClient`] turns model request parameters into an HTTP request,
//! sends it with `reqwest`, and parses the JSON body into a
//! [`ResponseEnvelope`].

use std::collections::HashMap;

use crate::clients::api_client::ApiClient;
use crate::clients::envelope::ResponseEnvelope;
use crate::clients::errors::{ApiError, HttpResponseError};
use crate::clients::http_request::{HttpRequest, HttpVerb};
use crate::config::{ApiConfig, BaseUrl};
use crate::model::Params;

/// Crate version from Cargo.toml.
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client that issues model requests against a REST API.
///
/// The client handles:
/// - URL construction from the configured base URL and `_path`
/// - Default headers including User-Agent and Accept
/// - Query string (GET, DELETE) or JSON body (POST, PUT, PATCH) encoding
/// - Parsing of `errors` and `metadata` out of object responses
///
/// Server errors (status 500 and above) fail with [`ApiError::Response`].
/// Client error responses with a JSON body are parsed like successful ones
/// so that validation errors reach the shaped resource; without a JSON
/// body they fail with [`ApiError::Response`] too.
///
/// # Thread Safety
///
/// `HttpApiClient` is `Send + Sync` and may be bound to many model types.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use rest_model::{ApiConfig, BaseUrl, HttpApiClient, ModelType};
///
/// let config = ApiConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com")?)
///     .build()?;
/// let client = Arc::new(HttpApiClient::new(&config)?);
///
/// let users = ModelType::builder("User").api_client(client).build();
/// let popular = users.get_collection("users/popular", Default::default())?;
/// ```
#[derive(Debug)]
pub struct HttpApiClient {
    /// The internal reqwest HTTP client.
    client: reqwest::blocking::Client,
    /// Base URL requests are joined onto.
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpApiClient>();
};

impl HttpApiClient {
    /// Creates a new HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}rest-model v{CRATE_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        for (name, value) in config.headers() {
            default_headers.insert(name.clone(), value.clone());
        }

        let mut builder = reqwest::blocking::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a decoded request and parses the response.
    fn send(&self, request: &HttpRequest) -> Result<ResponseEnvelope, ApiError> {
        let url = self.base_url.join(&request.path);

        tracing::debug!("Sending {} request to {}", request.verb, url);

        let mut req_builder = match request.verb {
            HttpVerb::Get => self.client.get(&url),
            HttpVerb::Post => self.client.post(&url),
            HttpVerb::Put => self.client.put(&url),
            HttpVerb::Patch => self.client.patch(&url),
            HttpVerb::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send()?;
        let code = res.status().as_u16();
        let body_text = res.text()?;

        Self::parse_response(code, &body_text, &request.path)
    }

    /// Parses a response into an envelope according to its status.
    ///
    /// - 2xx: an empty body (or 204) parses as `{}`; otherwise the body
    ///   must be JSON.
    /// - Other statuses below 500: a JSON body is parsed so validation
    ///   errors reach the caller; an empty or non-JSON body fails with
    ///   [`ApiError::Response`].
    /// - 500 and above: always [`ApiError::Response`].
    fn parse_response(code: u16, body_text: &str, path: &str) -> Result<ResponseEnvelope, ApiError> {
        let is_success = (200..300).contains(&code);
        let is_empty = body_text.trim().is_empty();

        if is_success {
            if code == 204 || is_empty {
                return Ok(ResponseEnvelope::from_body(serde_json::Value::Object(
                    serde_json::Map::new(),
                )));
            }
            let body = serde_json::from_str(body_text)?;
            return Ok(ResponseEnvelope::from_body(body));
        }

        if code < 500 && !is_empty {
            if let Ok(body) = serde_json::from_str(body_text) {
                return Ok(ResponseEnvelope::from_body(body));
            }
        }

        tracing::warn!(
            "Request to {} failed with status {}: {}",
            path,
            code,
            body_text
        );
        Err(ApiError::Response(HttpResponseError {
            code,
            message: body_text.to_string(),
            path: path.to_string(),
        }))
    }
}

impl ApiClient for HttpApiClient {
    fn request(&self, params: Params) -> Result<ResponseEnvelope, ApiError> {
        let request = HttpRequest::from_params(params)?;
        self.send(&request)
    }
}
