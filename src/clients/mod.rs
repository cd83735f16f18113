//! API client types.
//!
//! Model types never talk to the network themselves; they hand request
//! parameters to an [`ApiClient`] and receive a [`ResponseEnvelope`].
//!
//! # Overview
//!
//! - [`ApiClient`]: the single blocking `request` operation model types call
//! - [`ResponseEnvelope`]: parsed `{data, errors, metadata}` response
//! - [`HttpApiClient`]: `reqwest`-backed implementation of [`ApiClient`]
//! - [`HttpVerb`]: the five verbs a model can issue
//! - [`HttpRequest`]: request parameters decoded into an HTTP request
//! - [`ApiError`]: transport-level error type
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_model::clients::{ApiClient, HttpApiClient};
//! use rest_model::{ApiConfig, BaseUrl};
//! use serde_json::json;
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com")?)
//!     .build()?;
//! let client = HttpApiClient::new(&config)?;
//!
//! let params = json!({"_method": "get", "_path": "users/1"});
//! let envelope = client.request(params.as_object().unwrap().clone())?;
//! println!("{}", envelope.data);
//! ```

mod api_client;
mod envelope;
mod errors;
mod http_client;
mod http_request;

pub use api_client::ApiClient;
pub use envelope::ResponseEnvelope;
pub use errors::{ApiError, HttpResponseError, InvalidRequestError};
pub use http_client::{HttpApiClient, CRATE_VERSION};
pub use http_request::{encode_path, HttpRequest, HttpVerb};
