//! # rest-model
//!
//! Model-level REST request dispatch with response shaping.
//!
//! ## Overview
//!
//! This crate provides:
//! - Model types via [`ModelType`] and [`ModelTypeBuilder`], each issuing
//!   GET, POST, PUT, PATCH, and DELETE requests in four variants
//!   (auto-shaped, raw, collection, resource)
//! - Symbolic paths resolved against a per-type [`PathBuilder`]
//! - Per-type default parameters and an API client binding inherited
//!   through parent types
//! - Custom verb methods registered by name and invoked with [`ModelType::call`]
//! - A pluggable [`ApiClient`] seam with a blocking, `reqwest`-backed
//!   [`HttpApiClient`]
//! - Type-safe client configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rest_model::{ApiConfig, BaseUrl, HttpApiClient, ModelType, Params, RequestPath};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com")?)
//!     .build()?;
//!
//! let base = ModelType::builder("Base")
//!     .api_client(Arc::new(HttpApiClient::new(&config)?))
//!     .build();
//!
//! let users = ModelType::builder("User")
//!     .collection_path("users")
//!     .parent(&base)
//!     .build();
//! users.custom_get(["popular"]);
//!
//! // GET users
//! let all = users.get_collection("users", Params::new())?;
//!
//! // GET users/popular
//! let popular = users.call("popular", None)?;
//! ```
//!
//! ## Testing Without a Network
//!
//! Any `Fn(Params) -> Result<ResponseEnvelope, ApiError>` closure is an
//! [`ApiClient`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use rest_model::{ApiError, ModelType, Params, ResponseEnvelope};
//! use serde_json::json;
//!
//! let users = ModelType::builder("User")
//!     .api_client(Arc::new(|params: Params| {
//!         assert_eq!(params["_method"], json!("delete"));
//!         Ok::<_, ApiError>(ResponseEnvelope::new(json!({})))
//!     }))
//!     .build();
//!
//! let envelope = users.delete_raw("users/1", Params::new()).unwrap();
//! assert_eq!(envelope.data, json!({}));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: client bindings live on model types and are resolved per call
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Thread-safe**: model types, configs, and clients are `Send + Sync`
//! - **Errors propagate**: nothing is retried or swallowed by the model layer

pub mod clients;
pub mod config;
pub mod error;
pub mod model;

// Re-export public types at crate root for convenience
pub use config::{ApiConfig, ApiConfigBuilder, BaseUrl};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    ApiClient, ApiError, HttpApiClient, HttpResponseError, HttpVerb, InvalidRequestError,
    ResponseEnvelope,
};

// Re-export model types
pub use model::{
    Collection, ModelError, ModelFactory, ModelType, ModelTypeBuilder, Params, PathBuilder,
    RequestPath, Resource, ResourceFactory, SerdeFactory, Shaped, Shaping,
    TemplatePathBuilder,
};
