//! Model types and response shaping.
//!
//! This module provides the model layer: a [`ModelType`] issues requests
//! through a pluggable [`ApiClient`](crate::clients::ApiClient) and maps
//! each response into a single model instance or a collection.
//!
//! # Overview
//!
//! - [`ModelType`]: verb operations, request dispatch, custom methods
//! - [`ModelConfig`]: default parameters and inherited client binding
//! - [`RequestPath`] and [`PathBuilder`]: literal and symbolic paths
//! - [`ModelFactory`]: instance and collection construction
//! - [`shape`]: the auto/collection/resource decision
//! - [`ModelError`]: error type for every model operation
//!
//! # Parameters
//!
//! Requests carry a flat [`Params`] map. Two keys are reserved and always
//! set by dispatch: `_method` (lowercase verb) and `_path` (resolved path).
//! Resources built by the merging shapers also carry `_metadata` (the raw
//! response data) and `_errors` (the response errors).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rest_model::clients::{ApiError, ResponseEnvelope};
//! use rest_model::model::{ModelType, Params};
//! use serde_json::json;
//!
//! let base = ModelType::builder("Base")
//!     .api_client(Arc::new(|_params: Params| {
//!         Ok::<_, ApiError>(ResponseEnvelope::new(json!({"id": 1, "name": "Lindsay"})))
//!     }))
//!     .build();
//! let users = ModelType::builder("User").parent(&base).build();
//!
//! let user = users.get("users/1", Params::new()).unwrap().into_resource().unwrap();
//! assert_eq!(user.get("name"), Some(&json!("Lindsay")));
//! assert_eq!(user.errors(), Some(&json!({})));
//! ```

mod config;
mod custom;
mod errors;
mod factory;
mod model_type;
mod params;
mod path;
mod shape;

pub use config::ModelConfig;
pub use custom::{CustomVerb, CustomVerbTable};
pub use errors::{value_kind, ModelError, ResponseShape};
pub use factory::{Collection, ModelFactory, Resource, ResourceFactory, SerdeFactory};
pub use model_type::{ModelType, ModelTypeBuilder, ShapedModel};
pub use params::{merge_params, Params, ERRORS_KEY, METADATA_KEY, METHOD_KEY, PATH_KEY};
pub use path::{build_path, PathBuilder, RequestPath, TemplatePathBuilder};
pub use shape::{collection, resource, resource_data_only, shape, Shaped, Shaping};
