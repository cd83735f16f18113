//! Error types for model requests.
//!
//! The model layer recovers nothing locally: every failure surfaces to the
//! caller of the verb operation that triggered it.
//!
//! - [`ModelError::Configuration`]: no API client bound anywhere in the chain
//! - [`ModelError::ShapeMismatch`]: response data has the wrong shape
//! - [`ModelError::Transport`]: the API client failed (propagated unchanged)
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_model::model::ModelError;
//!
//! match users.get_collection("users", Params::new()) {
//!     Ok(users) => println!("{} users", users.len()),
//!     Err(ModelError::Configuration { model }) => {
//!         println!("bind an API client to {model} first");
//!     }
//!     Err(ModelError::ShapeMismatch { expected, found }) => {
//!         println!("expected {expected}, got {found}");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::clients::ApiError;

/// The two shapes response data can be mapped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// A single resource built from an object.
    Resource,
    /// A collection built from an array of objects.
    Collection,
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource => f.write_str("an object"),
            Self::Collection => f.write_str("an array"),
        }
    }
}

/// Error type for model requests.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No API client is bound to the model type or any of its parents.
    #[error("No API client is bound to {model} or any of its parent types")]
    Configuration {
        /// The model type that attempted the request.
        model: String,
    },

    /// Response data does not have the shape the call requires.
    #[error("Expected {expected} in response data, found {found}")]
    ShapeMismatch {
        /// The shape the call required.
        expected: ResponseShape,
        /// The JSON kind that was found (e.g., "array", "null").
        found: &'static str,
    },

    /// A path template placeholder has no matching parameter.
    #[error("Missing parameter '{parameter}' required by path '{template}'")]
    MissingPathParameter {
        /// The path template being interpolated.
        template: String,
        /// The placeholder without a value.
        parameter: String,
    },

    /// No custom method with this name is registered on the model type.
    #[error("{model} has no custom method named '{name}'")]
    UnknownMethod {
        /// The model type.
        model: String,
        /// The requested method name.
        name: String,
    },

    /// Attributes could not be deserialized into a typed model.
    #[error("Failed to build model instance: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The API client failed.
    #[error(transparent)]
    Transport(#[from] ApiError),
}

impl ModelError {
    /// Creates a [`ModelError::ShapeMismatch`] for the given data.
    #[must_use]
    pub const fn shape_mismatch(expected: ResponseShape, found: &Value) -> Self {
        Self::ShapeMismatch {
            expected,
            found: value_kind(found),
        }
    }
}

/// Returns the JSON kind name of a value.
#[must_use]
pub const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Verify ModelError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModelError>();
};
