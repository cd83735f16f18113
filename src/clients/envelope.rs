//! The parsed-but-unmapped response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed API response, before it is mapped to model instances.
///
/// `data` is either a single JSON object or an array of objects; the
/// model layer uses that distinction, and nothing else, to decide between
/// a single resource and a collection.
///
/// # Example
///
/// ```rust
/// use rest_model::clients::ResponseEnvelope;
/// use serde_json::json;
///
/// let envelope = ResponseEnvelope::from_body(json!({
///     "id": 1,
///     "name": "Tobias",
///     "errors": {"name": ["is taken"]},
/// }));
///
/// assert_eq!(envelope.data, json!({"id": 1, "name": "Tobias"}));
/// assert_eq!(envelope.errors, json!({"name": ["is taken"]}));
/// assert!(!envelope.is_collection());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The response data: an object or an array of objects.
    pub data: Value,
    /// Errors returned alongside the data.
    #[serde(default = "empty_errors")]
    pub errors: Value,
    /// Response-level metadata (pagination and the like).
    #[serde(default = "empty_metadata")]
    pub metadata: Value,
}

fn empty_errors() -> Value {
    Value::Object(Map::new())
}

fn empty_metadata() -> Value {
    Value::Array(Vec::new())
}

impl ResponseEnvelope {
    /// Creates an envelope with the given data and no errors or metadata.
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self {
            data,
            errors: empty_errors(),
            metadata: empty_metadata(),
        }
    }

    /// Sets the errors field.
    #[must_use]
    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the metadata field.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Builds an envelope from a decoded JSON response body.
    ///
    /// For an object body the `errors` and `metadata` keys are lifted out
    /// of the data (defaulting to `{}` and `[]`). Any other body becomes
    /// `data` as-is.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut map) => {
                let errors = map.remove("errors").unwrap_or_else(empty_errors);
                let metadata = map.remove("metadata").unwrap_or_else(empty_metadata);
                Self {
                    data: Value::Object(map),
                    errors,
                    metadata,
                }
            }
            other => Self::new(other),
        }
    }

    /// Returns `true` if `data` is an array.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.data.is_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_lifts_errors_and_metadata() {
        let envelope = ResponseEnvelope::from_body(json!({
            "id": 1,
            "errors": ["bad"],
            "metadata": {"page": 2}
        }));

        assert_eq!(envelope.data, json!({"id": 1}));
        assert_eq!(envelope.errors, json!(["bad"]));
        assert_eq!(envelope.metadata, json!({"page": 2}));
    }

    #[test]
    fn test_from_body_defaults_errors_and_metadata() {
        let envelope = ResponseEnvelope::from_body(json!({"id": 1}));

        assert_eq!(envelope.errors, json!({}));
        assert_eq!(envelope.metadata, json!([]));
    }

    #[test]
    fn test_from_body_keeps_arrays_as_data() {
        let envelope = ResponseEnvelope::from_body(json!([{"id": 1}, {"id": 2}]));

        assert!(envelope.is_collection());
        assert_eq!(envelope.data, json!([{"id": 1}, {"id": 2}]));
        assert_eq!(envelope.errors, json!({}));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({"data": {"a": 1}})).unwrap();

        assert_eq!(envelope, ResponseEnvelope::new(json!({"a": 1})));
    }
}
