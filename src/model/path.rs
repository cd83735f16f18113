//! Path resolution for model requests.
//!
//! A request path is either a literal string, used as-is, or a symbolic
//! name. Symbolic names are appended to a base path that a
//! [`PathBuilder`] derives from the request parameters:
//!
//! ```rust
//! use rest_model::model::{Params, PathBuilder, RequestPath, TemplatePathBuilder};
//! use serde_json::json;
//!
//! let builder = TemplatePathBuilder::new("users");
//! let params: Params = json!({"id": 7}).as_object().unwrap().clone();
//!
//! let path = RequestPath::symbol("popular").resolve(&builder, &params).unwrap();
//! assert_eq!(path, "users/7/popular");
//!
//! let path = RequestPath::from("/stats").resolve(&builder, &params).unwrap();
//! assert_eq!(path, "/stats");
//! ```
//!
//! Resolution does no escaping of its own. [`build_path`] encodes the
//! values it interpolates; encoding the final path is the API client's job.

use std::fmt;

use serde_json::Value;

use crate::model::errors::ModelError;
use crate::model::params::Params;

/// A request path as given at the call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestPath {
    /// A concrete path, used unchanged.
    Literal(String),
    /// A name appended to the base path built from the parameters.
    Symbol(String),
}

impl RequestPath {
    /// Creates a literal path.
    #[must_use]
    pub fn literal(path: impl Into<String>) -> Self {
        Self::Literal(path.into())
    }

    /// Creates a symbolic path.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Resolves this path against the given parameters.
    ///
    /// Literal paths are returned unchanged. Symbolic paths become
    /// `<base path>/<name>`, where the base path comes from `builder`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PathBuilder::build_base_path`].
    pub fn resolve(&self, builder: &dyn PathBuilder, params: &Params) -> Result<String, ModelError> {
        match self {
            Self::Literal(path) => Ok(path.clone()),
            Self::Symbol(name) => {
                let base = builder.build_base_path(params)?;
                Ok(format!("{base}/{name}"))
            }
        }
    }
}

impl From<&str> for RequestPath {
    fn from(path: &str) -> Self {
        Self::Literal(path.to_string())
    }
}

impl From<String> for RequestPath {
    fn from(path: String) -> Self {
        Self::Literal(path)
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(path) => f.write_str(path),
            Self::Symbol(name) => write!(f, ":{name}"),
        }
    }
}

/// Derives a model's base resource path from request parameters.
///
/// Closures of the form `Fn(&Params) -> Result<String, ModelError>`
/// implement this trait.
pub trait PathBuilder: Send + Sync {
    /// Builds the base path for a request with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingPathParameter`] (or another
    /// [`ModelError`]) if the parameters cannot produce a path.
    fn build_base_path(&self, params: &Params) -> Result<String, ModelError>;
}

impl<F> PathBuilder for F
where
    F: Fn(&Params) -> Result<String, ModelError> + Send + Sync,
{
    fn build_base_path(&self, params: &Params) -> Result<String, ModelError> {
        self(params)
    }
}

/// Template-based [`PathBuilder`].
///
/// Uses the resource template when the primary key is present (and not
/// null) in the parameters, otherwise the collection template. `{name}`
/// placeholders are filled from the parameters.
///
/// # Example
///
/// ```rust
/// use rest_model::model::{Params, PathBuilder, TemplatePathBuilder};
/// use serde_json::json;
///
/// let builder = TemplatePathBuilder::new("organizations/{organization_id}/users");
/// let params: Params = json!({"organization_id": 2, "id": 9}).as_object().unwrap().clone();
///
/// assert_eq!(
///     builder.build_base_path(&params).unwrap(),
///     "organizations/2/users/9"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplatePathBuilder {
    collection_path: String,
    resource_path: String,
    primary_key: String,
}

impl TemplatePathBuilder {
    /// Creates a builder with the given collection template.
    ///
    /// The resource template defaults to `<collection>/{id}`.
    #[must_use]
    pub fn new(collection_path: impl Into<String>) -> Self {
        let collection_path = collection_path.into();
        let resource_path = format!("{collection_path}/{{id}}");
        Self {
            collection_path,
            resource_path,
            primary_key: "id".to_string(),
        }
    }

    /// Sets the resource template.
    #[must_use]
    pub fn resource_path(mut self, template: impl Into<String>) -> Self {
        self.resource_path = template.into();
        self
    }

    /// Sets the primary key that selects the resource template.
    ///
    /// The default resource template is rebuilt around the new key.
    #[must_use]
    pub fn primary_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        let default_resource = format!("{}/{{{}}}", self.collection_path, self.primary_key);
        if self.resource_path == default_resource {
            self.resource_path = format!("{}/{{{key}}}", self.collection_path);
        }
        self.primary_key = key;
        self
    }

    /// Returns the collection template.
    #[must_use]
    pub fn collection_template(&self) -> &str {
        &self.collection_path
    }

    /// Returns the resource template.
    #[must_use]
    pub fn resource_template(&self) -> &str {
        &self.resource_path
    }
}

impl PathBuilder for TemplatePathBuilder {
    fn build_base_path(&self, params: &Params) -> Result<String, ModelError> {
        let has_key = params
            .get(&self.primary_key)
            .is_some_and(|value| !value.is_null());
        let template = if has_key {
            &self.resource_path
        } else {
            &self.collection_path
        };
        build_path(template, params)
    }
}

/// Interpolates `{name}` placeholders in a template from parameters.
///
/// String values are percent-encoded, so an identifier such as `"a/b"`
/// stays a single path segment; other values use their JSON rendering.
///
/// # Errors
///
/// Returns [`ModelError::MissingPathParameter`] if a placeholder has no
/// value (or a null value) in `params`.
///
/// # Example
///
/// ```rust
/// use rest_model::model::{build_path, Params};
/// use serde_json::json;
///
/// let params: Params = json!({"product_id": 123, "id": "abc"}).as_object().unwrap().clone();
/// let url = build_path("products/{product_id}/variants/{id}", &params).unwrap();
/// assert_eq!(url, "products/123/variants/abc");
/// ```
pub fn build_path(template: &str, params: &Params) -> Result<String, ModelError> {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        result.push_str(&rest[..open]);

        let name = &rest[open + 1..close];
        match params.get(name) {
            Some(Value::String(s)) => result.push_str(&urlencoding::encode(s)),
            Some(value) if !value.is_null() => result.push_str(&value.to_string()),
            _ => {
                return Err(ModelError::MissingPathParameter {
                    template: template.to_string(),
                    parameter: name.to_string(),
                })
            }
        }

        rest = &rest[close + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_literal_path_is_unchanged() {
        let builder = TemplatePathBuilder::new("users");
        let path = RequestPath::literal("users/popular")
            .resolve(&builder, &params(json!({"id": 7})))
            .unwrap();
        assert_eq!(path, "users/popular");
    }

    #[test]
    fn test_symbol_without_id_uses_collection_path() {
        let builder = TemplatePathBuilder::new("users");
        let path = RequestPath::symbol("popular")
            .resolve(&builder, &Params::new())
            .unwrap();
        assert_eq!(path, "users/popular");
    }

    #[test]
    fn test_symbol_with_id_uses_resource_path() {
        let builder = TemplatePathBuilder::new("/users");
        let path = RequestPath::symbol("popular")
            .resolve(&builder, &params(json!({"id": 7})))
            .unwrap();
        assert_eq!(path, "/users/7/popular");
    }

    #[test]
    fn test_null_primary_key_counts_as_absent() {
        let builder = TemplatePathBuilder::new("users");
        let base = builder
            .build_base_path(&params(json!({"id": null})))
            .unwrap();
        assert_eq!(base, "users");
    }

    #[test]
    fn test_symbol_resolution_propagates_builder_errors() {
        let builder = TemplatePathBuilder::new("organizations/{organization_id}/users");
        let result = RequestPath::symbol("popular").resolve(&builder, &Params::new());

        assert!(matches!(
            result,
            Err(ModelError::MissingPathParameter { parameter, .. }) if parameter == "organization_id"
        ));
    }

    #[test]
    fn test_custom_primary_key_rebuilds_default_resource_template() {
        let builder = TemplatePathBuilder::new("users").primary_key("slug");
        assert_eq!(builder.resource_template(), "users/{slug}");

        let base = builder
            .build_base_path(&params(json!({"slug": "tobias"})))
            .unwrap();
        assert_eq!(base, "users/tobias");
    }

    #[test]
    fn test_custom_resource_template_is_kept() {
        let builder = TemplatePathBuilder::new("users")
            .resource_path("people/{uuid}")
            .primary_key("uuid");
        assert_eq!(builder.resource_template(), "people/{uuid}");
        assert_eq!(builder.collection_template(), "users");
    }

    #[test]
    fn test_closure_path_builder() {
        let builder = |params: &Params| -> Result<String, ModelError> {
            Ok(format!("shops/{}", params.len()))
        };
        let path = RequestPath::symbol("stats")
            .resolve(&builder, &params(json!({"a": 1, "b": 2})))
            .unwrap();
        assert_eq!(path, "shops/2/stats");
    }

    #[test]
    fn test_build_path_encodes_string_values_as_one_segment() {
        let path = build_path("users/{id}", &params(json!({"id": "a/b c"}))).unwrap();
        assert_eq!(path, "users/a%2Fb%20c");

        let builder = TemplatePathBuilder::new("users");
        let path = RequestPath::symbol("popular")
            .resolve(&builder, &params(json!({"id": "a/b"})))
            .unwrap();
        assert_eq!(path, "users/a%2Fb/popular");
        assert_eq!(crate::clients::encode_path(&path), "users/a%2Fb/popular");
    }

    #[test]
    fn test_build_path_leaves_unclosed_brace() {
        let path = build_path("users/{id", &params(json!({"id": 1}))).unwrap();
        assert_eq!(path, "users/{id");
    }

    #[test]
    fn test_request_path_conversions_and_display() {
        assert_eq!(RequestPath::from("a"), RequestPath::Literal("a".to_string()));
        assert_eq!(
            RequestPath::from("a".to_string()),
            RequestPath::Literal("a".to_string())
        );
        assert_eq!(RequestPath::symbol("popular").to_string(), ":popular");
        assert_eq!(RequestPath::literal("/x").to_string(), "/x");
    }
}
