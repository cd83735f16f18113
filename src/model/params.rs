//! Request parameter maps and their reserved keys.

use serde_json::{Map, Value};

/// Request parameters: symbolic keys mapped to JSON values.
pub type Params = Map<String, Value>;

/// Parameter carrying the HTTP verb of a dispatched request.
pub const METHOD_KEY: &str = "_method";

/// Parameter carrying the resolved path of a dispatched request.
pub const PATH_KEY: &str = "_path";

/// Attribute holding the response data a resource was built from.
pub const METADATA_KEY: &str = "_metadata";

/// Attribute holding the errors returned with a resource.
pub const ERRORS_KEY: &str = "_errors";

/// Merges call-site parameters over defaults.
///
/// Call-site values win on key collision.
///
/// # Example
///
/// ```rust
/// use rest_model::model::{merge_params, Params};
/// use serde_json::json;
///
/// let defaults: Params = json!({"locale": "en", "page": 1}).as_object().unwrap().clone();
/// let call_site: Params = json!({"page": 3}).as_object().unwrap().clone();
///
/// let merged = merge_params(&defaults, call_site);
/// assert_eq!(merged["locale"], json!("en"));
/// assert_eq!(merged["page"], json!(3));
/// ```
#[must_use]
pub fn merge_params(defaults: &Params, params: Params) -> Params {
    let mut merged = defaults.clone();
    merged.extend(params);
    merged
}
