//! The API client boundary used by model types.

use crate::clients::envelope::ResponseEnvelope;
use crate::clients::errors::ApiError;
use crate::model::Params;

/// Performs requests on behalf of model types.
///
/// `params` always carries `_method` (one of `get`, `post`, `put`,
/// `patch`, `delete`) and `_path`, plus any parameters to serialize as
/// query or body values. The call blocks until the response is parsed.
///
/// Any `Fn(Params) -> Result<ResponseEnvelope, ApiError>` closure is an
/// `ApiClient`, which keeps test doubles short.
///
/// # Example
///
/// ```rust
/// use rest_model::clients::{ApiClient, ApiError, ResponseEnvelope};
/// use rest_model::model::Params;
/// use serde_json::json;
///
/// let client = |params: Params| {
///     Ok::<_, ApiError>(ResponseEnvelope::new(json!({"path": params["_path"]})))
/// };
/// let mut params = Params::new();
/// params.insert("_method".into(), json!("get"));
/// params.insert("_path".into(), json!("users"));
///
/// let envelope = client.request(params).unwrap();
/// assert_eq!(envelope.data, json!({"path": "users"}));
/// ```
pub trait ApiClient: Send + Sync {
    /// Sends a request and returns the parsed response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for any transport, status, or parsing failure.
    fn request(&self, params: Params) -> Result<ResponseEnvelope, ApiError>;
}

impl<F> ApiClient for F
where
    F: Fn(Params) -> Result<ResponseEnvelope, ApiError> + Send + Sync,
{
    fn request(&self, params: Params) -> Result<ResponseEnvelope, ApiError> {
        self(params)
    }
}
