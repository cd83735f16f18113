//! HTTP verbs and the conversion from request parameters to an HTTP request.
//!
//! The model layer hands an [`ApiClient`](crate::clients::ApiClient) a flat
//! [`Params`] map carrying `_method` and `_path` alongside the caller's
//! parameters. [`HttpRequest::from_params`] splits that map back into a
//! verb, a path, and either a query string or a JSON body.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::clients::errors::InvalidRequestError;
use crate::model::{Params, METHOD_KEY, PATH_KEY};

/// HTTP verbs a model can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl HttpVerb {
    /// All verbs, in declaration order.
    pub const ALL: [Self; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Returns the lowercase name used for the `_method` parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` if parameters travel in the query string rather than a body.
    #[must_use]
    pub const fn uses_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = InvalidRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(InvalidRequestError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl From<HttpVerb> for Value {
    fn from(verb: HttpVerb) -> Self {
        Self::String(verb.as_str().to_string())
    }
}

/// An HTTP request decoded from model request parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP verb.
    pub verb: HttpVerb,
    /// The percent-encoded request path.
    pub path: String,
    /// Query parameters (GET and DELETE).
    pub query: Vec<(String, String)>,
    /// JSON body (POST, PUT and PATCH).
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Decodes request parameters into an HTTP request.
    ///
    /// `_method` and `_path` are removed; the remaining parameters become
    /// the query string for GET/DELETE and the JSON body otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if `_method` is absent or not a
    /// supported verb, or if `_path` is absent or not a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_model::clients::{HttpRequest, HttpVerb};
    /// use serde_json::json;
    ///
    /// let params = json!({"_method": "get", "_path": "users/popular", "page": 2});
    /// let request = HttpRequest::from_params(params.as_object().unwrap().clone()).unwrap();
    ///
    /// assert_eq!(request.verb, HttpVerb::Get);
    /// assert_eq!(request.path, "users/popular");
    /// assert_eq!(request.query, vec![("page".to_string(), "2".to_string())]);
    /// assert!(request.body.is_none());
    /// ```
    pub fn from_params(mut params: Params) -> Result<Self, InvalidRequestError> {
        let verb = match params.remove(METHOD_KEY) {
            Some(Value::String(method)) => method.parse::<HttpVerb>()?,
            Some(other) => {
                return Err(InvalidRequestError::InvalidMethod {
                    method: other.to_string(),
                })
            }
            None => return Err(InvalidRequestError::MissingMethod),
        };

        let path = match params.remove(PATH_KEY) {
            Some(Value::String(path)) => encode_path(&path),
            _ => return Err(InvalidRequestError::MissingPath),
        };

        if verb.uses_query() {
            Ok(Self {
                verb,
                path,
                query: to_query(params),
                body: None,
            })
        } else {
            Ok(Self {
                verb,
                path,
                query: Vec::new(),
                body: Some(Value::Object(params)),
            })
        }
    }
}

/// Percent-encodes a request path for transport.
///
/// Only characters outside the RFC 3986 path character set are escaped.
/// `/` separators and existing `%XX` escapes are kept, and anything after
/// the first `?` is passed through as the query string.
///
/// # Example
///
/// ```rust
/// use rest_model::clients::encode_path;
///
/// assert_eq!(encode_path("tags/a b"), "tags/a%20b");
/// assert_eq!(encode_path("tags/a%20b"), "tags/a%20b");
/// assert_eq!(encode_path("users?active=true"), "users?active=true");
/// ```
#[must_use]
pub fn encode_path(path: &str) -> String {
    let (path, query) = match path.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path, None),
    };

    let bytes = path.as_bytes();
    let mut encoded = String::with_capacity(path.len());
    for (i, ch) in path.char_indices() {
        if ch == '/' || is_path_char(ch) || (ch == '%' && is_escape(&bytes[i + 1..])) {
            encoded.push(ch);
        } else {
            let mut buf = [0; 4];
            encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }

    if let Some(query) = query {
        encoded.push('?');
        encoded.push_str(query);
    }
    encoded
}

// RFC 3986 pchar, minus percent-encoded triplets
fn is_path_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@".contains(ch)
}

fn is_escape(rest: &[u8]) -> bool {
    rest.len() >= 2 && rest[0].is_ascii_hexdigit() && rest[1].is_ascii_hexdigit()
}

/// Flattens parameters into query pairs.
fn to_query(params: Params) -> Vec<(String, String)> {
    let mut query = Vec::with_capacity(params.len());

    for (key, val) in params {
        match val {
            Value::Null => {} // Skip null values
            Value::String(s) => query.push((key, s)),
            Value::Number(n) => query.push((key, n.to_string())),
            Value::Bool(b) => query.push((key, b.to_string())),
            Value::Array(arr) => {
                // Convert arrays to comma-separated values
                let values: Vec<String> = arr
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    query.push((key, values.join(",")));
                }
            }
            Value::Object(_) => query.push((key, val.to_string())),
        }
    }

    query
}
