//! Construction of model instances and collections from response data.
//!
//! A [`ModelFactory`] turns attribute maps into instances and response
//! envelopes into collections. Two factories are provided:
//!
//! - [`ResourceFactory`] (the default) builds dynamic [`Resource`] values
//! - [`SerdeFactory<T>`] deserializes into any `T: DeserializeOwned`
//!
//! # Example
//!
//! ```rust
//! use rest_model::clients::ResponseEnvelope;
//! use rest_model::model::{ModelFactory, ResourceFactory};
//! use serde_json::json;
//!
//! let envelope = ResponseEnvelope::new(json!([{"id": 1}, {"id": 2}]))
//!     .with_metadata(json!({"page": 1}));
//! let users = ResourceFactory.new_collection(envelope).unwrap();
//!
//! assert_eq!(users.len(), 2);
//! assert_eq!(users[1].get("id"), Some(&json!(2)));
//! assert_eq!(users.metadata(), &json!({"page": 1}));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::ResponseEnvelope;
use crate::model::errors::{ModelError, ResponseShape};
use crate::model::params::{Params, ERRORS_KEY, METADATA_KEY};

/// Builds model instances and collections.
pub trait ModelFactory: Send + Sync {
    /// A single model instance.
    type Instance;
    /// A collection of model instances.
    type Collection;

    /// Builds one instance from an attribute map.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the attributes cannot form an instance.
    fn new_instance(&self, attributes: Params) -> Result<Self::Instance, ModelError>;

    /// Builds a collection from a response envelope whose `data` is an array.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ShapeMismatch`] if `data` is not an array of
    /// objects, or any error from [`new_instance`](Self::new_instance).
    fn new_collection(&self, envelope: ResponseEnvelope) -> Result<Self::Collection, ModelError>;
}

/// A dynamic model instance: a map of attribute names to JSON values.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Resource {
    attributes: Params,
}

impl Resource {
    /// Creates a resource from an attribute map.
    #[must_use]
    pub const fn new(attributes: Params) -> Self {
        Self { attributes }
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Sets an attribute, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.attributes.insert(name.into(), value)
    }

    /// Returns the response data this resource was built from, if recorded.
    #[must_use]
    pub fn metadata(&self) -> Option<&Value> {
        self.attributes.get(METADATA_KEY)
    }

    /// Returns the errors returned with this resource, if recorded.
    #[must_use]
    pub fn errors(&self) -> Option<&Value> {
        self.attributes.get(ERRORS_KEY)
    }

    /// Returns all attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Params {
        &self.attributes
    }

    /// Consumes the resource and returns its attributes.
    #[must_use]
    pub fn into_attributes(self) -> Params {
        self.attributes
    }

    /// Deserializes the attributes into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Deserialize`] if the attributes do not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        Ok(serde_json::from_value(Value::Object(
            self.attributes.clone(),
        ))?)
    }
}

/// A collection of model instances with the response's metadata and errors.
///
/// Implements `Deref<Target = [T]>`, so slice methods work directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
    metadata: Value,
    errors: Value,
}

impl<T> Collection<T> {
    /// Creates a collection.
    #[must_use]
    pub const fn new(items: Vec<T>, metadata: Value, errors: Value) -> Self {
        Self {
            items,
            metadata,
            errors,
        }
    }

    /// Builds a collection from an envelope, one instance per array element.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ShapeMismatch`] if `data` is not an array or
    /// an element is not an object, or the first error from `build`.
    pub fn from_envelope<F>(envelope: ResponseEnvelope, mut build: F) -> Result<Self, ModelError>
    where
        F: FnMut(Params) -> Result<T, ModelError>,
    {
        let ResponseEnvelope {
            data,
            errors,
            metadata,
        } = envelope;

        let elements = match data {
            Value::Array(elements) => elements,
            other => {
                return Err(ModelError::shape_mismatch(
                    ResponseShape::Collection,
                    &other,
                ))
            }
        };

        let items = elements
            .into_iter()
            .map(|element| match element {
                Value::Object(attributes) => build(attributes),
                other => Err(ModelError::shape_mismatch(ResponseShape::Resource, &other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(items, metadata, errors))
    }

    /// Returns the response metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Value {
        &self.metadata
    }

    /// Returns the response errors.
    #[must_use]
    pub const fn errors(&self) -> &Value {
        &self.errors
    }

    /// Consumes the collection and returns its items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for Collection<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The default factory, building [`Resource`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourceFactory;

impl ModelFactory for ResourceFactory {
    type Instance = Resource;
    type Collection = Collection<Resource>;

    fn new_instance(&self, attributes: Params) -> Result<Resource, ModelError> {
        Ok(Resource::new(attributes))
    }

    fn new_collection(&self, envelope: ResponseEnvelope) -> Result<Collection<Resource>, ModelError> {
        Collection::from_envelope(envelope, |attributes| self.new_instance(attributes))
    }
}

/// A factory deserializing attributes into `T`.
///
/// Unknown attributes (including `_metadata` and `_errors`) are ignored
/// unless `T` denies them.
///
/// # Example
///
/// ```rust
/// use rest_model::model::{ModelFactory, SerdeFactory};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// let factory = SerdeFactory::<User>::new();
/// let attributes = json!({"id": 1, "name": "Lindsay"}).as_object().unwrap().clone();
/// let user = factory.new_instance(attributes).unwrap();
/// assert_eq!(user, User { id: 1, name: "Lindsay".to_string() });
/// ```
pub struct SerdeFactory<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> SerdeFactory<T> {
    /// Creates a new factory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeFactory<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeFactory")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> ModelFactory for SerdeFactory<T> {
    type Instance = T;
    type Collection = Collection<T>;

    fn new_instance(&self, attributes: Params) -> Result<T, ModelError> {
        Ok(serde_json::from_value(Value::Object(attributes))?)
    }

    fn new_collection(&self, envelope: ResponseEnvelope) -> Result<Collection<T>, ModelError> {
        Collection::from_envelope(envelope, |attributes| self.new_instance(attributes))
    }
}
