//! Response shaping: deciding between a single resource and a collection.
//!
//! The only signal consulted is whether the envelope's `data` is an array.

use serde_json::Value;

use crate::clients::ResponseEnvelope;
use crate::model::errors::{ModelError, ResponseShape};
use crate::model::factory::ModelFactory;
use crate::model::params::{Params, ERRORS_KEY, METADATA_KEY};

/// How a response envelope is mapped into model values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shaping {
    /// Collection when `data` is an array, otherwise a merged resource.
    Auto,
    /// Always a collection.
    Collection,
    /// Always a resource, with `_metadata` and `_errors` merged in.
    Resource,
    /// Always a resource built from `data` alone.
    ResourceDataOnly,
}

/// The result of shaping: one instance or a collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Shaped<I, C> {
    /// A single model instance.
    Resource(I),
    /// A collection of model instances.
    Collection(C),
}

impl<I, C> Shaped<I, C> {
    /// Returns `true` for a single instance.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    /// Returns `true` for a collection.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// Returns the instance, if this is one.
    #[must_use]
    pub const fn as_resource(&self) -> Option<&I> {
        match self {
            Self::Resource(instance) => Some(instance),
            Self::Collection(_) => None,
        }
    }

    /// Returns the collection, if this is one.
    #[must_use]
    pub const fn as_collection(&self) -> Option<&C> {
        match self {
            Self::Collection(collection) => Some(collection),
            Self::Resource(_) => None,
        }
    }

    /// Consumes the result and returns the instance, if this is one.
    #[must_use]
    pub fn into_resource(self) -> Option<I> {
        match self {
            Self::Resource(instance) => Some(instance),
            Self::Collection(_) => None,
        }
    }

    /// Consumes the result and returns the collection, if this is one.
    #[must_use]
    pub fn into_collection(self) -> Option<C> {
        match self {
            Self::Collection(collection) => Some(collection),
            Self::Resource(_) => None,
        }
    }
}

/// Shapes an envelope according to `shaping`.
///
/// # Errors
///
/// Returns [`ModelError::ShapeMismatch`] when a forced shape does not fit
/// `data`, or any error raised by the factory.
///
/// # Example
///
/// ```rust
/// use rest_model::clients::ResponseEnvelope;
/// use rest_model::model::{shape, ResourceFactory, Shaping};
/// use serde_json::json;
///
/// let envelope = ResponseEnvelope::new(json!({"a": 1})).with_errors(json!(["oops"]));
/// let shaped = shape(&ResourceFactory, envelope, Shaping::Auto).unwrap();
///
/// let resource = shaped.into_resource().unwrap();
/// assert_eq!(resource.get("a"), Some(&json!(1)));
/// assert_eq!(resource.metadata(), Some(&json!({"a": 1})));
/// assert_eq!(resource.errors(), Some(&json!(["oops"])));
/// ```
pub fn shape<F: ModelFactory + ?Sized>(
    factory: &F,
    envelope: ResponseEnvelope,
    shaping: Shaping,
) -> Result<Shaped<F::Instance, F::Collection>, ModelError> {
    match shaping {
        Shaping::Auto if envelope.is_collection() => {
            collection(factory, envelope).map(Shaped::Collection)
        }
        Shaping::Auto | Shaping::Resource => resource(factory, envelope).map(Shaped::Resource),
        Shaping::Collection => collection(factory, envelope).map(Shaped::Collection),
        Shaping::ResourceDataOnly => {
            resource_data_only(factory, envelope).map(Shaped::Resource)
        }
    }
}

/// Builds a collection from the envelope.
///
/// # Errors
///
/// Propagates the factory's error, including [`ModelError::ShapeMismatch`]
/// when `data` is not an array.
pub fn collection<F: ModelFactory + ?Sized>(
    factory: &F,
    envelope: ResponseEnvelope,
) -> Result<F::Collection, ModelError> {
    factory.new_collection(envelope)
}

/// Builds one instance from `data` merged with `_metadata` (the data
/// itself) and `_errors` (the envelope's errors).
///
/// # Errors
///
/// Returns [`ModelError::ShapeMismatch`] if `data` is not an object, or
/// the factory's error.
pub fn resource<F: ModelFactory + ?Sized>(
    factory: &F,
    envelope: ResponseEnvelope,
) -> Result<F::Instance, ModelError> {
    let data = object_data(envelope.data)?;
    let mut attributes = data.clone();
    attributes.insert(METADATA_KEY.to_string(), Value::Object(data));
    attributes.insert(ERRORS_KEY.to_string(), envelope.errors);
    factory.new_instance(attributes)
}

/// Builds one instance from `data` alone, without `_metadata` or `_errors`.
///
/// # Errors
///
/// Returns [`ModelError::ShapeMismatch`] if `data` is not an object, or
/// the factory's error.
pub fn resource_data_only<F: ModelFactory + ?Sized>(
    factory: &F,
    envelope: ResponseEnvelope,
) -> Result<F::Instance, ModelError> {
    factory.new_instance(object_data(envelope.data)?)
}

fn object_data(data: Value) -> Result<Params, ModelError> {
    match data {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::shape_mismatch(ResponseShape::Resource, &other)),
    }
}
