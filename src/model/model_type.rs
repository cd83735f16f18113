//! Model types: request dispatch and the verb surface.
//!
//! A [`ModelType`] describes one remote resource. It owns a
//! [`ModelConfig`] (default parameters and API client binding), a
//! [`PathBuilder`], a [`ModelFactory`], and a table of custom verb methods.
//!
//! Every HTTP verb has four operations, all taking `(path, params)`:
//!
//! | Operation | Result |
//! |---|---|
//! | `get` | collection if `data` is an array, otherwise a resource with `_metadata`/`_errors` |
//! | `get_raw` | the unshaped [`ResponseEnvelope`] |
//! | `get_collection` | always a collection |
//! | `get_resource` | always a resource with `_metadata`/`_errors` |
//!
//! The same four exist for `post`, `put`, `patch`, and `delete`, with one
//! exception: `post_resource` builds the resource from `data` alone,
//! without `_metadata` or `_errors`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rest_model::clients::{ApiClient, ApiError, ResponseEnvelope};
//! use rest_model::model::{ModelType, Params, RequestPath};
//! use serde_json::json;
//!
//! let client = |params: Params| {
//!     assert_eq!(params["_path"], json!("users/7/popular"));
//!     Ok::<_, ApiError>(ResponseEnvelope::new(json!([{"id": 1}, {"id": 2}])))
//! };
//!
//! let users = ModelType::builder("User")
//!     .collection_path("users")
//!     .api_client(Arc::new(client))
//!     .build();
//!
//! let params: Params = json!({"id": 7}).as_object().unwrap().clone();
//! let popular = users.get_collection(RequestPath::symbol("popular"), params).unwrap();
//! assert_eq!(popular.len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ApiClient, HttpVerb, ResponseEnvelope};
use crate::model::config::ModelConfig;
use crate::model::custom::{CustomVerb, CustomVerbTable};
use crate::model::errors::ModelError;
use crate::model::factory::{ModelFactory, ResourceFactory};
use crate::model::params::{merge_params, Params, METHOD_KEY, PATH_KEY};
use crate::model::path::{PathBuilder, RequestPath, TemplatePathBuilder};
use crate::model::shape::{self, Shaped, Shaping};

/// The shaped result of a request issued by a model type using factory `F`.
pub type ShapedModel<F> = Shaped<<F as ModelFactory>::Instance, <F as ModelFactory>::Collection>;

/// A remote resource definition that issues requests and shapes responses.
///
/// # Thread Safety
///
/// `ModelType` is `Send + Sync` whenever its factory is; it is typically
/// built once and shared (e.g., in a `static` `OnceLock` or an `Arc`).
pub struct ModelType<F: ModelFactory = ResourceFactory> {
    name: String,
    config: Arc<ModelConfig>,
    path_builder: Arc<dyn PathBuilder>,
    factory: F,
    custom_verbs: CustomVerbTable,
}

impl ModelType<ResourceFactory> {
    /// Creates a builder for a model type named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ModelTypeBuilder<ResourceFactory> {
        ModelTypeBuilder::new(name)
    }
}

// Generates the four operations of one verb family.
macro_rules! verb_operations {
    (
        $verb:expr, $label:literal,
        $auto:ident, $raw:ident, $collection:ident, $resource:ident,
        $resource_fn:path, $resource_doc:literal,
        $custom:ident
    ) => {
        #[doc = concat!("Sends a `", $label, "` request and shapes the response.")]
        #[doc = ""]
        #[doc = "An array `data` becomes a collection; anything else becomes a"]
        #[doc = "single resource with `_metadata` and `_errors` merged in."]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ModelError`] for path, configuration, transport, or shape failures."]
        pub fn $auto(
            &self,
            path: impl Into<RequestPath>,
            params: Params,
        ) -> Result<ShapedModel<F>, ModelError> {
            self.send($verb, path, params, Shaping::Auto)
        }

        #[doc = concat!("Sends a `", $label, "` request and returns the unshaped envelope.")]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ModelError`] for path, configuration, or transport failures."]
        pub fn $raw(
            &self,
            path: impl Into<RequestPath>,
            params: Params,
        ) -> Result<ResponseEnvelope, ModelError> {
            self.dispatch($verb, path, params)
        }

        #[doc = concat!("Sends a `", $label, "` request and builds a collection from the response.")]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ModelError::ShapeMismatch`] if `data` is not an array, or"]
        #[doc = "any path, configuration, or transport failure."]
        pub fn $collection(
            &self,
            path: impl Into<RequestPath>,
            params: Params,
        ) -> Result<F::Collection, ModelError> {
            self.dispatch_with($verb, path, params, |envelope| {
                shape::collection(&self.factory, envelope)
            })
        }

        #[doc = concat!("Sends a `", $label, "` request and builds a single resource ", $resource_doc)]
        #[doc = ""]
        #[doc = "# Errors"]
        #[doc = ""]
        #[doc = "Returns [`ModelError::ShapeMismatch`] if `data` is not an object, or"]
        #[doc = "any path, configuration, or transport failure."]
        pub fn $resource(
            &self,
            path: impl Into<RequestPath>,
            params: Params,
        ) -> Result<F::Instance, ModelError> {
            self.dispatch_with($verb, path, params, |envelope| {
                $resource_fn(&self.factory, envelope)
            })
        }

        #[doc = concat!("Registers custom `", $label, "` methods, one per name.")]
        #[doc = ""]
        #[doc = "See [`register_custom`](Self::register_custom)."]
        pub fn $custom<I, S>(&self, names: I)
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.register_custom($verb, names);
        }
    };
}

impl<F: ModelFactory> ModelType<F> {
    /// Returns the model type's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model type's configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<ModelConfig> {
        &self.config
    }

    /// Returns the factory used to build instances and collections.
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Returns the API client, resolved through parent types.
    #[must_use]
    pub fn api_client(&self) -> Option<Arc<dyn ApiClient>> {
        self.config.api_client()
    }

    /// Binds an API client directly on this model type.
    pub fn set_api_client(&self, client: Arc<dyn ApiClient>) {
        self.config.set_api_client(client);
    }

    /// Returns this type's own default parameters (empty if never set).
    #[must_use]
    pub fn default_params(&self) -> Params {
        self.config.default_params()
    }

    /// Replaces this type's default parameters.
    pub fn set_default_params(&self, params: Params) {
        self.config.set_default_params(params);
    }

    /// Resolves a request path against the given parameters.
    ///
    /// # Errors
    ///
    /// Propagates errors from the model's [`PathBuilder`].
    pub fn resolve_path(&self, path: &RequestPath, params: &Params) -> Result<String, ModelError> {
        path.resolve(self.path_builder.as_ref(), params)
    }

    /// Sends already-composed parameters with the defaults merged underneath.
    ///
    /// Unlike [`dispatch`](Self::dispatch), `_method` and `_path` are not
    /// set; `params` must carry them.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if no API client is bound, or
    /// [`ModelError::Transport`] if the client fails.
    pub fn request(&self, params: Params) -> Result<ResponseEnvelope, ModelError> {
        self.request_with(params, Ok)
    }

    /// Like [`request`](Self::request), passing the envelope through `transform`.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request), plus any error from `transform`.
    pub fn request_with<T, G>(&self, params: Params, transform: G) -> Result<T, ModelError>
    where
        G: FnOnce(ResponseEnvelope) -> Result<T, ModelError>,
    {
        let client = self.resolve_api_client()?;
        let params = merge_params(&self.default_params(), params);
        let envelope = client.request(params)?;
        transform(envelope)
    }

    /// Resolves the path, composes parameters, and sends the request.
    ///
    /// The final parameters are the defaults merged with `params`, with
    /// `_method` and `_path` always overwritten by `verb` and the resolved
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Configuration`] if no API client is bound,
    /// path builder errors, or [`ModelError::Transport`] if the client fails.
    pub fn dispatch(
        &self,
        verb: HttpVerb,
        path: impl Into<RequestPath>,
        params: Params,
    ) -> Result<ResponseEnvelope, ModelError> {
        self.dispatch_with(verb, path, params, Ok)
    }

    /// Like [`dispatch`](Self::dispatch), passing the envelope through `transform`.
    ///
    /// # Errors
    ///
    /// As [`dispatch`](Self::dispatch), plus any error from `transform`.
    pub fn dispatch_with<T, G>(
        &self,
        verb: HttpVerb,
        path: impl Into<RequestPath>,
        params: Params,
        transform: G,
    ) -> Result<T, ModelError>
    where
        G: FnOnce(ResponseEnvelope) -> Result<T, ModelError>,
    {
        let path = self.resolve_path(&path.into(), &params)?;

        tracing::debug!("{} dispatching {} {}", self.name, verb, path);

        let mut params = merge_params(&self.default_params(), params);
        params.insert(METHOD_KEY.to_string(), verb.into());
        params.insert(PATH_KEY.to_string(), Value::String(path));

        let client = self.resolve_api_client()?;
        let envelope = client.request(params)?;
        transform(envelope)
    }

    /// Sends a request and shapes the response as `shaping` dictates.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] for path, configuration, transport, or shape failures.
    pub fn send(
        &self,
        verb: HttpVerb,
        path: impl Into<RequestPath>,
        params: Params,
        shaping: Shaping,
    ) -> Result<ShapedModel<F>, ModelError> {
        self.dispatch_with(verb, path, params, |envelope| {
            shape::shape(&self.factory, envelope, shaping)
        })
    }

    verb_operations!(
        HttpVerb::Get, "GET",
        get, get_raw, get_collection, get_resource,
        shape::resource, "with `_metadata` and `_errors` merged in.",
        custom_get
    );

    verb_operations!(
        HttpVerb::Post, "POST",
        post, post_raw, post_collection, post_resource,
        shape::resource_data_only, "from `data` alone, without `_metadata` or `_errors`.",
        custom_post
    );

    verb_operations!(
        HttpVerb::Put, "PUT",
        put, put_raw, put_collection, put_resource,
        shape::resource, "with `_metadata` and `_errors` merged in.",
        custom_put
    );

    verb_operations!(
        HttpVerb::Patch, "PATCH",
        patch, patch_raw, patch_collection, patch_resource,
        shape::resource, "with `_metadata` and `_errors` merged in.",
        custom_patch
    );

    verb_operations!(
        HttpVerb::Delete, "DELETE",
        delete, delete_raw, delete_collection, delete_resource,
        shape::resource, "with `_metadata` and `_errors` merged in.",
        custom_delete
    );

    /// Registers custom methods bound to `verb`, one per name.
    ///
    /// Each method calls the verb's auto-shaped operation with its name
    /// as a symbolic path. Registering an existing name replaces it.
    pub fn register_custom<I, S>(&self, verb: HttpVerb, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let method = CustomVerb::new(verb, name);
            tracing::debug!("{} registering custom {} method {}", self.name, verb, method.name());
            self.custom_verbs.insert(method);
        }
    }

    /// Calls a registered custom method.
    ///
    /// `params` defaults to an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownMethod`] if no method named `name` is
    /// registered, otherwise as the verb's auto-shaped operation.
    pub fn call(&self, name: &str, params: Option<Params>) -> Result<ShapedModel<F>, ModelError> {
        let method = self
            .custom_verbs
            .get(name)
            .ok_or_else(|| ModelError::UnknownMethod {
                model: self.name.clone(),
                name: name.to_string(),
            })?;
        self.send(
            method.verb(),
            method.path(),
            params.unwrap_or_default(),
            Shaping::Auto,
        )
    }

    /// Returns the custom method registered under `name`.
    #[must_use]
    pub fn custom_verb(&self, name: &str) -> Option<CustomVerb> {
        self.custom_verbs.get(name)
    }

    /// Returns `true` if a custom method named `name` is registered.
    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        self.custom_verbs.get(name).is_some()
    }

    /// Returns the names of all registered custom methods, sorted.
    #[must_use]
    pub fn custom_verb_names(&self) -> Vec<String> {
        self.custom_verbs.names()
    }

    fn resolve_api_client(&self) -> Result<Arc<dyn ApiClient>, ModelError> {
        self.config
            .api_client()
            .ok_or_else(|| ModelError::Configuration {
                model: self.name.clone(),
            })
    }
}

impl<F: ModelFactory + fmt::Debug> fmt::Debug for ModelType<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("factory", &self.factory)
            .field("custom_verbs", &self.custom_verbs.names())
            .finish_non_exhaustive()
    }
}

// Verify ModelType is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModelType>();
};

/// Builder for [`ModelType`].
///
/// # Defaults
///
/// - path builder: [`TemplatePathBuilder`] over the lowercased name plus `s`
/// - parent: none
/// - API client: none (resolved through the parent, if any)
/// - default parameters: empty
/// - factory: [`ResourceFactory`]
///
/// # Example
///
/// ```rust
/// use rest_model::model::{ModelType, SerdeFactory};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Admin {
///     id: u64,
/// }
///
/// let users = ModelType::builder("User").build();
/// let admins = ModelType::builder("Admin")
///     .collection_path("users/admins")
///     .parent(&users)
///     .factory(SerdeFactory::<Admin>::new())
///     .build();
///
/// assert_eq!(admins.name(), "Admin");
/// assert!(admins.api_client().is_none());
/// ```
pub struct ModelTypeBuilder<F = ResourceFactory> {
    name: String,
    parent: Option<Arc<ModelConfig>>,
    path_builder: Option<Arc<dyn PathBuilder>>,
    api_client: Option<Arc<dyn ApiClient>>,
    default_params: Params,
    factory: F,
}

impl ModelTypeBuilder<ResourceFactory> {
    /// Creates a builder with default values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            path_builder: None,
            api_client: None,
            default_params: Params::new(),
            factory: ResourceFactory,
        }
    }
}

impl<F: ModelFactory> ModelTypeBuilder<F> {
    /// Makes this type a subtype of `parent` for API client resolution.
    #[must_use]
    pub fn parent<G: ModelFactory>(mut self, parent: &ModelType<G>) -> Self {
        self.parent = Some(Arc::clone(&parent.config));
        self
    }

    /// Uses a [`TemplatePathBuilder`] with the given collection template.
    #[must_use]
    pub fn collection_path(mut self, template: impl Into<String>) -> Self {
        self.path_builder = Some(Arc::new(TemplatePathBuilder::new(template)));
        self
    }

    /// Sets the path builder.
    #[must_use]
    pub fn path_builder(mut self, builder: impl PathBuilder + 'static) -> Self {
        self.path_builder = Some(Arc::new(builder));
        self
    }

    /// Binds an API client on the new type.
    #[must_use]
    pub fn api_client(mut self, client: Arc<dyn ApiClient>) -> Self {
        self.api_client = Some(client);
        self
    }

    /// Sets the new type's default parameters.
    #[must_use]
    pub fn default_params(mut self, params: Params) -> Self {
        self.default_params = params;
        self
    }

    /// Sets the factory, changing the instance and collection types.
    #[must_use]
    pub fn factory<G: ModelFactory>(self, factory: G) -> ModelTypeBuilder<G> {
        ModelTypeBuilder {
            name: self.name,
            parent: self.parent,
            path_builder: self.path_builder,
            api_client: self.api_client,
            default_params: self.default_params,
            factory,
        }
    }

    /// Builds the model type.
    #[must_use]
    pub fn build(self) -> ModelType<F> {
        let config = self
            .parent
            .map_or_else(ModelConfig::new, ModelConfig::with_parent);
        if let Some(client) = self.api_client {
            config.set_api_client(client);
        }
        config.set_default_params(self.default_params);

        let name = self.name;
        let path_builder = self.path_builder.unwrap_or_else(|| {
            Arc::new(TemplatePathBuilder::new(format!("{}s", name.to_lowercase())))
        });

        ModelType {
            name,
            config: Arc::new(config),
            path_builder,
            factory: self.factory,
            custom_verbs: CustomVerbTable::new(),
        }
    }
}
