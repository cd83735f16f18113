//! Per-model configuration: default parameters and API client binding.
//!
//! Each [`ModelType`](crate::model::ModelType) owns one [`ModelConfig`].
//! A config may point at its parent type's config:
//!
//! - the API client binding is resolved by walking up that chain on every
//!   call, so rebinding a parent affects children that have no binding of
//!   their own;
//! - default parameters are never inherited; every type starts empty.
//!
//! Both are intended to be set once while types are defined. Concurrent
//! writers are not ordered against each other.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::clients::ApiClient;
use crate::model::params::Params;

/// Configuration state owned by a single model type.
#[derive(Default)]
pub struct ModelConfig {
    parent: Option<Arc<ModelConfig>>,
    api_client: RwLock<Option<Arc<dyn ApiClient>>>,
    default_params: RwLock<Params>,
}

impl ModelConfig {
    /// Creates a root config with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config whose client binding falls back to `parent`.
    #[must_use]
    pub fn with_parent(parent: Arc<Self>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Returns the parent config, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Resolves the API client, walking up the parent chain.
    ///
    /// Returns `None` if no config in the chain has a binding.
    #[must_use]
    pub fn api_client(&self) -> Option<Arc<dyn ApiClient>> {
        let mut current = Some(self);
        while let Some(config) = current {
            if let Some(client) = config.own_api_client() {
                return Some(client);
            }
            current = config.parent.as_deref();
        }
        None
    }

    /// Returns the client bound directly on this config.
    #[must_use]
    pub fn own_api_client(&self) -> Option<Arc<dyn ApiClient>> {
        self.api_client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Binds an API client directly on this config.
    pub fn set_api_client(&self, client: Arc<dyn ApiClient>) {
        *self
            .api_client
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(client);
    }

    /// Returns a copy of the default parameters (empty if never set).
    #[must_use]
    pub fn default_params(&self) -> Params {
        self.default_params
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the default parameters outright.
    pub fn set_default_params(&self, params: Params) {
        *self
            .default_params
            .write()
            .unwrap_or_else(PoisonError::into_inner) = params;
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("has_parent", &self.parent.is_some())
            .field("has_own_api_client", &self.own_api_client().is_some())
            .field("default_params", &self.default_params())
            .finish()
    }
}

// Verify ModelConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModelConfig>();
};
