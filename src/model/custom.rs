//! Custom verb methods registered on a model type.
//!
//! A custom verb binds a method name to an HTTP verb. Calling it issues
//! the verb's auto-shaped request with the name as a symbolic path, so
//! `custom_get(["popular"])` followed by `call("popular", None)` sends
//! `GET <base path>/popular`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::clients::HttpVerb;
use crate::model::path::RequestPath;

/// A registered custom method: a verb and the fixed symbolic path it calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomVerb {
    verb: HttpVerb,
    name: String,
}

impl CustomVerb {
    /// Creates a custom verb.
    #[must_use]
    pub fn new(verb: HttpVerb, name: impl Into<String>) -> Self {
        Self {
            verb,
            name: name.into(),
        }
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub const fn verb(&self) -> HttpVerb {
        self.verb
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbolic path this method requests.
    #[must_use]
    pub fn path(&self) -> RequestPath {
        RequestPath::symbol(self.name.clone())
    }
}

/// Per-type table of custom methods, keyed by name.
#[derive(Debug, Default)]
pub struct CustomVerbTable {
    methods: RwLock<HashMap<String, CustomVerb>>,
}

impl CustomVerbTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a method, silently replacing any method of the same name.
    pub fn insert(&self, method: CustomVerb) {
        self.methods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(method.name.clone(), method);
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<CustomVerb> {
        self.methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Returns the registered method names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_verb_path_is_symbolic() {
        let method = CustomVerb::new(HttpVerb::Get, "popular");
        assert_eq!(method.verb(), HttpVerb::Get);
        assert_eq!(method.name(), "popular");
        assert_eq!(method.path(), RequestPath::symbol("popular"));
    }

    #[test]
    fn test_insert_overwrites_existing_name() {
        let table = CustomVerbTable::new();
        table.insert(CustomVerb::new(HttpVerb::Get, "search"));
        table.insert(CustomVerb::new(HttpVerb::Post, "search"));

        assert_eq!(table.get("search").map(|m| m.verb()), Some(HttpVerb::Post));
        assert_eq!(table.names(), vec!["search".to_string()]);
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert!(CustomVerbTable::new().get("missing").is_none());
    }
}
