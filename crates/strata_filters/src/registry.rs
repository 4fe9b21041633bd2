//! Explicit filter registry.
//!
//! Filters are instantiated through a name → factory mapping populated at
//! startup. Configuration refers to filters by these names; there is no
//! dynamic name-to-type resolution at runtime.

use std::collections::BTreeMap;

use crate::filter::Filter;
use crate::minify::{CssMinifier, JsMinifier};

/// Factory producing a boxed filter instance.
type FilterFactory = Box<dyn Fn() -> Box<dyn Filter>>;

/// Mapping from filter identifier to constructor.
#[derive(Default)]
pub struct FilterRegistry {
    factories: BTreeMap<String, FilterFactory>,
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the built-in minifiers
    /// (`css-minify`, `js-minify`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("css-minify", || Box::new(CssMinifier));
        registry.register("js-minify", || Box::new(JsMinifier));
        registry
    }

    /// Registers a factory under a name, replacing any previous binding.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Filter> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Instantiates the filter registered under `name`, if any.
    pub fn create(&self, name: &str) -> Option<Box<dyn Filter>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = FilterRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["css-minify", "js-minify"]);
        assert!(registry.create("css-minify").is_some());
        assert!(registry.create("js-minify").is_some());
    }

    #[test]
    fn unknown_name_creates_nothing() {
        let registry = FilterRegistry::with_builtins();
        assert!(registry.create("gzip").is_none());
    }

    #[test]
    fn custom_registration() {
        struct Nop;
        impl Filter for Nop {
            fn name(&self) -> &str {
                "nop"
            }
            fn kinds(&self) -> &[&str] {
                &["css"]
            }
            fn apply(&self, input: &[u8]) -> Vec<u8> {
                input.to_vec()
            }
        }

        let mut registry = FilterRegistry::new();
        registry.register("nop", || Box::new(Nop));
        let filter = registry.create("nop").unwrap();
        assert_eq!(filter.apply(b"abc"), b"abc");
    }
}
