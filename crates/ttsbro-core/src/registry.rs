use std::collections::HashMap;

/// Name-keyed factories for one kind of plugin.
///
/// `T` is the plugin trait object, e.g. `dyn SynthesisEngine`. Each crate
/// wraps this with its own not-found error.
pub struct FactoryRegistry<T: ?Sized> {
    factories: HashMap<String, fn() -> Box<T>>,
}

impl<T: ?Sized> FactoryRegistry<T> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any earlier entry.
    pub fn register(&mut self, name: &str, factory: fn() -> Box<T>) {
        self.factories.insert(name.to_string(), factory);
    }

    /// A fresh instance, or `None` when nothing is registered under `name`.
    pub fn create(&self, name: &str) -> Option<Box<T>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T: ?Sized> Default for FactoryRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
