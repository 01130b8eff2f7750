use crate::value::ConfigValue;
use std::collections::HashMap;

/// A configuration document: the values stored for exactly one namespace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigDocument {
    namespace: String,
    values: HashMap<String, ConfigValue>
}

impl ConfigDocument {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            values: HashMap::new()
        }
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
