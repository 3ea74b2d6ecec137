//! A single configuration object
//!
//! Values are addressed with dotted key paths into nested mappings, so
//! `threshold.autorun` reads the `autorun` key of the `threshold` mapping.

use serde_yaml::{Mapping, Value};

/// A named configuration document within one collection
///
/// Objects are plain values: changing one never affects storage or any other
/// copy until it is passed to [`ConfigFactory::save`](super::ConfigFactory::save).
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigObject {
    name: String,
    collection: String,
    data: Mapping,
    is_new: bool,
}

impl ConfigObject {
    /// Create an empty object that has never been persisted
    pub fn new(collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: collection.into(),
            data: Mapping::new(),
            is_new: true,
        }
    }

    /// Create an object holding data read from storage
    pub(crate) fn loaded(
        collection: impl Into<String>,
        name: impl Into<String>,
        data: Mapping,
    ) -> Self {
        Self {
            name: name.into(),
            collection: collection.into(),
            data,
            is_new: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Whether the object has not been persisted yet
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Value at a dotted key path
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.data.get(first)?;
        for part in parts {
            current = current.as_mapping()?.get(part)?;
        }
        Some(current)
    }

    /// String value at a dotted key path
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// All data of the object
    pub fn get_all(&self) -> &Mapping {
        &self.data
    }

    /// Set the value at a dotted key path, creating intermediate mappings
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let parts: Vec<&str> = key.split('.').collect();
        set_nested(&mut self.data, &parts, value.into());
        self
    }

    /// Remove the value at a dotted key path
    pub fn clear(&mut self, key: &str) -> &mut Self {
        let parts: Vec<&str> = key.split('.').collect();
        clear_nested(&mut self.data, &parts);
        self
    }

    /// Replace all data of the object
    pub fn set_data(&mut self, data: Mapping) -> &mut Self {
        self.data = data;
        self
    }

    pub(crate) fn mark_saved(&mut self) {
        self.is_new = false;
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.data = Mapping::new();
        self.is_new = true;
    }
}

fn set_nested(mapping: &mut Mapping, parts: &[&str], value: Value) {
    match parts {
        [] => {}
        [last] => {
            mapping.insert(Value::from(*last), value);
        }
        [head, rest @ ..] => {
            let child = mapping
                .entry(Value::from(*head))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !child.is_mapping() {
                *child = Value::Mapping(Mapping::new());
            }
            if let Value::Mapping(child) = child {
                set_nested(child, rest, value);
            }
        }
    }
}

fn clear_nested(mapping: &mut Mapping, parts: &[&str]) {
    match parts {
        [] => {}
        [last] => {
            mapping.remove(*last);
        }
        [head, rest @ ..] => {
            if let Some(Value::Mapping(child)) = mapping.get_mut(*head) {
                clear_nested(child, rest);
            }
        }
    }
}
