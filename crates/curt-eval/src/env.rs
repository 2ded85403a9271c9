//! The run's variable environment.

use crate::value::Value;
use std::collections::BTreeMap;

/// One flat namespace for the whole run.
///
/// There are no nested scopes: blocks, loop variables and function
/// parameters all bind here, and a binding stays visible until it is
/// overwritten. Names iterate in sorted order.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: BTreeMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Every bound name, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
