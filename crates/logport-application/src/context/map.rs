//! Diagnostic key/value map value

use std::collections::HashMap;

/// Per-thread contextual key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticMap {
    entries: HashMap<String, String>,
}

impl DiagnosticMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Independent copy of the entries
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.clone()
    }

    /// Replace every entry with an independent copy of `entries`
    pub fn replace(&mut self, entries: &HashMap<String, String>) {
        self.entries = entries.clone();
    }
}
