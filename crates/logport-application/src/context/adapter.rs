//! Context adapter backed by the per-thread diagnostic map

use super::mdc;
use logport_domain::ports::ContextAdapter;
use std::collections::HashMap;

/// [`ContextAdapter`] over the calling thread's local map
///
/// Stateless: every instance reads and writes the same thread-local
/// storage, so it can be shared freely between bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadContextAdapter;

impl ThreadContextAdapter {
    /// Create an adapter
    pub fn new() -> Self {
        Self
    }
}

impl ContextAdapter for ThreadContextAdapter {
    fn put(&self, key: &str, value: &str) {
        mdc::put(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        mdc::get(key)
    }

    fn remove(&self, key: &str) {
        mdc::remove(key);
    }

    fn clear(&self) {
        mdc::clear();
    }

    fn copy_of_context_map(&self) -> HashMap<String, String> {
        mdc::copy_of_context_map()
    }

    fn set_context_map(&self, map: &HashMap<String, String>) {
        mdc::set_context_map(map);
    }
}
