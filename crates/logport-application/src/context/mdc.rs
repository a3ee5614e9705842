//! Mapped diagnostic context for the calling thread
//!
//! The local map is the store of record. [`adapter`] exposes the active
//! binding's own adapter for backend-specific use; writes made there are
//! not mirrored back here.

use super::map::DiagnosticMap;
use super::store;
use std::collections::HashMap;
use std::sync::Arc;

/// Set `key` to `value` for the calling thread
pub fn put(key: impl Into<String>, value: impl Into<String>) {
    let (key, value) = (key.into(), value.into());
    store::with_map(|map| map.put(key, value));
}

/// Value of `key` for the calling thread
pub fn get(key: &str) -> Option<String> {
    store::read_map(|map| map.get(key).map(str::to_string)).flatten()
}

/// Remove `key` for the calling thread
pub fn remove(key: &str) {
    store::update_map(|map| map.remove(key));
}

/// Remove every key, keeping the storage
pub fn clear() {
    store::update_map(DiagnosticMap::clear);
}

/// Independent copy of the calling thread's map
pub fn copy_of_context_map() -> HashMap<String, String> {
    store::read_map(DiagnosticMap::snapshot).unwrap_or_default()
}

/// Replace the calling thread's map with a copy of `context`
pub fn set_context_map(context: &HashMap<String, String>) {
    store::with_map(|map| map.replace(context));
}

/// Release the calling thread's map storage immediately
pub fn remove_all() {
    store::drop_map();
}

/// Context adapter of the binding active in `registry`
pub fn adapter(
    registry: &crate::binding::BindingRegistry,
) -> Arc<dyn logport_domain::ports::ContextAdapter> {
    Arc::clone(registry.current().context_adapter())
}
