//! Backend Provider Port
//!
//! Defines the contract a backend module implements to supply the active
//! binding: a logger factory, a key/value context adapter and a marker
//! factory, plus the facade version it was built against.
//!
//! ## Usage
//!
//! ```ignore
//! use logport_domain::ports::backend::BackendProvider;
//!
//! struct ConsoleBackend { /* ... */ }
//!
//! impl BackendProvider for ConsoleBackend {
//!     fn backend_id(&self) -> &str { "console" }
//!     fn requested_api_version(&self) -> &str { logport_domain::FACADE_API_VERSION }
//!     fn logger_factory(&self) -> Option<Arc<dyn LoggerFactory>> { Some(self.loggers.clone()) }
//!     fn context_adapter(&self) -> Option<Arc<dyn ContextAdapter>> { Some(self.context.clone()) }
//!     fn marker_factory(&self) -> Option<Arc<dyn MarkerFactory>> { Some(self.markers.clone()) }
//! }
//! ```

use crate::value_objects::{Level, MarkerHandle, Record};
use std::collections::HashMap;
use std::sync::Arc;

/// A named logger supplied by a backend
pub trait BackendLogger: Send + Sync {
    /// Name the logger was requested under
    fn name(&self) -> &str;

    /// Whether records at `level` would be emitted
    fn is_enabled(&self, level: Level) -> bool;

    /// Emit a record
    ///
    /// Backends must not fail or panic here; a broken sink degrades to
    /// dropped output.
    fn log(&self, record: &Record<'_>);
}

/// Produces loggers by name
pub trait LoggerFactory: Send + Sync {
    /// Return the logger for `name`, creating it if needed
    fn get_logger(&self, name: &str) -> Arc<dyn BackendLogger>;
}

/// Per-thread key/value diagnostic context
///
/// Every operation is scoped to the calling thread.
pub trait ContextAdapter: Send + Sync {
    /// Put a value for `key`, replacing any previous value
    fn put(&self, key: &str, value: &str);

    /// Value for `key`, if present
    fn get(&self, key: &str) -> Option<String>;

    /// Remove `key`
    fn remove(&self, key: &str);

    /// Remove every key
    fn clear(&self);

    /// Independent snapshot of the whole map
    fn copy_of_context_map(&self) -> HashMap<String, String>;

    /// Replace the whole map with an independent copy of `map`
    fn set_context_map(&self, map: &HashMap<String, String>);
}

/// Produces markers
pub trait MarkerFactory: Send + Sync {
    /// Return the cached marker for `name`, creating it if needed
    fn get_marker(&self, name: &str) -> MarkerHandle;

    /// Whether a marker named `name` is cached
    fn exists(&self, name: &str) -> bool;

    /// Drop `name` from the cache, returning whether it was present
    fn detach_marker(&self, name: &str) -> bool;

    /// Create a marker that is never cached
    fn get_detached_marker(&self, name: &str) -> MarkerHandle;
}

/// The backend-provider contract
///
/// A module advertises itself as eligible by exporting
/// [`BACKEND_CONTRACT_NAMESPACE`](crate::constants::BACKEND_CONTRACT_NAMESPACE)
/// and handing out an implementation of this trait. The three factory
/// accessors return `None` when the backend does not supply that part, which
/// makes the candidate a contract violation.
pub trait BackendProvider: Send + Sync {
    /// Backend identifier, reported by the active binding
    fn backend_id(&self) -> &str;

    /// Facade API version this backend was built against
    fn requested_api_version(&self) -> &str;

    /// Logger factory access point
    fn logger_factory(&self) -> Option<Arc<dyn LoggerFactory>>;

    /// Key/value context adapter access point
    fn context_adapter(&self) -> Option<Arc<dyn ContextAdapter>>;

    /// Marker factory access point
    fn marker_factory(&self) -> Option<Arc<dyn MarkerFactory>>;
}
