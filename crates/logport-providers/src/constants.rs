//! Backend constants

use logport_domain::Level;

// ============================================================================
// Tracing backend
// ============================================================================

/// Backend id of the tracing backend
pub const TRACING_BACKEND_ID: &str = "tracing";

/// Target of the forwarded `tracing` events
pub const TRACING_TARGET: &str = "logport";

/// Default minimum level of the tracing backend; the subscriber filters further
pub const TRACING_DEFAULT_MIN_LEVEL: Level = Level::Trace;

// ============================================================================
// Memory backend
// ============================================================================

/// Backend id of the memory backend
pub const MEMORY_BACKEND_ID: &str = "memory";

/// Default minimum level of the memory backend
pub const MEMORY_DEFAULT_MIN_LEVEL: Level = Level::Trace;

/// `extra` key bounding the number of retained records
pub const MEMORY_CAPACITY_KEY: &str = "capacity";
