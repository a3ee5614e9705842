//! Backend Implementations
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`TracingBackend`] | Production: hand records to the application's `tracing` subscriber |
//! | [`MemoryBackend`] | Testing and embedding: inspect what was logged |
//!
//! Both use the per-thread diagnostic map as their context adapter and the
//! basic marker factory, so swapping between them keeps context intact.

#[cfg(feature = "backend-memory")]
pub mod memory;
#[cfg(feature = "backend-tracing")]
pub mod tracing_backend;

#[cfg(feature = "backend-memory")]
pub use memory::{CapturedRecord, MemoryBackend, MemorySink};
#[cfg(feature = "backend-tracing")]
pub use tracing_backend::TracingBackend;
