//! # logport - Backend Implementations
//!
//! Concrete backends implementing the `BackendProvider` contract defined in
//! `logport-domain`. Each backend registers itself in the link-time
//! `BACKEND_PROVIDERS` registry of `logport-application`.
//!
//! | Backend | Id | Description |
//! |---------|----|-------------|
//! | [`TracingBackend`] | `tracing` | Forwards records as `tracing` events |
//! | [`MemoryBackend`] | `memory` | Captures records in memory |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! logport-providers = { version = "0.1", default-features = false, features = ["backend-memory"] }
//! ```

pub use logport_domain::error::{Error, Result};
pub use logport_domain::ports::BackendProvider;

/// Backend-specific constants
pub mod constants;

/// Backend implementations
pub mod backend;

#[cfg(feature = "backend-memory")]
pub use backend::{CapturedRecord, MemoryBackend, MemorySink};
#[cfg(feature = "backend-tracing")]
pub use backend::TracingBackend;
