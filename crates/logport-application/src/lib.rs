//! Application Layer - logport
//!
//! The binding-resolution and context-propagation engine behind the
//! logport facade.
//!
//! ## Components
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`binding`] | The active [`Binding`] and the [`BindingRegistry`] that swaps it |
//! | [`substitute`] | The discarding default binding used while nothing is bound |
//! | [`discovery`] | The [`DiscoveryTracker`] reacting to host lifecycle events |
//! | [`context`] | Per-thread nested (`ndc`) and mapped (`mdc`) diagnostic context |
//! | [`registry`] | Link-time registry of backend implementations |
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `logport-domain`: contract types, ports and errors
//! - `arc-swap`, `dashmap`: lock-free binding reads and concurrent caches
//! - `tracing`: the low-level diagnostic channel
//! - `linkme`: backend registration

pub mod binding;
pub mod context;
pub mod discovery;
pub mod registry;
pub mod substitute;

pub use binding::{Binding, BindingRegistry};
pub use context::{
    DiagnosticMap, DiagnosticStack, ThreadContextAdapter, live_context_stores, mdc, ndc,
};
pub use discovery::{DiscoveryOptions, DiscoveryTracker, TrackerState};
pub use registry::{
    BACKEND_PROVIDERS, BackendProviderConfig, BackendProviderEntry, list_backend_providers,
    resolve_backend_provider,
};
pub use substitute::{
    BasicMarkerFactory, SubstituteLoggerFactory, substitute_binding, substitute_binding_with,
};
