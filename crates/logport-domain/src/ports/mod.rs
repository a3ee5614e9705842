//! Domain ports
//!
//! Traits at the boundaries of the binding engine: what a backend must
//! provide, and what the host module system must answer.

pub mod backend;
pub mod host;

pub use backend::{BackendLogger, BackendProvider, ContextAdapter, LoggerFactory, MarkerFactory};
pub use host::{
    DiscoveryService, EventFilter, HostEvent, HostListener, HostRegistry, Module, ServiceKind,
    SubscriptionId,
};
