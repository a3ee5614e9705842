//! # logport
//!
//! A logging facade whose backend is discovered, installed and swapped at
//! runtime inside a modular host.
//!
//! Application code asks the facade for loggers and markers; a separately
//! loaded backend module decides where records go. Until a backend is bound
//! the facade hands out discarding loggers, and those same handles start
//! delegating once a backend appears.
//!
//! ## Features
//!
//! - **Runtime binding**: backends are discovered through the host and swapped without locks on the read path
//! - **Diagnostic context**: per-thread NDC stack and MDC map, with explicit inheritance
//! - **Link-time backend registry**: bundled backends register themselves with `linkme`
//! - **Layered configuration**: defaults, `logport.toml`, `LOGPORT_*` environment
//!
//! ## Example
//!
//! ```ignore
//! use logport::{info, ndc};
//!
//! logport::init()?;
//! let log = logport::get_logger("app.startup");
//! ndc::push("request-42");
//! info!(log, "listening on {}", addr);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Backend contract, host ports, value objects and errors
//! - `application` - Binding registry, discovery tracker, diagnostic context
//! - `infrastructure` - Configuration, diagnostic logging, in-process host
//! - `providers` - Bundled backends

/// Domain layer - backend contract, host ports and value objects
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use logport_domain::*;
}

/// Application layer - binding engine and diagnostic context
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use logport_application::*;
}

/// Infrastructure layer - config, logging and the in-process host
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use logport_infrastructure::*;
}

/// Bundled backends
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use logport_providers::*;
}

pub mod facade;
pub mod logger;

/// Nested diagnostic context of the calling thread
pub mod ndc {
    pub use logport_application::ndc::*;
}

/// Mapped diagnostic context of the calling thread
pub mod mdc {
    pub use logport_application::mdc::{
        clear, copy_of_context_map, get, put, remove, remove_all, set_context_map,
    };

    use logport_domain::ports::ContextAdapter;
    use std::sync::Arc;

    /// Context adapter of the global facade's active binding
    pub fn adapter() -> Arc<dyn ContextAdapter> {
        logport_application::mdc::adapter(crate::Facade::global().registry())
    }
}

// Re-export commonly used domain types at the crate root
pub use domain::{Level, Marker, MarkerHandle};

pub use facade::{BindingSummary, Facade};
pub use logger::Logger;

use logport_application::DiscoveryTracker;
use logport_domain::error::Result;
use logport_domain::ports::{HostRegistry, Module};
use logport_infrastructure::{AppConfig, ConfigLoader, InProcessHost, init_logging};
use std::sync::Arc;

/// Logger handle for `name` from the global facade
pub fn get_logger(name: &str) -> Logger {
    Facade::global().get_logger(name)
}

/// Logger handle named after type `T` from the global facade
pub fn get_logger_for<T: ?Sized>() -> Logger {
    Facade::global().get_logger_for::<T>()
}

/// Cached marker from the global facade
pub fn get_marker(name: &str) -> MarkerHandle {
    Facade::global().get_marker(name)
}

/// Uncached marker from the global facade
pub fn get_detached_marker(name: &str) -> MarkerHandle {
    Facade::global().get_detached_marker(name)
}

/// Initialize logport with the default configuration sources
///
/// Loads configuration, sets up diagnostic logging and starts discovery on
/// an in-process host holding every bundled backend.
pub fn init() -> Result<DiscoveryTracker> {
    let config = ConfigLoader::new().load()?;
    let host = InProcessHost::with_registered_backends();
    let facade_module = host.install_facade_module();
    init_with_host(&config, Arc::new(host), Some(facade_module.id()))
}

/// Initialize logport against an existing host
///
/// `self_module` is the host module the facade itself lives in; it is
/// never selected as a backend.
pub fn init_with_host(
    config: &AppConfig,
    host: Arc<dyn HostRegistry>,
    self_module: Option<logport_domain::ModuleId>,
) -> Result<DiscoveryTracker> {
    init_logging(config.logging.clone())?;
    let registry = Arc::new(logport_infrastructure::registry_from_config(config)?);
    Facade::install_global(registry).start_discovery(config, host, self_module)
}

mod macros;
