//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the binding engine.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, `LOGPORT_` environment |
//! | [`logging`] | Diagnostic logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`host`] | In-process module host |
//! | [`bootstrap`] | Starting discovery from configuration |
//! | [`constants`] | Centralized infrastructure constants |

// Bundled backends register themselves at link time
extern crate logport_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod host;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{bootstrap, bootstrap_excluding, registry_from_config};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
pub use host::{InProcessHost, ModuleDescriptor, StaticModule};
pub use logging::init_logging;
