//! Configuration
//!
//! `AppConfig` defaults, layered with a TOML file and `LOGPORT_`-prefixed
//! environment variables through figment.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, DiscoveryConfig, LoggingConfig};
