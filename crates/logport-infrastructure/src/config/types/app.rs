//! Main application configuration

use super::discovery::DiscoveryConfig;
use super::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [discovery]
/// eager_install = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Diagnostic logging of the engine itself
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Backend discovery behaviour
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}
