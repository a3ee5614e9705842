//! Discovery configuration types

use logport_application::DiscoveryOptions;
use logport_domain::error::Result;
use logport_domain::{DEFAULT_MAX_API_VERSION, DEFAULT_MIN_API_VERSION, ModuleId, VersionRange};
use serde::{Deserialize, Serialize};

/// Backend discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Start resolved backend modules found at startup
    pub eager_install: bool,

    /// Bind backend modules that start later
    pub dynamic_install: bool,

    /// Lowest accepted backend facade version (inclusive)
    pub min_api_version: String,

    /// First rejected backend facade version (exclusive)
    pub max_api_version: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            eager_install: true,
            dynamic_install: true,
            min_api_version: DEFAULT_MIN_API_VERSION.to_string(),
            max_api_version: DEFAULT_MAX_API_VERSION.to_string(),
        }
    }
}

impl DiscoveryConfig {
    /// Accepted version range
    pub fn accepted_versions(&self) -> Result<VersionRange> {
        VersionRange::parse(&self.min_api_version, &self.max_api_version)
    }

    /// Tracker options; `self_module` is never selected
    pub fn options(&self, self_module: Option<ModuleId>) -> DiscoveryOptions {
        DiscoveryOptions {
            eager_install: self.eager_install,
            dynamic_install: self.dynamic_install,
            self_module,
        }
    }
}
