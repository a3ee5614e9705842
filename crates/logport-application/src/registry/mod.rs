//! Backend Provider Registry
//!
//! Link-time registration of backend implementations. A backend crate
//! contributes an entry to [`BACKEND_PROVIDERS`]; hosts enumerate the slice
//! to turn each entry into a module exporting the backend contract.
//!
//! ```text
//! #[distributed_slice(BACKEND_PROVIDERS)] ──▶ BACKEND_PROVIDERS.iter()
//!                                                  │
//!                              resolve_backend_provider("memory")
//!                                                  ▼
//!                                       Arc<dyn BackendProvider>
//! ```
//!
//! ## Registering a backend
//!
//! ```ignore
//! use logport_application::registry::{BackendProviderEntry, BACKEND_PROVIDERS};
//!
//! #[linkme::distributed_slice(BACKEND_PROVIDERS)]
//! static CONSOLE_BACKEND: BackendProviderEntry = BackendProviderEntry {
//!     name: "console",
//!     description: "Writes records to stderr",
//!     factory: |config| Ok(Arc::new(ConsoleBackend::from_config(config))),
//! };
//! ```

use logport_domain::Level;
use logport_domain::ports::BackendProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration handed to a backend factory
///
/// Backends use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct BackendProviderConfig {
    /// Backend name (e.g., "tracing", "memory")
    pub provider: String,
    /// Minimum level the backend should report as enabled
    pub min_level: Option<Level>,
    /// Additional backend-specific settings
    pub extra: HashMap<String, String>,
}

impl BackendProviderConfig {
    /// Create a config for the given backend name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the minimum level
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Add an extra setting
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for a backend implementation
pub struct BackendProviderEntry {
    /// Unique backend name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory creating the provider
    pub factory: fn(&BackendProviderConfig) -> Result<Arc<dyn BackendProvider>, String>,
}

#[linkme::distributed_slice]
pub static BACKEND_PROVIDERS: [BackendProviderEntry] = [..];

/// Create the backend registered as `config.provider`
pub fn resolve_backend_provider(
    config: &BackendProviderConfig,
) -> Result<Arc<dyn BackendProvider>, String> {
    let provider_name = &config.provider;

    if let Some(entry) = BACKEND_PROVIDERS.iter().find(|e| e.name == provider_name) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = BACKEND_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown backend provider '{provider_name}'. Available providers: {available:?}"
    ))
}

/// `(name, description)` of every registered backend
pub fn list_backend_providers() -> Vec<(&'static str, &'static str)> {
    BACKEND_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
