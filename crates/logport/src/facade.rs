//! Facade Entry Points
//!
//! [`Facade`] is the stable surface application code calls: name- or
//! type-keyed logger lookup and marker lookup. It holds one shared
//! [`BindingRegistry`] and never fails; before any backend is bound every
//! handle it returns is backed by the substitute binding.

use crate::logger::Logger;
use dashmap::DashMap;
use logport_application::{BindingRegistry, DiscoveryTracker};
use logport_domain::MarkerHandle;
use logport_domain::ModuleId;
use logport_domain::error::Result;
use logport_domain::ports::HostRegistry;
use logport_infrastructure::AppConfig;
use logport_infrastructure::bootstrap::bootstrap_excluding;
use serde::Serialize;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

static GLOBAL: OnceLock<Facade> = OnceLock::new();

/// Snapshot of what the facade is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingSummary {
    /// Identifier of the active backend
    pub backend_id: String,
    /// Facade version the active backend declared
    pub requested_api_version: String,
    /// Generation of the active binding
    pub generation: u64,
    /// Whether a real backend is bound
    pub bound: bool,
    /// Discovery tracker state, when discovery was started
    pub tracker_state: Option<String>,
    /// Logger names requested before any backend was bound
    pub early_loggers: Vec<String>,
}

/// Logger and marker lookup over one binding registry
pub struct Facade {
    registry: Arc<BindingRegistry>,
    loggers: DashMap<String, Logger>,
    tracker: Mutex<Option<DiscoveryTracker>>,
}

impl Facade {
    /// Facade over `registry`
    pub fn new(registry: Arc<BindingRegistry>) -> Self {
        Self {
            registry,
            loggers: DashMap::new(),
            tracker: Mutex::new(None),
        }
    }

    /// The process-wide facade
    ///
    /// Created on first use with a default registry unless
    /// [`Facade::install_global`] ran first.
    pub fn global() -> &'static Facade {
        GLOBAL.get_or_init(|| Facade::new(BindingRegistry::new_shared()))
    }

    /// Make a facade over `registry` the process-wide one
    ///
    /// Returns the global facade, which is the existing one if it was
    /// already created.
    pub fn install_global(registry: Arc<BindingRegistry>) -> &'static Facade {
        let mut installed = false;
        let facade = GLOBAL.get_or_init(|| {
            installed = true;
            Facade::new(registry)
        });
        if !installed {
            debug!("Global facade already initialized, keeping its registry");
        }
        facade
    }

    /// The registry this facade reads
    pub fn registry(&self) -> &Arc<BindingRegistry> {
        &self.registry
    }

    /// Logger handle for `name`
    ///
    /// Handles are cached per name; repeated calls return clones of the same
    /// handle.
    pub fn get_logger(&self, name: &str) -> Logger {
        if let Some(logger) = self.loggers.get(name) {
            return logger.clone();
        }
        self.loggers
            .entry(name.to_string())
            .or_insert_with(|| Logger::new(name, Arc::clone(&self.registry)))
            .clone()
    }

    /// Logger handle named after type `T`
    pub fn get_logger_for<T: ?Sized>(&self) -> Logger {
        self.get_logger(std::any::type_name::<T>())
    }

    /// Cached marker named `name` from the active binding
    pub fn get_marker(&self, name: &str) -> MarkerHandle {
        self.registry.current().marker_factory().get_marker(name)
    }

    /// Uncached marker named `name` from the active binding
    pub fn get_detached_marker(&self, name: &str) -> MarkerHandle {
        self.registry
            .current()
            .marker_factory()
            .get_detached_marker(name)
    }

    /// Number of cached logger handles
    pub fn logger_count(&self) -> usize {
        self.loggers.len()
    }

    /// Start backend discovery on `host`, replacing any running tracker
    ///
    /// The previous tracker is stopped before the new one subscribes, so
    /// only one tracker ever reacts to the host's events.
    pub fn start_discovery(
        &self,
        config: &AppConfig,
        host: Arc<dyn HostRegistry>,
        self_module: Option<ModuleId>,
    ) -> Result<DiscoveryTracker> {
        let mut slot = self
            .tracker
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            previous.stop();
        }
        let tracker = bootstrap_excluding(config, host, Arc::clone(&self.registry), self_module)?;
        *slot = Some(tracker.clone());
        Ok(tracker)
    }

    /// Stop backend discovery, if running
    pub fn stop_discovery(&self) {
        let previous = self
            .tracker
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(tracker) = previous {
            tracker.stop();
        }
    }

    /// The running discovery tracker
    pub fn tracker(&self) -> Option<DiscoveryTracker> {
        self.tracker
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// What the facade is bound to right now
    pub fn summary(&self) -> BindingSummary {
        let binding = self.registry.current();
        BindingSummary {
            backend_id: binding.backend_id().to_string(),
            requested_api_version: binding.requested_api_version().to_string(),
            generation: binding.generation(),
            bound: !binding.is_substitute(),
            tracker_state: self.tracker().map(|tracker| tracker.state().to_string()),
            early_loggers: self.registry.substitute_logger_names(),
        }
    }
}

impl Default for Facade {
    fn default() -> Self {
        Self::new(BindingRegistry::new_shared())
    }
}

impl std::fmt::Debug for Facade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Facade")
            .field("registry", &self.registry)
            .field("loggers", &self.loggers.len())
            .finish_non_exhaustive()
    }
}
