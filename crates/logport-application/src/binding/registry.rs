//! Binding Registry - single source of truth for the active backend
//!
//! Reads go through [`ArcSwap`], so `current()` never takes a lock and a
//! reader always sees a fully built binding. Writers serialize on a short
//! mutex that only covers the pointer store and the generation bump; the
//! backend's contract is invoked before that section is entered.

use super::Binding;
use crate::substitute::{SubstituteLoggerFactory, substitute_binding_with};
use arc_swap::ArcSwap;
use logport_domain::ports::{BackendProvider, ContextAdapter, LoggerFactory, MarkerFactory};
use logport_domain::{BindError, FacadeVersion, VersionRange};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Factories extracted from a provider, before a generation is assigned
struct BindingParts {
    backend_id: String,
    requested_api_version: String,
    logger_factory: Arc<dyn LoggerFactory>,
    context_adapter: Arc<dyn ContextAdapter>,
    marker_factory: Arc<dyn MarkerFactory>,
}

/// Holds the active [`Binding`]
pub struct BindingRegistry {
    current: ArcSwap<Binding>,
    substitute: Arc<Binding>,
    substitute_loggers: Arc<SubstituteLoggerFactory>,
    accepted: VersionRange,
    last_generation: AtomicU64,
    swap_lock: Mutex<()>,
}

impl BindingRegistry {
    /// Registry accepting the default facade version range
    pub fn new() -> Self {
        Self::with_accepted_versions(VersionRange::default())
    }

    /// Registry accepting backends whose declared version is in `accepted`
    pub fn with_accepted_versions(accepted: VersionRange) -> Self {
        let substitute_loggers = Arc::new(SubstituteLoggerFactory::new());
        let substitute = Arc::new(substitute_binding_with(Arc::clone(&substitute_loggers)));
        Self {
            current: ArcSwap::new(Arc::clone(&substitute)),
            substitute,
            substitute_loggers,
            accepted,
            last_generation: AtomicU64::new(logport_domain::SUBSTITUTE_GENERATION),
            swap_lock: Mutex::new(()),
        }
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// The active binding
    ///
    /// Never blocks and never fails; returns the substitute binding when
    /// nothing is installed.
    pub fn current(&self) -> Arc<Binding> {
        self.current.load_full()
    }

    /// Generation of the active binding
    pub fn generation(&self) -> u64 {
        self.current.load().generation()
    }

    /// Whether a real backend is bound
    pub fn is_bound(&self) -> bool {
        !self.current.load().is_substitute()
    }

    /// The substitute binding this registry falls back to
    pub fn substitute(&self) -> &Arc<Binding> {
        &self.substitute
    }

    /// Logger names requested from the substitute binding, in request order
    pub fn substitute_logger_names(&self) -> Vec<String> {
        self.substitute_loggers.logger_names()
    }

    /// Facade versions this registry accepts
    pub fn accepted_versions(&self) -> &VersionRange {
        &self.accepted
    }

    /// Replace the active binding with one built from `provider`
    ///
    /// The provider's contract is invoked (and its version checked) first;
    /// only the finished binding is swapped in under the write section.
    pub fn install(&self, provider: &dyn BackendProvider) -> Result<Arc<Binding>, BindError> {
        let parts = self.build_parts(provider)?;

        let guard = self
            .swap_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let generation = self.last_generation.fetch_add(1, Ordering::AcqRel) + 1;
        let binding = Arc::new(Binding::new(
            parts.backend_id,
            parts.requested_api_version,
            generation,
            parts.logger_factory,
            parts.context_adapter,
            parts.marker_factory,
        ));
        self.current.store(Arc::clone(&binding));
        drop(guard);

        info!(
            backend = %binding.backend_id(),
            generation,
            "Backend binding installed"
        );
        Ok(binding)
    }

    /// Reset the active binding to the substitute binding
    ///
    /// Idempotent: calling it while nothing is installed changes nothing.
    pub fn uninstall(&self) {
        let guard = self
            .swap_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = self.current.swap(Arc::clone(&self.substitute));
        drop(guard);

        if previous.is_substitute() {
            debug!("Uninstall requested while no backend was bound");
        } else {
            info!(
                backend = %previous.backend_id(),
                generation = previous.generation(),
                "Backend binding uninstalled, substitute binding active"
            );
        }
    }

    /// Invoke the provider contract, containing any panic it raises
    fn build_parts(&self, provider: &dyn BackendProvider) -> Result<BindingParts, BindError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.extract_parts(provider))).unwrap_or_else(
            |payload| {
                Err(BindError::contract_violation(
                    "<unknown>",
                    format!("provider panicked: {}", panic_message(payload.as_ref())),
                ))
            },
        )
    }

    fn extract_parts(&self, provider: &dyn BackendProvider) -> Result<BindingParts, BindError> {
        let backend_id = provider.backend_id().to_string();
        let requested_api_version = provider.requested_api_version().to_string();

        let compatible = requested_api_version
            .parse::<FacadeVersion>()
            .map(|version| self.accepted.contains(&version))
            .unwrap_or(false);
        if !compatible {
            return Err(BindError::incompatible_version(
                backend_id,
                requested_api_version,
                self.accepted.to_string(),
            ));
        }

        let logger_factory = provider
            .logger_factory()
            .ok_or_else(|| BindError::contract_violation(&backend_id, "no logger factory"))?;
        let context_adapter = provider
            .context_adapter()
            .ok_or_else(|| BindError::contract_violation(&backend_id, "no context adapter"))?;
        let marker_factory = provider
            .marker_factory()
            .ok_or_else(|| BindError::contract_violation(&backend_id, "no marker factory"))?;

        Ok(BindingParts {
            backend_id,
            requested_api_version,
            logger_factory,
            context_adapter,
            marker_factory,
        })
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.load();
        f.debug_struct("BindingRegistry")
            .field("backend_id", &current.backend_id())
            .field("generation", &current.generation())
            .field("accepted", &self.accepted.to_string())
            .finish()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
