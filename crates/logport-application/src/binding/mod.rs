//! Bindings
//!
//! A [`Binding`] is the immutable set of collaborators that fulfils logger,
//! context and marker requests. Exactly one binding is active at a time; the
//! [`BindingRegistry`] owns that choice.
//!
//! ```text
//! BackendProvider ──build──▶ Binding ──store──▶ BindingRegistry ──load──▶ Facade
//!                                                    ▲
//!                                        DiscoveryTracker (install/uninstall)
//! ```

pub mod registry;

pub use registry::BindingRegistry;

use logport_domain::ports::{ContextAdapter, LoggerFactory, MarkerFactory};
use std::fmt;
use std::sync::Arc;

/// The active triple of factories plus the backend identity
///
/// Never mutated after construction; swapping backends replaces the whole
/// value.
pub struct Binding {
    backend_id: String,
    requested_api_version: String,
    generation: u64,
    logger_factory: Arc<dyn LoggerFactory>,
    context_adapter: Arc<dyn ContextAdapter>,
    marker_factory: Arc<dyn MarkerFactory>,
}

impl Binding {
    /// Assemble a binding from its parts
    pub fn new(
        backend_id: impl Into<String>,
        requested_api_version: impl Into<String>,
        generation: u64,
        logger_factory: Arc<dyn LoggerFactory>,
        context_adapter: Arc<dyn ContextAdapter>,
        marker_factory: Arc<dyn MarkerFactory>,
    ) -> Self {
        Self {
            backend_id: backend_id.into(),
            requested_api_version: requested_api_version.into(),
            generation,
            logger_factory,
            context_adapter,
            marker_factory,
        }
    }

    /// Identifier of the backend supplying this binding
    pub fn backend_id(&self) -> &str {
        &self.backend_id
    }

    /// Facade version the backend declared
    pub fn requested_api_version(&self) -> &str {
        &self.requested_api_version
    }

    /// Install generation; 0 for the substitute binding
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this is the substitute binding
    pub fn is_substitute(&self) -> bool {
        self.generation == logport_domain::SUBSTITUTE_GENERATION
    }

    /// Logger factory handle
    pub fn logger_factory(&self) -> &Arc<dyn LoggerFactory> {
        &self.logger_factory
    }

    /// Key/value context adapter handle
    pub fn context_adapter(&self) -> &Arc<dyn ContextAdapter> {
        &self.context_adapter
    }

    /// Marker factory handle
    pub fn marker_factory(&self) -> &Arc<dyn MarkerFactory> {
        &self.marker_factory
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("backend_id", &self.backend_id)
            .field("requested_api_version", &self.requested_api_version)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
