//! Substitute Binding
//!
//! The safe default used whenever no real backend is bound. Loggers discard
//! everything but keep the name they were requested under, markers still
//! work, and the key/value context goes to the per-thread store.

pub mod logger;
pub mod marker;

pub use logger::{SubstituteLogger, SubstituteLoggerFactory};
pub use marker::BasicMarkerFactory;

use crate::binding::Binding;
use crate::context::ThreadContextAdapter;
use logport_domain::{FACADE_API_VERSION, SUBSTITUTE_BACKEND_ID, SUBSTITUTE_GENERATION};
use std::sync::Arc;

/// Build a fresh substitute binding
pub fn substitute_binding() -> Binding {
    substitute_binding_with(Arc::new(SubstituteLoggerFactory::new()))
}

/// Substitute binding handing out loggers from `loggers`
pub fn substitute_binding_with(loggers: Arc<SubstituteLoggerFactory>) -> Binding {
    Binding::new(
        SUBSTITUTE_BACKEND_ID,
        FACADE_API_VERSION,
        SUBSTITUTE_GENERATION,
        loggers,
        Arc::new(ThreadContextAdapter::new()),
        Arc::new(BasicMarkerFactory::new()),
    )
}
