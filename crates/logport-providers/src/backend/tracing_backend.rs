//! Tracing forwarding backend
//!
//! Turns every record into a `tracing` event with target `logport`, so a
//! facade-using library logs wherever the application's subscriber writes.
//! The logger name, marker and both diagnostic contexts travel as fields.
//!
//! ## Example
//!
//! ```ignore
//! use logport_providers::TracingBackend;
//!
//! let backend = TracingBackend::new();
//! registry.install(&backend)?;
//! ```

use crate::constants::{TRACING_BACKEND_ID, TRACING_DEFAULT_MIN_LEVEL, TRACING_TARGET};
use logport_application::registry::{
    BACKEND_PROVIDERS, BackendProviderConfig, BackendProviderEntry,
};
use logport_application::{BasicMarkerFactory, ThreadContextAdapter, mdc, ndc};
use logport_domain::ports::{
    BackendLogger, BackendProvider, ContextAdapter, LoggerFactory, MarkerFactory,
};
use logport_domain::{FACADE_API_VERSION, Level, Record};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Logger forwarding to `tracing`
#[derive(Debug, Clone)]
pub struct TracingLogger {
    name: String,
    min_level: Level,
}

impl TracingLogger {
    fn new(name: &str, min_level: Level) -> Self {
        Self {
            name: name.to_string(),
            min_level,
        }
    }
}

impl BackendLogger for TracingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        if level < self.min_level {
            return false;
        }
        match level {
            Level::Trace => tracing::enabled!(target: TRACING_TARGET, tracing::Level::TRACE),
            Level::Debug => tracing::enabled!(target: TRACING_TARGET, tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(target: TRACING_TARGET, tracing::Level::INFO),
            Level::Warn => tracing::enabled!(target: TRACING_TARGET, tracing::Level::WARN),
            Level::Error => tracing::enabled!(target: TRACING_TARGET, tracing::Level::ERROR),
        }
    }

    fn log(&self, record: &Record<'_>) {
        if record.level() < self.min_level {
            return;
        }
        let logger = record.logger();
        let marker = record.marker().map(|m| m.name().to_string()).unwrap_or_default();
        let ndc = ndc::full_context();
        let mdc: BTreeMap<String, String> = mdc::copy_of_context_map().into_iter().collect();
        let message = record.args();

        match record.level() {
            Level::Trace => {
                tracing::trace!(target: TRACING_TARGET, logger, marker, ndc, ?mdc, "{message}");
            }
            Level::Debug => {
                tracing::debug!(target: TRACING_TARGET, logger, marker, ndc, ?mdc, "{message}");
            }
            Level::Info => {
                tracing::info!(target: TRACING_TARGET, logger, marker, ndc, ?mdc, "{message}");
            }
            Level::Warn => {
                tracing::warn!(target: TRACING_TARGET, logger, marker, ndc, ?mdc, "{message}");
            }
            Level::Error => {
                tracing::error!(target: TRACING_TARGET, logger, marker, ndc, ?mdc, "{message}");
            }
        }
    }
}

/// Factory for [`TracingLogger`]s
#[derive(Debug, Clone)]
pub struct TracingLoggerFactory {
    min_level: Level,
}

impl LoggerFactory for TracingLoggerFactory {
    fn get_logger(&self, name: &str) -> Arc<dyn BackendLogger> {
        Arc::new(TracingLogger::new(name, self.min_level))
    }
}

/// Backend forwarding records to `tracing`
#[derive(Debug, Clone)]
pub struct TracingBackend {
    loggers: Arc<TracingLoggerFactory>,
    markers: Arc<BasicMarkerFactory>,
    context: Arc<ThreadContextAdapter>,
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingBackend {
    /// Backend passing every level through to the subscriber
    pub fn new() -> Self {
        Self::with_min_level(TRACING_DEFAULT_MIN_LEVEL)
    }

    /// Backend dropping records below `min_level` before they reach `tracing`
    pub fn with_min_level(min_level: Level) -> Self {
        Self {
            loggers: Arc::new(TracingLoggerFactory { min_level }),
            markers: Arc::new(BasicMarkerFactory::new()),
            context: Arc::new(ThreadContextAdapter::new()),
        }
    }

    /// Configured minimum level
    pub fn min_level(&self) -> Level {
        self.loggers.min_level
    }
}

impl BackendProvider for TracingBackend {
    fn backend_id(&self) -> &str {
        TRACING_BACKEND_ID
    }

    fn requested_api_version(&self) -> &str {
        FACADE_API_VERSION
    }

    fn logger_factory(&self) -> Option<Arc<dyn LoggerFactory>> {
        Some(self.loggers.clone())
    }

    fn context_adapter(&self) -> Option<Arc<dyn ContextAdapter>> {
        Some(self.context.clone())
    }

    fn marker_factory(&self) -> Option<Arc<dyn MarkerFactory>> {
        Some(self.markers.clone())
    }
}

#[linkme::distributed_slice(BACKEND_PROVIDERS)]
static TRACING_PROVIDER: BackendProviderEntry = BackendProviderEntry {
    name: TRACING_BACKEND_ID,
    description: "Forwards records as tracing events (target \"logport\")",
    factory: |config: &BackendProviderConfig| {
        let min_level = config.min_level.unwrap_or(TRACING_DEFAULT_MIN_LEVEL);
        Ok(Arc::new(TracingBackend::with_min_level(min_level)))
    },
};
