//! Substitute loggers
//!
//! Handed out while no backend is bound. They discard every record and
//! report every level as disabled, but the factory remembers which names
//! were requested.

use dashmap::DashMap;
use logport_domain::ports::{BackendLogger, LoggerFactory};
use logport_domain::{Level, Record};
use std::sync::{Arc, Mutex};

/// A logger that discards everything
#[derive(Debug, Clone)]
pub struct SubstituteLogger {
    name: String,
}

impl SubstituteLogger {
    /// Create a discarding logger named `name`
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

impl BackendLogger for SubstituteLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(&self, _record: &Record<'_>) {}
}

/// Factory for [`SubstituteLogger`]s that records requested names
#[derive(Debug, Default)]
pub struct SubstituteLoggerFactory {
    loggers: DashMap<String, Arc<SubstituteLogger>>,
    names: Mutex<Vec<String>>,
}

impl SubstituteLoggerFactory {
    /// Create an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Names requested so far, in first-request order
    pub fn logger_names(&self) -> Vec<String> {
        self.names
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl LoggerFactory for SubstituteLoggerFactory {
    fn get_logger(&self, name: &str) -> Arc<dyn BackendLogger> {
        if let Some(logger) = self.loggers.get(name) {
            return Arc::clone(logger.value()) as Arc<dyn BackendLogger>;
        }
        let entry = self.loggers.entry(name.to_string()).or_insert_with(|| {
            self.names
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(name.to_string());
            Arc::new(SubstituteLogger::new(name))
        });
        Arc::clone(entry.value()) as Arc<dyn BackendLogger>
    }
}
