//! Logger handles
//!
//! A [`Logger`] is what application code holds. It never talks to a backend
//! directly: each call reads the active binding's generation and, when it
//! differs from the one the cached delegate was resolved under, asks the new
//! binding's logger factory for a fresh delegate. Handles obtained while the
//! substitute binding was active therefore start reaching the real backend
//! as soon as one is installed, and fall back to discarding when it goes.

use arc_swap::ArcSwap;
use logport_application::BindingRegistry;
use logport_domain::ports::BackendLogger;
use logport_domain::{Level, Marker, Record};
use std::fmt;
use std::sync::Arc;

/// Backend logger resolved under one binding generation
struct Delegate {
    generation: u64,
    logger: Arc<dyn BackendLogger>,
}

struct LoggerInner {
    name: String,
    registry: Arc<BindingRegistry>,
    delegate: ArcSwap<Delegate>,
}

/// Named logger handle, cheap to clone
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Handle for `name`, resolved against `registry`'s active binding
    pub fn new(name: impl Into<String>, registry: Arc<BindingRegistry>) -> Self {
        let name = name.into();
        let binding = registry.current();
        let delegate = Delegate {
            generation: binding.generation(),
            logger: binding.logger_factory().get_logger(&name),
        };
        Self {
            inner: Arc::new(LoggerInner {
                name,
                registry,
                delegate: ArcSwap::from_pointee(delegate),
            }),
        }
    }

    /// Name the handle was requested under
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Backend currently serving this handle
    pub fn backend_id(&self) -> String {
        self.inner.registry.current().backend_id().to_string()
    }

    /// Whether a record at `level` would reach the backend
    pub fn is_enabled(&self, level: Level) -> bool {
        self.delegate().is_enabled(level)
    }

    /// Log `args` at `level`
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.dispatch(level, None, args);
    }

    /// Log `args` at `level` with `marker` attached
    pub fn log_marked(&self, level: Level, marker: &Marker, args: fmt::Arguments<'_>) {
        self.dispatch(level, Some(marker), args);
    }

    /// Log a message at trace level
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Level::Trace, format_args!("{message}"));
    }

    /// Log a message at debug level
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, format_args!("{message}"));
    }

    /// Log a message at info level
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, format_args!("{message}"));
    }

    /// Log a message at warn level
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, format_args!("{message}"));
    }

    /// Log a message at error level
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, format_args!("{message}"));
    }

    fn dispatch(&self, level: Level, marker: Option<&Marker>, args: fmt::Arguments<'_>) {
        let delegate = self.delegate();
        if delegate.is_enabled(level) {
            delegate.log(&Record::new(level, &self.inner.name, marker, args));
        }
    }

    /// Delegate for the active binding, re-resolved on generation change
    fn delegate(&self) -> Arc<dyn BackendLogger> {
        let binding = self.inner.registry.current();
        let cached = self.inner.delegate.load();
        if cached.generation == binding.generation() {
            return Arc::clone(&cached.logger);
        }

        // A racing thread may store an older generation; the next call
        // sees the mismatch and resolves again.
        let logger = binding.logger_factory().get_logger(&self.inner.name);
        self.inner.delegate.store(Arc::new(Delegate {
            generation: binding.generation(),
            logger: Arc::clone(&logger),
        }));
        logger
    }

    /// Generation of the binding the cached delegate belongs to
    #[cfg(test)]
    fn cached_generation(&self) -> u64 {
        self.inner.delegate.load().generation
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("generation", &self.inner.delegate.load().generation)
            .finish_non_exhaustive()
    }
}
