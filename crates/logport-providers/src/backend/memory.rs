//! In-memory capturing backend
//!
//! Stores every record it is handed, together with the calling thread's
//! diagnostic context at that moment. Meant for tests and for hosts that
//! want to inspect or forward output themselves.

use crate::constants::{MEMORY_BACKEND_ID, MEMORY_CAPACITY_KEY, MEMORY_DEFAULT_MIN_LEVEL};
use logport_application::registry::{
    BACKEND_PROVIDERS, BackendProviderConfig, BackendProviderEntry,
};
use logport_application::{BasicMarkerFactory, ThreadContextAdapter, mdc, ndc};
use logport_domain::ports::{
    BackendLogger, BackendProvider, ContextAdapter, LoggerFactory, MarkerFactory,
};
use logport_domain::{FACADE_API_VERSION, Level, Record};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One captured record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedRecord {
    /// Record level
    pub level: Level,
    /// Logger name
    pub logger: String,
    /// Marker name, if a marker was attached
    pub marker: Option<String>,
    /// Formatted message
    pub message: String,
    /// Nested context at log time, joined by spaces
    pub ndc: String,
    /// Mapped context at log time
    pub mdc: BTreeMap<String, String>,
}

/// Shared buffer of captured records
///
/// With a capacity set, the oldest records are dropped first.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<VecDeque<CapturedRecord>>,
    capacity: Option<usize>,
}

impl MemorySink {
    /// Unbounded sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink retaining at most `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<CapturedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, record: CapturedRecord) {
        let mut records = self.lock();
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while records.len() >= capacity {
                records.pop_front();
            }
        }
        records.push_back(record);
    }

    /// Copy of the captured records, oldest first
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.lock().iter().cloned().collect()
    }

    /// Remove and return the captured records
    pub fn take(&self) -> Vec<CapturedRecord> {
        self.lock().drain(..).collect()
    }

    /// Messages only, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Number of captured records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every captured record
    pub fn clear(&self) {
        self.lock().clear();
    }
}

struct MemoryLogger {
    name: String,
    min_level: Level,
    sink: Arc<MemorySink>,
}

impl BackendLogger for MemoryLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.is_enabled(record.level()) {
            return;
        }
        self.sink.push(CapturedRecord {
            level: record.level(),
            logger: record.logger().to_string(),
            marker: record.marker().map(|m| m.name().to_string()),
            message: record.args().to_string(),
            ndc: ndc::full_context(),
            mdc: mdc::copy_of_context_map().into_iter().collect(),
        });
    }
}

struct MemoryLoggerFactory {
    min_level: Level,
    sink: Arc<MemorySink>,
}

impl LoggerFactory for MemoryLoggerFactory {
    fn get_logger(&self, name: &str) -> Arc<dyn BackendLogger> {
        Arc::new(MemoryLogger {
            name: name.to_string(),
            min_level: self.min_level,
            sink: Arc::clone(&self.sink),
        })
    }
}

/// Backend capturing records into a [`MemorySink`]
#[derive(Clone)]
pub struct MemoryBackend {
    min_level: Level,
    sink: Arc<MemorySink>,
    loggers: Arc<MemoryLoggerFactory>,
    markers: Arc<BasicMarkerFactory>,
    context: Arc<ThreadContextAdapter>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Backend capturing every level into a fresh unbounded sink
    pub fn new() -> Self {
        Self::with_sink(MEMORY_DEFAULT_MIN_LEVEL, Arc::new(MemorySink::new()))
    }

    /// Backend capturing `min_level` and above
    pub fn with_min_level(min_level: Level) -> Self {
        Self::with_sink(min_level, Arc::new(MemorySink::new()))
    }

    /// Backend writing into an existing sink
    pub fn with_sink(min_level: Level, sink: Arc<MemorySink>) -> Self {
        Self {
            min_level,
            loggers: Arc::new(MemoryLoggerFactory {
                min_level,
                sink: Arc::clone(&sink),
            }),
            sink,
            markers: Arc::new(BasicMarkerFactory::new()),
            context: Arc::new(ThreadContextAdapter::new()),
        }
    }

    /// Build from registry configuration
    ///
    /// Reads `min_level` and the optional `capacity` extra setting.
    pub fn from_config(config: &BackendProviderConfig) -> Result<Self, String> {
        let min_level = config.min_level.unwrap_or(MEMORY_DEFAULT_MIN_LEVEL);
        let sink = match config.extra.get(MEMORY_CAPACITY_KEY) {
            Some(raw) => {
                let capacity = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| format!("Invalid memory backend capacity '{raw}': {e}"))?;
                MemorySink::with_capacity(capacity)
            }
            None => MemorySink::new(),
        };
        Ok(Self::with_sink(min_level, Arc::new(sink)))
    }

    /// Minimum captured level
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// The sink records are written to
    pub fn sink(&self) -> &Arc<MemorySink> {
        &self.sink
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("min_level", &self.min_level)
            .field("captured", &self.sink.len())
            .finish_non_exhaustive()
    }
}

impl BackendProvider for MemoryBackend {
    fn backend_id(&self) -> &str {
        MEMORY_BACKEND_ID
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
static MEMORY_PROVIDER: BackendProviderEntry = BackendProviderEntry {
    name: MEMORY_BACKEND_ID,
    description: "Captures records in memory for inspection",
    factory: |config: &BackendProviderConfig| Ok(Arc::new(MemoryBackend::from_config(config)?)),
};
