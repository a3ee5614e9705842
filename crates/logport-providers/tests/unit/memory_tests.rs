//! Tests for the in-memory backend

use logport_application::{
    BackendProviderConfig, BindingRegistry, mdc, ndc, resolve_backend_provider,
};
use logport_domain::ports::BackendProvider;
use logport_domain::{Level, Marker, Record};
use logport_providers::{MemoryBackend, MemorySink};
use std::sync::Arc;

fn log(registry: &BindingRegistry, logger: &str, level: Level, message: &str) {
    let binding = registry.current();
    let backend_logger = binding.logger_factory().get_logger(logger);
    backend_logger.log(&Record::new(level, logger, None, format_args!("{message}")));
}

#[test]
fn test_captures_record_with_context() {
    let backend = MemoryBackend::new();
    let registry = BindingRegistry::new();
    registry.install(&backend).unwrap();

    ndc::clear();
    mdc::clear();
    ndc::push("req-7");
    mdc::put("user", "ana");
    log(&registry, "orders", Level::Info, "order placed");
    ndc::clear();
    mdc::clear();

    let records = backend.sink().take();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, Level::Info);
    assert_eq!(record.logger, "orders");
    assert_eq!(record.message, "order placed");
    assert_eq!(record.ndc, "req-7");
    assert_eq!(record.mdc.get("user").map(String::as_str), Some("ana"));
    assert!(backend.sink().is_empty());
}

#[test]
fn test_min_level_filters() {
    let backend = MemoryBackend::with_min_level(Level::Warn);
    let logger = backend.logger_factory().unwrap().get_logger("svc");

    assert!(!logger.is_enabled(Level::Info));
    assert!(logger.is_enabled(Level::Error));

    logger.log(&Record::new(Level::Debug, "svc", None, format_args!("dropped")));
    logger.log(&Record::new(Level::Warn, "svc", None, format_args!("kept")));
    assert_eq!(backend.sink().messages(), vec!["kept".to_string()]);
}

#[test]
fn test_marker_name_captured() {
    let backend = MemoryBackend::new();
    let logger = backend.logger_factory().unwrap().get_logger("audit");
    let marker = Marker::new("SECURITY");

    logger.log(&Record::new(Level::Info, "audit", Some(&marker), format_args!("login")));

    assert_eq!(backend.sink().records()[0].marker.as_deref(), Some("SECURITY"));
}

#[test]
fn test_capacity_drops_oldest() {
    let sink = Arc::new(MemorySink::with_capacity(2));
    let backend = MemoryBackend::with_sink(Level::Trace, Arc::clone(&sink));
    let logger = backend.logger_factory().unwrap().get_logger("x");

    for i in 0..4 {
        logger.log(&Record::new(Level::Info, "x", None, format_args!("m{i}")));
    }

    assert_eq!(sink.messages(), vec!["m2".to_string(), "m3".to_string()]);
}

#[test]
fn test_registry_factory_reads_config() {
    let config = BackendProviderConfig::new("memory")
        .with_min_level(Level::Error)
        .with_extra("capacity", "10");
    let provider = resolve_backend_provider(&config).unwrap_or_else(|e| panic!("{e}"));
    let logger = provider.logger_factory().unwrap().get_logger("cfg");

    assert!(!logger.is_enabled(Level::Warn));
    assert!(logger.is_enabled(Level::Error));
}

#[test]
fn test_registry_factory_rejects_bad_capacity() {
    let config = BackendProviderConfig::new("memory").with_extra("capacity", "lots");
    let err = resolve_backend_provider(&config).err().unwrap_or_default();
    assert!(err.contains("capacity"), "{err}");
}

#[test]
fn test_captured_record_serializes() {
    let backend = MemoryBackend::new();
    let logger = backend.logger_factory().unwrap().get_logger("json");
    logger.log(&Record::new(Level::Warn, "json", None, format_args!("careful")));

    let value = serde_json::to_value(&backend.sink().records()[0]).unwrap();
    assert_eq!(value["level"], "warn");
    assert_eq!(value["logger"], "json");
    assert_eq!(value["message"], "careful");
}
