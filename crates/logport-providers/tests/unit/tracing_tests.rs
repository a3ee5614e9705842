//! Tests for the tracing forwarding backend

use logport_application::mdc;
use logport_domain::ports::BackendProvider;
use logport_domain::{Level, Record};
use logport_providers::TracingBackend;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn subscriber(buffer: &Buffer, max: tracing::Level) -> impl tracing::Subscriber + Send + Sync {
    let writer = buffer.clone();
    tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(max)
        .with_ansi(false)
        .finish()
}

#[test]
fn test_backend_identity() {
    let backend = TracingBackend::new();
    assert_eq!(backend.backend_id(), "tracing");
    assert_eq!(backend.requested_api_version(), logport_domain::FACADE_API_VERSION);
}

#[test]
fn test_forwards_record_as_event() {
    let buffer = Buffer::default();
    let backend = TracingBackend::new();
    let logger = backend.logger_factory().unwrap().get_logger("billing");

    tracing::subscriber::with_default(subscriber(&buffer, tracing::Level::INFO), || {
        mdc::put("tenant", "acme");
        logger.log(&Record::new(Level::Info, "billing", None, format_args!("invoice sent")));
        mdc::remove("tenant");
    });

    let output = buffer.contents();
    assert!(output.contains("invoice sent"), "{output}");
    assert!(output.contains("billing"), "{output}");
    assert!(output.contains("acme"), "{output}");
}

#[test]
fn test_is_enabled_follows_subscriber_and_min_level() {
    let buffer = Buffer::default();
    let backend = TracingBackend::with_min_level(Level::Debug);
    let logger = backend.logger_factory().unwrap().get_logger("svc");

    tracing::subscriber::with_default(subscriber(&buffer, tracing::Level::INFO), || {
        assert!(!logger.is_enabled(Level::Trace));
        assert!(!logger.is_enabled(Level::Debug));
        assert!(logger.is_enabled(Level::Warn));

        logger.log(&Record::new(Level::Debug, "svc", None, format_args!("hidden")));
    });

    assert!(!buffer.contents().contains("hidden"));
}
