//! Basic marker factory
//!
//! Caches markers by name in a concurrent map. Used by the substitute
//! binding and reusable by backends that have no marker model of their own.

use dashmap::DashMap;
use logport_domain::ports::MarkerFactory;
use logport_domain::{Marker, MarkerHandle};
use std::sync::Arc;

/// In-memory marker factory
#[derive(Debug, Default)]
pub struct BasicMarkerFactory {
    markers: DashMap<String, MarkerHandle>,
}

impl BasicMarkerFactory {
    /// Create an empty factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached markers
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no marker is cached
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MarkerFactory for BasicMarkerFactory {
    fn get_marker(&self, name: &str) -> MarkerHandle {
        if let Some(marker) = self.markers.get(name) {
            return Arc::clone(marker.value());
        }
        Arc::clone(
            self.markers
                .entry(name.to_string())
                .or_insert_with(|| Marker::new_shared(name))
                .value(),
        )
    }

    fn exists(&self, name: &str) -> bool {
        self.markers.contains_key(name)
    }

    fn detach_marker(&self, name: &str) -> bool {
        self.markers.remove(name).is_some()
    }

    fn get_detached_marker(&self, name: &str) -> MarkerHandle {
        Marker::new_shared(name)
    }
}
