//! Markers
//!
//! A marker is a named tag attached to a log record. Markers may reference
//! other markers, forming a DAG that `contains` walks recursively.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Shared handle to a marker
pub type MarkerHandle = Arc<Marker>;

/// Serializes reference edits across every marker, so the cycle check and
/// the insert it guards see the same graph.
static GRAPH_EDIT: Mutex<()> = Mutex::new(());

/// A named marker with optional references to other markers
pub struct Marker {
    name: String,
    references: RwLock<Vec<MarkerHandle>>,
}

impl Marker {
    /// Create a marker without references
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            references: RwLock::new(Vec::new()),
        }
    }

    /// Create a shared marker
    pub fn new_shared<S: Into<String>>(name: S) -> MarkerHandle {
        Arc::new(Self::new(name))
    }

    /// Marker name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a reference to another marker
    ///
    /// Adding a marker that already (transitively) references this one, or
    /// a reference already present, is a no-op.
    pub fn add(&self, reference: MarkerHandle) {
        let _edit = GRAPH_EDIT.lock().unwrap_or_else(PoisonError::into_inner);
        if reference.name == self.name || reference.contains(&self.name) {
            return;
        }
        let mut references = self
            .references
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if references.iter().any(|r| r.name == reference.name) {
            return;
        }
        references.push(reference);
    }

    /// Remove a direct reference by name, returning whether it was present
    pub fn remove(&self, name: &str) -> bool {
        let _edit = GRAPH_EDIT.lock().unwrap_or_else(PoisonError::into_inner);
        let mut references = self
            .references
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = references.len();
        references.retain(|r| r.name != name);
        references.len() != before
    }

    /// Whether this marker has any references
    pub fn has_references(&self) -> bool {
        !self.read_references().is_empty()
    }

    /// Snapshot of the direct references
    pub fn references(&self) -> Vec<MarkerHandle> {
        self.read_references().clone()
    }

    /// Whether this marker is, or transitively references, `name`
    pub fn contains(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        self.read_references().iter().any(|r| r.contains(name))
    }

    fn read_references(&self) -> std::sync::RwLockReadGuard<'_, Vec<MarkerHandle>> {
        self.references
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl AsRef<Marker> for Marker {
    fn as_ref(&self) -> &Marker {
        self
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Marker {}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marker")
            .field("name", &self.name)
            .field(
                "references",
                &self
                    .read_references()
                    .iter()
                    .map(|r| r.name.clone())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let references = self.read_references();
        if references.is_empty() {
            return f.write_str(&self.name);
        }
        write!(f, "{} [ ", self.name)?;
        for (i, reference) in references.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{reference}")?;
        }
        f.write_str(" ]")
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
