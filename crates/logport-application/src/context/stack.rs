//! Nested diagnostic stack value

use logport_domain::NDC_SEPARATOR;

/// Ordered trail of context messages, newest last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticStack {
    entries: Vec<String>,
}

impl DiagnosticStack {
    /// Empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy of `snapshot`
    pub fn from_snapshot(snapshot: &[String]) -> Self {
        Self {
            entries: snapshot.to_vec(),
        }
    }

    /// Append a message
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    /// Remove and return the newest message, or `""` when empty
    pub fn pop(&mut self) -> String {
        self.entries.pop().unwrap_or_default()
    }

    /// The newest message, or `""` when empty
    pub fn peek(&self) -> String {
        self.entries.last().cloned().unwrap_or_default()
    }

    /// Number of entries
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack holds no entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the `max` newest entries
    pub fn set_max_depth(&mut self, max: usize) {
        let depth = self.entries.len();
        if depth > max {
            self.entries.drain(..depth - max);
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Independent copy of the entries, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Every entry joined by a single space
    pub fn full_context(&self) -> String {
        self.entries.join(NDC_SEPARATOR)
    }

    /// Entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
