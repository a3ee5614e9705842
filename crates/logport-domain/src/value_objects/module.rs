//! Host module identity and lifecycle state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-assigned module identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub u64);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a host module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModuleState {
    /// Installed but dependencies not yet resolved
    #[default]
    Installed,
    /// Dependencies resolved, module can be started
    Resolved,
    /// Start in progress
    Starting,
    /// Running
    Active,
    /// Stop in progress
    Stopping,
    /// Removed from the host
    Uninstalled,
}

impl ModuleState {
    /// Whether a module in this state may supply a binding
    pub fn is_eligible(self) -> bool {
        matches!(
            self,
            ModuleState::Resolved | ModuleState::Starting | ModuleState::Active
        )
    }

    /// Selection rank, lower is preferred
    ///
    /// Returns `None` for states that are never selected.
    pub fn selection_rank(self) -> Option<u8> {
        match self {
            ModuleState::Active => Some(0),
            ModuleState::Starting => Some(1),
            ModuleState::Resolved => Some(2),
            _ => None,
        }
    }
}
