//! Candidate selection policy
//!
//! Eligible candidates are ordered `Active`, then `Starting`, then
//! `Resolved`. Within a rank the host's enumeration order is kept, so the
//! same host state always yields the same choice.
//!
//! A `Starting` candidate is never bound from a query. The tracker waits
//! for its `ModuleStarted` event instead, or passes over it when dynamic
//! install is off.

use logport_domain::ports::Module;
use logport_domain::{ModuleId, ModuleState};
use std::fmt;
use std::sync::Arc;

/// A module exporting the backend contract, with its state at query time
#[derive(Clone)]
pub struct Candidate {
    module: Arc<dyn Module>,
    state: ModuleState,
}

impl Candidate {
    /// Snapshot the state of `module`
    pub fn new(module: Arc<dyn Module>) -> Self {
        let state = module.state();
        Self { module, state }
    }

    /// Module handle
    pub fn module(&self) -> &Arc<dyn Module> {
        &self.module
    }

    /// Module id
    pub fn id(&self) -> ModuleId {
        self.module.id()
    }

    /// State observed when the candidate was taken
    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// Position in the preference order; `None` when not eligible
    pub fn rank(&self) -> Option<u8> {
        self.state.selection_rank()
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("id", &self.module.id())
            .field("name", &self.module.symbolic_name())
            .field("state", &self.state)
            .finish()
    }
}

/// Order `modules` by preference, dropping ineligible and skipped ones
///
/// With `eager_install` off only modules that are already active are kept,
/// since nothing will be started on their behalf.
pub fn select_candidates(
    modules: Vec<Arc<dyn Module>>,
    eager_install: bool,
    skip: impl Fn(ModuleId) -> bool,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = modules
        .into_iter()
        .map(Candidate::new)
        .filter(|c| c.rank().is_some())
        .filter(|c| eager_install || c.state() == ModuleState::Active)
        .filter(|c| !skip(c.id()))
        .collect();
    // stable: ties keep enumeration order
    candidates.sort_by_key(|c| c.rank());
    candidates
}
