//! Statically described modules

use super::in_process::HostCore;
use logport_domain::error::{Error, Result};
use logport_domain::ports::{BackendProvider, HostEvent, Module};
use logport_domain::{BACKEND_CONTRACT_NAMESPACE, ModuleId, ModuleState};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;

/// What to install: name, exports, optional backend provider
#[derive(Clone)]
pub struct ModuleDescriptor {
    name: String,
    namespaces: Vec<String>,
    provider: Option<Arc<dyn BackendProvider>>,
    start_failure: Option<String>,
    initial_state: ModuleState,
}

impl ModuleDescriptor {
    /// A module exporting nothing
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespaces: Vec::new(),
            provider: None,
            start_failure: None,
            initial_state: ModuleState::Resolved,
        }
    }

    /// A module exporting the backend contract through `provider`
    pub fn backend(name: impl Into<String>, provider: Arc<dyn BackendProvider>) -> Self {
        Self {
            namespaces: vec![BACKEND_CONTRACT_NAMESPACE.to_string()],
            provider: Some(provider),
            ..Self::plain(name)
        }
    }

    /// Also export `namespace`
    pub fn exporting(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// Make every start attempt fail with `message`
    pub fn failing_start(mut self, message: impl Into<String>) -> Self {
        self.start_failure = Some(message.into());
        self
    }

    /// State right after installation (default: resolved)
    pub fn in_state(mut self, state: ModuleState) -> Self {
        self.initial_state = state;
        self
    }

    /// Symbolic name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("namespaces", &self.namespaces)
            .field("has_provider", &self.provider.is_some())
            .field("initial_state", &self.initial_state)
            .finish_non_exhaustive()
    }
}

/// A module installed in an [`InProcessHost`](super::InProcessHost)
pub struct StaticModule {
    id: ModuleId,
    name: String,
    namespaces: Vec<String>,
    provider: Option<Arc<dyn BackendProvider>>,
    start_failure: Option<String>,
    state: Mutex<ModuleState>,
    host: Weak<HostCore>,
}

impl StaticModule {
    pub(crate) fn new(id: ModuleId, descriptor: ModuleDescriptor, host: Weak<HostCore>) -> Self {
        Self {
            id,
            name: descriptor.name,
            namespaces: descriptor.namespaces,
            provider: descriptor.provider,
            start_failure: descriptor.start_failure,
            state: Mutex::new(descriptor.initial_state),
            host,
        }
    }

    fn state_guard(&self) -> MutexGuard<'_, ModuleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_state(&self, state: ModuleState) {
        *self.state_guard() = state;
    }

    fn emit(&self, event: &HostEvent) {
        if let Some(host) = self.host.upgrade() {
            host.emit(event);
        }
    }

    /// Stop the module, announcing it first; no-op unless active
    pub(crate) fn stop(self: &Arc<Self>) {
        {
            let mut state = self.state_guard();
            if *state != ModuleState::Active {
                return;
            }
            *state = ModuleState::Stopping;
        }
        debug!(module = %self.name, id = %self.id, "Stopping module");
        self.emit(&HostEvent::ModuleStopping(Arc::clone(self) as Arc<dyn Module>));
        self.set_state(ModuleState::Resolved);
    }
}

impl Module for StaticModule {
    fn id(&self) -> ModuleId {
        self.id
    }

    fn symbolic_name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> ModuleState {
        *self.state_guard()
    }

    fn exported_namespaces(&self) -> Vec<String> {
        self.namespaces.clone()
    }

    fn start(&self) -> Result<()> {
        {
            let mut state = self.state_guard();
            match *state {
                ModuleState::Active | ModuleState::Starting => return Ok(()),
                ModuleState::Resolved | ModuleState::Installed => {}
                other => {
                    return Err(Error::host(format!(
                        "module {} cannot start while {other:?}",
                        self.name
                    )));
                }
            }
            if let Some(message) = &self.start_failure {
                return Err(Error::host(format!(
                    "module {} failed to start: {message}",
                    self.name
                )));
            }
            *state = ModuleState::Starting;
        }
        self.set_state(ModuleState::Active);
        debug!(module = %self.name, id = %self.id, "Module started");

        if let Some(host) = self.host.upgrade()
            && let Some(module) = host.module(self.id)
        {
            host.emit(&HostEvent::ModuleStarted(module as Arc<dyn Module>));
        }
        Ok(())
    }

    fn backend_provider(&self) -> Option<Arc<dyn BackendProvider>> {
        self.provider.clone()
    }
}

impl fmt::Debug for StaticModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticModule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
