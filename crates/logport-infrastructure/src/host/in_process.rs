//! Synchronous in-process host
//!
//! Modules and subscriptions live in concurrent maps. Enumeration follows
//! installation order (module ids are handed out increasing), and listeners
//! are called in subscription order, outside of any internal lock, so they
//! may call back into the host.

use super::module::{ModuleDescriptor, StaticModule};
use crate::constants::{BACKEND_MODULE_PREFIX, FACADE_MODULE_NAME};
use dashmap::DashMap;
use logport_application::registry::{BACKEND_PROVIDERS, BackendProviderConfig};
use logport_domain::error::{Error, Result};
use logport_domain::ports::{
    DiscoveryService, EventFilter, HostEvent, HostListener, HostRegistry, Module, ServiceKind,
    SubscriptionId,
};
use logport_domain::{ModuleId, ModuleState};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Shared state behind [`InProcessHost`]; also the discovery service
pub(crate) struct HostCore {
    modules: DashMap<ModuleId, Arc<StaticModule>>,
    listeners: DashMap<SubscriptionId, (EventFilter, Arc<dyn HostListener>)>,
    discovery_registered: AtomicBool,
    next_module: AtomicU64,
    next_subscription: AtomicU64,
}

impl HostCore {
    pub(crate) fn module(&self, id: ModuleId) -> Option<Arc<StaticModule>> {
        self.modules.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    fn modules_in_order(&self) -> Vec<Arc<StaticModule>> {
        let mut modules: Vec<Arc<StaticModule>> =
            self.modules.iter().map(|e| Arc::clone(e.value())).collect();
        modules.sort_by_key(|m| m.id());
        modules
    }

    /// Deliver `event` to every matching listener on the calling thread
    pub(crate) fn emit(&self, event: &HostEvent) {
        let mut targets: Vec<(SubscriptionId, Arc<dyn HostListener>)> = self
            .listeners
            .iter()
            .filter(|entry| event.matches(entry.value().0))
            .map(|entry| (*entry.key(), Arc::clone(&entry.value().1)))
            .collect();
        targets.sort_by_key(|(id, _)| id.0);

        debug!(?event, listeners = targets.len(), "Delivering host event");
        for (_, listener) in targets {
            listener.on_event(event);
        }
    }
}

impl DiscoveryService for HostCore {
    fn modules_exporting(&self, namespace: &str) -> Vec<Arc<dyn Module>> {
        self.modules_in_order()
            .into_iter()
            .filter(|m| m.exports(namespace))
            .map(|m| m as Arc<dyn Module>)
            .collect()
    }
}

/// Host registry for processes without a module system
#[derive(Clone)]
pub struct InProcessHost {
    core: Arc<HostCore>,
}

impl Default for InProcessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InProcessHost {
    /// Empty host with the discovery service registered
    pub fn new() -> Self {
        let host = Self::without_discovery();
        host.core.discovery_registered.store(true, Ordering::Release);
        host
    }

    /// Empty host whose discovery service is not registered yet
    pub fn without_discovery() -> Self {
        Self {
            core: Arc::new(HostCore {
                modules: DashMap::new(),
                listeners: DashMap::new(),
                discovery_registered: AtomicBool::new(false),
                next_module: AtomicU64::new(1),
                next_subscription: AtomicU64::new(1),
            }),
        }
    }

    /// Host with every link-time registered backend installed as a
    /// resolved module, in registry order
    pub fn with_registered_backends() -> Self {
        let host = Self::new();
        host.install_registered_backends();
        host
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Install a module for every link-time registered backend
    ///
    /// Backends whose factory fails are skipped with a warning.
    pub fn install_registered_backends(&self) -> Vec<Arc<StaticModule>> {
        let mut installed = Vec::new();
        for entry in BACKEND_PROVIDERS {
            match (entry.factory)(&BackendProviderConfig::new(entry.name)) {
                Ok(provider) => {
                    let name = format!("{BACKEND_MODULE_PREFIX}{}", entry.name);
                    installed.push(self.install_module(ModuleDescriptor::backend(name, provider)));
                }
                Err(error) => {
                    warn!(backend = entry.name, %error, "Registered backend could not be created");
                }
            }
        }
        installed
    }

    /// Install the module representing the facade itself, already active
    pub fn install_facade_module(&self) -> Arc<StaticModule> {
        self.install_module(
            ModuleDescriptor::plain(FACADE_MODULE_NAME).in_state(ModuleState::Active),
        )
    }

    /// Install a module; no notification is sent
    pub fn install_module(&self, descriptor: ModuleDescriptor) -> Arc<StaticModule> {
        let id = ModuleId(self.core.next_module.fetch_add(1, Ordering::AcqRel));
        let module = Arc::new(StaticModule::new(id, descriptor, Arc::downgrade(&self.core)));
        self.core.modules.insert(id, Arc::clone(&module));
        debug!(module = %module.symbolic_name(), %id, "Module installed");
        module
    }

    /// Start a module and announce it
    pub fn start_module(&self, id: ModuleId) -> Result<()> {
        self.require(id)?.start()
    }

    /// Announce that a module is stopping, then stop it
    pub fn stop_module(&self, id: ModuleId) -> Result<()> {
        self.require(id)?.stop();
        Ok(())
    }

    /// Stop (if needed) and remove a module
    pub fn uninstall_module(&self, id: ModuleId) -> Result<()> {
        let module = self.require(id)?;
        module.stop();
        self.core.modules.remove(&id);
        module.set_state(ModuleState::Uninstalled);
        debug!(module = %module.symbolic_name(), %id, "Module uninstalled");
        Ok(())
    }

    /// Installed module by id
    pub fn module(&self, id: ModuleId) -> Option<Arc<StaticModule>> {
        self.core.module(id)
    }

    /// Every installed module, in installation order
    pub fn modules(&self) -> Vec<Arc<StaticModule>> {
        self.core.modules_in_order()
    }

    /// Make the discovery service available and announce it
    pub fn register_discovery_service(&self) {
        if !self.core.discovery_registered.swap(true, Ordering::AcqRel) {
            info!("Discovery service registered");
            self.core
                .emit(&HostEvent::ServiceRegistered(ServiceKind::Discovery));
        }
    }

    /// Withdraw the discovery service and announce it
    pub fn unregister_discovery_service(&self) {
        if self.core.discovery_registered.swap(false, Ordering::AcqRel) {
            info!("Discovery service unregistered");
            self.core
                .emit(&HostEvent::ServiceUnregistered(ServiceKind::Discovery));
        }
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.core.listeners.len()
    }

    fn require(&self, id: ModuleId) -> Result<Arc<StaticModule>> {
        self.core
            .module(id)
            .ok_or_else(|| Error::not_found(format!("module {id}")))
    }
}

impl HostRegistry for InProcessHost {
    fn discovery_service(&self) -> Option<Arc<dyn DiscoveryService>> {
        if self.core.discovery_registered.load(Ordering::Acquire) {
            Some(Arc::clone(&self.core) as Arc<dyn DiscoveryService>)
        } else {
            None
        }
    }

    fn subscribe(&self, filter: EventFilter, listener: Arc<dyn HostListener>) -> SubscriptionId {
        let id = SubscriptionId(self.core.next_subscription.fetch_add(1, Ordering::AcqRel));
        self.core.listeners.insert(id, (filter, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.core.listeners.remove(&id);
    }
}

impl fmt::Debug for InProcessHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InProcessHost")
            .field("modules", &self.core.modules.len())
            .field("subscriptions", &self.core.listeners.len())
            .field(
                "discovery_registered",
                &self.core.discovery_registered.load(Ordering::Acquire),
            )
            .finish()
    }
}
