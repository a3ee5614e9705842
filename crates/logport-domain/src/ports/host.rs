//! Host Module Registry Port
//!
//! The facade runs inside a modular host whose component lifecycle it does
//! not control. This port is the narrow surface it consumes:
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`HostRegistry`] | Access to the discovery service and event subscriptions |
//! | [`DiscoveryService`] | "Which modules export namespace X?" |
//! | [`Module`] | A handle to one module, possibly a backend candidate |
//! | [`HostEvent`] | Lifecycle notifications, delivered on arbitrary threads |

use super::backend::BackendProvider;
use crate::error::Result;
use crate::value_objects::{ModuleId, ModuleState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A module installed in the host
pub trait Module: Send + Sync {
    /// Host-assigned identifier
    fn id(&self) -> ModuleId;

    /// Human-readable module name
    fn symbolic_name(&self) -> &str;

    /// Current lifecycle state
    fn state(&self) -> ModuleState;

    /// Namespaces this module exports
    fn exported_namespaces(&self) -> Vec<String>;

    /// Ask the host to start the module
    fn start(&self) -> Result<()>;

    /// The backend-provider contract exported by this module, if any
    fn backend_provider(&self) -> Option<Arc<dyn BackendProvider>>;

    /// Whether the module exports `namespace`
    fn exports(&self, namespace: &str) -> bool {
        self.exported_namespaces().iter().any(|n| n == namespace)
    }
}

impl fmt::Debug for dyn Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("id", &self.id())
            .field("symbolic_name", &self.symbolic_name())
            .field("state", &self.state())
            .finish()
    }
}

/// Host service answering package/namespace export queries
pub trait DiscoveryService: Send + Sync {
    /// Modules currently exporting `namespace`, in host enumeration order
    fn modules_exporting(&self, namespace: &str) -> Vec<Arc<dyn Module>>;
}

/// Kinds of host services the facade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// The service backing [`DiscoveryService`]
    Discovery,
}

/// Lifecycle notification emitted by the host
#[derive(Clone)]
pub enum HostEvent {
    /// A service became available
    ServiceRegistered(ServiceKind),
    /// A service went away
    ServiceUnregistered(ServiceKind),
    /// A module finished starting
    ModuleStarted(Arc<dyn Module>),
    /// A module is about to stop
    ModuleStopping(Arc<dyn Module>),
}

impl HostEvent {
    /// Whether `filter` selects this event
    pub fn matches(&self, filter: EventFilter) -> bool {
        match (self, filter) {
            (
                HostEvent::ServiceRegistered(kind) | HostEvent::ServiceUnregistered(kind),
                EventFilter::Service(wanted),
            ) => *kind == wanted,
            (HostEvent::ModuleStarted(_) | HostEvent::ModuleStopping(_), EventFilter::Modules) => {
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::ServiceRegistered(kind) => {
                f.debug_tuple("ServiceRegistered").field(kind).finish()
            }
            HostEvent::ServiceUnregistered(kind) => {
                f.debug_tuple("ServiceUnregistered").field(kind).finish()
            }
            HostEvent::ModuleStarted(module) => f
                .debug_tuple("ModuleStarted")
                .field(&module.symbolic_name())
                .finish(),
            HostEvent::ModuleStopping(module) => f
                .debug_tuple("ModuleStopping")
                .field(&module.symbolic_name())
                .finish(),
        }
    }
}

/// Which events a subscription receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFilter {
    /// Registration changes of one service kind
    Service(ServiceKind),
    /// Module start/stop events
    Modules,
}

/// Receiver of host notifications
///
/// Deliveries may happen on any thread, concurrently, and re-entrantly
/// from inside calls the listener itself made into the host.
pub trait HostListener: Send + Sync {
    /// Handle one notification
    fn on_event(&self, event: &HostEvent);
}

/// Handle returned by [`HostRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// The host module/service registry
pub trait HostRegistry: Send + Sync {
    /// The discovery service, if the host has registered it yet
    fn discovery_service(&self) -> Option<Arc<dyn DiscoveryService>>;

    /// Subscribe `listener` to events selected by `filter`
    fn subscribe(&self, filter: EventFilter, listener: Arc<dyn HostListener>) -> SubscriptionId;

    /// Cancel a subscription; unknown ids are ignored
    fn unsubscribe(&self, id: SubscriptionId);
}
