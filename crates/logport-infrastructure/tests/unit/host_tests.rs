//! Tests for the in-process host

use logport_application::{BindingRegistry, DiscoveryOptions, DiscoveryTracker, TrackerState};
use logport_domain::ports::{EventFilter, HostEvent, HostListener, HostRegistry, Module, ServiceKind};
use logport_domain::{BACKEND_CONTRACT_NAMESPACE, ModuleState, SUBSTITUTE_BACKEND_ID};
use logport_infrastructure::host::{InProcessHost, ModuleDescriptor};
use logport_providers::MemoryBackend;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl HostListener for Recorder {
    fn on_event(&self, event: &HostEvent) {
        self.events.lock().unwrap().push(format!("{event:?}"));
    }
}

fn memory_module(name: &str) -> ModuleDescriptor {
    ModuleDescriptor::backend(name, Arc::new(MemoryBackend::new()))
}

#[test]
fn test_registered_backends_installed_as_resolved_modules() {
    let host = InProcessHost::with_registered_backends();
    let names: Vec<String> = host
        .modules()
        .iter()
        .map(|m| m.symbolic_name().to_string())
        .collect();

    assert!(names.contains(&"logport.backend.memory".to_string()), "{names:?}");
    assert!(names.contains(&"logport.backend.tracing".to_string()), "{names:?}");
    assert!(host.modules().iter().all(|m| m.state() == ModuleState::Resolved));
}

#[test]
fn test_discovery_lists_exporters_in_install_order() {
    let host = InProcessHost::new();
    let a = host.install_module(memory_module("a"));
    host.install_module(ModuleDescriptor::plain("plain"));
    let b = host.install_module(memory_module("b"));

    let service = host.discovery_service().expect("registered");
    let ids: Vec<_> = service
        .modules_exporting(BACKEND_CONTRACT_NAMESPACE)
        .iter()
        .map(|m| m.id())
        .collect();

    assert_eq!(ids, vec![a.id(), b.id()]);
}

#[test]
fn test_start_and_stop_notify_module_listeners() {
    let host = InProcessHost::new();
    let recorder = Arc::new(Recorder::default());
    host.subscribe(EventFilter::Modules, recorder.clone());
    let module = host.install_module(memory_module("m"));

    host.start_module(module.id()).unwrap();
    assert_eq!(module.state(), ModuleState::Active);
    host.stop_module(module.id()).unwrap();
    assert_eq!(module.state(), ModuleState::Resolved);

    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec![
            "ModuleStarted(\"m\")".to_string(),
            "ModuleStopping(\"m\")".to_string()
        ]
    );
}

#[test]
fn test_failing_start_reports_error() {
    let host = InProcessHost::new();
    let module = host.install_module(memory_module("bad").failing_start("no disk"));

    let err = host.start_module(module.id()).unwrap_err();
    assert!(err.to_string().contains("no disk"));
    assert_eq!(module.state(), ModuleState::Resolved);
}

#[test]
fn test_uninstall_removes_module() {
    let host = InProcessHost::new();
    let module = host.install_module(memory_module("gone"));
    host.start_module(module.id()).unwrap();

    host.uninstall_module(module.id()).unwrap();

    assert_eq!(module.state(), ModuleState::Uninstalled);
    assert!(host.module(module.id()).is_none());
    assert!(host.start_module(module.id()).is_err());
}

#[test]
fn test_service_registration_events() {
    let host = InProcessHost::without_discovery();
    let recorder = Arc::new(Recorder::default());
    host.subscribe(EventFilter::Service(ServiceKind::Discovery), recorder.clone());
    assert!(host.discovery_service().is_none());

    host.register_discovery_service();
    host.register_discovery_service();
    host.unregister_discovery_service();

    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec![
            "ServiceRegistered(Discovery)".to_string(),
            "ServiceUnregistered(Discovery)".to_string()
        ]
    );
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let host = InProcessHost::new();
    let recorder = Arc::new(Recorder::default());
    let id = host.subscribe(EventFilter::Modules, recorder.clone());
    host.unsubscribe(id);

    let module = host.install_module(memory_module("quiet"));
    host.start_module(module.id()).unwrap();

    assert!(recorder.events.lock().unwrap().is_empty());
    assert_eq!(host.subscription_count(), 0);
}

// ============================================================================
// End to end with the discovery tracker
// ============================================================================

fn tracker_for(
    host: &InProcessHost,
    options: DiscoveryOptions,
) -> (DiscoveryTracker, Arc<BindingRegistry>) {
    let registry = BindingRegistry::new_shared();
    let tracker = DiscoveryTracker::with_options(
        Arc::new(host.clone()) as Arc<dyn HostRegistry>,
        Arc::clone(&registry),
        options,
    );
    (tracker, registry)
}

#[test]
fn test_tracker_starts_resolved_backend_reentrantly() {
    let host = InProcessHost::new();
    let module = host.install_module(memory_module("memory"));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();

    assert_eq!(module.state(), ModuleState::Active);
    assert_eq!(registry.current().backend_id(), "memory");
    assert!(tracker.state().is_bound());
}

#[test]
fn test_tracker_follows_backend_lifecycle() {
    let host = InProcessHost::new();
    let facade = host.install_facade_module();
    let (tracker, registry) = tracker_for(
        &host,
        DiscoveryOptions {
            self_module: Some(facade.id()),
            ..Default::default()
        },
    );
    tracker.start();
    assert_eq!(tracker.state(), TrackerState::Idle);

    let module = host.install_module(memory_module("memory"));
    host.start_module(module.id()).unwrap();
    assert_eq!(registry.current().backend_id(), "memory");

    host.stop_module(module.id()).unwrap();
    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(registry.current().backend_id(), SUBSTITUTE_BACKEND_ID);
}

#[test]
fn test_tracker_waits_for_discovery_service() {
    let host = InProcessHost::without_discovery();
    host.install_module(memory_module("memory"));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();
    assert_eq!(tracker.state(), TrackerState::Watching);

    host.register_discovery_service();
    assert_eq!(registry.current().backend_id(), "memory");
}
