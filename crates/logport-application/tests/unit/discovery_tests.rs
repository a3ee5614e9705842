//! Tests for the discovery tracker state machine

use crate::support::{TestBackend, TestHost, TestModule};
use logport_application::{BindingRegistry, DiscoveryOptions, DiscoveryTracker, TrackerState};
use logport_domain::ports::{HostEvent, HostRegistry, Module};
use logport_domain::{ModuleState, SUBSTITUTE_BACKEND_ID};
use std::sync::Arc;
use std::thread;

fn tracker_for(host: &Arc<TestHost>, options: DiscoveryOptions) -> (DiscoveryTracker, Arc<BindingRegistry>) {
    let registry = BindingRegistry::new_shared();
    let tracker = DiscoveryTracker::with_options(
        Arc::clone(host) as Arc<dyn HostRegistry>,
        Arc::clone(&registry),
        options,
    );
    (tracker, registry)
}

fn bound_to(module: &Arc<TestModule>) -> TrackerState {
    TrackerState::Bound {
        module: module.id(),
        backend: module.symbolic_name().to_string(),
    }
}

#[test]
fn test_uninitialized_until_started() {
    let host = TestHost::new();
    host.add(TestModule::backend("a", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    assert_eq!(tracker.state(), TrackerState::Uninitialized);
    assert!(!registry.is_bound());
}

#[test]
fn test_no_candidate_goes_idle_and_substitute_stays() {
    let host = TestHost::new();
    host.add(TestModule::plain("unrelated", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();

    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(registry.current().backend_id(), SUBSTITUTE_BACKEND_ID);
}

#[test]
fn test_catch_up_binds_active_candidate() {
    let host = TestHost::new();
    let module = host.add(TestModule::backend("console", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();

    assert_eq!(tracker.state(), bound_to(&module));
    assert_eq!(registry.current().backend_id(), "console");
}

#[test]
fn test_active_preferred_over_resolved() {
    let host = TestHost::new();
    let resolved = host.add(TestModule::backend("resolved", ModuleState::Resolved));
    let active = host.add(TestModule::backend("active", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();

    assert_eq!(tracker.state(), bound_to(&active));
    assert_eq!(registry.current().backend_id(), "active");
    assert_eq!(resolved.state(), ModuleState::Resolved, "must not be started");
}

#[test]
fn test_resolved_candidates_follow_enumeration_order() {
    let host = TestHost::new();
    let first = host.add(TestModule::backend("first", ModuleState::Resolved));
    let second = host.add(TestModule::backend("second", ModuleState::Resolved));
    let (tracker, _registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();

    assert_eq!(tracker.state(), bound_to(&first));
    assert_eq!(first.state(), ModuleState::Active, "resolved module is started");
    assert_eq!(second.state(), ModuleState::Resolved);
}

#[test]
fn test_start_failure_rejected_next_candidate_used() {
    let host = TestHost::new();
    let broken = host.add(TestModule::failing_start("broken"));
    let fallback = host.add(TestModule::backend("fallback", ModuleState::Resolved));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();

    assert_eq!(tracker.state(), bound_to(&fallback));
    assert_eq!(tracker.rejected(), vec![broken.id()]);
    assert_eq!(registry.current().backend_id(), "fallback");
}

#[test]
fn test_contract_violation_rejected_and_idle() {
    let host = TestHost::new();
    let bad = host.add(TestModule::with_provider(
        "bad",
        ModuleState::Active,
        Arc::new(TestBackend::new("bad").without_marker_factory()),
    ));
    let old = host.add(TestModule::with_provider(
        "old",
        ModuleState::Active,
        Arc::new(TestBackend::new("old").with_version("2.0.0")),
    ));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();

    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(tracker.rejected(), vec![bad.id(), old.id()]);
    assert!(!registry.is_bound());
}

#[test]
fn test_rejected_module_not_retried() {
    let host = TestHost::new();
    let bad = host.add(TestModule::with_provider(
        "bad",
        ModuleState::Active,
        Arc::new(TestBackend::new("bad").panicking()),
    ));
    let (tracker, _registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();
    assert_eq!(tracker.rejected(), vec![bad.id()]);

    host.emit(&logport_domain::ports::HostEvent::ModuleStarted(
        Arc::clone(&bad) as Arc<dyn Module>
    ));

    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(tracker.rejected(), vec![bad.id()]);
}

#[test]
fn test_watching_until_discovery_service_registers() {
    let host = TestHost::without_discovery();
    let module = host.add(TestModule::backend("late", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();
    assert_eq!(tracker.state(), TrackerState::Watching);
    assert!(!registry.is_bound());

    host.register_discovery();

    assert_eq!(tracker.state(), bound_to(&module));
    assert_eq!(registry.current().backend_id(), "late");
}

#[test]
fn test_module_started_while_idle_binds() {
    let host = TestHost::new();
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();
    assert_eq!(tracker.state(), TrackerState::Idle);

    let module = host.start_new(TestModule::backend("dynamic", ModuleState::Resolved));

    assert_eq!(tracker.state(), bound_to(&module));
    assert_eq!(registry.current().backend_id(), "dynamic");
}

#[test]
fn test_module_started_while_bound_is_ignored() {
    let host = TestHost::new();
    let first = host.add(TestModule::backend("first", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();

    host.start_new(TestModule::backend("second", ModuleState::Resolved));

    assert_eq!(tracker.state(), bound_to(&first));
    assert_eq!(registry.current().backend_id(), "first");
}

#[test]
fn test_bound_module_stopping_reverts_then_rebinds() {
    let host = TestHost::new();
    let active = host.add(TestModule::backend("active", ModuleState::Active));
    let standby = host.add(TestModule::backend("standby", ModuleState::Resolved));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();
    assert_eq!(tracker.state(), bound_to(&active));

    host.stop(&active);

    assert_eq!(tracker.state(), bound_to(&standby));
    assert_eq!(registry.current().backend_id(), "standby");
}

#[test]
fn test_bound_module_stopping_without_alternative_goes_idle() {
    let host = TestHost::new();
    let only = host.add(TestModule::backend("only", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();
    let bound_generation = registry.generation();

    host.stop(&only);

    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(registry.current().backend_id(), SUBSTITUTE_BACKEND_ID);
    assert!(bound_generation > 0);
    assert_eq!(registry.generation(), 0);
}

#[test]
fn test_other_module_stopping_is_ignored() {
    let host = TestHost::new();
    let active = host.add(TestModule::backend("active", ModuleState::Active));
    let other = host.add(TestModule::plain("other", ModuleState::Active));
    let (tracker, _registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();

    host.stop(&other);

    assert_eq!(tracker.state(), bound_to(&active));
}

#[test]
fn test_eager_install_off_skips_resolved() {
    let host = TestHost::new();
    let resolved = host.add(TestModule::backend("resolved", ModuleState::Resolved));
    let options = DiscoveryOptions {
        eager_install: false,
        ..Default::default()
    };
    let (tracker, registry) = tracker_for(&host, options);

    tracker.start();

    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(resolved.state(), ModuleState::Resolved);
    assert!(!registry.is_bound());
}

#[test]
fn test_dynamic_install_off_ignores_started_modules() {
    let host = TestHost::new();
    let options = DiscoveryOptions {
        dynamic_install: false,
        ..Default::default()
    };
    let (tracker, registry) = tracker_for(&host, options);
    tracker.start();

    host.start_new(TestModule::backend("late", ModuleState::Resolved));

    assert_eq!(tracker.state(), TrackerState::Idle);
    assert!(!registry.is_bound());
}

#[test]
fn test_self_module_never_selected() {
    let host = TestHost::new();
    let facade = host.add(TestModule::backend("facade", ModuleState::Active));
    let real = host.add(TestModule::backend("real", ModuleState::Resolved));
    let options = DiscoveryOptions {
        self_module: Some(facade.id()),
        ..Default::default()
    };
    let (tracker, _registry) = tracker_for(&host, options);

    tracker.start();

    assert_eq!(tracker.state(), bound_to(&real));
}

#[test]
fn test_stop_unsubscribes_and_keeps_binding() {
    let host = TestHost::new();
    let module = host.add(TestModule::backend("kept", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();
    assert_eq!(host.subscription_count(), 2);

    tracker.stop();
    host.stop(&module);

    assert!(tracker.is_stopped());
    assert_eq!(host.subscription_count(), 0);
    assert_eq!(registry.current().backend_id(), "kept");
}

#[test]
fn test_second_start_is_noop() {
    let host = TestHost::new();
    host.add(TestModule::backend("a", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();
    let generation = registry.generation();
    tracker.start();

    assert_eq!(registry.generation(), generation);
    assert_eq!(host.subscription_count(), 2);
}

#[test]
fn test_concurrent_deliveries_settle_on_one_binding() {
    let host = TestHost::new();
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();

    let starters: Vec<_> = (0..8)
        .map(|i| {
            let host = Arc::clone(&host);
            thread::spawn(move || {
                host.start_new(TestModule::backend(&format!("b{i}"), ModuleState::Resolved));
            })
        })
        .collect();
    for starter in starters {
        starter.join().unwrap();
    }

    let TrackerState::Bound { backend, .. } = tracker.state() else {
        panic!("expected a bound state, got {}", tracker.state());
    };
    assert_eq!(registry.current().backend_id(), backend);
    assert_eq!(registry.generation(), 1, "exactly one install");
}

#[test]
fn test_discovery_service_gone_while_idle_goes_watching() {
    let host = TestHost::new();
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();
    assert_eq!(tracker.state(), TrackerState::Idle);

    host.unregister_discovery();
    assert_eq!(tracker.state(), TrackerState::Watching);

    let module = host.add(TestModule::backend("returning", ModuleState::Active));
    host.register_discovery();

    assert_eq!(tracker.state(), bound_to(&module));
    assert_eq!(registry.current().backend_id(), "returning");
}

#[test]
fn test_discovery_service_gone_while_bound_keeps_binding() {
    let host = TestHost::new();
    let module = host.add(TestModule::backend("kept", ModuleState::Active));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());
    tracker.start();

    host.unregister_discovery();

    assert_eq!(tracker.state(), bound_to(&module));
    assert_eq!(registry.current().backend_id(), "kept");
}

#[test]
fn test_starting_candidate_bound_once_started() {
    let host = TestHost::new();
    let module = host.add(TestModule::backend("warming", ModuleState::Starting));
    host.add(TestModule::backend("cold", ModuleState::Resolved));
    let (tracker, registry) = tracker_for(&host, DiscoveryOptions::default());

    tracker.start();
    assert_eq!(tracker.state(), TrackerState::Idle);
    assert!(!registry.is_bound());

    module.set_state(ModuleState::Active);
    host.emit(&HostEvent::ModuleStarted(Arc::clone(&module) as Arc<dyn Module>));

    assert_eq!(tracker.state(), bound_to(&module));
    assert_eq!(registry.generation(), 1);
}

#[test]
fn test_starting_candidate_passed_over_without_dynamic_install() {
    let host = TestHost::new();
    host.add(TestModule::backend("warming", ModuleState::Starting));
    let cold = host.add(TestModule::backend("cold", ModuleState::Resolved));
    let options = DiscoveryOptions {
        dynamic_install: false,
        ..DiscoveryOptions::default()
    };
    let (tracker, registry) = tracker_for(&host, options);

    tracker.start();

    assert_eq!(tracker.state(), bound_to(&cold));
    assert_eq!(registry.current().backend_id(), "cold");
}
