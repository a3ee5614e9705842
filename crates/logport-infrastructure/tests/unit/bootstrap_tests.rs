//! Tests for discovery bootstrap

use logport_application::TrackerState;
use logport_domain::ports::{HostRegistry, Module};
use logport_domain::{ModuleState, VersionRange};
use logport_infrastructure::config::{AppConfig, DiscoveryConfig};
use logport_infrastructure::host::{InProcessHost, ModuleDescriptor};
use logport_infrastructure::{bootstrap, bootstrap_excluding, registry_from_config};
use logport_providers::MemoryBackend;
use std::sync::Arc;

#[test]
fn test_registry_from_config_uses_range() {
    let config = AppConfig {
        discovery: DiscoveryConfig {
            max_api_version: "0.5".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    let registry = registry_from_config(&config).unwrap();
    assert_eq!(
        *registry.accepted_versions(),
        VersionRange::parse("0.1.0", "0.5.0").unwrap()
    );
}

#[test]
fn test_bootstrap_binds_registered_backend() {
    let config = AppConfig::default();
    let host = InProcessHost::new();
    host.install_module(ModuleDescriptor::backend(
        "memory",
        Arc::new(MemoryBackend::new()),
    ));
    let registry = Arc::new(registry_from_config(&config).unwrap());

    let tracker = bootstrap(
        &config,
        Arc::new(host) as Arc<dyn HostRegistry>,
        Arc::clone(&registry),
    )
    .unwrap();

    assert!(tracker.state().is_bound());
    assert_eq!(registry.current().backend_id(), "memory");
}

#[test]
fn test_bootstrap_respects_eager_install() {
    let config = AppConfig {
        discovery: DiscoveryConfig {
            eager_install: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let host = InProcessHost::with_registered_backends();
    let registry = Arc::new(registry_from_config(&config).unwrap());

    let tracker = bootstrap(&config, Arc::new(host), Arc::clone(&registry)).unwrap();

    assert_eq!(tracker.state(), TrackerState::Idle);
    assert!(!registry.is_bound());
}

#[test]
fn test_bootstrap_excluding_self_module() {
    let config = AppConfig::default();
    let host = InProcessHost::new();
    let own = host.install_module(
        ModuleDescriptor::backend("own", Arc::new(MemoryBackend::new()))
            .in_state(ModuleState::Active),
    );
    let registry = Arc::new(registry_from_config(&config).unwrap());

    let tracker = bootstrap_excluding(
        &config,
        Arc::new(host),
        Arc::clone(&registry),
        Some(own.id()),
    )
    .unwrap();

    assert_eq!(tracker.state(), TrackerState::Idle);
}
