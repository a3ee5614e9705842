//! Discovery bootstrap
//!
//! Wires configuration, a host and a binding registry into a running
//! discovery tracker.

use crate::config::AppConfig;
use logport_application::{BindingRegistry, DiscoveryTracker};
use logport_domain::ModuleId;
use logport_domain::error::Result;
use logport_domain::ports::HostRegistry;
use std::sync::Arc;
use tracing::{info, warn};

/// Binding registry accepting the configured facade versions
pub fn registry_from_config(config: &AppConfig) -> Result<BindingRegistry> {
    Ok(BindingRegistry::with_accepted_versions(
        config.discovery.accepted_versions()?,
    ))
}

/// Create and start a discovery tracker for `registry`
pub fn bootstrap(
    config: &AppConfig,
    host: Arc<dyn HostRegistry>,
    registry: Arc<BindingRegistry>,
) -> Result<DiscoveryTracker> {
    bootstrap_excluding(config, host, registry, None)
}

/// Like [`bootstrap`], never selecting `self_module`
pub fn bootstrap_excluding(
    config: &AppConfig,
    host: Arc<dyn HostRegistry>,
    registry: Arc<BindingRegistry>,
    self_module: Option<ModuleId>,
) -> Result<DiscoveryTracker> {
    let configured = config.discovery.accepted_versions()?;
    if *registry.accepted_versions() != configured {
        warn!(
            registry = %registry.accepted_versions(),
            configured = %configured,
            "Registry accepts a different version range than configured"
        );
    }

    let tracker =
        DiscoveryTracker::with_options(host, registry, config.discovery.options(self_module));
    tracker.start();

    info!(
        state = %tracker.state(),
        backend = %tracker.registry().current().backend_id(),
        "Backend discovery started"
    );
    Ok(tracker)
}
