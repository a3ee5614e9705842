//! logport - Entry Point
//!
//! Inspection tool for the logport facade.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `logport backends` | List backends registered at link time |
//! | `logport probe` | Run discovery on an in-process host and print the binding as JSON |

// Force-link logport-providers to ensure linkme inventory registrations are included
extern crate logport_providers;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use logport::Facade;
use logport::application::{
    BackendProviderConfig, BindingRegistry, DiscoveryTracker, TrackerState,
    list_backend_providers, resolve_backend_provider,
};
use logport::domain::ports::Module;
use logport::infrastructure::constants::BACKEND_MODULE_PREFIX;
use logport::infrastructure::{
    ConfigLoader, InProcessHost, ModuleDescriptor, init_logging, registry_from_config,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Command line interface for logport
#[derive(Parser, Debug)]
#[command(name = "logport")]
#[command(about = "logport - pluggable logging facade inspection tool")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List backends registered at link time
    Backends {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run backend discovery against an in-process host
    Probe {
        /// Install only these backends (default: every registered backend)
        #[arg(short, long = "backend")]
        backends: Vec<String>,

        /// Stop the bound backend's module afterwards and report again
        #[arg(long)]
        stop_bound: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Backends { json } => print_backends(json),
        Command::Probe {
            backends,
            stop_bound,
        } => probe(cli.config, &backends, stop_bound),
    }
}

fn print_backends(as_json: bool) -> anyhow::Result<()> {
    let backends = list_backend_providers();
    if as_json {
        let entries: Vec<_> = backends
            .iter()
            .map(|(name, description)| json!({ "name": name, "description": description }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (name, description) in backends {
            println!("{name:<12} {description}");
        }
    }
    Ok(())
}

fn probe(config_path: Option<PathBuf>, backends: &[String], stop_bound: bool) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("failed to load configuration")?;
    init_logging(config.logging.clone())?;

    let host = InProcessHost::new();
    if backends.is_empty() {
        host.install_registered_backends();
    } else {
        for name in backends {
            let provider = resolve_backend_provider(&BackendProviderConfig::new(name.as_str()))
                .map_err(|e| anyhow!(e))?;
            host.install_module(ModuleDescriptor::backend(
                format!("{BACKEND_MODULE_PREFIX}{name}"),
                provider,
            ));
        }
    }
    let facade_module = host.install_facade_module();

    let registry: Arc<BindingRegistry> = Arc::new(registry_from_config(&config)?);
    let facade = Facade::new(registry);
    let tracker = facade.start_discovery(
        &config,
        Arc::new(host.clone()),
        Some(facade_module.id()),
    )?;
    let probe_log = facade.get_logger("logport.probe");
    logport::info!(probe_log, "probe finished discovery: {}", tracker.state());

    let mut report = json!({ "bound": report_for(&facade, &host, &tracker) });
    if stop_bound {
        if let TrackerState::Bound { module, .. } = tracker.state() {
            host.stop_module(module)?;
        }
        report["after_stop"] = report_for(&facade, &host, &tracker);
    }
    facade.stop_discovery();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn report_for(
    facade: &Facade,
    host: &InProcessHost,
    tracker: &DiscoveryTracker,
) -> serde_json::Value {
    let modules: Vec<_> = host
        .modules()
        .iter()
        .map(|module| {
            json!({
                "id": module.id(),
                "name": module.symbolic_name(),
                "state": module.state(),
            })
        })
        .collect();
    json!({
        "binding": facade.summary(),
        "modules": modules,
        "rejected": tracker.rejected(),
    })
}
