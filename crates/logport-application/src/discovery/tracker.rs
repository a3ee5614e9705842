//! Discovery tracker state machine
//!
//! Host notifications may arrive on any thread, concurrently, and
//! re-entrantly (starting a module makes the host announce that start while
//! the tracker is still inside `start()`). Every input is therefore pushed
//! onto one queue and applied by whichever thread currently owns the drain;
//! a delivery that finds the drain taken returns at once and its input is
//! applied by the owner, in arrival order.

use super::selection::{Candidate, select_candidates};
use crate::binding::registry::panic_message;
use crate::binding::{Binding, BindingRegistry};
use logport_domain::ports::{
    EventFilter, HostEvent, HostListener, HostRegistry, Module, ServiceKind, SubscriptionId,
};
use logport_domain::{BACKEND_CONTRACT_NAMESPACE, BindError, ModuleId, ModuleState};
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info, warn};

/// Tracker behaviour switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Start resolved candidates found by a query; when off only already
    /// active modules are bound by a query
    pub eager_install: bool,
    /// React to backend modules starting after the tracker started
    pub dynamic_install: bool,
    /// The facade's own module, never selected
    pub self_module: Option<ModuleId>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            eager_install: true,
            dynamic_install: true,
            self_module: None,
        }
    }
}

/// Where the tracker currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerState {
    /// `start()` not processed yet
    Uninitialized,
    /// Waiting for the host's discovery service
    Watching,
    /// No candidate bound; the substitute binding is active
    Idle,
    /// A candidate is bound
    Bound {
        /// The bound module
        module: ModuleId,
        /// Backend id of the installed binding
        backend: String,
    },
}

impl TrackerState {
    /// Whether a candidate is bound
    pub fn is_bound(&self) -> bool {
        matches!(self, TrackerState::Bound { .. })
    }
}

impl fmt::Display for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerState::Uninitialized => f.write_str("uninitialized"),
            TrackerState::Watching => f.write_str("watching"),
            TrackerState::Idle => f.write_str("idle"),
            TrackerState::Bound { module, backend } => write!(f, "bound({backend} from {module})"),
        }
    }
}

enum Input {
    Start,
    Event(HostEvent),
}

/// Watches the host and drives the binding registry
///
/// Clones share one tracker. Discovery runs as long as a clone is alive
/// and [`stop`](Self::stop) has not been called.
#[derive(Clone)]
pub struct DiscoveryTracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    host: Arc<dyn HostRegistry>,
    registry: Arc<BindingRegistry>,
    options: DiscoveryOptions,
    state: Mutex<TrackerState>,
    rejected: Mutex<Vec<ModuleId>>,
    subscriptions: Mutex<Vec<SubscriptionId>>,
    queue: Mutex<VecDeque<Input>>,
    draining: AtomicBool,
    stopped: AtomicBool,
}

/// Host-facing listener; holds the tracker weakly so the host does not keep
/// it alive
struct TrackerListener {
    inner: Weak<TrackerInner>,
}

impl HostListener for TrackerListener {
    fn on_event(&self, event: &HostEvent) {
        if let Some(inner) = self.inner.upgrade() {
            inner.submit(Input::Event(event.clone()));
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DiscoveryTracker {
    /// Create a tracker with default options
    pub fn new(host: Arc<dyn HostRegistry>, registry: Arc<BindingRegistry>) -> Self {
        Self::with_options(host, registry, DiscoveryOptions::default())
    }

    /// Create a tracker with explicit options
    pub fn with_options(
        host: Arc<dyn HostRegistry>,
        registry: Arc<BindingRegistry>,
        options: DiscoveryOptions,
    ) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                host,
                registry,
                options,
                state: Mutex::new(TrackerState::Uninitialized),
                rejected: Mutex::new(Vec::new()),
                subscriptions: Mutex::new(Vec::new()),
                queue: Mutex::new(VecDeque::new()),
                draining: AtomicBool::new(false),
                stopped: AtomicBool::new(false),
            }),
        }
    }

    /// Subscribe to the host, then run the catch-up query
    ///
    /// Subscribing first closes the window in which a module could start
    /// between the query and the subscription. Calling it again is a no-op.
    pub fn start(&self) {
        self.inner.submit(Input::Start);
    }

    /// Unsubscribe from the host
    ///
    /// The current binding is left as it is; later host events are ignored.
    pub fn stop(&self) {
        if self.inner.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        let subscriptions: Vec<SubscriptionId> = lock(&self.inner.subscriptions).drain(..).collect();
        for id in subscriptions {
            self.inner.host.unsubscribe(id);
        }
        debug!("Discovery tracker stopped");
    }

    /// Current state
    pub fn state(&self) -> TrackerState {
        lock(&self.inner.state).clone()
    }

    /// Modules rejected so far, in rejection order
    pub fn rejected(&self) -> Vec<ModuleId> {
        lock(&self.inner.rejected).clone()
    }

    /// Whether `stop()` was called
    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::Acquire)
    }

    /// Options this tracker runs with
    pub fn options(&self) -> &DiscoveryOptions {
        &self.inner.options
    }

    /// Registry this tracker drives
    pub fn registry(&self) -> &Arc<BindingRegistry> {
        &self.inner.registry
    }
}

impl fmt::Debug for DiscoveryTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryTracker")
            .field("state", &self.state())
            .field("options", &self.inner.options)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Releases the drain flag even if a transition panics
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TrackerInner {
    fn submit(self: &Arc<Self>, input: Input) {
        lock(&self.queue).push_back(input);
        self.drain();
    }

    fn drain(self: &Arc<Self>) {
        loop {
            if self
                .draining
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return;
            }
            {
                let _drain = DrainGuard(&self.draining);
                loop {
                    let next = lock(&self.queue).pop_front();
                    match next {
                        Some(input) => self.apply(input),
                        None => break,
                    }
                }
            }
            // an input may have arrived after the last pop but before release
            if lock(&self.queue).is_empty() {
                return;
            }
        }
    }

    fn apply(self: &Arc<Self>, input: Input) {
        if self.stopped.load(Ordering::Acquire) {
            return;
        }
        match input {
            Input::Start => self.on_start(),
            Input::Event(HostEvent::ServiceRegistered(ServiceKind::Discovery)) => {
                self.on_discovery_available();
            }
            Input::Event(HostEvent::ServiceUnregistered(ServiceKind::Discovery)) => {
                self.on_discovery_gone();
            }
            Input::Event(HostEvent::ModuleStarted(module)) => self.on_module_started(&module),
            Input::Event(HostEvent::ModuleStopping(module)) => self.on_module_stopping(&module),
        }
    }

    fn state(&self) -> TrackerState {
        lock(&self.state).clone()
    }

    fn set_state(&self, next: TrackerState) {
        let mut state = lock(&self.state);
        if *state != next {
            debug!(from = %state, to = %next, "Discovery tracker transition");
            *state = next;
        }
    }

    fn on_start(self: &Arc<Self>) {
        if self.state() != TrackerState::Uninitialized {
            debug!("Discovery tracker already started");
            return;
        }

        let listener: Arc<dyn HostListener> = Arc::new(TrackerListener {
            inner: Arc::downgrade(self),
        });
        let service_sub = self.host.subscribe(
            EventFilter::Service(ServiceKind::Discovery),
            Arc::clone(&listener),
        );
        let module_sub = self.host.subscribe(EventFilter::Modules, listener);
        lock(&self.subscriptions).extend([service_sub, module_sub]);

        self.rediscover(None);
    }

    fn on_discovery_available(&self) {
        match self.state() {
            TrackerState::Watching | TrackerState::Idle => self.rediscover(None),
            state => debug!(%state, "Discovery service registered, nothing to do"),
        }
    }

    fn on_discovery_gone(&self) {
        if self.state() == TrackerState::Idle {
            self.set_state(TrackerState::Watching);
        }
    }

    fn on_module_started(&self, module: &Arc<dyn Module>) {
        if !module.exports(BACKEND_CONTRACT_NAMESPACE) {
            return;
        }
        if !self.options.dynamic_install {
            debug!(module = %module.symbolic_name(), "Dynamic install disabled, ignoring started backend");
            return;
        }
        match self.state() {
            TrackerState::Idle | TrackerState::Watching => {}
            TrackerState::Bound { backend, .. } => {
                debug!(
                    module = %module.symbolic_name(),
                    bound = %backend,
                    "Backend started while another is bound, ignoring"
                );
                return;
            }
            TrackerState::Uninitialized => return,
        }
        if self.is_skipped(module.id()) {
            return;
        }
        let candidate = Candidate::new(Arc::clone(module));
        if candidate.rank().is_none() {
            return;
        }
        if !self.try_candidate(&candidate) {
            self.set_state(TrackerState::Idle);
        }
    }

    fn on_module_stopping(&self, module: &Arc<dyn Module>) {
        let stopping = module.id();
        let TrackerState::Bound { module: bound, backend } = self.state() else {
            return;
        };
        if bound != stopping {
            return;
        }
        self.registry.uninstall();
        info!(module = %module.symbolic_name(), %backend, "Bound backend module stopping");
        self.set_state(TrackerState::Idle);
        self.rediscover(Some(stopping));
    }

    /// Query the host and bind the best candidate, excluding `exclude`
    fn rediscover(&self, exclude: Option<ModuleId>) {
        let Some(service) = self.host.discovery_service() else {
            debug!("Discovery service not available yet, watching");
            self.set_state(TrackerState::Watching);
            return;
        };

        let modules = service.modules_exporting(BACKEND_CONTRACT_NAMESPACE);
        let candidates = select_candidates(modules, self.options.eager_install, |id| {
            Some(id) == exclude || self.is_skipped(id)
        });
        debug!(count = candidates.len(), "Backend candidates found");

        for candidate in &candidates {
            if candidate.state() == ModuleState::Starting {
                if self.options.dynamic_install {
                    // Bound once its ModuleStarted event is drained.
                    debug!(
                        module = %candidate.module().symbolic_name(),
                        "Backend module still starting, waiting for it"
                    );
                    self.set_state(TrackerState::Idle);
                    return;
                }
                continue;
            }
            if self.try_candidate(candidate) {
                return;
            }
        }
        self.set_state(TrackerState::Idle);
    }

    fn is_skipped(&self, id: ModuleId) -> bool {
        self.options.self_module == Some(id) || lock(&self.rejected).contains(&id)
    }

    /// Bind `candidate`, rejecting it on failure; true when bound
    fn try_candidate(&self, candidate: &Candidate) -> bool {
        let module = candidate.module();
        match self.bind(candidate) {
            Ok(binding) => {
                info!(
                    module = %module.symbolic_name(),
                    backend = %binding.backend_id(),
                    generation = binding.generation(),
                    "Backend module bound"
                );
                self.set_state(TrackerState::Bound {
                    module: module.id(),
                    backend: binding.backend_id().to_string(),
                });
                true
            }
            Err(error) => {
                warn!(module = %module.symbolic_name(), %error, "Backend candidate rejected");
                lock(&self.rejected).push(module.id());
                false
            }
        }
    }

    fn bind(&self, candidate: &Candidate) -> Result<Arc<Binding>, BindError> {
        let module = candidate.module();
        let name = module.symbolic_name().to_string();

        if candidate.state() == ModuleState::Resolved {
            debug!(module = %name, "Starting resolved backend module");
            module
                .start()
                .map_err(|e| BindError::start_failure(&name, e.to_string()))?;
        }

        let provider = panic::catch_unwind(AssertUnwindSafe(|| module.backend_provider()))
            .map_err(|payload| {
                BindError::contract_violation(
                    &name,
                    format!("provider lookup panicked: {}", panic_message(payload.as_ref())),
                )
            })?
            .ok_or_else(|| {
                BindError::contract_violation(&name, "module exports no backend provider")
            })?;

        self.registry.install(provider.as_ref())
    }
}
