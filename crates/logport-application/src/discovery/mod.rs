//! Discovery Tracker
//!
//! Decides when, and which, backend module is handed to the
//! [`BindingRegistry`](crate::binding::BindingRegistry).
//!
//! ```text
//!                 start()
//! Uninitialized ──────────┬── no discovery service ──▶ Watching
//!                         │                                │ service registered
//!                         ▼                                ▼
//!                   catch-up query ◀───────────────────────┘
//!                     │        │
//!          candidate  │        │ none / all rejected
//!                     ▼        ▼
//!                   Bound ◀── Idle
//!                     │  module started
//!                     │
//!                     └── bound module stopping ──▶ Idle, then re-query
//! ```

pub mod selection;
pub mod tracker;

pub use selection::{Candidate, select_candidates};
pub use tracker::{DiscoveryOptions, DiscoveryTracker, TrackerState};
