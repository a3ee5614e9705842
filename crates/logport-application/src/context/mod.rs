//! Diagnostic Context Store
//!
//! Per-thread nested context ([`ndc`]) and key/value context ([`mdc`]).
//! Storage lives in thread-locals owned by the calling thread and is never
//! consulted by the binding registry, so a backend swap leaves it intact.
//!
//! Sharing context with another thread is always explicit:
//!
//! ```ignore
//! let snapshot = ndc::clone_stack();
//! std::thread::spawn(move || {
//!     ndc::inherit(&snapshot);
//!     // ...
//! });
//! ```

pub mod adapter;
pub mod map;
pub mod mdc;
pub mod ndc;
pub mod stack;
mod store;

pub use adapter::ThreadContextAdapter;
pub use map::DiagnosticMap;
pub use stack::DiagnosticStack;
pub use store::live_context_stores;
