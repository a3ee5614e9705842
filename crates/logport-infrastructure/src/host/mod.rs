//! In-process module host
//!
//! A small, synchronous implementation of the host ports for processes that
//! have no module system of their own: modules are registered explicitly
//! (or from the link-time backend registry) and lifecycle notifications are
//! delivered on the thread that caused them.

pub mod in_process;
pub mod module;

pub use in_process::InProcessHost;
pub use module::{ModuleDescriptor, StaticModule};
