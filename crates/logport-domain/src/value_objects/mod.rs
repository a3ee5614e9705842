//! Value objects
//!
//! Immutable (or internally synchronized) types shared across layers.

pub mod level;
pub mod marker;
pub mod module;
pub mod record;
pub mod version;

pub use level::Level;
pub use marker::{Marker, MarkerHandle};
pub use module::{ModuleId, ModuleState};
pub use record::Record;
pub use version::{FacadeVersion, VersionRange};
