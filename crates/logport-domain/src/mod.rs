//! # logport domain
//!
//! Core types of the logport facade: the backend-provider contract, the
//! host module registry ports, value objects and errors. This crate has no
//! behavior of its own beyond small value-type logic.
//!
//! - `constants` - contract namespace, facade version, substitute identifiers
//! - `error` - `Error`, `BindError` and the `Result` alias
//! - `ports` - traits implemented by backends and by the host
//! - `value_objects` - levels, markers, records, versions, module state

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use constants::*;
pub use error::{BindError, Error, Result};
pub use value_objects::{
    FacadeVersion, Level, Marker, MarkerHandle, ModuleId, ModuleState, Record, VersionRange,
};
