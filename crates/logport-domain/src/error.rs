//! Error handling types
//!
//! Two layers of errors live here:
//!
//! - [`BindError`] - why a backend candidate could not become the active
//!   binding. Always local-recoverable: the caller falls back to the
//!   substitute binding or moves on to the next candidate.
//! - [`Error`] - the crate-wide error used by configuration, bootstrap and
//!   host plumbing. Wraps `BindError` so `?` works across both.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a candidate backend is rejected by the binding registry
#[derive(Error, Debug)]
pub enum BindError {
    /// The candidate does not expose one of the required factory operations
    #[error("Backend '{backend}' violates the provider contract: {reason}")]
    ProviderContractViolation {
        /// Identifier of the offending backend
        backend: String,
        /// What was missing or failed
        reason: String,
    },

    /// The candidate declares a facade version outside the accepted range
    #[error("Backend '{backend}' requests facade version {requested}, accepted range is {accepted}")]
    IncompatibleVersion {
        /// Identifier of the offending backend
        backend: String,
        /// Version string the backend was built against
        requested: String,
        /// Human-readable accepted range
        accepted: String,
    },

    /// The candidate's module could not be started
    #[error("Module '{module}' could not be started: {message}")]
    CandidateStartFailure {
        /// Symbolic name of the module
        module: String,
        /// Failure description reported by the host
        message: String,
    },
}

impl BindError {
    /// Create a provider contract violation
    pub fn contract_violation<B: Into<String>, R: Into<String>>(backend: B, reason: R) -> Self {
        Self::ProviderContractViolation {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    /// Create an incompatible version error
    pub fn incompatible_version<B, R, A>(backend: B, requested: R, accepted: A) -> Self
    where
        B: Into<String>,
        R: Into<String>,
        A: Into<String>,
    {
        Self::IncompatibleVersion {
            backend: backend.into(),
            requested: requested.into(),
            accepted: accepted.into(),
        }
    }

    /// Create a candidate start failure
    pub fn start_failure<M: Into<String>, S: Into<String>>(module: M, message: S) -> Self {
        Self::CandidateStartFailure {
            module: module.into(),
            message: message.into(),
        }
    }
}

/// Main error type for logport
#[derive(Error, Debug)]
pub enum Error {
    /// A backend could not be bound
    #[error("Binding error: {0}")]
    Bind(#[from] BindError),

    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A version string could not be parsed
    #[error("Invalid version '{input}': {message}")]
    InvalidVersion {
        /// The rejected input
        input: String,
        /// Why it was rejected
        message: String,
    },

    /// Host module system error
    #[error("Host error: {message}")]
    Host {
        /// Description of the host error
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error (without source)
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version<I: Into<String>, S: Into<String>>(input: I, message: S) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a host error
    pub fn host<S: Into<String>>(message: S) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }
}
