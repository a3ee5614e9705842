//! Domain layer constants
//!
//! Identifiers and versions shared by the binding engine, the host ports and
//! every backend implementation.

// ============================================================================
// BACKEND CONTRACT CONSTANTS
// ============================================================================

/// Namespace a module exports to advertise itself as a backend provider
pub const BACKEND_CONTRACT_NAMESPACE: &str = "logport.backend";

/// Version of the facade API backends declare compatibility against
pub const FACADE_API_VERSION: &str = "0.1.0";

/// Lowest facade version accepted by default (inclusive)
pub const DEFAULT_MIN_API_VERSION: &str = "0.1.0";

/// First facade version no longer accepted by default (exclusive)
pub const DEFAULT_MAX_API_VERSION: &str = "0.2.0";

// ============================================================================
// SUBSTITUTE BINDING CONSTANTS
// ============================================================================

/// Backend identifier reported while no real backend is bound
pub const SUBSTITUTE_BACKEND_ID: &str = "logport.substitute";

/// Generation number of the substitute binding
pub const SUBSTITUTE_GENERATION: u64 = 0;

// ============================================================================
// DIAGNOSTIC CONTEXT CONSTANTS
// ============================================================================

/// Separator used when rendering the whole diagnostic stack as one string
pub const NDC_SEPARATOR: &str = " ";
