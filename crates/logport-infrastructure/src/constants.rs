//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Contract constants are defined in `logport_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "logport.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "logport";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "LOGPORT";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable holding a filter that overrides the configured level
pub const LOG_FILTER_ENV: &str = "LOGPORT_LOG";

/// Default diagnostic log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix of the rolling diagnostic log
pub const LOG_FILE_PREFIX: &str = "logport";

// ============================================================================
// HOST CONSTANTS
// ============================================================================

/// Symbolic name of the module representing the facade itself
pub const FACADE_MODULE_NAME: &str = "logport";

/// Prefix of the symbolic names given to link-time registered backends
pub const BACKEND_MODULE_PREFIX: &str = "logport.backend.";
