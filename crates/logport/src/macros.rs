//! Logging macros
//!
//! ```ignore
//! let log = logport::get_logger("app.db");
//! logport::info!(log, "connected to {}", url);
//! logport::warn!(log, marker: audit, "slow query: {}ms", elapsed);
//! ```
//!
//! Arguments are only formatted when the backend accepts the level.

/// Log at an explicit [`Level`](crate::Level)
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, marker: $marker:expr, $($arg:tt)+) => {
        $logger.log_marked(
            $level,
            ::core::convert::AsRef::<$crate::Marker>::as_ref(&$marker),
            ::core::format_args!($($arg)+),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::core::format_args!($($arg)+))
    };
}

/// Log at trace level
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log at debug level
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log at info level
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log at warn level
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log at error level
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}
