//! Convenience logging macros
//!
//! Thin wrappers over the [`EmitterExt`](crate::core::EmitterExt)
//! convenience calls with `format!` interpolation. The trait must be in
//! scope at the call site (the prelude brings it in).
//!
//! ```
//! use scoped_logger::prelude::*;
//! use scoped_logger::{info, warning};
//!
//! let mut logger = MemoryLogger::new("App");
//! info!(logger, "listening on port {}", 8080).unwrap();
//! warning!(logger, "retrying ({} left)", 2).unwrap();
//! ```

/// Log an interpolated message at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log_at($level, format!($($arg)*)).map(|_| ())
    };
}

/// Log an interpolated message at trace level.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Trace, $($arg)*)
    };
}

/// Log an interpolated message at debug level.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)*)
    };
}

/// Log an interpolated message at info level.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)*)
    };
}

/// Log an interpolated message at warning level.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Warn, $($arg)*)
    };
}

/// Log an interpolated message at error level.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)*)
    };
}

/// Log an interpolated message at critical level.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::core::LogLevel::Critical, $($arg)*)
    };
}
