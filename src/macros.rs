//! Logging macros for ergonomic structured logging.
//!
//! Messages are templates, not format strings: `{placeholder}` tags are
//! resolved against the context when the entry is read. Trailing
//! `key = value` pairs become the entry's context.
//!
//! # Examples
//!
//! ```
//! use diagnostics_logger::prelude::*;
//! use diagnostics_logger::{info, warning};
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With context fields
//! let port = 8080;
//! info!(logger, "Server listening on port {port}", port = port);
//! warning!(logger, "Retry {attempt} of {max}", attempt = 3, max = 5);
//!
//! assert_eq!(
//!     logger.messages(ResolveOptions::PLAIN),
//!     vec!["Server started", "Server listening on port 8080", "Retry 3 of 5"]
//! );
//! ```

/// Build a [`LogContext`](crate::LogContext) from `key = value` or
/// `"key" => value` pairs.
///
/// # Examples
///
/// ```
/// use diagnostics_logger::context;
///
/// let ctx = context! { user = "alice", attempts = 3 };
/// assert_eq!(ctx.len(), 2);
///
/// let ctx = context! { "request.id" => "r-1" };
/// assert!(ctx.contains_key("request.id"));
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::LogContext::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {
        $crate::LogContext::new()
            $(.with_field(stringify!($key), $value))+
    };
    ($($key:literal => $value:expr),+ $(,)?) => {
        $crate::LogContext::new()
            $(.with_field($key, $value))+
    };
}

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {code}", code = 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $message:expr) => {
        $logger.entry($level, $message, $crate::LogContext::new())
    };
    ($logger:expr, $level:expr, $message:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $logger.entry($level, $message, $crate::context! { $($key = $value),+ })
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::debug;
/// debug!(logger, "Cache miss for {key}", key = "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::info;
/// info!(logger, "Processing {count} items", count = 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a notice-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::notice;
/// notice!(logger, "Configuration reloaded");
/// ```
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::warning;
/// warning!(logger, "Low disk space on {mount}", mount = "/var");
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::error;
/// error!(logger, "Error code: {code}", code = 500);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::critical;
/// critical!(logger, "Database unreachable");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an alert-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::alert;
/// alert!(logger, "Replica lag {seconds}s", seconds = 120);
/// ```
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log an emergency-level message.
///
/// # Examples
///
/// ```
/// # use diagnostics_logger::prelude::*;
/// # let logger = Logger::new();
/// use diagnostics_logger::emergency;
/// emergency!(logger, "Unable to recover from error: {reason}", reason = "disk full");
/// ```
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, Logger, ResolveOptions};

    #[test]
    fn test_log_macro() {
        let logger = Logger::new();
        log!(logger, LogLevel::Info, "Test message");
        log!(logger, LogLevel::Info, "Value: {value}", value = 42);

        assert_eq!(
            logger.messages(ResolveOptions::PLAIN),
            vec!["Test message", "Value: 42"]
        );
    }

    #[test]
    fn test_level_macros() {
        let logger = Logger::new();
        debug!(logger, "d");
        info!(logger, "i");
        notice!(logger, "n");
        warning!(logger, "w");
        error!(logger, "e");
        critical!(logger, "c");
        alert!(logger, "a");
        emergency!(logger, "em");

        let levels: Vec<LogLevel> = logger.drain().iter().map(|e| e.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_level_macro_with_context() {
        let logger = Logger::new();
        error!(logger, "Failed to open {path}: {reason}", path = "/tmp/x", reason = "denied");

        let entry = &logger.drain()[0];
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message, "Failed to open {path}: {reason}");
        assert_eq!(entry.to_string(), "Failed to open /tmp/x: denied");
    }

    #[test]
    fn test_context_macro() {
        let empty = context!();
        assert!(empty.is_empty());

        let ctx = context! { a = 1, b = true };
        let keys: Vec<&str> = ctx.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);

        let ctx = context! { "precision.deltaMs" => "1.00ms" };
        assert!(ctx.contains_key("precision.deltaMs"));
    }
}
