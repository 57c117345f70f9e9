//! # Diagnostics Logger
//!
//! An in-process diagnostics logger: entries are buffered in memory with
//! their message templates unresolved, then drained and rendered when the
//! host decides to look at them.
//!
//! ## Features
//!
//! - **Deferred templates**: `{placeholder}` tags resolve against the entry's
//!   context at read time, optionally with HTML highlighting
//! - **Precision timing**: per-entry deltas from a monotonic clock
//! - **Named timers**: a stopwatch registry that reports misuse as warnings
//! - **Scoped sessions**: leftover entries are flushed to a fallback sink
//! - **Thread Safe**: loggers are cheap shared handles
//!
//! ## Example
//!
//! ```
//! use diagnostics_logger::prelude::*;
//!
//! let logger = Logger::builder().precision(true).build();
//! logger.info_with_context("Hello {name}", LogContext::new().with_field("name", "World"));
//!
//! let entries = logger.drain_resolved(ResolveOptions::PLAIN);
//! assert_eq!(entries[0].message, "Hello World");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender};
    pub use crate::core::{
        Appender, ContextValue, Diagnostics, DiagnosticsSession, DrainCompatible, FormatterConfig,
        LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, ManualClock, MonotonicClock, OutputFormat, ResolveOptions, ResolvedEntry,
        Result, TimeUnit, Timer, TimerValue, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, MemoryAppender};
pub use crate::core::{
    format_duration_ms, highlight, resolve_template, resolve_value, Appender, ContextValue,
    Diagnostics, DiagnosticsSession, DrainCompatible, ExceptionValue, FormatterConfig, LogContext,
    LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    ManualClock, MonotonicClock, OutputFormat, PrecisionTracker, ResolveOptions, ResolvedEntry,
    Result, SystemClock, TimeUnit, Timer, TimerState, TimerValue, TimestampFormat,
};
