//! Core logger types and traits

pub mod appender;
pub mod diagnostics;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod precision;
pub mod template;
pub mod timer;
pub mod timestamp;

pub use appender::Appender;
pub use diagnostics::{Diagnostics, DiagnosticsSession};
pub use error::{LoggerError, Result};
pub use log_context::{ContextValue, ExceptionValue, LogContext, EXCEPTION_KEY};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{DrainCompatible, Logger, LoggerBuilder, LoggerConfig, ResolvedEntry};
pub use metrics::LoggerMetrics;
pub use output_format::{OutputFormat, STYLESHEET};
pub use precision::{
    format_duration_ms, ManualClock, MonotonicClock, PrecisionDelta, PrecisionTracker,
    SystemClock, DELTA_MS_KEY, HR_DELTA_KEY, HR_TIME_KEY, OFFSET_MS_KEY,
};
pub use template::{highlight, resolve_template, resolve_value, ResolveOptions};
pub use timer::{TimeUnit, Timer, TimerState, TimerValue};
pub use timestamp::{FormatterConfig, TimestampFormat, FORMAT_HUMAN};
