//! Main logger implementation
//!
//! A `Logger` is a handle to an in-memory, insertion-ordered buffer of
//! [`LogEntry`] values. Log calls append; consumers later drain the buffer and
//! resolve each entry's template. Clones of a logger share one buffer, one
//! precision tracker and one set of metrics.

use super::{
    error::Result,
    log_context::{ExceptionValue, LogContext},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    precision::{MonotonicClock, PrecisionTracker, SystemClock, DELTA_MS_KEY, OFFSET_MS_KEY},
    template::ResolveOptions,
    timestamp::{FormatterConfig, TimestampFormat},
};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Logger settings that can be loaded from configuration files
///
/// # Example
///
/// ```
/// use diagnostics_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{ "precision": true }"#).unwrap();
/// assert!(config.precision);
/// assert!(config.record_timestamps);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Attach precision timing fields to every entry
    pub precision: bool,
    /// Stamp entries with the wall-clock time they were logged
    pub record_timestamps: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            precision: false,
            record_timestamps: true,
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A source of entries that can be merged into another logger
///
/// Implementors hand over their whole buffer in original order and keep
/// nothing behind.
pub trait DrainCompatible {
    fn drain_entries(&mut self) -> Vec<LogEntry>;
}

impl DrainCompatible for Vec<LogEntry> {
    fn drain_entries(&mut self) -> Vec<LogEntry> {
        std::mem::take(self)
    }
}

/// An entry with its message resolved, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ResolvedEntry {
    pub fn from_entry(entry: &LogEntry, options: ResolveOptions) -> Self {
        Self {
            level: entry.level,
            message: entry.resolve(options),
            context: entry.context.clone(),
            timestamp: entry.timestamp,
        }
    }

    /// Formatted milliseconds since the precision baseline, if recorded
    pub fn delta_ms(&self) -> Option<&str> {
        self.context.get(DELTA_MS_KEY).and_then(|v| v.as_str())
    }

    /// Formatted milliseconds since the previous precision entry, if recorded
    pub fn offset_ms(&self) -> Option<&str> {
        self.context.get(OFFSET_MS_KEY).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Logger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    precision: Arc<Mutex<PrecisionTracker>>,
    record_timestamps: bool,
    /// Metrics for observability (appended, drained, imported, ...)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        Self::with_config_and_clock(config, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_config_and_clock(config: LoggerConfig, clock: Arc<dyn MonotonicClock>) -> Self {
        let mut tracker = PrecisionTracker::new(clock);
        if config.precision {
            tracker.enable();
        }

        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            precision: Arc::new(Mutex::new(tracker)),
            record_timestamps: config.record_timestamps,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Turn precision timing on; an existing baseline is kept
    pub fn enable_precision(&self) {
        self.precision.lock().enable();
    }

    /// Turn precision timing on, measuring from `baseline_nanos` on the
    /// logger's clock unless a baseline is already set
    pub fn enable_precision_at(&self, baseline_nanos: u64) {
        self.precision.lock().enable_at(baseline_nanos);
    }

    /// Turn precision timing on with a fresh baseline
    pub fn restart_precision(&self) {
        self.precision.lock().restart();
    }

    pub fn disable_precision(&self) {
        self.precision.lock().disable();
    }

    pub fn is_precision_enabled(&self) -> bool {
        self.precision.lock().is_enabled()
    }

    /// The monotonic clock shared by this logger's timing features
    pub fn clock(&self) -> Arc<dyn MonotonicClock> {
        self.precision.lock().clock()
    }

    /// Log an entry at `level`, using the logger's precision setting
    pub fn entry(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        self.dispatch(level, message.into(), context, None);
    }

    /// Log an entry, overriding the precision setting for this call only
    pub fn entry_with_precision(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
        precision: bool,
    ) {
        self.dispatch(level, message.into(), context, Some(precision));
    }

    /// Log an entry at a level given by name
    ///
    /// Fails with [`LoggerError::InvalidLevel`](super::LoggerError::InvalidLevel)
    /// when the name is not one of the eight canonical levels.
    pub fn log(&self, level: &str, message: impl Into<String>, context: LogContext) -> Result<()> {
        let level = LogLevel::from_name(level)?;
        self.entry(level, message, context);
        Ok(())
    }

    /// Log an error value
    ///
    /// Without explicit `level`/`message`, both are derived from the error's
    /// own message: a `"Level: rest"` prefix naming a known level selects that
    /// level and the rest becomes the message; otherwise the level is `Error`.
    /// The error is captured into the context under `exception`.
    pub fn exception<E>(
        &self,
        error: &E,
        level: Option<LogLevel>,
        message: Option<&str>,
        mut context: LogContext,
    ) where
        E: std::error::Error + ?Sized,
    {
        let captured = ExceptionValue::capture(error);
        let (prefixed_level, rest) = split_level_prefix(&captured.message);

        let level = level.or(prefixed_level).unwrap_or(LogLevel::Error);
        let mut message = message.unwrap_or(rest).trim().to_string();

        if message.is_empty() {
            message = if captured.sources.is_empty() {
                format!("{} thrown.", captured.type_name)
            } else {
                format!(
                    "{} thrown. Caused by: {}",
                    captured.type_name,
                    captured.sources.join(" <- ")
                )
            };
        }

        context.add_exception(captured);
        self.entry(level, message, context);
    }

    fn dispatch(
        &self,
        level: LogLevel,
        message: String,
        mut context: LogContext,
        precision: Option<bool>,
    ) {
        // Held across the append so buffer order matches delta order.
        let mut tracker = self.precision.lock();
        if precision.unwrap_or_else(|| tracker.is_enabled()) {
            context.merge_missing(tracker.delta().into_context());
        }

        let entry = if self.record_timestamps {
            LogEntry::new(level, message, context)
        } else {
            LogEntry::untimed(level, message, context)
        };
        self.append(entry);
        drop(tracker);
    }

    /// Push a prepared entry onto the buffer
    pub fn append(&self, entry: LogEntry) {
        self.entries.lock().push(entry);
        self.metrics.record_appended();
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.lock().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Resolved copies of every buffered entry; the buffer is left intact
    pub fn entries(&self, options: ResolveOptions) -> Vec<ResolvedEntry> {
        self.entries
            .lock()
            .iter()
            .map(|entry| ResolvedEntry::from_entry(entry, options))
            .collect()
    }

    /// Resolved messages of every buffered entry; the buffer is left intact
    pub fn messages(&self, options: ResolveOptions) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|entry| entry.resolve(options))
            .collect()
    }

    /// Take every buffered entry, leaving the buffer empty
    pub fn drain(&self) -> Vec<LogEntry> {
        let drained = std::mem::take(&mut *self.entries.lock());
        self.metrics.record_drained(drained.len());
        drained
    }

    /// Take every buffered entry, resolved with `options`
    pub fn drain_resolved(&self, options: ResolveOptions) -> Vec<ResolvedEntry> {
        self.drain()
            .iter()
            .map(|entry| ResolvedEntry::from_entry(entry, options))
            .collect()
    }

    pub fn clear(&self) {
        let cleared = std::mem::take(&mut *self.entries.lock());
        self.metrics.record_cleared(cleared.len());
    }

    /// Merge all entries from `source`, after the ones already buffered
    pub fn import<S: DrainCompatible + ?Sized>(&self, source: &mut S) {
        let imported = source.drain_entries();
        let count = imported.len();
        self.entries.lock().extend(imported);
        self.metrics.record_imported(count);
    }

    /// Render entries as `Level: message` lines, optionally timestamped
    ///
    /// With `clean` the buffer is drained, otherwise it is left intact.
    pub fn print_entries(&self, clean: bool, timestamp: Option<TimestampFormat>) -> Vec<String> {
        let entries = if clean {
            self.drain_resolved(ResolveOptions::PLAIN)
        } else {
            self.entries(ResolveOptions::PLAIN)
        };

        let config = FormatterConfig {
            timestamp_format: timestamp,
            ..FormatterConfig::default()
        };
        entries
            .iter()
            .map(|entry| OutputFormat::format_text_line(entry, &config))
            .collect()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

/// Split a `"Level: rest"` prefix off an error message
fn split_level_prefix(message: &str) -> (Option<LogLevel>, &str) {
    if let Some((prefix, rest)) = message.split_once(':') {
        if let Ok(level) = LogLevel::from_name(prefix.trim()) {
            return (Some(level), rest);
        }
    }
    (None, message)
}

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $with_context:ident;)+) => {
        impl Logger {
            $(
                #[inline]
                pub fn $plain(&self, message: impl Into<String>) {
                    self.entry(LogLevel::$level, message, LogContext::new());
                }

                #[inline]
                pub fn $with_context(&self, message: impl Into<String>, context: LogContext) {
                    self.entry(LogLevel::$level, message, context);
                }
            )+
        }
    };
}

level_methods! {
    Debug => debug, debug_with_context;
    Info => info, info_with_context;
    Notice => notice, notice_with_context;
    Warning => warning, warning_with_context;
    Error => error, error_with_context;
    Critical => critical, critical_with_context;
    Alert => alert, alert_with_context;
    Emergency => emergency, emergency_with_context;
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl DrainCompatible for Logger {
    fn drain_entries(&mut self) -> Vec<LogEntry> {
        self.drain()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use diagnostics_logger::prelude::*;
///
/// let mut previous = Logger::new();
/// previous.info("logged before the real logger existed");
///
/// let logger = Logger::builder()
///     .precision(true)
///     .import(&mut previous)
///     .build();
///
/// assert_eq!(logger.count(), 1);
/// assert!(previous.is_empty());
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    clock: Option<Arc<dyn MonotonicClock>>,
    imported: Vec<LogEntry>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            clock: None,
            imported: Vec::new(),
        }
    }

    /// Replace the whole configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable precision timing
    #[must_use = "builder methods return a new value"]
    pub fn precision(mut self, enabled: bool) -> Self {
        self.config.precision = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn record_timestamps(mut self, enabled: bool) -> Self {
        self.config.record_timestamps = enabled;
        self
    }

    /// Use a specific monotonic clock, e.g. a `ManualClock` in tests
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn MonotonicClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Take over the entries of another logger
    #[must_use = "builder methods return a new value"]
    pub fn import<S: DrainCompatible + ?Sized>(mut self, source: &mut S) -> Self {
        self.imported.extend(source.drain_entries());
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let logger = Logger::with_config_and_clock(self.config, clock);

        let mut imported = self.imported;
        if !imported.is_empty() {
            logger.import(&mut imported);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::core::log_context::{ContextValue, EXCEPTION_KEY};
    use crate::core::precision::{ManualClock, HR_TIME_KEY};
    use std::fmt;

    #[derive(Debug)]
    struct TestError(&'static str);

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for TestError {}

    fn manual_logger(precision: bool) -> (Logger, ManualClock) {
        let clock = ManualClock::new(1);
        let logger = Logger::builder()
            .precision(precision)
            .clock(Arc::new(clock.clone()))
            .build();
        (logger, clock)
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();
        assert!(logger.is_empty());
        assert!(!logger.is_precision_enabled());
    }

    #[test]
    fn test_level_methods_use_their_level() {
        let logger = Logger::new();
        logger.debug("d");
        logger.info("i");
        logger.notice("n");
        logger.warning("w");
        logger.error("e");
        logger.critical("c");
        logger.alert("a");
        logger.emergency("em");

        let levels: Vec<LogLevel> = logger.drain().iter().map(|e| e.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_append_and_count() {
        let logger = Logger::new();
        assert_eq!(logger.count(), 0);
        logger.info("one");
        assert_eq!(logger.count(), 1);
        assert!(logger.has_entries());
        assert_eq!(logger.metrics().appended(), 1);
    }

    #[test]
    fn test_drain_empties_buffer() {
        let logger = Logger::new();
        logger.info("first");
        logger.info("second");

        let drained = logger.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].message, "second");
        assert_eq!(logger.count(), 0);
        assert!(logger.drain().is_empty());
        assert_eq!(logger.metrics().drained(), 2);
    }

    #[test]
    fn test_entries_leave_buffer_intact() {
        let logger = Logger::new();
        logger.info_with_context("Hello {name}", LogContext::new().with_field("name", "World"));

        assert_eq!(logger.messages(ResolveOptions::PLAIN), vec!["Hello World"]);
        assert_eq!(logger.entries(ResolveOptions::PLAIN)[0].message, "Hello World");
        assert_eq!(logger.count(), 1);
    }

    #[test]
    fn test_clones_share_buffer() {
        let logger = Logger::new();
        let handle = logger.clone();
        handle.warning("from clone");
        assert_eq!(logger.count(), 1);
    }

    #[test]
    fn test_clear_discards_entries() {
        let logger = Logger::new();
        logger.info("a");
        logger.info("b");
        logger.clear();
        assert!(logger.is_empty());
        assert_eq!(logger.metrics().cleared(), 2);
    }

    #[test]
    fn test_log_by_name() {
        let logger = Logger::new();
        logger.log("NOTICE", "by name", LogContext::new()).unwrap();
        assert_eq!(logger.drain()[0].level, LogLevel::Notice);

        let err = logger.log("verbose", "nope", LogContext::new()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert!(logger.is_empty());
    }

    #[test]
    fn test_import_appends_in_order() {
        let logger = Logger::new();
        logger.info("mine");

        let other = Logger::new();
        other.info("theirs 1");
        other.info("theirs 2");

        logger.import(&mut other.clone());

        let messages = logger.messages(ResolveOptions::PLAIN);
        assert_eq!(messages, vec!["mine", "theirs 1", "theirs 2"]);
        assert!(other.is_empty());
        assert_eq!(logger.metrics().imported(), 2);
    }

    #[test]
    fn test_import_from_vec() {
        let logger = Logger::new();
        let mut entries = vec![
            LogEntry::untimed(LogLevel::Debug, "a", LogContext::new()),
            LogEntry::untimed(LogLevel::Info, "b", LogContext::new()),
        ];
        logger.import(&mut entries);
        assert!(entries.is_empty());
        assert_eq!(logger.count(), 2);
    }

    #[test]
    fn test_precision_fields_attached() {
        let (logger, clock) = manual_logger(true);
        clock.advance(3_000_000);
        logger.info("first");
        clock.advance(1_000_000);
        logger.info("second");

        let entries = logger.drain_resolved(ResolveOptions::PLAIN);
        assert_eq!(entries[0].delta_ms(), Some("3.00ms"));
        assert_eq!(entries[0].offset_ms(), None);
        assert_eq!(entries[1].delta_ms(), Some("4.00ms"));
        assert_eq!(entries[1].offset_ms(), Some("1.00ms"));
        assert!(entries[1].context.contains_key(HR_TIME_KEY));
    }

    #[test]
    fn test_precision_from_explicit_baseline() {
        let (logger, clock) = manual_logger(false);
        logger.enable_precision_at(0);
        assert!(logger.is_precision_enabled());

        clock.set(3_000_000);
        logger.info("first");
        logger.enable_precision_at(2_000_000);
        clock.advance(1_000_000);
        logger.info("second");

        let entries = logger.drain_resolved(ResolveOptions::PLAIN);
        assert_eq!(entries[0].delta_ms(), Some("3.00ms"));
        assert_eq!(entries[1].delta_ms(), Some("4.00ms"));
        assert_eq!(entries[1].offset_ms(), Some("1.00ms"));
    }

    #[test]
    fn test_precision_keeps_caller_fields() {
        let (logger, clock) = manual_logger(true);
        clock.advance(2_000_000);
        logger.info_with_context(
            "custom",
            LogContext::new().with_field(DELTA_MS_KEY, "mine"),
        );

        let entries = logger.drain_resolved(ResolveOptions::PLAIN);
        assert_eq!(entries[0].delta_ms(), Some("mine"));
    }

    #[test]
    fn test_precision_override_per_call() {
        let (logger, clock) = manual_logger(false);
        logger.info("plain");
        clock.advance(10);
        logger.entry_with_precision(LogLevel::Info, "timed", LogContext::new(), true);

        let entries = logger.drain();
        assert!(!entries[0].context.contains_key(HR_TIME_KEY));
        assert!(entries[1].context.contains_key(HR_TIME_KEY));
    }

    #[test]
    fn test_without_timestamps() {
        let logger = Logger::builder().record_timestamps(false).build();
        logger.info("x");
        assert!(logger.drain()[0].timestamp.is_none());
    }

    #[test]
    fn test_exception_level_prefix() {
        let logger = Logger::new();
        logger.exception(&TestError("Critical: database unreachable"), None, None, LogContext::new());

        let entry = &logger.drain()[0];
        assert_eq!(entry.level, LogLevel::Critical);
        assert_eq!(entry.message, "database unreachable");
        assert!(matches!(
            entry.context.get(EXCEPTION_KEY),
            Some(ContextValue::Exception(_))
        ));
    }

    #[test]
    fn test_exception_without_known_prefix() {
        let logger = Logger::new();
        logger.exception(&TestError("Connection refused: 10.0.0.1"), None, None, LogContext::new());

        let entry = &logger.drain()[0];
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message, "Connection refused: 10.0.0.1");
    }

    #[test]
    fn test_exception_explicit_arguments_win() {
        let logger = Logger::new();
        logger.exception(
            &TestError("Alert: ignored"),
            Some(LogLevel::Notice),
            Some("handled {what}"),
            LogContext::new().with_field("what", "retry"),
        );

        let entry = &logger.drain()[0];
        assert_eq!(entry.level, LogLevel::Notice);
        assert_eq!(entry.to_string(), "handled retry");
    }

    #[test]
    fn test_exception_with_empty_message() {
        let logger = Logger::new();
        logger.exception(&TestError(""), None, None, LogContext::new());

        let entry = &logger.drain()[0];
        assert_eq!(entry.message, "TestError thrown.");
    }

    #[test]
    fn test_print_entries() {
        let logger = Logger::new();
        logger.warning_with_context("disk at {pct}%", LogContext::new().with_field("pct", 91));

        let lines = logger.print_entries(false, None);
        assert_eq!(lines, vec!["Warning: disk at 91%"]);
        assert_eq!(logger.count(), 1);

        let lines = logger.print_entries(true, Some(TimestampFormat::Rfc3339));
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Warning: disk at 91%"));
        assert!(logger.is_empty());
    }

    #[test]
    fn test_config_from_json() {
        let config = LoggerConfig::from_json(r#"{"precision": true, "record_timestamps": false}"#)
            .unwrap();
        assert!(config.precision);
        assert!(!config.record_timestamps);

        let err = LoggerConfig::from_json(r#"{"precison": true}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
    }
}
