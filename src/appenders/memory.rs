//! In-memory appender implementation
//!
//! Collects rendered lines in a shared vector. Useful as a fallback sink when
//! the host wants to inspect what a session flushed.

use crate::core::{
    Appender, FormatterConfig, LogEntry, OutputFormat, ResolveOptions, ResolvedEntry, Result,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Appender storing plain-text lines
///
/// Clones share the same line buffer, so a clone kept by the caller sees
/// everything appended through the boxed original.
///
/// # Example
///
/// ```
/// use diagnostics_logger::appenders::MemoryAppender;
/// use diagnostics_logger::prelude::*;
///
/// let sink = MemoryAppender::new();
/// let mut boxed = sink.clone();
/// boxed
///     .append(&LogEntry::untimed(LogLevel::Info, "hello", LogContext::new()))
///     .unwrap();
///
/// assert_eq!(sink.lines(), vec!["Info: hello"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
    formatter: FormatterConfig,
    flushes: Arc<Mutex<usize>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Snapshot of every line appended so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Number of times `flush` was called
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let resolved = ResolvedEntry::from_entry(entry, ResolveOptions::PLAIN);
        let line = OutputFormat::format_text_line(&resolved, &self.formatter);
        self.lines.lock().push(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        *self.flushes.lock() += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogContext, LogLevel, TimestampFormat};

    #[test]
    fn test_clones_share_lines() {
        let sink = MemoryAppender::new();
        let mut writer = sink.clone();

        writer
            .append(&LogEntry::untimed(LogLevel::Error, "a", LogContext::new()))
            .unwrap();
        writer
            .append(&LogEntry::untimed(LogLevel::Debug, "b", LogContext::new()))
            .unwrap();
        writer.flush().unwrap();

        assert_eq!(sink.lines(), vec!["Error: a", "Debug: b"]);
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn test_formatter_applies() {
        let mut sink = MemoryAppender::new()
            .with_formatter(FormatterConfig::new().with_timestamp_format(TimestampFormat::Rfc3339));
        sink.append(&LogEntry::new(LogLevel::Info, "x", LogContext::new()))
            .unwrap();

        let line = &sink.lines()[0];
        assert!(line.starts_with('['));
        assert!(line.ends_with("] Info: x"));
    }
}
