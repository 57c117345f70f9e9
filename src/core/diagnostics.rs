//! Diagnostics context and scoped sessions
//!
//! `Diagnostics` bundles the logger and timer registry that make up one
//! diagnostics context, so components receive it explicitly instead of
//! reaching for process-wide state. A `DiagnosticsSession` guarantees that
//! entries nobody drained are written to a fallback appender when the session
//! ends.

use super::{
    appender::Appender,
    error::Result,
    log_entry::LogEntry,
    logger::{Logger, ResolvedEntry},
    output_format::OutputFormat,
    template::ResolveOptions,
    timer::Timer,
    timestamp::FormatterConfig,
};
use crate::appenders::ConsoleAppender;
use std::ops::Deref;

/// One logger plus the timer registry reporting through it
///
/// Clones share both.
///
/// # Example
///
/// ```
/// use diagnostics_logger::prelude::*;
///
/// let diagnostics = Diagnostics::new();
/// diagnostics.logger().info("request received");
/// diagnostics.timer().start("request", false);
///
/// assert_eq!(diagnostics.logger().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostics {
    logger: Logger,
    timer: Timer,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::with_logger(Logger::new())
    }

    /// Build a context around an existing logger
    pub fn with_logger(logger: Logger) -> Self {
        Self {
            timer: Timer::new(logger.clone()),
            logger,
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Drain every entry and render it in `format`
    pub fn dump(&self, format: OutputFormat, config: &FormatterConfig) -> Result<String> {
        let options = match format {
            OutputFormat::Html => ResolveOptions::HIGHLIGHT,
            OutputFormat::Text | OutputFormat::Json => ResolveOptions::PLAIN,
        };
        let entries = self.logger.drain_resolved(options);
        format.render(&entries, config)
    }

    /// Drain every entry, highlighted, into an HTML dump
    pub fn dump_html(&self, config: &FormatterConfig) -> String {
        let entries: Vec<ResolvedEntry> = self.logger.drain_resolved(ResolveOptions::HIGHLIGHT);
        OutputFormat::render_html(&entries, config)
    }

    /// Open a session that flushes leftovers to `fallback` when it ends
    pub fn session(self, fallback: Box<dyn Appender>) -> DiagnosticsSession {
        DiagnosticsSession {
            diagnostics: self,
            fallback: Some(fallback),
        }
    }

    /// Open a session that flushes leftovers to stderr when it ends
    pub fn session_to_stderr(self) -> DiagnosticsSession {
        self.session(Box::new(ConsoleAppender::new()))
    }

    /// Run `f` inside a session, flushing leftovers to `fallback` afterwards
    ///
    /// The flush also happens when `f` panics.
    pub fn scope<T, F>(self, fallback: Box<dyn Appender>, f: F) -> T
    where
        F: FnOnce(&Diagnostics) -> T,
    {
        let session = self.session(fallback);
        f(&*session)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

/// A diagnostics context with guaranteed flush-on-exit
///
/// Dropping the session drains the logger and writes every remaining entry to
/// the fallback appender. Failures are reported on stderr, never raised.
///
/// # Example
///
/// ```
/// use diagnostics_logger::appenders::MemoryAppender;
/// use diagnostics_logger::prelude::*;
///
/// let sink = MemoryAppender::new();
/// {
///     let session = Diagnostics::new().session(Box::new(sink.clone()));
///     session.logger().warning("never drained");
/// }
/// assert_eq!(sink.lines(), vec!["Warning: never drained"]);
/// ```
pub struct DiagnosticsSession {
    diagnostics: Diagnostics,
    fallback: Option<Box<dyn Appender>>,
}

impl DiagnosticsSession {
    /// Write every buffered entry to the fallback appender now
    ///
    /// Returns how many entries were written. An entry the appender rejects
    /// is printed to stderr instead, and the first such error is returned
    /// once every entry has been offered.
    pub fn flush_to_fallback(&mut self) -> Result<usize> {
        let Some(fallback) = self.fallback.as_mut() else {
            return Ok(0);
        };

        let entries = self.diagnostics.logger.drain();
        if entries.is_empty() {
            return Ok(0);
        }

        let mut written = 0;
        let mut first_error = None;
        for entry in &entries {
            match fallback.append(entry) {
                Ok(()) => written += 1,
                Err(e) => {
                    eprintln!(
                        "{}: {}",
                        entry.level.name(),
                        entry.resolve(ResolveOptions::PLAIN)
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        let flushed = fallback.flush();
        self.diagnostics
            .logger
            .metrics()
            .record_fallback_flushed(written);

        match first_error {
            Some(e) => Err(e),
            None => flushed.map(|()| written),
        }
    }

    /// End the session without the fallback flush, handing back leftovers
    pub fn finish(mut self) -> Vec<LogEntry> {
        self.fallback = None;
        self.diagnostics.logger.drain()
    }
}

impl Deref for DiagnosticsSession {
    type Target = Diagnostics;

    fn deref(&self) -> &Self::Target {
        &self.diagnostics
    }
}

impl Drop for DiagnosticsSession {
    fn drop(&mut self) {
        let fallback_name = match &self.fallback {
            Some(fallback) => fallback.name().to_string(),
            None => return,
        };

        if let Err(e) = self.flush_to_fallback() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush diagnostics to '{}': {}",
                fallback_name, e
            );
        }
    }
}
