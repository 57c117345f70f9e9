//! Console appender implementation
//!
//! Writes one line per entry to stderr. This is the default fallback sink for
//! entries still buffered when a diagnostics session ends.

use crate::core::{
    Appender, FormatterConfig, LogEntry, OutputFormat, ResolveOptions, ResolvedEntry, Result,
    TimestampFormat,
};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

pub struct ConsoleAppender {
    use_colors: bool,
    formatter: FormatterConfig,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(cfg!(feature = "console"))
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            formatter: FormatterConfig::new().with_timestamp_format(TimestampFormat::Human),
        }
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use diagnostics_logger::appenders::ConsoleAppender;
    /// use diagnostics_logger::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter.timestamp_format = Some(format);
        self
    }

    /// Replace the whole formatter configuration
    #[must_use]
    pub fn with_formatter(mut self, formatter: FormatterConfig) -> Self {
        self.formatter = formatter;
        self
    }

    /// Format as text with optional colors
    fn format_line(&self, entry: &LogEntry) -> String {
        let resolved = ResolvedEntry::from_entry(entry, ResolveOptions::PLAIN);
        let line = OutputFormat::format_text_line(&resolved, &self.formatter);

        #[cfg(feature = "console")]
        {
            if self.use_colors {
                return line.color(entry.level.color_code()).to_string();
            }
        }

        line
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.format_line(entry);
        writeln!(std::io::stderr().lock(), "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
