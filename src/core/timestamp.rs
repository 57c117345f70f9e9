//! Timestamp formatting utilities
//!
//! Two named formats cover the usual needs: a human-readable day-first form
//! and RFC 3339. Any strftime string can be used through `Custom`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// strftime pattern behind [`TimestampFormat::Human`]
pub const FORMAT_HUMAN: &str = "%d-%m-%Y %H:%M:%S %Z";

/// Timestamp format options for rendered entries
///
/// # Examples
///
/// ```
/// use diagnostics_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Human.format(&at), "08-01-2025 10:30:45 UTC");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Day-first human form: `08-01-2025 10:30:45 UTC`
    #[default]
    Human,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Human => datetime.format(FORMAT_HUMAN).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}


/// Configuration for rendering resolved entries
///
/// # Examples
///
/// ```
/// use diagnostics_logger::{FormatterConfig, TimestampFormat};
///
/// let config = FormatterConfig::new()
///     .with_timestamp_format(TimestampFormat::Rfc3339)
///     .with_level_uppercase(true);
/// ```
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Timestamp prefix format; `None` renders no timestamp
    pub timestamp_format: Option<TimestampFormat>,
    /// Whether to include log level in output
    pub include_level: bool,
    /// Whether to display log level in uppercase (ERROR vs Error)
    pub level_uppercase: bool,
    /// Whether HTML output carries the stylesheet
    pub include_stylesheet: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timestamp_format: None,
            include_level: true,
            level_uppercase: false,
            include_stylesheet: true,
        }
    }
}

impl FormatterConfig {
    /// Create a new formatter configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Drop the timestamp prefix
    #[must_use]
    pub fn without_timestamp(mut self) -> Self {
        self.timestamp_format = None;
        self
    }

    /// Set whether to include log level
    #[must_use]
    pub fn with_include_level(mut self, include: bool) -> Self {
        self.include_level = include;
        self
    }

    /// Set whether log level should be uppercase
    #[must_use]
    pub fn with_level_uppercase(mut self, uppercase: bool) -> Self {
        self.level_uppercase = uppercase;
        self
    }

    #[must_use]
    pub fn with_stylesheet(mut self, include: bool) -> Self {
        self.include_stylesheet = include;
        self
    }
}

#[cfg(test)]
mod formatter_config_tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormatterConfig::default();
        assert_eq!(config.timestamp_format, None);
        assert!(config.include_level);
        assert!(!config.level_uppercase);
        assert!(config.include_stylesheet);
    }

    #[test]
    fn test_builder_pattern() {
        let config = FormatterConfig::new()
            .with_timestamp_format(TimestampFormat::Rfc3339)
            .with_include_level(false)
            .with_level_uppercase(true)
            .with_stylesheet(false);

        assert_eq!(config.timestamp_format, Some(TimestampFormat::Rfc3339));
        assert!(!config.include_level);
        assert!(config.level_uppercase);
        assert!(!config.include_stylesheet);

        let config = config.without_timestamp();
        assert_eq!(config.timestamp_format, None);
    }
}
