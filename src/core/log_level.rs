//! Log level definitions
//!
//! Eight ordered severities with syslog-style numeric weights. Ordering is by
//! weight, so `LogLevel::Error > LogLevel::Warning` holds for comparisons.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    /// Detailed debug information
    Debug = 100,
    /// Interesting events, e.g. user logs in
    #[default]
    Info = 200,
    /// Normal but significant events
    Notice = 250,
    /// Exceptional occurrences that are not errors
    Warning = 300,
    /// Runtime errors that should be monitored
    Error = 400,
    /// Critical conditions, e.g. component unavailable
    Critical = 500,
    /// Action must be taken immediately
    Alert = 550,
    /// System is unusable
    Emergency = 600,
}

impl LogLevel {
    /// All levels in ascending severity
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
        LogLevel::Alert,
        LogLevel::Emergency,
    ];

    /// Look up a level by its canonical name, ignoring case
    ///
    /// # Examples
    ///
    /// ```
    /// use diagnostics_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::from_name("warning").unwrap(), LogLevel::Warning);
    /// assert!(LogLevel::from_name("warn").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self, LoggerError> {
        Self::ALL
            .into_iter()
            .find(|level| level.to_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| LoggerError::invalid_level(name))
    }

    #[inline]
    pub const fn value(&self) -> u16 {
        *self as u16
    }

    /// Title-cased display name, e.g. `Warning`
    pub const fn name(&self) -> &'static str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Notice => "Notice",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Critical => "Critical",
            LogLevel::Alert => "Alert",
            LogLevel::Emergency => "Emergency",
        }
    }

    pub const fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }

    /// Lower-cased name, used for CSS classes
    pub const fn as_lower(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Alert => "alert",
            LogLevel::Emergency => "emergency",
        }
    }

    /// True for `Error` and every level above it
    #[inline]
    pub const fn is_error_or_worse(&self) -> bool {
        self.value() >= LogLevel::Error.value()
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => BrightBlack,
            LogLevel::Info => Green,
            LogLevel::Notice => Cyan,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => BrightRed,
            LogLevel::Alert => Magenta,
            LogLevel::Emergency => BrightMagenta,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<u16> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: u16) -> Result<Self, LoggerError> {
        Self::ALL
            .into_iter()
            .find(|level| level.value() == value)
            .ok_or_else(|| LoggerError::invalid_level_value(value))
    }
}
