//! Log entry structure
//!
//! An entry stores the raw message template and its context; resolution
//! happens when the entry is read. Entries are diagnostic records scoped to
//! the running process: they cannot be cloned, serialized or deserialized.

use super::error::{LoggerError, Result};
use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::template::{resolve_template, ResolveOptions};
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
    pub timestamp: Option<DateTime<Utc>>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Trims surrounding whitespace, then replaces newlines, carriage returns,
    /// and tabs with escape sequences so every entry renders as one line.
    fn sanitize_message(message: &str) -> String {
        message
            .trim()
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Placeholder message for events logged without one
    fn unknown_event_message(at: DateTime<Utc>) -> String {
        format!("Unknown log event at {}", TimestampFormat::Human.format(&at))
    }

    /// Create an entry stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>, context: LogContext) -> Self {
        Self::build(level, message.into(), context, Some(Utc::now()))
    }

    /// Create an entry with no timestamp
    pub fn untimed(level: LogLevel, message: impl Into<String>, context: LogContext) -> Self {
        Self::build(level, message.into(), context, None)
    }

    fn build(
        level: LogLevel,
        message: String,
        context: LogContext,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let mut message = Self::sanitize_message(&message);
        if message.is_empty() {
            message = Self::unknown_event_message(timestamp.unwrap_or_else(Utc::now));
        }

        Self {
            level,
            message,
            context,
            timestamp,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Resolve the message template against this entry's context
    pub fn resolve(&self, options: ResolveOptions) -> String {
        resolve_template(&self.message, &self.context, options)
    }

    /// Entries are never duplicated
    ///
    /// Always returns [`LoggerError::NotSupported`].
    pub fn try_clone(&self) -> Result<Self> {
        Err(LoggerError::not_supported("clone"))
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve(ResolveOptions::PLAIN))
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom(LoggerError::not_supported(
            "serialize",
        )))
    }
}

impl<'de> Deserialize<'de> for LogEntry {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> std::result::Result<Self, D::Error> {
        Err(serde::de::Error::custom(LoggerError::not_supported(
            "deserialize",
        )))
    }
}
