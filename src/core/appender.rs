//! Appender trait for log output destinations
//!
//! Appenders receive raw entries once they leave a logger's buffer, e.g. the
//! fallback sink a diagnostics session flushes to on exit.

use super::{error::Result, log_entry::LogEntry};

pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
