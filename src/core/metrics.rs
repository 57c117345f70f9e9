//! Logger metrics for observability
//!
//! Counters describing how entries move through a logger's buffer: appended,
//! drained, imported from other loggers, discarded by `clear`, and flushed to
//! a fallback sink when a diagnostics session ends with entries still pending.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use diagnostics_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_appended();
/// metrics.record_drained(1);
///
/// assert_eq!(metrics.appended(), 1);
/// assert_eq!(metrics.drained(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries pushed into the buffer by log calls
    appended: AtomicU64,

    /// Entries handed out by drain operations
    drained: AtomicU64,

    /// Entries merged in from another logger
    imported: AtomicU64,

    /// Entries discarded by `clear`
    cleared: AtomicU64,

    /// Entries written to a fallback sink on session exit
    fallback_flushed: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            appended: AtomicU64::new(0),
            drained: AtomicU64::new(0),
            imported: AtomicU64::new(0),
            cleared: AtomicU64::new(0),
            fallback_flushed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn appended(&self) -> u64 {
        self.appended.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn drained(&self) -> u64 {
        self.drained.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn imported(&self) -> u64 {
        self.imported.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cleared(&self) -> u64 {
        self.cleared.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fallback_flushed(&self) -> u64 {
        self.fallback_flushed.load(Ordering::Relaxed)
    }

    /// Record one appended entry, returning the previous count
    #[inline]
    pub fn record_appended(&self) -> u64 {
        self.appended.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_drained(&self, count: usize) -> u64 {
        self.drained.fetch_add(count as u64, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_imported(&self, count: usize) -> u64 {
        self.imported.fetch_add(count as u64, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_cleared(&self, count: usize) -> u64 {
        self.cleared.fetch_add(count as u64, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fallback_flushed(&self, count: usize) -> u64 {
        self.fallback_flushed.fetch_add(count as u64, Ordering::Relaxed)
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            appended: AtomicU64::new(self.appended()),
            drained: AtomicU64::new(self.drained()),
            imported: AtomicU64::new(self.imported()),
            cleared: AtomicU64::new(self.cleared()),
            fallback_flushed: AtomicU64::new(self.fallback_flushed()),
        }
    }
}
