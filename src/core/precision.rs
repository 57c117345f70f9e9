//! Precision timing for log entries
//!
//! When precision mode is on, every entry gets context fields describing how
//! long after the baseline it was logged, and how long after the previous
//! precision-enabled entry. Durations come from a monotonic nanosecond clock.

use super::log_context::LogContext;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Current monotonic instant in nanoseconds
pub const HR_TIME_KEY: &str = "precision.hrTime";
/// Nanoseconds since the baseline
pub const HR_DELTA_KEY: &str = "precision.hrDelta";
/// Formatted milliseconds since the baseline
pub const DELTA_MS_KEY: &str = "precision.deltaMs";
/// Formatted milliseconds since the previous precision entry
pub const OFFSET_MS_KEY: &str = "precision.offsetMs";

/// Source of monotonic nanosecond readings
pub trait MonotonicClock: Send + Sync {
    fn now_nanos(&self) -> u64;
}

/// Clock backed by [`Instant`], anchored at its first use in the process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl MonotonicClock for SystemClock {
    fn now_nanos(&self) -> u64 {
        static ANCHOR: OnceLock<Instant> = OnceLock::new();
        let anchor = ANCHOR.get_or_init(Instant::now);
        // Offset by one so the anchor itself never reads as zero.
        u64::try_from(anchor.elapsed().as_nanos())
            .unwrap_or(u64::MAX)
            .saturating_add(1)
    }
}

/// Hand-driven clock for deterministic timing
///
/// Clones share the same reading.
///
/// # Examples
///
/// ```
/// use diagnostics_logger::{ManualClock, MonotonicClock};
///
/// let clock = ManualClock::new(1_000);
/// clock.advance(500);
/// assert_eq!(clock.now_nanos(), 1_500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_nanos: u64) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(start_nanos)),
        }
    }

    pub fn advance(&self, nanos: u64) {
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    pub fn set(&self, nanos: u64) {
        self.nanos.store(nanos, Ordering::SeqCst);
    }
}

impl MonotonicClock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

/// Timing fields computed for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionDelta {
    pub hr_time: u64,
    pub hr_delta: u64,
    pub delta_ms: Option<String>,
    pub offset_ms: Option<String>,
}

impl PrecisionDelta {
    /// Convert into context fields; null durations produce no field
    pub fn into_context(self) -> LogContext {
        let mut context = LogContext::new()
            .with_field(HR_TIME_KEY, self.hr_time)
            .with_field(HR_DELTA_KEY, self.hr_delta);
        if let Some(delta) = self.delta_ms {
            context.add_field(DELTA_MS_KEY, delta);
        }
        if let Some(offset) = self.offset_ms {
            context.add_field(OFFSET_MS_KEY, offset);
        }
        context
    }
}

/// Baseline and previous-entry instants for one logger
pub struct PrecisionTracker {
    clock: Arc<dyn MonotonicClock>,
    enabled: bool,
    baseline: Option<u64>,
    previous: Option<u64>,
}

impl PrecisionTracker {
    pub fn new(clock: Arc<dyn MonotonicClock>) -> Self {
        Self {
            clock,
            enabled: false,
            baseline: None,
            previous: None,
        }
    }

    /// Turn precision mode on, setting the baseline only if it is unset
    pub fn enable(&mut self) {
        self.enabled = true;
        if self.baseline.is_none() {
            self.baseline = Some(self.clock.now_nanos());
        }
    }

    /// Turn precision mode on with an explicit baseline, if none is set yet
    pub fn enable_at(&mut self, baseline_nanos: u64) {
        self.enabled = true;
        if self.baseline.is_none() {
            self.baseline = Some(baseline_nanos);
        }
    }

    /// Re-enable from scratch: new baseline, no previous entry
    pub fn restart(&mut self) {
        self.enabled = true;
        self.baseline = Some(self.clock.now_nanos());
        self.previous = None;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn baseline(&self) -> Option<u64> {
        self.baseline
    }

    pub fn clock(&self) -> Arc<dyn MonotonicClock> {
        Arc::clone(&self.clock)
    }

    /// Measure now against the baseline and the previous entry
    ///
    /// Sets the baseline lazily when it is missing, and records now as the
    /// previous entry instant.
    pub fn delta(&mut self) -> PrecisionDelta {
        let now = self.clock.now_nanos();
        let baseline = *self.baseline.get_or_insert(now);
        let hr_delta = now.saturating_sub(baseline);
        let offset = self.previous.map(|previous| now.saturating_sub(previous));

        self.previous = Some(now);

        PrecisionDelta {
            hr_time: now,
            hr_delta,
            delta_ms: format_duration_ms(Some(hr_delta)),
            offset_ms: format_duration_ms(offset),
        }
    }
}

impl std::fmt::Debug for PrecisionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecisionTracker")
            .field("enabled", &self.enabled)
            .field("baseline", &self.baseline)
            .field("previous", &self.previous)
            .finish()
    }
}

const NANOS_PER_MILLI: f64 = 1_000_000.0;
const BASE_DECIMALS: usize = 2;
const MAX_DECIMALS: usize = 4;

/// Format a nanosecond duration as milliseconds, e.g. `12.34ms`
///
/// Durations of a millisecond or more use two decimals. Shorter ones get one
/// extra decimal per leading zero after the point, capped at four, so
/// `0.0042ms` does not collapse to `0.00ms`. The number is
/// left-padded with zeros to at least four characters. A missing or zero
/// duration yields `None`.
///
/// # Examples
///
/// ```
/// use diagnostics_logger::format_duration_ms;
///
/// assert_eq!(format_duration_ms(Some(12_345_678)).as_deref(), Some("12.35ms"));
/// assert_eq!(format_duration_ms(Some(4_200)).as_deref(), Some("0.0042ms"));
/// assert_eq!(format_duration_ms(Some(0)), None);
/// ```
pub fn format_duration_ms(nanos: Option<u64>) -> Option<String> {
    let nanos = nanos.filter(|n| *n > 0)?;
    let millis = nanos as f64 / NANOS_PER_MILLI;

    let decimals = if millis >= 1.0 {
        BASE_DECIMALS
    } else {
        (BASE_DECIMALS + leading_fraction_zeros(nanos)).min(MAX_DECIMALS)
    };

    Some(format!("{:0>4}ms", format!("{:.*}", decimals, millis)))
}

/// Zeros between the decimal point and the first significant digit of a
/// sub-millisecond duration, e.g. 4_200ns = 0.0042ms has two
fn leading_fraction_zeros(nanos: u64) -> usize {
    // nanos < 1_000_000 here: 6 fractional digits of milliseconds.
    let digits = nanos.to_string().len();
    6usize.saturating_sub(digits)
}
