//! Named stopwatch registry
//!
//! Each name is either running (holding its start instant) or stopped
//! (holding the elapsed nanoseconds). Misuse never fails: it appends a
//! warning entry to the owning logger and returns `None`.

use super::log_context::LogContext;
use super::logger::Logger;
use super::precision::MonotonicClock;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// State of one named timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Started at this monotonic instant
    Running(u64),
    /// Finished after this many nanoseconds
    Stopped(u64),
}

/// Unit a timer reading is converted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    #[default]
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    /// Nanoseconds per unit
    pub const fn divisor(self) -> u64 {
        match self {
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Millis => 1_000_000,
            TimeUnit::Micros => 1_000,
            TimeUnit::Nanos => 1,
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Millis => "ms",
            TimeUnit::Micros => "us",
            TimeUnit::Nanos => "ns",
        }
    }

    /// Three decimals with the leading zero stripped, e.g. `.123`
    pub fn format(self, nanos: u64) -> String {
        let value = format!("{:.3}", nanos as f64 / self.divisor() as f64);
        value.trim_start_matches('0').to_string()
    }
}

/// A timer reading, raw or converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerValue {
    Raw(u64),
    Formatted(String),
}

impl TimerValue {
    pub fn as_raw(&self) -> Option<u64> {
        match self {
            TimerValue::Raw(nanos) => Some(*nanos),
            TimerValue::Formatted(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TimerValue::Raw(_) => None,
            TimerValue::Formatted(value) => Some(value),
        }
    }
}

impl fmt::Display for TimerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerValue::Raw(nanos) => write!(f, "{}", nanos),
            TimerValue::Formatted(value) => f.write_str(value),
        }
    }
}

/// Named stopwatches reporting misuse to a logger
///
/// Clones share the same registry.
///
/// # Example
///
/// ```
/// use diagnostics_logger::prelude::*;
/// use std::sync::Arc;
///
/// let clock = ManualClock::new(0);
/// let logger = Logger::builder().clock(Arc::new(clock.clone())).build();
/// let timer = Timer::new(logger);
///
/// timer.start("render", false);
/// clock.advance(1_500_000);
///
/// let elapsed = timer.get("render", Some(TimeUnit::Millis), true).unwrap();
/// assert_eq!(elapsed.to_string(), "1.500");
/// ```
#[derive(Clone)]
pub struct Timer {
    events: Arc<Mutex<Vec<(String, TimerState)>>>,
    clock: Arc<dyn MonotonicClock>,
    logger: Logger,
}

impl Timer {
    /// Create a registry that warns through `logger` and reads its clock
    pub fn new(logger: Logger) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            clock: logger.clock(),
            logger,
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Start the named timer
    ///
    /// A timer that is already known is left untouched unless `override_existing`
    /// is set, in which case its previous state is discarded.
    pub fn start(&self, name: &str, override_existing: bool) {
        let now = self.clock.now_nanos();
        {
            let mut events = self.events.lock();
            match events.iter_mut().find(|(n, _)| n == name) {
                Some((_, state)) if override_existing => {
                    *state = TimerState::Running(now);
                    return;
                }
                Some(_) => {}
                None => {
                    events.push((name.to_string(), TimerState::Running(now)));
                    return;
                }
            }
        }

        self.warn("Timer already started {name}.", "name", name);
    }

    /// Stop the named timer and return its elapsed nanoseconds
    ///
    /// Stopping a timer that already stopped warns and returns the stored
    /// duration. Stopping an unknown timer warns and returns `None`.
    pub fn stop(&self, name: &str) -> Option<u64> {
        let now = self.clock.now_nanos();
        let stored = {
            let mut events = self.events.lock();
            match events.iter_mut().find(|(n, _)| n == name) {
                Some((_, state)) => match *state {
                    TimerState::Running(started) => {
                        let elapsed = now.saturating_sub(started);
                        *state = TimerState::Stopped(elapsed);
                        return Some(elapsed);
                    }
                    TimerState::Stopped(elapsed) => Some(elapsed),
                },
                None => None,
            }
        };

        match stored {
            Some(elapsed) => {
                self.warn("No timer running for {name}.", "name", name);
                Some(elapsed)
            }
            None => {
                self.warn("Timer not started {name}.", "name", name);
                None
            }
        }
    }

    /// Read the named timer
    ///
    /// A running timer is stopped first when `stop_if_running` is set;
    /// otherwise the call warns and returns `None`. With `unit` the duration
    /// is converted and formatted, without it the raw nanoseconds are returned.
    pub fn get(&self, name: &str, unit: Option<TimeUnit>, stop_if_running: bool) -> Option<TimerValue> {
        let state = self.state(name);

        let elapsed = match state {
            None => {
                self.warn("Timer requested, but not started: {event}.", "event", name);
                return None;
            }
            Some(TimerState::Stopped(elapsed)) => elapsed,
            Some(TimerState::Running(_)) if stop_if_running => self.stop(name)?,
            Some(TimerState::Running(_)) => {
                self.warn(
                    "Event {event} found, but it is currently running.",
                    "event",
                    name,
                );
                return None;
            }
        };

        Some(match unit {
            Some(unit) => TimerValue::Formatted(unit.format(elapsed)),
            None => TimerValue::Raw(elapsed),
        })
    }

    /// Read every timer in start order, each suffixed with its unit
    ///
    /// Timers that cannot be read (running, with `stop_if_running` unset)
    /// map to `None`.
    pub fn get_all(&self, unit: Option<TimeUnit>, stop_if_running: bool) -> Vec<(String, Option<String>)> {
        let names: Vec<String> = self.events.lock().iter().map(|(n, _)| n.clone()).collect();

        names
            .into_iter()
            .map(|name| {
                let reading = self.get(&name, unit, stop_if_running).map(|value| match unit {
                    Some(unit) => format!("{} {}", value, unit.suffix()),
                    None => format!("{} ns", value),
                });
                (name, reading)
            })
            .collect()
    }

    pub fn state(&self, name: &str) -> Option<TimerState> {
        self.events
            .lock()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, state)| *state)
    }

    pub fn is_running(&self, name: &str) -> bool {
        matches!(self.state(name), Some(TimerState::Running(_)))
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Forget every timer
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn warn(&self, message: &str, key: &str, name: &str) {
        self.logger
            .warning_with_context(message, LogContext::new().with_field(key, name));
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("events", &*self.events.lock())
            .field("logger", &self.logger)
            .finish()
    }
}
