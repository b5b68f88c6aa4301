//! Time utilities for coursegate
//!
//! Every availability decision is made against an `Instant` supplied by a
//! [`Clock`]. Two clocks are provided: [`FixedClock`], a settable instant for
//! tests, and [`SystemClock`], which reads UTC wall-clock time.
//!
//! # Mock Time for Development
//!
//! In debug builds, [`SystemClock::from_env`] honours the
//! `COURSEGATE_MOCK_TIME` environment variable. The clock then starts at the
//! given instant and advances at the same rate as real time, which is useful
//! for poking at course and lesson windows by hand.
//!
//! Format: `YYYY-MM-DD HH:MM:SS`, interpreted as UTC (e.g., `2025-05-15 10:00:00`)

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;

use crate::InvertedWindow;

/// A single point in time. All comparisons happen in UTC.
pub type Instant = DateTime<Utc>;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "COURSEGATE_MOCK_TIME";

/// Expected format of [`MOCK_TIME_ENV_VAR`]
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current instant.
///
/// Aggregates hold an `Arc<dyn Clock>` so a test can keep a handle to the
/// same clock and move it while the aggregate is alive.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// A clock frozen at a settable instant
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<Instant>,
}

impl FixedClock {
    pub fn new(instant: Instant) -> Self {
        Self {
            current: Mutex::new(instant),
        }
    }

    /// Move the clock to `instant`, forwards or backwards
    pub fn set(&self, instant: Instant) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    /// Move the clock forward by `by` (backward if negative)
    pub fn advance(&self, by: chrono::Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Wall-clock time in UTC, optionally shifted by a mock-time offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<chrono::Duration>,
}

impl SystemClock {
    /// A clock reading the real system time
    pub fn new() -> Self {
        Self { offset: None }
    }

    /// A clock that honours `COURSEGATE_MOCK_TIME` in debug builds.
    ///
    /// In release builds this is identical to [`SystemClock::new`].
    pub fn from_env() -> Self {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                return Self::with_mock_time(&mock_time_str);
            }
        }
        Self::new()
    }

    /// Offset the clock so that "now" reads `mock_time_str`.
    ///
    /// An unparseable value is logged and ignored.
    #[allow(clippy::disallowed_methods)] // Offset is measured against the real clock
    pub fn with_mock_time(mock_time_str: &str) -> Self {
        match NaiveDateTime::parse_from_str(mock_time_str, MOCK_TIME_FORMAT) {
            Ok(naive_dt) => {
                let mock_dt = naive_dt.and_utc();
                let offset = mock_dt.signed_duration_since(Utc::now());
                tracing::info!(
                    mock_time = %mock_time_str,
                    offset_secs = offset.num_seconds(),
                    "Mock time enabled"
                );
                Self {
                    offset: Some(offset),
                }
            }
            Err(_) => {
                tracing::warn!(
                    mock_time = %mock_time_str,
                    expected_format = MOCK_TIME_FORMAT,
                    "Invalid mock time format"
                );
                Self::new()
            }
        }
    }

    /// Returns whether this clock is shifted by mock time
    pub fn is_mock_time_active(&self) -> bool {
        self.offset.is_some()
    }
}

impl Clock for SystemClock {
    #[allow(clippy::disallowed_methods)] // This is the wrapper around the real clock
    fn now(&self) -> Instant {
        let real_now = Utc::now();
        match self.offset {
            Some(offset) => real_now + offset,
            None => real_now,
        }
    }
}

/// An activity interval with optional, inclusive bounds.
///
/// A missing start means "active since forever", a missing end means
/// "active forever after". Constructors reject `start > end`; only
/// [`TimeWindow::with_end`] can produce such a window, and it is never active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeWindow {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl TimeWindow {
    pub fn new(start: Option<Instant>, end: Option<Instant>) -> Result<Self, InvertedWindow> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// A window with both bounds set
    pub fn between(start: Instant, end: Instant) -> Result<Self, InvertedWindow> {
        Self::new(Some(start), Some(end))
    }

    /// A window that is always active
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn ending_at(end: Instant) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    pub fn start(&self) -> Option<Instant> {
        self.start
    }

    pub fn end(&self) -> Option<Instant> {
        self.end
    }

    /// Check whether `now` lies inside the window, bounds included
    pub fn is_active(&self, now: Instant) -> bool {
        self.has_started(now) && !self.has_ended(now)
    }

    /// Only the lower bound: false strictly before `start`
    pub fn has_started(&self, now: Instant) -> bool {
        self.start.is_none_or(|start| now >= start)
    }

    /// Only the upper bound: true strictly after `end`
    pub fn has_ended(&self, now: Instant) -> bool {
        self.end.is_some_and(|end| now > end)
    }

    /// The same window with its end bound replaced.
    ///
    /// An end before the start yields a window that is never active.
    pub fn with_end(&self, end: Instant) -> Self {
        Self {
            start: self.start,
            end: Some(end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_bounded_window_is_inclusive() {
        let start = at(2025, 5, 13, 0, 0, 0);
        let end = at(2025, 6, 12, 23, 59, 59);
        let window = TimeWindow::between(start, end).unwrap();

        assert!(!window.is_active(start - Duration::milliseconds(1)));
        assert!(window.is_active(start));
        assert!(window.is_active(at(2025, 5, 20, 12, 0, 0)));
        assert!(window.is_active(end));
        assert!(!window.is_active(end + Duration::milliseconds(1)));
    }

    #[test]
    fn test_start_only_window() {
        let start = at(2025, 5, 15, 10, 0, 0);
        let window = TimeWindow::starting_at(start);

        assert!(!window.is_active(at(2025, 5, 15, 9, 59, 59)));
        assert!(window.is_active(start));
        assert!(window.is_active(at(2099, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_end_only_window() {
        let end = at(2025, 5, 17, 23, 59, 59);
        let window = TimeWindow::ending_at(end);

        assert!(window.is_active(at(1999, 1, 1, 0, 0, 0)));
        assert!(window.is_active(end));
        assert!(!window.is_active(at(2025, 5, 18, 0, 0, 0)));
    }

    #[test]
    fn test_unbounded_window_always_active() {
        let window = TimeWindow::unbounded();
        assert!(window.is_active(at(1970, 1, 1, 0, 0, 0)));
        assert!(window.is_active(at(2100, 12, 31, 23, 59, 59)));
        assert_eq!(window, TimeWindow::default());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let start = at(2025, 6, 1, 0, 0, 0);
        let end = at(2025, 5, 1, 0, 0, 0);

        let err = TimeWindow::between(start, end).unwrap_err();
        assert_eq!(err, InvertedWindow { start, end });

        // A zero-length window is fine
        let point = TimeWindow::between(start, start).unwrap();
        assert!(point.is_active(start));
    }

    #[test]
    fn test_has_started_ignores_end() {
        let window = TimeWindow::between(at(2025, 5, 13, 0, 0, 0), at(2025, 6, 12, 0, 0, 0)).unwrap();
        let after_end = at(2025, 7, 1, 0, 0, 0);

        assert!(window.has_started(after_end));
        assert!(window.has_ended(after_end));
        assert!(!window.is_active(after_end));
        assert!(!window.has_started(at(2025, 5, 12, 23, 59, 59)));
    }

    #[test]
    fn test_with_end_replaces_bound() {
        let window = TimeWindow::between(at(2025, 5, 1, 0, 0, 0), at(2025, 5, 30, 0, 0, 0)).unwrap();

        let shortened = window.with_end(at(2025, 5, 20, 0, 0, 0));
        assert_eq!(shortened.start(), window.start());
        assert_eq!(shortened.end(), Some(at(2025, 5, 20, 0, 0, 0)));
    }

    #[test]
    fn test_end_before_start_is_never_active() {
        let window = TimeWindow::between(at(2025, 5, 10, 0, 0, 0), at(2025, 5, 30, 0, 0, 0)).unwrap();
        let closed = window.with_end(at(2025, 5, 2, 0, 0, 0));

        for day in [1, 2, 5, 10, 15, 30, 31] {
            let now = at(2025, 5, day, 0, 0, 0);
            assert!(!closed.is_active(now), "active on day {day}");
        }
    }

    #[test]
    fn test_fixed_clock_set_and_advance() {
        let clock = FixedClock::new(at(2025, 5, 1, 0, 0, 0));
        assert_eq!(clock.now(), at(2025, 5, 1, 0, 0, 0));

        clock.set(at(2025, 5, 13, 0, 0, 0));
        assert_eq!(clock.now(), at(2025, 5, 13, 0, 0, 0));

        clock.advance(Duration::hours(10));
        assert_eq!(clock.now(), at(2025, 5, 13, 10, 0, 0));
    }

    #[test]
    fn test_fixed_clock_shared_through_trait_object() {
        let clock = Arc::new(FixedClock::new(at(2025, 5, 1, 0, 0, 0)));
        let shared: Arc<dyn Clock> = clock.clone();

        clock.set(at(2025, 6, 1, 0, 0, 0));
        assert_eq!(shared.now(), at(2025, 6, 1, 0, 0, 0));
    }

    #[test]
    fn test_system_clock_returns_time() {
        let t = SystemClock::new().now();
        assert!(t > at(2020, 1, 1, 0, 0, 0));
        assert!(t < at(2100, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_system_clock_with_mock_time() {
        let clock = SystemClock::with_mock_time("2025-05-15 10:00:00");
        assert!(clock.is_mock_time_active());

        let diff = (clock.now() - at(2025, 5, 15, 10, 0, 0)).num_seconds().abs();
        assert!(diff <= 1, "Expected mock clock near mock time, got {diff}s off");
    }

    #[test]
    fn test_system_clock_ignores_invalid_mock_time() {
        let invalid_formats = [
            "2025-05-15",
            "15/05/2025 10:00:00",
            "2025-05-15T10:00:00",
            "",
            "not a date",
        ];

        for value in &invalid_formats {
            let clock = SystemClock::with_mock_time(value);
            assert!(!clock.is_mock_time_active(), "'{value}' should not enable mock time");
        }
    }
}
