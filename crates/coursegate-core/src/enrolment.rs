//! Enrolments

use coursegate_util::{Instant, StudentId, TimeWindow};
use serde::Serialize;
use tracing::debug;

use crate::CourseResult;

/// A student's time-bounded right to access a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrolment {
    student_id: StudentId,
    window: TimeWindow,
}

impl Enrolment {
    /// Enrol `student_id` from `start` to `end`, both inclusive.
    ///
    /// Fails if `start` is after `end`.
    pub fn new(student_id: StudentId, start: Instant, end: Instant) -> CourseResult<Self> {
        Ok(Self {
            student_id,
            window: TimeWindow::between(start, end)?,
        })
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn start(&self) -> Option<Instant> {
        self.window.start()
    }

    pub fn end(&self) -> Option<Instant> {
        self.window.end()
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.window.is_active(now)
    }

    /// Replace the end of the enrolment.
    ///
    /// The new end is not compared against the current time: shortening into
    /// the past takes effect on the next access check. An end before the
    /// enrolment start terminates it for good.
    pub fn extend_or_shorten_end(&mut self, new_end: Instant) {
        self.window = self.window.with_end(new_end);
        debug!(
            student_id = %self.student_id,
            new_end = %new_end,
            terminated = self.start().is_some_and(|start| new_end < start),
            "Enrolment end changed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use chrono::{TimeZone, Utc};

    fn day(d: u32, m: u32) -> Instant {
        Utc.with_ymd_and_hms(2025, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn enrolment_keeps_id_and_dates() {
        let enrolment = Enrolment::new(StudentId::new(123), day(1, 5), day(30, 5)).unwrap();

        assert_eq!(enrolment.student_id(), StudentId::new(123));
        assert_eq!(enrolment.start(), Some(day(1, 5)));
        assert_eq!(enrolment.end(), Some(day(30, 5)));
    }

    #[test]
    fn inverted_enrolment_is_construction_error() {
        let err = Enrolment::new(StudentId::new(123), day(30, 5), day(1, 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    #[test]
    fn active_between_bounds() {
        let enrolment = Enrolment::new(StudentId::new(1), day(1, 5), day(30, 5)).unwrap();

        assert!(!enrolment.is_active(day(30, 4)));
        assert!(enrolment.is_active(day(1, 5)));
        assert!(enrolment.is_active(day(30, 5)));
        assert!(!enrolment.is_active(day(31, 5)));
    }

    #[test]
    fn end_can_move_either_way() {
        let mut enrolment = Enrolment::new(StudentId::new(1), day(1, 5), day(30, 5)).unwrap();

        enrolment.extend_or_shorten_end(day(20, 5));
        assert!(!enrolment.is_active(day(21, 5)));

        enrolment.extend_or_shorten_end(day(10, 6));
        assert!(enrolment.is_active(day(9, 6)));
        assert_eq!(enrolment.start(), Some(day(1, 5)));
    }

    #[test]
    fn future_enrolment_terminated_before_start_never_activates() {
        let mut enrolment = Enrolment::new(StudentId::new(1), day(10, 5), day(30, 5)).unwrap();

        enrolment.extend_or_shorten_end(day(2, 5));
        assert_eq!(enrolment.end(), Some(day(2, 5)));
        assert_eq!(enrolment.start(), Some(day(10, 5)));

        for d in [1, 2, 9, 10, 15, 30] {
            assert!(!enrolment.is_active(day(d, 5)), "active on {d}/05");
        }
    }
}
