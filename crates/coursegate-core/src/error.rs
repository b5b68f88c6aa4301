//! Error types for course construction, enrolment and content access

use coursegate_util::{InvertedWindow, StudentId};
use thiserror::Error;

/// Broad classification of a [`CourseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A course or enrolment was built from invalid inputs
    Construction,
    /// The student is not currently enrolled, or already is
    Enrollment,
    /// The relevant window is not active at the time of access
    InvalidAccessTime,
    /// No content with the requested title
    ContentNotFound,
}

/// Errors raised by the course aggregate.
///
/// All of them are policy violations: retrying without a change in state or
/// time yields the same result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    #[error("Course requires at least one lesson")]
    NoLessons,

    #[error("Course requires at least one homework")]
    NoHomeworks,

    #[error("Invalid window: {0}")]
    InvalidWindow(#[from] InvertedWindow),

    #[error("Student is already enrolled in course")]
    AlreadyEnrolled { student_id: StudentId },

    #[error("Student is not currently enrolled")]
    NotEnrolled { student_id: StudentId },

    #[error("Cannot access prep material before course has started")]
    PrepMaterialBeforeCourseStart,

    /// Also raised once the course window has closed
    #[error("Cannot access homework before course has started")]
    HomeworkBeforeCourseStart,

    #[error("Cannot access lesson before its due start time")]
    LessonNotReleased { title: String },

    #[error("Prep material does not exist in course")]
    PrepMaterialNotFound { title: String },

    #[error("Lesson does not exist in course")]
    LessonNotFound { title: String },

    #[error("Homework does not exist in course")]
    HomeworkNotFound { title: String },
}

impl CourseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoLessons | Self::NoHomeworks | Self::InvalidWindow(_) => ErrorKind::Construction,
            Self::AlreadyEnrolled { .. } | Self::NotEnrolled { .. } => ErrorKind::Enrollment,
            Self::PrepMaterialBeforeCourseStart
            | Self::HomeworkBeforeCourseStart
            | Self::LessonNotReleased { .. } => ErrorKind::InvalidAccessTime,
            Self::PrepMaterialNotFound { .. }
            | Self::LessonNotFound { .. }
            | Self::HomeworkNotFound { .. } => ErrorKind::ContentNotFound,
        }
    }
}

pub type CourseResult<T> = Result<T, CourseError>;
