//! Error types shared across coursegate crates

use thiserror::Error;

use crate::Instant;

/// A window whose start lies after its end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Window start {start} is after its end {end}")]
pub struct InvertedWindow {
    pub start: Instant,
    pub end: Instant,
}

/// Failure to turn a date string into an instant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date '{value}': expected format '{format}'")]
    InvalidFormat { value: String, format: String },

    #[error("Date '{value}' does not exist in offset {offset}")]
    NonexistentLocalTime { value: String, offset: String },

    #[error("Invalid UTC offset '{0}': expected +HH:MM or -HH:MM")]
    InvalidOffset(String),
}

impl DateError {
    pub fn invalid_format(value: impl Into<String>, format: impl Into<String>) -> Self {
        Self::InvalidFormat {
            value: value.into(),
            format: format.into(),
        }
    }
}
