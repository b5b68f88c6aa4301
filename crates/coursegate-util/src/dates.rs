//! Date string parsing and formatting
//!
//! Catalog files describe windows with human dates (`13/05/2025`) or full
//! timestamps (`15/05/2025 10:00:00.000`). A day used as a lower bound means
//! the first instant of that day, and as an upper bound the last millisecond
//! of it. Formats and the offset dates are written in come from an explicit
//! [`DateConfig`] rather than process-wide constants.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

use crate::{DateError, Instant};

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S%.f";
pub const DEFAULT_UTC_OFFSET: &str = "+00:00";

/// How date strings are read and written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateConfig {
    /// chrono format for a calendar day
    pub date_format: String,
    /// chrono format for the time of day in a full timestamp
    pub time_format: String,
    /// Offset the strings are written in
    pub utc_offset: FixedOffset,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            utc_offset: Utc.fix(),
        }
    }
}

impl DateConfig {
    /// Format for a full timestamp: date, a space, then time of day
    pub fn timestamp_format(&self) -> String {
        format!("{} {}", self.date_format, self.time_format)
    }

    /// First instant of the given day (`00:00:00.000000`)
    pub fn day_start(&self, day: &str) -> Result<Instant, DateError> {
        let date = self.parse_day(day)?;
        self.to_instant(date.and_time(NaiveTime::MIN), day)
    }

    /// Last millisecond of the given day (`23:59:59.999000`)
    pub fn day_end(&self, day: &str) -> Result<Instant, DateError> {
        let date = self.parse_day(day)?;
        let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid end-of-day time");
        self.to_instant(date.and_time(time), day)
    }

    /// Parse a full timestamp such as `15/05/2025 10:00:00.000`
    pub fn parse_timestamp(&self, timestamp: &str) -> Result<Instant, DateError> {
        let format = self.timestamp_format();
        let naive = NaiveDateTime::parse_from_str(timestamp.trim(), &format)
            .map_err(|_| DateError::invalid_format(timestamp, format))?;
        self.to_instant(naive, timestamp)
    }

    /// A timestamp, or a bare day meaning the start of that day
    pub fn parse_lower_bound(&self, value: &str) -> Result<Instant, DateError> {
        self.parse_timestamp(value)
            .or_else(|_| self.day_start(value))
            .map_err(|_| self.either_format_error(value))
    }

    /// A timestamp, or a bare day meaning the end of that day
    pub fn parse_upper_bound(&self, value: &str) -> Result<Instant, DateError> {
        self.parse_timestamp(value)
            .or_else(|_| self.day_end(value))
            .map_err(|_| self.either_format_error(value))
    }

    /// Render an instant as `dd/mm/yyyy HH:MM:SS.ffffff` in the configured offset
    pub fn format(&self, instant: &Instant) -> String {
        let display_format = format!("{} %H:%M:%S%.6f", self.date_format);
        instant
            .with_timezone(&self.utc_offset)
            .format(&display_format)
            .to_string()
    }

    fn parse_day(&self, day: &str) -> Result<NaiveDate, DateError> {
        NaiveDate::parse_from_str(day.trim(), &self.date_format)
            .map_err(|_| DateError::invalid_format(day, &self.date_format))
    }

    fn to_instant(&self, naive: NaiveDateTime, original: &str) -> Result<Instant, DateError> {
        self.utc_offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| DateError::NonexistentLocalTime {
                value: original.to_string(),
                offset: self.utc_offset.to_string(),
            })
    }

    fn either_format_error(&self, value: &str) -> DateError {
        DateError::invalid_format(
            value,
            format!("{}' or '{}", self.date_format, self.timestamp_format()),
        )
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `UTC` or `Z`
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, DateError> {
    match value.trim() {
        "UTC" | "utc" | "Z" => Ok(Utc.fix()),
        other => other
            .parse::<FixedOffset>()
            .map_err(|_| DateError::InvalidOffset(value.to_string())),
    }
}
