//! Raw catalog schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw catalog as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawCatalog {
    /// Catalog schema version
    pub config_version: u32,

    /// How date strings in this file are written
    #[serde(default)]
    pub dates: RawDateSettings,

    /// Courses offered
    #[serde(default)]
    pub courses: Vec<RawCourse>,
}

/// Date format settings; anything unset falls back to the defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDateSettings {
    /// chrono format for a day (default: %d/%m/%Y)
    pub date_format: Option<String>,

    /// chrono format for the time part of a timestamp (default: %H:%M:%S%.f)
    pub time_format: Option<String>,

    /// Offset dates are written in: "+HH:MM", "-HH:MM" or "UTC" (default: UTC)
    pub utc_offset: Option<String>,
}

/// Raw course definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawCourse {
    /// Course name, unique within the catalog
    pub name: String,

    /// First day (or exact instant) of the course
    pub start: String,

    /// Last day (or exact instant) of the course; open-ended if absent
    pub end: Option<String>,

    #[serde(default)]
    pub lessons: Vec<RawLesson>,

    #[serde(default)]
    pub homeworks: Vec<RawHomework>,

    #[serde(default)]
    pub prep_materials: Option<Vec<RawPrepMaterial>>,

    /// Enrolments to record when the catalog is loaded.
    ///
    /// At most one record per student, even when the windows do not overlap.
    /// A course keeps a single record per student, so which of two records
    /// survived would depend on the time the file is loaded.
    #[serde(default)]
    pub enrolments: Vec<RawEnrolment>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawLesson {
    pub title: String,
    pub content: String,
    /// Release instant; a bare day means its start
    pub start: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawHomework {
    pub title: String,
    /// Due instant; a bare day means its end
    pub due: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPrepMaterial {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawEnrolment {
    pub student_id: i64,
    pub start: String,
    pub end: String,
}
