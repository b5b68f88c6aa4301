//! Catalog parsing and validation for coursegate
//!
//! Supports TOML catalogs with:
//! - Versioned schema
//! - Configurable date formats and offset
//! - Courses with lessons, homework, prep material and initial enrolments
//! - Validation that reports every problem at once

mod catalog;
mod schema;
mod validation;

pub use catalog::*;
pub use schema::*;
pub use validation::*;

use coursegate_core::CourseError;
use coursegate_util::{Clock, DateError};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Catalog errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read catalog file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported catalog version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid date: {0}")]
    DateError(#[from] DateError),

    #[error("Course '{course}': {source}")]
    Course { course: String, source: CourseError },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate a catalog from a TOML file
pub fn load_catalog(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> ConfigResult<Catalog> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content, clock)
}

/// Parse and validate a catalog from a TOML string
pub fn parse_catalog(content: &str, clock: Arc<dyn Clock>) -> ConfigResult<Catalog> {
    let raw: RawCatalog = toml::from_str(content)?;

    if raw.config_version != CURRENT_CATALOG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_catalog(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    let catalog = Catalog::from_raw(raw, clock)?;
    info!(course_count = catalog.courses.len(), "Catalog loaded");
    Ok(catalog)
}

/// Current supported catalog version
pub const CURRENT_CATALOG_VERSION: u32 = 1;
