//! Catalog validation

use crate::schema::{RawCatalog, RawCourse, RawDateSettings};
use coursegate_util::{
    DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT, DEFAULT_UTC_OFFSET, DateConfig, DateError, Instant,
    parse_utc_offset,
};
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Course '{course}': {message}")]
    CourseError { course: String, message: String },

    #[error("Duplicate course name: {0}")]
    DuplicateCourseName(String),

    #[error("Course '{course}': invalid {field}: {source}")]
    InvalidDate {
        course: String,
        field: String,
        source: DateError,
    },

    #[error("Course '{course}': {field} starts after it ends")]
    InvertedWindow { course: String, field: String },

    #[error("Course '{course}': student {student_id} is listed more than once")]
    DuplicateEnrolment { course: String, student_id: i64 },

    #[error("Date settings: {0}")]
    DateSettings(DateError),
}

/// Build the date configuration described by the `[dates]` table
pub fn date_config_from_raw(raw: &RawDateSettings) -> Result<DateConfig, DateError> {
    let utc_offset = parse_utc_offset(raw.utc_offset.as_deref().unwrap_or(DEFAULT_UTC_OFFSET))?;
    Ok(DateConfig {
        utc_offset,
        ..formats_from_raw(raw)
    })
}

fn formats_from_raw(raw: &RawDateSettings) -> DateConfig {
    DateConfig {
        date_format: raw
            .date_format
            .clone()
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        time_format: raw
            .time_format
            .clone()
            .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
        ..DateConfig::default()
    }
}

/// Validate a raw catalog
pub fn validate_catalog(catalog: &RawCatalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Keep checking dates with the default offset if the configured one is bad
    let dates = date_config_from_raw(&catalog.dates).unwrap_or_else(|e| {
        errors.push(ValidationError::DateSettings(e));
        formats_from_raw(&catalog.dates)
    });

    let mut seen_names = HashSet::new();
    for course in &catalog.courses {
        if !seen_names.insert(&course.name) {
            errors.push(ValidationError::DuplicateCourseName(course.name.clone()));
        }
    }

    for course in &catalog.courses {
        errors.extend(validate_course(course, &dates));
    }

    errors
}

fn validate_course(course: &RawCourse, dates: &DateConfig) -> Vec<ValidationError> {
    let mut check = DateCheck {
        course: &course.name,
        dates,
        errors: Vec::new(),
    };

    let start = check.lower("start", &course.start);
    let end = course.end.as_deref().and_then(|end| check.upper("end", end));
    check.ordered("course window", start, end);

    for lesson in &course.lessons {
        check.lower(&format!("start of lesson '{}'", lesson.title), &lesson.start);
    }

    for homework in &course.homeworks {
        check.upper(&format!("due date of homework '{}'", homework.title), &homework.due);
    }

    let mut seen_students = HashSet::new();
    for enrolment in &course.enrolments {
        let field = format!("enrolment of student {}", enrolment.student_id);
        let start = check.lower(&format!("start of {}", field), &enrolment.start);
        let end = check.upper(&format!("end of {}", field), &enrolment.end);
        check.ordered(&field, start, end);

        if !seen_students.insert(enrolment.student_id) {
            check.errors.push(ValidationError::DuplicateEnrolment {
                course: course.name.clone(),
                student_id: enrolment.student_id,
            });
        }
    }

    let mut errors = check.errors;

    if course.name.trim().is_empty() {
        errors.push(ValidationError::CourseError {
            course: course.name.clone(),
            message: "name cannot be empty".into(),
        });
    }

    if course.lessons.is_empty() {
        errors.push(ValidationError::CourseError {
            course: course.name.clone(),
            message: "Course requires at least one lesson".into(),
        });
    }

    if course.homeworks.is_empty() {
        errors.push(ValidationError::CourseError {
            course: course.name.clone(),
            message: "Course requires at least one homework".into(),
        });
    }

    errors
}

/// Parses dates for one course, collecting failures
struct DateCheck<'a> {
    course: &'a str,
    dates: &'a DateConfig,
    errors: Vec<ValidationError>,
}

impl DateCheck<'_> {
    fn lower(&mut self, field: &str, value: &str) -> Option<Instant> {
        let parsed = self.dates.parse_lower_bound(value);
        self.record(field, parsed)
    }

    fn upper(&mut self, field: &str, value: &str) -> Option<Instant> {
        let parsed = self.dates.parse_upper_bound(value);
        self.record(field, parsed)
    }

    fn ordered(&mut self, field: &str, start: Option<Instant>, end: Option<Instant>) {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            self.errors.push(ValidationError::InvertedWindow {
                course: self.course.to_string(),
                field: field.to_string(),
            });
        }
    }

    fn record(&mut self, field: &str, parsed: Result<Instant, DateError>) -> Option<Instant> {
        match parsed {
            Ok(instant) => Some(instant),
            Err(source) => {
                self.errors.push(ValidationError::InvalidDate {
                    course: self.course.to_string(),
                    field: field.to_string(),
                    source,
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawEnrolment, RawHomework, RawLesson};

    fn raw_course(name: &str) -> RawCourse {
        RawCourse {
            name: name.into(),
            start: "13/05/2025".into(),
            end: Some("12/06/2025".into()),
            lessons: vec![RawLesson {
                title: "Cell Biology".into(),
                content: "The Krebs cycle powers the body".into(),
                start: "15/05/2025 10:00:00.000".into(),
            }],
            homeworks: vec![RawHomework {
                title: "Label a Plant Cell".into(),
                due: "17/05/2025".into(),
                description: None,
            }],
            prep_materials: None,
            enrolments: vec![],
        }
    }

    fn raw_catalog(courses: Vec<RawCourse>) -> RawCatalog {
        RawCatalog {
            config_version: 1,
            dates: Default::default(),
            courses,
        }
    }

    #[test]
    fn test_valid_catalog_has_no_errors() {
        let errors = validate_catalog(&raw_catalog(vec![raw_course("Biology")]));
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_duplicate_course_detection() {
        let errors = validate_catalog(&raw_catalog(vec![raw_course("Biology"), raw_course("Biology")]));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateCourseName(_))));
    }

    #[test]
    fn test_missing_lessons_and_homeworks() {
        let mut course = raw_course("Empty");
        course.lessons.clear();
        course.homeworks.clear();

        let messages: Vec<String> = validate_catalog(&raw_catalog(vec![course]))
            .iter()
            .map(|e| e.to_string())
            .collect();

        assert!(messages.contains(&"Course 'Empty': Course requires at least one lesson".to_string()));
        assert!(messages.contains(&"Course 'Empty': Course requires at least one homework".to_string()));
    }

    #[test]
    fn test_invalid_dates_reported_per_field() {
        let mut course = raw_course("Biology");
        course.start = "2025-05-13".into();
        course.lessons[0].start = "soon".into();

        let errors = validate_catalog(&raw_catalog(vec![course]));
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| matches!(e, ValidationError::InvalidDate { .. })));
        assert!(errors[1].to_string().contains("lesson 'Cell Biology'"));
    }

    #[test]
    fn test_inverted_windows() {
        let mut course = raw_course("Biology");
        course.end = Some("01/05/2025".into());
        course.enrolments.push(RawEnrolment {
            student_id: 123,
            start: "30/05/2025".into(),
            end: "01/05/2025".into(),
        });

        let errors = validate_catalog(&raw_catalog(vec![course]));
        let inverted = errors
            .iter()
            .filter(|e| matches!(e, ValidationError::InvertedWindow { .. }))
            .count();
        assert_eq!(inverted, 2);
    }

    #[test]
    fn test_same_day_window_is_not_inverted() {
        let mut course = raw_course("Biology");
        course.enrolments.push(RawEnrolment {
            student_id: 123,
            start: "13/05/2025".into(),
            end: "13/05/2025".into(),
        });

        assert!(validate_catalog(&raw_catalog(vec![course])).is_empty());
    }

    #[test]
    fn test_duplicate_enrolment_detection() {
        let mut course = raw_course("Biology");
        for _ in 0..2 {
            course.enrolments.push(RawEnrolment {
                student_id: 123,
                start: "01/05/2025".into(),
                end: "30/05/2025".into(),
            });
        }

        let errors = validate_catalog(&raw_catalog(vec![course]));
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::DuplicateEnrolment { student_id: 123, .. }]
        ));
    }

    #[test]
    fn test_consecutive_enrolments_for_one_student_rejected() {
        let mut course = raw_course("Biology");
        course.enrolments.push(RawEnrolment {
            student_id: 123,
            start: "01/05/2025".into(),
            end: "20/05/2025".into(),
        });
        course.enrolments.push(RawEnrolment {
            student_id: 123,
            start: "21/05/2025".into(),
            end: "12/06/2025".into(),
        });

        let errors = validate_catalog(&raw_catalog(vec![course]));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Course 'Biology': student 123 is listed more than once"
        );
    }

    #[test]
    fn test_bad_offset_still_checks_dates() {
        let mut catalog = raw_catalog(vec![raw_course("Biology")]);
        catalog.dates.utc_offset = Some("Europe/London".into());
        catalog.courses[0].start = "not a date".into();

        let errors = validate_catalog(&catalog);
        assert!(matches!(errors[0], ValidationError::DateSettings(DateError::InvalidOffset(_))));
        assert!(matches!(errors[1], ValidationError::InvalidDate { .. }));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_date_config_from_raw() {
        let raw = RawDateSettings {
            date_format: Some("%Y-%m-%d".into()),
            time_format: None,
            utc_offset: Some("+01:00".into()),
        };

        let dates = date_config_from_raw(&raw).unwrap();
        assert_eq!(dates.date_format, "%Y-%m-%d");
        assert_eq!(dates.time_format, DEFAULT_TIME_FORMAT);
        assert_eq!(dates.utc_offset.local_minus_utc(), 3600);
    }
}
