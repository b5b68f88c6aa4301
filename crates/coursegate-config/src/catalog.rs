//! Validated catalog: courses built from a raw catalog

use crate::schema::{RawCatalog, RawCourse};
use crate::validation::date_config_from_raw;
use crate::{ConfigError, ConfigResult};
use coursegate_core::{Course, CourseError, Enrolment, Homework, Lesson, PrepMaterial};
use coursegate_util::{Clock, DateConfig, StudentId, TimeWindow};
use std::sync::Arc;
use tracing::debug;

/// Courses ready for access checks, all judged against the same clock
#[derive(Debug)]
pub struct Catalog {
    /// Date settings the catalog was written with
    pub dates: DateConfig,

    /// Courses in file order
    pub courses: Vec<Course>,
}

impl Catalog {
    /// Convert from a raw catalog (after validation)
    pub fn from_raw(raw: RawCatalog, clock: Arc<dyn Clock>) -> ConfigResult<Self> {
        let dates = date_config_from_raw(&raw.dates)?;
        let courses = raw
            .courses
            .into_iter()
            .map(|course| build_course(course, &dates, clock.clone()))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self { dates, courses })
    }

    /// Get course by name
    pub fn course(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name() == name)
    }

    pub fn course_mut(&mut self, name: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.name() == name)
    }
}

fn build_course(raw: RawCourse, dates: &DateConfig, clock: Arc<dyn Clock>) -> ConfigResult<Course> {
    let course_error = |source: CourseError| ConfigError::Course {
        course: raw.name.clone(),
        source,
    };

    let start = dates.parse_lower_bound(&raw.start)?;
    let end = raw
        .end
        .as_deref()
        .map(|end| dates.parse_upper_bound(end))
        .transpose()?;
    let window = TimeWindow::new(Some(start), end).map_err(|e| course_error(e.into()))?;

    let lessons = raw
        .lessons
        .iter()
        .map(|l| -> ConfigResult<Lesson> {
            Ok(Lesson::new(&l.title, &l.content, dates.parse_lower_bound(&l.start)?))
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    let homeworks = raw
        .homeworks
        .iter()
        .map(|h| -> ConfigResult<Homework> {
            let homework = Homework::new(&h.title, dates.parse_upper_bound(&h.due)?);
            Ok(match &h.description {
                Some(description) => homework.with_description(description),
                None => homework,
            })
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    let prep_materials = raw.prep_materials.as_ref().map(|items| {
        items
            .iter()
            .map(|p| PrepMaterial::new(&p.title, &p.content))
            .collect()
    });

    let mut course = Course::new(&raw.name, lessons, homeworks, prep_materials, window, clock)
        .map_err(course_error)?;

    for raw_enrolment in &raw.enrolments {
        let enrolment = Enrolment::new(
            StudentId::new(raw_enrolment.student_id),
            dates.parse_lower_bound(&raw_enrolment.start)?,
            dates.parse_upper_bound(&raw_enrolment.end)?,
        )
        .map_err(course_error)?;
        course.enroll(enrolment).map_err(course_error)?;
    }

    debug!(
        course = %raw.name,
        enrolments = raw.enrolments.len(),
        "Course loaded from catalog"
    );

    Ok(course)
}
