//! The course aggregate

use coursegate_util::{Clock, Instant, StudentId, TimeWindow};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{CourseError, CourseResult, Enrolment, Homework, Lesson, PrepMaterial, Titled};

/// A course run: its content catalog, its enrolments and the clock it
/// judges access against.
///
/// The catalog is fixed at construction. Enrolments only grow.
pub struct Course {
    name: String,
    window: TimeWindow,
    lessons: HashMap<String, Lesson>,
    homeworks: HashMap<String, Homework>,
    prep_materials: HashMap<String, PrepMaterial>,
    enrolments: HashMap<StudentId, Enrolment>,
    clock: Arc<dyn Clock>,
}

impl Course {
    /// Build a course from its catalog.
    ///
    /// At least one lesson and one homework are required. Items sharing a
    /// title replace earlier ones; the last one wins.
    pub fn new(
        name: impl Into<String>,
        lessons: Vec<Lesson>,
        homeworks: Vec<Homework>,
        prep_materials: Option<Vec<PrepMaterial>>,
        window: TimeWindow,
        clock: Arc<dyn Clock>,
    ) -> CourseResult<Self> {
        if lessons.is_empty() {
            return Err(CourseError::NoLessons);
        }
        if homeworks.is_empty() {
            return Err(CourseError::NoHomeworks);
        }

        let name = name.into();
        let lessons = index_by_title(&name, "lesson", lessons);
        let homeworks = index_by_title(&name, "homework", homeworks);
        let prep_materials = index_by_title(&name, "prep material", prep_materials.unwrap_or_default());

        info!(
            course = %name,
            lessons = lessons.len(),
            homeworks = homeworks.len(),
            prep_materials = prep_materials.len(),
            "Course created"
        );

        Ok(Self {
            name,
            window,
            lessons,
            homeworks,
            prep_materials,
            enrolments: HashMap::new(),
            clock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// All enrolment records, active or not
    pub fn enrolments(&self) -> &HashMap<StudentId, Enrolment> {
        &self.enrolments
    }

    pub fn enrolment(&self, student_id: StudentId) -> Option<&Enrolment> {
        self.enrolments.get(&student_id)
    }

    /// Mutable access to an enrolment, e.g. to move its end
    pub fn enrolment_mut(&mut self, student_id: StudentId) -> Option<&mut Enrolment> {
        self.enrolments.get_mut(&student_id)
    }

    pub fn lesson_titles(&self) -> Vec<&str> {
        sorted_titles(&self.lessons)
    }

    pub fn homework_titles(&self) -> Vec<&str> {
        sorted_titles(&self.homeworks)
    }

    pub fn prep_material_titles(&self) -> Vec<&str> {
        sorted_titles(&self.prep_materials)
    }

    /// Record an enrolment.
    ///
    /// Rejected while the student holds a currently active enrolment. An
    /// expired or not-yet-started record is replaced.
    pub fn enroll(&mut self, enrolment: Enrolment) -> CourseResult<()> {
        let now = self.clock.now();
        let student_id = enrolment.student_id();

        if self.student_is_currently_enrolled(student_id, now) {
            return Err(CourseError::AlreadyEnrolled { student_id });
        }

        let replaced = self.enrolments.insert(student_id, enrolment).is_some();
        debug!(
            course = %self.name,
            student_id = %student_id,
            replaced,
            "Student enrolled"
        );
        Ok(())
    }

    pub fn is_student_currently_enrolled(&self, student_id: StudentId) -> bool {
        self.student_is_currently_enrolled(student_id, self.clock.now())
    }

    /// Prep material stays reachable after the course ends, for as long as
    /// the enrolment is active.
    pub fn prep_material_for_student(
        &self,
        student_id: StudentId,
        title: &str,
    ) -> CourseResult<&PrepMaterial> {
        let now = self.clock.now();
        self.validate_student_enrolment(student_id, now)?;

        if !self.window.has_started(now) {
            return Err(CourseError::PrepMaterialBeforeCourseStart);
        }

        self.prep_materials
            .get(title)
            .ok_or_else(|| CourseError::PrepMaterialNotFound {
                title: title.to_string(),
            })
    }

    /// The lesson's own release time is the only time gate here; the course
    /// window is not consulted.
    pub fn lesson_for_student(&self, student_id: StudentId, title: &str) -> CourseResult<&Lesson> {
        let now = self.clock.now();
        self.validate_student_enrolment(student_id, now)?;

        let lesson = self
            .lessons
            .get(title)
            .ok_or_else(|| CourseError::LessonNotFound {
                title: title.to_string(),
            })?;

        if !lesson.is_released(now) {
            return Err(CourseError::LessonNotReleased {
                title: title.to_string(),
            });
        }

        Ok(lesson)
    }

    /// Only inside the course window. Homework remains retrievable after its
    /// due instant.
    pub fn homework_for_student(&self, student_id: StudentId, title: &str) -> CourseResult<&Homework> {
        let now = self.clock.now();
        self.validate_student_enrolment(student_id, now)?;

        if !self.window.is_active(now) {
            return Err(CourseError::HomeworkBeforeCourseStart);
        }

        self.homeworks
            .get(title)
            .ok_or_else(|| CourseError::HomeworkNotFound {
                title: title.to_string(),
            })
    }

    fn validate_student_enrolment(&self, student_id: StudentId, now: Instant) -> CourseResult<()> {
        if !self.student_is_currently_enrolled(student_id, now) {
            return Err(CourseError::NotEnrolled { student_id });
        }
        Ok(())
    }

    fn student_is_currently_enrolled(&self, student_id: StudentId, now: Instant) -> bool {
        self.enrolments
            .get(&student_id)
            .is_some_and(|enrolment| enrolment.is_active(now))
    }
}

impl fmt::Debug for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Course")
            .field("name", &self.name)
            .field("window", &self.window)
            .field("lessons", &self.lessons.len())
            .field("homeworks", &self.homeworks.len())
            .field("prep_materials", &self.prep_materials.len())
            .field("enrolments", &self.enrolments.len())
            .finish_non_exhaustive()
    }
}

fn index_by_title<T: Titled>(course: &str, kind: &str, items: Vec<T>) -> HashMap<String, T> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let title = item.title().to_string();
        if map.insert(title.clone(), item).is_some() {
            warn!(course = %course, kind, title = %title, "Duplicate title replaced earlier entry");
        }
    }
    map
}

fn sorted_titles<T>(map: &HashMap<String, T>) -> Vec<&str> {
    let mut titles: Vec<&str> = map.keys().map(String::as_str).collect();
    titles.sort_unstable();
    titles
}
