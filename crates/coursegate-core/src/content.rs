//! Course content items
//!
//! Each item is keyed by its title within the owning course. Availability is
//! carried as a [`TimeWindow`]: prep material has none, a lesson opens at its
//! release instant, homework closes at its due instant.

use coursegate_util::{Instant, TimeWindow};
use serde::Serialize;

/// Anything stored in a course collection keyed by title
pub trait Titled {
    fn title(&self) -> &str;
}

/// Reading handed out before the course proper; never time-gated by itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrepMaterial {
    title: String,
    content: String,
}

impl PrepMaterial {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Titled for PrepMaterial {
    fn title(&self) -> &str {
        &self.title
    }
}

/// A lesson released at a fixed instant and open from then on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    title: String,
    content: String,
    window: TimeWindow,
}

impl Lesson {
    pub fn new(title: impl Into<String>, content: impl Into<String>, start: Instant) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            window: TimeWindow::starting_at(start),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the lesson becomes accessible
    pub fn start(&self) -> Option<Instant> {
        self.window.start()
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn is_released(&self, now: Instant) -> bool {
        self.window.is_active(now)
    }
}

impl Titled for Lesson {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Homework with a due instant.
///
/// The due date is informational: it does not gate retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Homework {
    title: String,
    description: String,
    window: TimeWindow,
}

impl Homework {
    pub fn new(title: impl Into<String>, due: Instant) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            window: TimeWindow::ending_at(due),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due(&self) -> Option<Instant> {
        self.window.end()
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// True strictly after the due instant
    pub fn is_overdue(&self, now: Instant) -> bool {
        self.window.has_ended(now)
    }
}

impl Titled for Homework {
    fn title(&self) -> &str {
        &self.title
    }
}
