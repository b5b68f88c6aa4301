//! Course aggregate and time-gated content access for coursegate
//!
//! This crate is the heart of coursegate, containing:
//! - Content items (prep material, lessons, homework) and their windows
//! - Enrolments binding a student to a time window
//! - The `Course` aggregate and its authorization-gated accessors
//!
//! Every access decision is a pure function of course state and a single
//! clock reading.

mod content;
mod course;
mod enrolment;
mod error;

pub use content::*;
pub use course::*;
pub use enrolment::*;
pub use error::*;
