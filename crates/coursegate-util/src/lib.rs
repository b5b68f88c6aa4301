//! Shared utilities for coursegate
//!
//! This crate provides:
//! - ID types (StudentId)
//! - Clocks (fixed for tests, system wall-clock) and the `Instant` alias
//! - `TimeWindow`, the optional start/end activity interval
//! - Date parsing and formatting driven by an explicit `DateConfig`
//! - Default paths for the catalog file

mod dates;
mod error;
mod ids;
mod paths;
mod time;

pub use dates::*;
pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
