//! Strongly-typed identifiers for coursegate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a student, validated upstream by whoever owns identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i64);

impl StudentId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for StudentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
