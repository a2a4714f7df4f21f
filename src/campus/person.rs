//! People known to the tracker
//!
//! A person is identified by their id alone; name and role are descriptive.

use crate::types::{PersonId, Role};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A person registered in the campus directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier for the person
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Role on campus
    pub role: Role,
}

impl Person {
    /// Create a new person
    pub fn new(id: PersonId, name: impl Into<String>, role: Role) -> Self {
        Self { id, name: name.into(), role }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
