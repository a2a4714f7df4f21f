//! Enumeration types for the campus movement tracker
//!
//! This module contains the role enumeration shared by people (their role on
//! campus) and locations (the role a location is restricted to).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a person on campus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Enrolled student
    Student,
    /// Teaching staff
    Teacher,
    /// Non-teaching staff (maintenance, services, administration)
    Worker,
    /// Visitors and anyone else
    Other,
}

impl Role {
    /// All roles, in menu order
    pub const ALL: [Role; 4] = [Role::Student, Role::Teacher, Role::Worker, Role::Other];

    /// Name used in the JSON files
    pub fn as_code(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Worker => "WORKER",
            Role::Other => "OTHER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Teacher => write!(f, "Teacher"),
            Role::Worker => write!(f, "Worker"),
            Role::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "worker" => Ok(Role::Worker),
            "other" => Ok(Role::Other),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional role restriction
///
/// Empty strings, `null` and absent fields all mean "open to every role".
pub fn deserialize_restriction<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
