//! Identifier types for the campus movement tracker
//!
//! This module contains the string-backed identifier types for people and
//! locations. Identifiers come straight from the sensor and directory exports,
//! so the only invariant enforced here is that they are not blank.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Error returned when an identifier is empty or whitespace-only
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} identifier must not be empty")]
pub struct EmptyIdentifierError {
    /// Which kind of identifier was rejected ("person" or "location")
    pub kind: &'static str,
}

/// Unique identifier for a person
///
/// Person ids are free-standing: an id observed by a sensor does not need to
/// match any known [`Person`](crate::campus::Person).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(String);

impl PersonId {
    /// Create a person id, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyIdentifierError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EmptyIdentifierError { kind: "person" });
        }
        Ok(Self(id))
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PersonId {
    type Error = EmptyIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.0
    }
}

impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a campus location
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationId(String);

impl LocationId {
    /// Create a location id, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, EmptyIdentifierError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EmptyIdentifierError { kind: "location" });
        }
        Ok(Self(id))
    }

    /// Build an id from a non-empty compile-time constant
    pub(crate) fn from_static(id: &'static str) -> Self {
        debug_assert!(!id.trim().is_empty());
        Self(id.to_string())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LocationId {
    type Error = EmptyIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LocationId> for String {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl Borrow<str> for LocationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
