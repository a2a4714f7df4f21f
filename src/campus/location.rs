//! Campus locations
//!
//! This module contains the Location struct: a room or area monitored by the
//! movement sensors, with a maximum capacity and an optional role restriction.

use crate::types::{deserialize_restriction, LocationId, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monitored location on campus
///
/// Occupancy is not stored here. It is recomputed from the chronology for
/// every query (see [`crate::analysis::occupancy`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier for the location
    pub id: LocationId,
    /// Human-readable name of the location
    pub name: String,
    /// Maximum number of people allowed at the same time
    pub maximum_capacity: u32,
    /// Role this location is restricted to, `None` when open to everyone
    #[serde(default, deserialize_with = "deserialize_restriction")]
    pub restricted_to: Option<Role>,
}

impl Location {
    /// Create a new location
    pub fn new(
        id: LocationId,
        name: impl Into<String>,
        maximum_capacity: u32,
        restricted_to: Option<Role>,
    ) -> Self {
        Self { id, name: name.into(), maximum_capacity, restricted_to }
    }

    /// Check whether the location carries a role restriction
    pub fn is_restricted(&self) -> bool {
        self.restricted_to.is_some()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_creation() {
        let location = Location::new(
            LocationId::new("T1").unwrap(),
            "Staff Room",
            8,
            Some(Role::Teacher),
        );

        assert!(location.is_restricted());
        assert_eq!(location.maximum_capacity, 8);
        assert_eq!(location.to_string(), "Staff Room (T1)");
    }

    #[test]
    fn test_restriction_parsing_variants() {
        let restricted: Location = serde_json::from_str(
            r#"{ "id": "G1", "name": "Workshop", "maximum_capacity": 2, "restricted_to": "WORKER" }"#,
        )
        .unwrap();
        assert_eq!(restricted.restricted_to, Some(Role::Worker));

        let empty: Location = serde_json::from_str(
            r#"{ "id": "A1", "name": "Auditorium", "maximum_capacity": 120, "restricted_to": "" }"#,
        )
        .unwrap();
        assert_eq!(empty.restricted_to, None);

        let absent: Location =
            serde_json::from_str(r#"{ "id": "A2", "name": "Classroom", "maximum_capacity": 2 }"#)
                .unwrap();
        assert_eq!(absent.restricted_to, None);

        let null: Location = serde_json::from_str(
            r#"{ "id": "A3", "name": "Classroom", "maximum_capacity": 30, "restricted_to": null }"#,
        )
        .unwrap();
        assert_eq!(null.restricted_to, None);
    }

    #[test]
    fn test_invalid_restriction_is_rejected() {
        let result = serde_json::from_str::<Location>(
            r#"{ "id": "X", "name": "X", "maximum_capacity": 1, "restricted_to": "DEAN" }"#,
        );
        assert!(result.is_err());

        let negative = serde_json::from_str::<Location>(
            r#"{ "id": "X", "name": "X", "maximum_capacity": -1 }"#,
        );
        assert!(negative.is_err());
    }
}
