//! Access control checker and capacity classifier
//!
//! Violations are found by one scan of the event history and are returned in
//! history order. Capacity alerts are evaluated per location against the
//! current occupancy snapshot.

use crate::analysis::occupancy::OccupancyReport;
use crate::campus::EntityStore;
use crate::events::{Chronology, MovementEvent};
use crate::types::{LocationId, Role};
use serde::Serialize;
use std::fmt;

/// Why an event breaks access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    /// The event's person id does not match any known person
    UnknownPerson,
    /// A known person entered a location restricted to another role
    RoleRestriction {
        /// Role of the visitor
        role: Role,
        /// Role the location is reserved for
        restricted_to: Role,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::UnknownPerson => write!(f, "unknown person"),
            ViolationKind::RoleRestriction { role, restricted_to } => {
                write!(f, "{} in a {}-only location", role, restricted_to)
            }
        }
    }
}

/// An event that breaks access policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessViolation<'a> {
    /// The offending event
    pub event: &'a MovementEvent,
    /// What was violated
    pub kind: ViolationKind,
}

/// Whether a visitor with `role` breaches a location restricted to `restricted_to`
///
/// Only Teacher- and Worker-restricted locations are enforced. Student- and
/// Other-restricted locations never raise a violation.
pub fn violates_restriction(restricted_to: Role, role: Role) -> bool {
    match restricted_to {
        Role::Teacher => matches!(role, Role::Worker | Role::Student),
        Role::Worker => matches!(role, Role::Teacher | Role::Student),
        Role::Student | Role::Other => false,
    }
}

/// Classify every event of the history, keeping the violating ones
pub fn scan_violations<'a>(
    store: &EntityStore,
    chronology: &'a Chronology,
) -> Vec<AccessViolation<'a>> {
    chronology
        .events()
        .iter()
        .filter_map(|event| classify(store, event).map(|kind| AccessViolation { event, kind }))
        .collect()
}

fn classify(store: &EntityStore, event: &MovementEvent) -> Option<ViolationKind> {
    let person = event
        .is_resolved()
        .then(|| store.get_person(event.person_id.as_str()))
        .flatten();
    let Some(person) = person else {
        return Some(ViolationKind::UnknownPerson);
    };

    let restricted_to = store.get_location(event.location_id.as_str())?.restricted_to?;
    violates_restriction(restricted_to, person.role)
        .then_some(ViolationKind::RoleRestriction { role: person.role, restricted_to })
}

/// Capacity signal for one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CapacityLevel {
    /// Occupancy within two people of the maximum, maximum included
    NearCapacity,
    /// Occupancy above the maximum
    OverCapacity,
}

impl fmt::Display for CapacityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityLevel::NearCapacity => write!(f, "near capacity"),
            CapacityLevel::OverCapacity => write!(f, "over capacity"),
        }
    }
}

/// A location at or beyond its comfortable capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityAlert {
    /// Location raising the alert
    pub location_id: LocationId,
    /// Display name of the location
    pub name: String,
    /// Current headcount
    pub occupancy: usize,
    /// Declared maximum
    pub maximum_capacity: u32,
    /// Which signal fired
    pub level: CapacityLevel,
}

impl fmt::Display for CapacityAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) is {}: {}/{}",
            self.name, self.location_id, self.level, self.occupancy, self.maximum_capacity
        )
    }
}

/// Signals raised by a headcount against a maximum
pub fn capacity_levels(occupancy: usize, maximum_capacity: u32) -> Vec<CapacityLevel> {
    let maximum = maximum_capacity as usize;
    let mut levels = Vec::new();
    if maximum.saturating_sub(2) <= occupancy && occupancy <= maximum {
        levels.push(CapacityLevel::NearCapacity);
    }
    if occupancy > maximum {
        levels.push(CapacityLevel::OverCapacity);
    }
    levels
}

/// Capacity alerts of every location, in store order
pub fn capacity_alerts(store: &EntityStore, occupancy: &OccupancyReport) -> Vec<CapacityAlert> {
    store
        .locations()
        .iter()
        .flat_map(|location| {
            let count = occupancy.get(location.id.as_str());
            capacity_levels(count, location.maximum_capacity).into_iter().map(move |level| {
                CapacityAlert {
                    location_id: location.id.clone(),
                    name: location.name.clone(),
                    occupancy: count,
                    maximum_capacity: location.maximum_capacity,
                    level,
                }
            })
        })
        .collect()
}
