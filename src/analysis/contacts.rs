//! Contact tracing
//!
//! A contact is any other event at the same location whose interval overlaps
//! one of the traced person's own events in the query window.

use crate::campus::EntityStore;
use crate::events::{Chronology, MovementEvent};
use crate::types::{PersonId, TimeWindow};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// One overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contact<'a> {
    /// The contacted event
    pub event: &'a MovementEvent,
    /// The traced person's event it overlaps
    pub during: &'a MovementEvent,
}

/// Every contact of `person_id` within `window`
///
/// Results follow history order of the contacted event. An event overlapping
/// several of the person's own events is reported once per overlapping pair.
/// The person's other events count too when they share the location and
/// touch in time. `window` is assumed not to be inverted.
pub fn trace<'a>(
    chronology: &'a Chronology,
    person_id: &str,
    window: &TimeWindow,
) -> Vec<Contact<'a>> {
    let own = chronology.person_indices_in_window(person_id, window);
    if own.is_empty() {
        return Vec::new();
    }

    let events = chronology.events();
    let mut contacts = Vec::new();
    for (idx, event) in events.iter().enumerate() {
        for &own_idx in &own {
            if idx != own_idx && event.overlaps(&events[own_idx]) {
                contacts.push(Contact { event, during: &events[own_idx] });
            }
        }
    }
    contacts
}

/// A distinct person met by the traced person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactedPerson {
    /// Id seen on the contacted events
    pub id: PersonId,
    /// Display name, when the id resolves
    pub name: Option<String>,
}

impl fmt::Display for ContactedPerson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "Unknown ({})", self.id),
        }
    }
}

/// Human-readable digest of a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSummary {
    /// The traced person
    pub person: ContactedPerson,
    /// Distinct other people, in order of first contact
    pub contacts: Vec<ContactedPerson>,
}

impl ContactSummary {
    /// Collapse a trace into distinct other people
    ///
    /// Unresolved ids are kept and shown as unknown.
    pub fn from_trace(store: &EntityStore, person_id: &PersonId, contacts: &[Contact<'_>]) -> Self {
        let resolve = |id: &PersonId| ContactedPerson {
            id: id.clone(),
            name: store.get_person(id.as_str()).map(|person| person.name.clone()),
        };

        let mut seen = HashSet::new();
        let people = contacts
            .iter()
            .map(|contact| &contact.event.person_id)
            .filter(|id| *id != person_id && seen.insert(*id))
            .map(|id| resolve(id))
            .collect();

        Self { person: resolve(person_id), contacts: people }
    }

    /// Whether the person met nobody
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl fmt::Display for ContactSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.contacts.iter().map(ToString::to_string).collect();
        write!(f, "{} had contact with {{{}}}", self.person, names.join(", "))
    }
}
