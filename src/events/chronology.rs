//! Chronology reconstruction
//!
//! This module contains the Chronology struct, which turns unordered sensor
//! observations into a single time-ordered event history. Each person's
//! events form a gap-free timeline: an event ends exactly when the person's
//! next event starts, and the most recent event stays open.

use crate::campus::EntityStore;
use crate::events::movement_event::{MovementEvent, Observation};
use crate::tracker::error::{TrackerError, TrackerResult};
use crate::types::{PersonId, TimeWindow};
use std::collections::HashMap;
use tracing::{debug, info};

/// Ordered event history of the day
#[derive(Debug, Clone, Default)]
pub struct Chronology {
    /// All events, sorted by start time
    events: Vec<MovementEvent>,
    /// Index of each person's open (most recent) event
    open_events: HashMap<PersonId, usize>,
    /// Indices of each person's events, in history order
    person_events: HashMap<PersonId, Vec<usize>>,
}

impl Chronology {
    /// Create an empty chronology
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct the event history from unordered observations
    ///
    /// Every location id must resolve in `store`; person ids need not.
    /// Observations sharing a timestamp keep their input order.
    pub fn build(mut observations: Vec<Observation>, store: &EntityStore) -> TrackerResult<Self> {
        if let Some(unknown) =
            observations.iter().find(|obs| !store.contains_location(obs.location_id.as_str()))
        {
            return Err(TrackerError::unknown_location(unknown.location_id.as_str()));
        }

        observations.sort_by_key(|obs| obs.time);

        let mut chronology = Self::new();
        chronology.events.reserve(observations.len());
        for observation in observations {
            let resolved = store.contains_person(observation.person_id.as_str());
            chronology.push(observation, resolved);
        }

        info!(
            events = chronology.events.len(),
            people = chronology.person_events.len(),
            unresolved = chronology.events.iter().filter(|e| !e.is_resolved()).count(),
            "Chronology built"
        );
        Ok(chronology)
    }

    /// Append one observation after the history has been built
    ///
    /// The observation must not precede the most recent event, so the history
    /// stays sorted without reordering.
    pub fn append(
        &mut self,
        observation: Observation,
        store: &EntityStore,
    ) -> TrackerResult<&MovementEvent> {
        if !store.contains_location(observation.location_id.as_str()) {
            return Err(TrackerError::unknown_location(observation.location_id.as_str()));
        }
        if let Some(latest) = self.events.last() {
            if observation.time < latest.start {
                return Err(TrackerError::OutOfOrderObservation {
                    time: observation.time,
                    latest: latest.start,
                });
            }
        }

        let resolved = store.contains_person(observation.person_id.as_str());
        let idx = self.push(observation, resolved);
        debug!(event = %self.events[idx], "Observation appended");
        Ok(&self.events[idx])
    }

    fn push(&mut self, observation: Observation, resolved: bool) -> usize {
        let idx = self.events.len();
        let person_id = observation.person_id.clone();

        if let Some(previous) = self.open_events.insert(person_id.clone(), idx) {
            self.events[previous].close(observation.time);
        }
        self.person_events.entry(person_id).or_default().push(idx);
        self.events.push(MovementEvent::open(observation, resolved));
        idx
    }

    /// Set the resolution flag of every event of one person
    ///
    /// Times and locations are left untouched. Returns the number of events
    /// belonging to the person.
    pub fn relink_person(&mut self, person_id: &str, resolved: bool) -> usize {
        let Some(indices) = self.person_events.get(person_id) else {
            return 0;
        };
        for &idx in indices {
            self.events[idx].set_resolved(resolved);
        }
        debug!(person_id, resolved, events = indices.len(), "Person re-linked");
        indices.len()
    }

    /// Refresh the resolution flag of every event against `store`
    pub fn relink_all(&mut self, store: &EntityStore) {
        for event in &mut self.events {
            let resolved = store.contains_person(event.person_id.as_str());
            event.set_resolved(resolved);
        }
    }

    /// All events in history order
    pub fn events(&self) -> &[MovementEvent] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the history holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Ids of every person with at least one event, in order of first appearance
    pub fn person_ids(&self) -> Vec<&PersonId> {
        let mut ids: Vec<(&PersonId, usize)> = self
            .person_events
            .iter()
            .filter_map(|(id, indices)| indices.first().map(|&first| (id, first)))
            .collect();
        ids.sort_by_key(|&(_, first)| first);
        ids.into_iter().map(|(id, _)| id).collect()
    }

    /// The person's open event, i.e. their last known location
    pub fn current_event(&self, person_id: &str) -> Option<&MovementEvent> {
        self.open_events.get(person_id).map(|&idx| &self.events[idx])
    }

    /// Open events of every person, in history order
    pub fn open_events(&self) -> impl Iterator<Item = &MovementEvent> {
        self.events.iter().filter(|event| event.is_open())
    }

    /// All events of a person, in history order
    pub fn events_of_person(&self, person_id: &str) -> Vec<&MovementEvent> {
        self.person_event_indices(person_id).iter().map(|&idx| &self.events[idx]).collect()
    }

    /// Events of a person intersecting `window`, in history order
    ///
    /// `window` is assumed not to be inverted.
    pub fn events_of_person_in_window(
        &self,
        person_id: &str,
        window: &TimeWindow,
    ) -> Vec<&MovementEvent> {
        self.person_indices_in_window(person_id, window)
            .into_iter()
            .map(|idx| &self.events[idx])
            .collect()
    }

    /// The person's first event intersecting `window`
    pub fn first_event_in_window(
        &self,
        person_id: &str,
        window: &TimeWindow,
    ) -> Option<&MovementEvent> {
        self.person_event_indices(person_id)
            .iter()
            .map(|&idx| &self.events[idx])
            .find(|event| event.intersects_window(window))
    }

    pub(crate) fn person_indices_in_window(&self, person_id: &str, window: &TimeWindow) -> Vec<usize> {
        self.person_event_indices(person_id)
            .iter()
            .copied()
            .filter(|&idx| self.events[idx].intersects_window(window))
            .collect()
    }

    fn person_event_indices(&self, person_id: &str) -> &[usize] {
        self.person_events.get(person_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
