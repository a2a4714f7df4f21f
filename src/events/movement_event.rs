//! Observations and movement events
//!
//! An [`Observation`] is a raw sensor reading: a person id seen at a location at
//! a given time. The chronology turns observations into [`MovementEvent`]s,
//! which also carry an inferred end time.

use crate::tracker::error::{TrackerError, TrackerResult};
use crate::types::{parse_clock_time, LocationId, PersonId, TimeWindow};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observation as stored in the movements file, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Location where the person was seen
    pub location_id: String,
    /// Person seen by the sensor
    pub person_id: String,
    /// Wall-clock time of the reading
    pub time: String,
}

/// A validated sensor reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Person seen by the sensor
    pub person_id: PersonId,
    /// Location where the person was seen
    pub location_id: LocationId,
    /// Time of the reading
    pub time: NaiveTime,
}

impl Observation {
    /// Create a new observation
    pub fn new(person_id: PersonId, location_id: LocationId, time: NaiveTime) -> Self {
        Self { person_id, location_id, time }
    }
}

impl TryFrom<ObservationRecord> for Observation {
    type Error = TrackerError;

    fn try_from(record: ObservationRecord) -> TrackerResult<Self> {
        let person_id =
            PersonId::new(record.person_id).map_err(|_| TrackerError::empty_identifier("person_id"))?;
        let location_id = LocationId::new(record.location_id)
            .map_err(|_| TrackerError::empty_identifier("location_id"))?;
        let time = parse_clock_time(&record.time)?;
        Ok(Self { person_id, location_id, time })
    }
}

/// End of a movement event
///
/// The most recent event of a person stays `Open`: their last known location
/// holds until the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventEnd {
    /// No later observation of this person yet
    Open,
    /// Closed by the person's next observation
    Closed(NaiveTime),
}

impl EventEnd {
    /// Check whether the event lasts at least until `time`
    pub fn is_at_or_after(&self, time: NaiveTime) -> bool {
        match self {
            EventEnd::Open => true,
            EventEnd::Closed(end) => *end >= time,
        }
    }

    /// The closing time, if any
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            EventEnd::Open => None,
            EventEnd::Closed(end) => Some(*end),
        }
    }
}

impl fmt::Display for EventEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventEnd::Open => write!(f, "end of day"),
            EventEnd::Closed(end) => write!(f, "{}", end.format("%H:%M:%S")),
        }
    }
}

/// A stay of one person at one location
///
/// `person_id`, `location_id` and `start` never change once the event exists.
/// Two events are equal when those three fields match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementEvent {
    /// Person the event belongs to
    pub person_id: PersonId,
    /// Location of the stay
    pub location_id: LocationId,
    /// Time the person was observed at the location
    pub start: NaiveTime,
    /// Time the person was next observed elsewhere, or open
    pub end: EventEnd,
    /// Whether `person_id` currently matches a known person
    resolved: bool,
}

impl MovementEvent {
    pub(crate) fn open(observation: Observation, resolved: bool) -> Self {
        Self {
            person_id: observation.person_id,
            location_id: observation.location_id,
            start: observation.time,
            end: EventEnd::Open,
            resolved,
        }
    }

    pub(crate) fn close(&mut self, end: NaiveTime) {
        debug_assert!(self.start <= end);
        self.end = EventEnd::Closed(end);
    }

    pub(crate) fn set_resolved(&mut self, resolved: bool) {
        self.resolved = resolved;
    }

    /// Whether the event's person id matches a known person
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Whether this is the person's most recent event
    pub fn is_open(&self) -> bool {
        self.end == EventEnd::Open
    }

    /// Inclusive overlap with a query window
    pub fn intersects_window(&self, window: &TimeWindow) -> bool {
        self.end.is_at_or_after(window.start) && window.end >= self.start
    }

    /// Inclusive overlap of the two time intervals, ignoring location
    pub fn intervals_intersect(&self, other: &MovementEvent) -> bool {
        self.end.is_at_or_after(other.start) && other.end.is_at_or_after(self.start)
    }

    /// Same location and intersecting time intervals
    pub fn overlaps(&self, other: &MovementEvent) -> bool {
        self.location_id == other.location_id && self.intervals_intersect(other)
    }
}

impl PartialEq for MovementEvent {
    fn eq(&self, other: &Self) -> bool {
        self.person_id == other.person_id
            && self.location_id == other.location_id
            && self.start == other.start
    }
}

impl Eq for MovementEvent {}

impl fmt::Display for MovementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} from {} to {}",
            self.person_id,
            self.location_id,
            self.start.format("%H:%M:%S"),
            self.end
        )
    }
}
