//! Occupancy engine
//!
//! Headcounts per location, computed into a fresh report on every call.
//! Every known location appears in the report, zero counts included.

use crate::campus::EntityStore;
use crate::events::{Chronology, MovementEvent};
use crate::types::{LocationId, TimeWindow};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// How events were selected for counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OccupancyMode {
    /// Open events only: who is where right now
    Snapshot,
    /// Events intersecting the window
    Window(TimeWindow),
}

impl fmt::Display for OccupancyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccupancyMode::Snapshot => write!(f, "now"),
            OccupancyMode::Window(window) => write!(f, "{}", window),
        }
    }
}

/// Per-location headcount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyReport {
    mode: OccupancyMode,
    counts: BTreeMap<LocationId, usize>,
}

impl OccupancyReport {
    /// Count the open events of every person
    pub fn snapshot(store: &EntityStore, chronology: &Chronology) -> Self {
        Self::tally(store, OccupancyMode::Snapshot, chronology.open_events())
    }

    /// Count events intersecting `window` (inclusive at both ends)
    ///
    /// A person moving during the window counts at every location they visited.
    /// `window` is assumed not to be inverted.
    pub fn in_window(store: &EntityStore, chronology: &Chronology, window: TimeWindow) -> Self {
        let events = chronology.events().iter().filter(|event| event.intersects_window(&window));
        Self::tally(store, OccupancyMode::Window(window), events)
    }

    fn tally<'a>(
        store: &EntityStore,
        mode: OccupancyMode,
        events: impl Iterator<Item = &'a MovementEvent>,
    ) -> Self {
        let mut counts: BTreeMap<LocationId, usize> =
            store.locations().iter().map(|location| (location.id.clone(), 0)).collect();
        for event in events {
            if let Some(count) = counts.get_mut(event.location_id.as_str()) {
                *count += 1;
            }
        }
        Self { mode, counts }
    }

    /// Selection mode the report was computed with
    pub fn mode(&self) -> OccupancyMode {
        self.mode
    }

    /// Headcount of one location (0 for unknown ids)
    pub fn get(&self, location_id: &str) -> usize {
        self.counts.get(location_id).copied().unwrap_or(0)
    }

    /// All headcounts, ordered by location id
    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, usize)> {
        self.counts.iter().map(|(id, &count)| (id, count))
    }

    /// Locations with at least one person, ordered by location id
    pub fn occupied(&self) -> impl Iterator<Item = (&LocationId, usize)> {
        self.iter().filter(|&(_, count)| count > 0)
    }

    /// Sum over all locations
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campus::Location;
    use crate::events::Observation;
    use crate::types::PersonId;
    use chrono::NaiveTime;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn setup() -> (EntityStore, Chronology) {
        let locations = ["A1", "A2", "A3"]
            .iter()
            .map(|id| Location::new(LocationId::new(*id).unwrap(), *id, 10, None))
            .collect();
        let store = EntityStore::from_parts(locations, vec![]);
        let observations = [
            ("1", "A1", hms(9, 0, 0)),
            ("1", "A2", hms(10, 0, 0)),
            ("2", "A2", hms(9, 30, 0)),
            ("3", "A1", hms(11, 0, 0)),
        ]
        .iter()
        .map(|(p, l, t)| {
            Observation::new(PersonId::new(*p).unwrap(), LocationId::new(*l).unwrap(), *t)
        })
        .collect();
        let chronology = Chronology::build(observations, &store).unwrap();
        (store, chronology)
    }

    #[test]
    fn test_snapshot_counts_open_events() {
        let (store, chronology) = setup();
        let report = OccupancyReport::snapshot(&store, &chronology);
        assert_eq!(report.get("A1"), 1);
        assert_eq!(report.get("A2"), 2);
        assert_eq!(report.get("A3"), 0);
        assert_eq!(report.total(), 3);
        assert_eq!(report.iter().count(), 3);
        assert_eq!(report.occupied().count(), 2);
        assert_eq!(report.mode(), OccupancyMode::Snapshot);
    }

    #[test]
    fn test_window_counts_every_visit() {
        let (store, chronology) = setup();
        let report =
            OccupancyReport::in_window(&store, &chronology, TimeWindow::new(hms(9, 45, 0), hms(10, 0, 0)));
        assert_eq!(report.get("A1"), 1);
        assert_eq!(report.get("A2"), 2);

        let early =
            OccupancyReport::in_window(&store, &chronology, TimeWindow::new(hms(8, 0, 0), hms(8, 59, 59)));
        assert_eq!(early.total(), 0);
    }

    #[test]
    fn test_reports_are_independent() {
        let (store, chronology) = setup();
        let first =
            OccupancyReport::in_window(&store, &chronology, TimeWindow::new(hms(9, 0, 0), hms(12, 0, 0)));
        let snapshot = OccupancyReport::snapshot(&store, &chronology);
        let again =
            OccupancyReport::in_window(&store, &chronology, TimeWindow::new(hms(9, 0, 0), hms(12, 0, 0)));
        assert_eq!(first, again);
        assert_ne!(first.total(), snapshot.total());
    }
}
