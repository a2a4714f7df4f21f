//! Campus tracker facade
//!
//! This module contains the CampusTracker, which owns the entity store, the
//! chronology and the location graph, keeps them consistent across mutations,
//! and exposes the query surface used by the command line.

use crate::analysis::{
    access_control, contacts, AccessViolation, CapacityAlert, Contact, ContactSummary,
    OccupancyReport,
};
use crate::campus::{EntityStore, Location, LocationGraph, Person, Relationship, Route};
use crate::events::{Chronology, MovementEvent, Observation};
use crate::tracker::error::{TrackerError, TrackerResult};
use crate::tracker::loader::{self, CampusMap};
use crate::types::{LocationId, PersonId, TimeWindow, TrackerConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// In-memory tracking session over one day of observations
#[derive(Debug, Clone)]
pub struct CampusTracker {
    /// Locations and people
    store: EntityStore,
    /// Reconstructed event history
    chronology: Chronology,
    /// Walking graph with the emergency spot
    graph: LocationGraph,
    /// Where people mutations are exported, when loaded from files
    people_file: Option<PathBuf>,
}

impl CampusTracker {
    /// Build a tracker from already-loaded data
    ///
    /// Fails if an observation refers to a location missing from `map`.
    pub fn new(
        map: CampusMap,
        people: Vec<Person>,
        observations: Vec<Observation>,
    ) -> TrackerResult<Self> {
        let store = EntityStore::from_parts(map.locations, people);
        let graph = LocationGraph::build(&store, &map.relationships);
        let chronology = Chronology::build(observations, &store)?;
        Ok(Self { store, chronology, graph, people_file: None })
    }

    /// Load every input file named by `config`
    #[instrument(skip(config), fields(map = %config.map_file.display()))]
    pub fn load(config: &TrackerConfig) -> TrackerResult<Self> {
        config.validate().map_err(|e| TrackerError::configuration(e.to_string()))?;

        let map = loader::load_map(&config.map_file)?;
        let people = loader::load_people(&config.people_file)?;
        let observations = loader::load_observations(&config.movements_file)?;

        let mut tracker = Self::new(map, people, observations)?;
        tracker.people_file = Some(config.people_file.clone());
        info!(
            locations = tracker.store.location_count(),
            people = tracker.store.person_count(),
            events = tracker.chronology.len(),
            "Tracker ready"
        );
        Ok(tracker)
    }

    /// Locations and people
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Reconstructed event history
    pub fn chronology(&self) -> &Chronology {
        &self.chronology
    }

    /// Location graph
    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    // People and locations

    /// Register a person and resolve their existing events
    ///
    /// Returns `false` if the id is already taken.
    pub fn add_person(&mut self, person: Person) -> bool {
        let id = person.id.clone();
        if !self.store.add_person(person) {
            warn!(person_id = %id, "Person already exists");
            return false;
        }
        let events = self.chronology.relink_person(id.as_str(), true);
        info!(person_id = %id, events, "Person added");
        true
    }

    /// Remove a person; their events stay tracked under the bare id
    pub fn remove_person(&mut self, person_id: &PersonId) -> Option<Person> {
        let Some(removed) = self.store.remove_person(person_id) else {
            warn!(person_id = %person_id, "No person with this id");
            return None;
        };
        let events = self.chronology.relink_person(person_id.as_str(), false);
        info!(person_id = %person_id, events, "Person removed");
        Some(removed)
    }

    /// Replace the whole people directory and re-resolve every event
    pub fn import_people(&mut self, people: Vec<Person>) {
        self.store.replace_people(people);
        self.chronology.relink_all(&self.store);
        info!(people = self.store.person_count(), "People imported");
    }

    /// Register a location and add it to the graph
    ///
    /// Returns `false` if the id is already taken.
    pub fn add_location(&mut self, location: Location) -> bool {
        let id = location.id.clone();
        if !self.store.add_location(location) {
            warn!(location_id = %id, "Location already exists");
            return false;
        }
        self.graph.add_vertex(id);
        true
    }

    /// Connect two locations in the graph
    pub fn connect(&mut self, relationship: &Relationship) -> bool {
        self.graph.add_edge(&relationship.from, &relationship.to, relationship.distance)
    }

    /// Append a sensor reading to the history
    ///
    /// The reading must not precede the latest recorded event.
    pub fn append_observation(&mut self, observation: Observation) -> TrackerResult<&MovementEvent> {
        self.chronology.append(observation, &self.store)
    }

    /// Write the people directory to `path`
    pub fn export_people(&self, path: &Path) -> TrackerResult<()> {
        loader::export_people(path, self.store.people())
    }

    /// Write the people directory back to the file it was loaded from
    pub fn save_people(&self) -> TrackerResult<()> {
        let path = self
            .people_file
            .as_deref()
            .ok_or_else(|| TrackerError::configuration("tracker was not loaded from files"))?;
        self.export_people(path)
    }

    // Movement queries

    /// The person's most recent event
    pub fn current_event(&self, person_id: &str) -> Option<&MovementEvent> {
        self.chronology.current_event(person_id)
    }

    /// Location of the person's most recent event
    pub fn current_location(&self, person_id: &str) -> Option<&Location> {
        self.current_event(person_id)
            .and_then(|event| self.store.get_location(event.location_id.as_str()))
    }

    /// Latest event of every known person, in directory order
    pub fn locate_all(&self) -> Vec<(&Person, Option<&MovementEvent>)> {
        self.store
            .people()
            .iter()
            .map(|person| (person, self.current_event(person.id.as_str())))
            .collect()
    }

    /// Events of a person, restricted to `window` when given
    pub fn history(&self, person_id: &str, window: Option<&TimeWindow>) -> Vec<&MovementEvent> {
        match window {
            Some(window) => self.chronology.events_of_person_in_window(person_id, window),
            None => self.chronology.events_of_person(person_id),
        }
    }

    /// First event of a person intersecting `window`
    pub fn first_location(&self, person_id: &str, window: &TimeWindow) -> Option<&MovementEvent> {
        self.chronology.first_event_in_window(person_id, window)
    }

    // Contacts

    /// Contacts of a person within `window`
    pub fn contacts(&self, person_id: &str, window: &TimeWindow) -> Vec<Contact<'_>> {
        contacts::trace(&self.chronology, person_id, window)
    }

    /// Contacts of a person during the `hours` before their latest event
    ///
    /// A person without events has no contacts.
    pub fn contacts_in_last_hours(&self, person_id: &str, hours: u32) -> TrackerResult<Vec<Contact<'_>>> {
        let Some(latest) = self.current_event(person_id) else {
            return Ok(Vec::new());
        };
        let window = TimeWindow::hours_before(latest.start, hours)?;
        debug!(person_id, %window, "Tracing recent contacts");
        Ok(self.contacts(person_id, &window))
    }

    /// Distinct people behind a list of contacts
    pub fn contact_summary(&self, person_id: &PersonId, contacts: &[Contact<'_>]) -> ContactSummary {
        ContactSummary::from_trace(&self.store, person_id, contacts)
    }

    // Access control and occupancy

    /// Access violations in history order
    pub fn violations(&self) -> Vec<AccessViolation<'_>> {
        access_control::scan_violations(&self.store, &self.chronology)
    }

    /// Headcounts now, or over `window` when given
    pub fn occupancy(&self, window: Option<TimeWindow>) -> OccupancyReport {
        match window {
            Some(window) => OccupancyReport::in_window(&self.store, &self.chronology, window),
            None => OccupancyReport::snapshot(&self.store, &self.chronology),
        }
    }

    /// Near- and over-capacity alerts from the current snapshot
    pub fn capacity_alerts(&self) -> Vec<CapacityAlert> {
        access_control::capacity_alerts(&self.store, &self.occupancy(None))
    }

    // Routing

    /// Cheapest evacuation route from a location
    pub fn emergency_route_from(&self, location_id: &str) -> Option<Route> {
        self.graph.route_to_emergency(location_id)
    }

    /// Cheapest evacuation route from the person's last known location
    ///
    /// Access restrictions are ignored.
    pub fn emergency_route(&self, person_id: &str) -> Option<Route> {
        let event = self.current_event(person_id)?;
        self.emergency_route_from(event.location_id.as_str())
    }

    /// Evacuation route of every known person, in directory order
    pub fn emergency_routes_for_all(&self) -> Vec<(&Person, Option<Route>)> {
        self.store
            .people()
            .iter()
            .map(|person| (person, self.emergency_route(person.id.as_str())))
            .collect()
    }

    /// Direct neighbours of a location with their distance
    pub fn neighbours(&self, location_id: &str) -> Vec<(&LocationId, f64)> {
        self.graph.neighbours(location_id)
    }

    /// Adjacency list of every location
    ///
    /// The emergency spot comes last unless the map lists it as a location.
    pub fn topology(&self) -> Vec<(&LocationId, Vec<(&LocationId, f64)>)> {
        let emergency_spot = self.graph.emergency_spot();
        let unlisted_spot = (!self.store.contains_location(emergency_spot.as_str()))
            .then_some(emergency_spot);

        self.store
            .locations()
            .iter()
            .map(|location| &location.id)
            .chain(unlisted_spot)
            .map(|id| (id, self.graph.neighbours(id.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campus::EMERGENCY_SPOT_ID;
    use crate::types::Role;
    use chrono::NaiveTime;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn obs(person: &str, location: &str, time: NaiveTime) -> Observation {
        Observation::new(PersonId::new(person).unwrap(), LocationId::new(location).unwrap(), time)
    }

    fn tracker() -> CampusTracker {
        let loc = |id: &str, capacity, restricted_to| {
            Location::new(LocationId::new(id).unwrap(), format!("Room {}", id), capacity, restricted_to)
        };
        let map = CampusMap {
            locations: vec![loc("SA", 20, None), loc("A1", 1, None), loc("T1", 4, Some(Role::Teacher))],
            relationships: vec![
                Relationship { from: "SA".into(), to: EMERGENCY_SPOT_ID.into(), distance: 10.0 },
                Relationship { from: "A1".into(), to: "SA".into(), distance: 20.0 },
            ],
        };
        let people = vec![
            Person::new(PersonId::new("1").unwrap(), "Carlos Sousa", Role::Student),
            Person::new(PersonId::new("4").unwrap(), "Marta Costa", Role::Teacher),
        ];
        let observations = vec![
            obs("1", "SA", hms(11, 50, 0)),
            obs("1", "A1", hms(12, 15, 0)),
            obs("4", "T1", hms(8, 30, 0)),
            obs("9", "A1", hms(12, 30, 0)),
        ];
        CampusTracker::new(map, people, observations).unwrap()
    }

    #[test]
    fn test_current_location_and_route() {
        let tracker = tracker();
        assert_eq!(tracker.current_location("1").unwrap().id.as_str(), "A1");
        let route = tracker.emergency_route("1").unwrap();
        assert_eq!(route.cost, 30.0);
        assert!(tracker.emergency_route("4").is_none());
        assert!(tracker.emergency_route("nobody").is_none());
    }

    #[test]
    fn test_add_then_remove_person_round_trip() {
        let mut tracker = tracker();
        let starts: Vec<_> = tracker.chronology().events().iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(tracker.violations().len(), 1);

        let person = Person::new(PersonId::new("9").unwrap(), "Rita Almeida", Role::Other);
        assert!(tracker.add_person(person.clone()));
        assert!(!tracker.add_person(person));
        assert!(tracker.violations().is_empty());

        let removed = tracker.remove_person(&PersonId::new("9").unwrap()).unwrap();
        assert_eq!(removed.name, "Rita Almeida");
        assert_eq!(tracker.store().person_count(), 2);
        assert!(tracker.current_event("9").map(|e| !e.is_resolved()).unwrap());
        assert!(tracker.remove_person(&PersonId::new("9").unwrap()).is_none());

        let after: Vec<_> = tracker.chronology().events().iter().map(|e| (e.start, e.end)).collect();
        assert_eq!(starts, after);
    }

    #[test]
    fn test_import_relinks_everything() {
        let mut tracker = tracker();
        tracker.import_people(vec![Person::new(PersonId::new("9").unwrap(), "Rita", Role::Other)]);
        let unknown: Vec<&str> =
            tracker.violations().iter().map(|v| v.event.person_id.as_str()).collect();
        assert_eq!(unknown, vec!["4", "1", "1"]);
    }

    #[test]
    fn test_capacity_alerts_use_snapshot() {
        let tracker = tracker();
        let alerts = tracker.capacity_alerts();
        let over: Vec<&str> = alerts
            .iter()
            .filter(|a| a.level == crate::analysis::CapacityLevel::OverCapacity)
            .map(|a| a.location_id.as_str())
            .collect();
        assert_eq!(over, vec!["A1"]);
    }

    #[test]
    fn test_contacts_in_last_hours() {
        let tracker = tracker();
        let contacts = tracker.contacts_in_last_hours("9", 1).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].event.person_id.as_str(), "1");
        assert!(tracker.contacts_in_last_hours("nobody", 1).unwrap().is_empty());
        assert!(tracker.contacts_in_last_hours("4", 9).is_err());
    }

    #[test]
    fn test_add_location_joins_graph() {
        let mut tracker = tracker();
        let lab = Location::new(LocationId::new("L1").unwrap(), "Computer Lab", 25, None);
        assert!(tracker.add_location(lab.clone()));
        assert!(!tracker.add_location(lab));
        assert!(tracker.emergency_route_from("L1").is_none());

        assert!(tracker.connect(&Relationship { from: "L1".into(), to: "SA".into(), distance: 5.0 }));
        assert_eq!(tracker.emergency_route_from("L1").unwrap().cost, 15.0);
        assert_eq!(tracker.topology().len(), 5);
    }

    #[test]
    fn test_listed_emergency_spot_appears_once_in_topology() {
        let map = CampusMap {
            locations: vec![
                Location::new(LocationId::new("SA").unwrap(), "Reception Hall", 20, None),
                Location::new(LocationId::new(EMERGENCY_SPOT_ID).unwrap(), "Assembly Point", 500, None),
            ],
            relationships: vec![Relationship {
                from: "SA".into(),
                to: EMERGENCY_SPOT_ID.into(),
                distance: 10.0,
            }],
        };
        let tracker = CampusTracker::new(map, vec![], vec![]).unwrap();

        let topology = tracker.topology();
        let ids: Vec<&str> = topology.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["SA", EMERGENCY_SPOT_ID]);
        assert_eq!(topology[1].1.len(), 1);
        assert_eq!(tracker.graph().vertex_count(), 2);
        assert_eq!(tracker.emergency_route_from("SA").unwrap().cost, 10.0);
    }

    #[test]
    fn test_append_observation_moves_person() {
        let mut tracker = tracker();
        tracker.append_observation(obs("1", "SA", hms(13, 0, 0))).unwrap();
        assert_eq!(tracker.current_location("1").unwrap().id.as_str(), "SA");
        assert!(tracker.append_observation(obs("1", "A1", hms(12, 0, 0))).is_err());
    }

    #[test]
    fn test_save_people_requires_file() {
        let tracker = tracker();
        match tracker.save_people() {
            Err(TrackerError::Configuration(_)) => {}
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }
}
