//! Entity store and id-based lookup
//!
//! This module contains the EntityStore struct, which owns the location and
//! people collections in insertion order and keeps hash indices for O(1)
//! resolution by id.

use crate::campus::{location::Location, person::Person};
use crate::types::PersonId;
use std::collections::HashMap;
use tracing::warn;

/// Locations and people known to the tracker
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// All locations, in import order
    locations: Vec<Location>,
    /// All people, in import order
    people: Vec<Person>,
    /// Quick lookup map from location id to index
    location_index: HashMap<String, usize>,
    /// Quick lookup map from person id to index
    person_index: HashMap<String, usize>,
}

impl EntityStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from imported collections
    ///
    /// Entries whose id is already present are skipped with a warning.
    pub fn from_parts(locations: Vec<Location>, people: Vec<Person>) -> Self {
        let mut store = Self::new();
        for location in locations {
            let id = location.id.clone();
            if !store.add_location(location) {
                warn!(location_id = %id, "Duplicate location id in import, keeping the first entry");
            }
        }
        store.replace_people(people);
        store
    }

    /// Add a location, returning `false` if the id is already taken
    pub fn add_location(&mut self, location: Location) -> bool {
        if self.location_index.contains_key(location.id.as_str()) {
            return false;
        }
        self.location_index.insert(location.id.as_str().to_string(), self.locations.len());
        self.locations.push(location);
        true
    }

    /// Get a location by id
    pub fn get_location(&self, location_id: &str) -> Option<&Location> {
        self.location_index.get(location_id).and_then(|&idx| self.locations.get(idx))
    }

    /// Check whether a location id resolves
    pub fn contains_location(&self, location_id: &str) -> bool {
        self.location_index.contains_key(location_id)
    }

    /// Get all locations
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Get total number of locations
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Add a person, returning `false` if the id is already taken
    pub fn add_person(&mut self, person: Person) -> bool {
        if self.person_index.contains_key(person.id.as_str()) {
            return false;
        }
        self.person_index.insert(person.id.as_str().to_string(), self.people.len());
        self.people.push(person);
        true
    }

    /// Remove a person by id, returning the removed entry
    pub fn remove_person(&mut self, person_id: &PersonId) -> Option<Person> {
        let idx = self.person_index.remove(person_id.as_str())?;
        let removed = self.people.remove(idx);
        self.rebuild_person_index();
        Some(removed)
    }

    /// Replace the whole people collection (bulk import)
    ///
    /// Duplicate ids within `people` keep their first occurrence.
    pub fn replace_people(&mut self, people: Vec<Person>) {
        self.people.clear();
        self.person_index.clear();
        for person in people {
            let id = person.id.clone();
            if !self.add_person(person) {
                warn!(person_id = %id, "Duplicate person id in import, keeping the first entry");
            }
        }
    }

    /// Get a person by id
    pub fn get_person(&self, person_id: &str) -> Option<&Person> {
        self.person_index.get(person_id).and_then(|&idx| self.people.get(idx))
    }

    /// Check whether a person id resolves
    pub fn contains_person(&self, person_id: &str) -> bool {
        self.person_index.contains_key(person_id)
    }

    /// Get all people
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Get total number of people
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    fn rebuild_person_index(&mut self) {
        self.person_index = self
            .people
            .iter()
            .enumerate()
            .map(|(idx, person)| (person.id.as_str().to_string(), idx))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LocationId, Role};

    fn person(id: &str, name: &str, role: Role) -> Person {
        Person::new(PersonId::new(id).unwrap(), name, role)
    }

    fn location(id: &str, capacity: u32) -> Location {
        Location::new(LocationId::new(id).unwrap(), format!("Room {}", id), capacity, None)
    }

    #[test]
    fn test_add_and_lookup_location() {
        let mut store = EntityStore::new();
        assert!(store.add_location(location("A1", 10)));
        assert!(!store.add_location(location("A1", 99)));

        assert_eq!(store.location_count(), 1);
        assert_eq!(store.get_location("A1").unwrap().maximum_capacity, 10);
        assert!(store.get_location("Z9").is_none());
    }

    #[test]
    fn test_add_duplicate_person_is_refused() {
        let mut store = EntityStore::new();
        assert!(store.add_person(person("2", "Pedro Santos", Role::Student)));
        assert!(!store.add_person(person("2", "Repeated", Role::Student)));
        assert_eq!(store.person_count(), 1);
        assert_eq!(store.get_person("2").unwrap().name, "Pedro Santos");
    }

    #[test]
    fn test_remove_person_keeps_indices_consistent() {
        let mut store = EntityStore::from_parts(
            vec![],
            vec![
                person("1", "Carlos Sousa", Role::Student),
                person("2", "Pedro Santos", Role::Student),
                person("3", "Ana Ribeiro", Role::Student),
            ],
        );

        let removed = store.remove_person(&PersonId::new("1").unwrap()).unwrap();
        assert_eq!(removed.name, "Carlos Sousa");
        assert_eq!(store.person_count(), 2);
        assert_eq!(store.get_person("3").unwrap().name, "Ana Ribeiro");
        assert!(store.remove_person(&PersonId::new("1").unwrap()).is_none());
    }

    #[test]
    fn test_from_parts_skips_duplicates() {
        let store = EntityStore::from_parts(
            vec![location("A1", 10), location("A1", 20), location("A2", 5)],
            vec![person("1", "First", Role::Other), person("1", "Second", Role::Other)],
        );
        assert_eq!(store.location_count(), 2);
        assert_eq!(store.person_count(), 1);
        assert_eq!(store.get_person("1").unwrap().name, "First");
    }
}
