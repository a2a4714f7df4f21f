//! JSON import and export
//!
//! Reads the map, people and movements files into validated values. Any
//! malformed record aborts the load; a missing people file does not.

use crate::campus::{Location, Person, Relationship};
use crate::events::{Observation, ObservationRecord};
use crate::tracker::error::{TrackerError, TrackerResult};
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, info, instrument, warn};

/// Contents of the map file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampusMap {
    /// Monitored locations
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Walking connections between locations
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Load locations and relationships
#[instrument]
pub fn load_map(path: &Path) -> TrackerResult<CampusMap> {
    let content = fs::read_to_string(path)?;
    let map: CampusMap = serde_json::from_str(&content)?;
    info!(
        locations = map.locations.len(),
        relationships = map.relationships.len(),
        "Map loaded"
    );
    Ok(map)
}

/// Load the people directory
///
/// A missing file yields an empty directory.
#[instrument]
pub fn load_people(path: &Path) -> TrackerResult<Vec<Person>> {
    if !path.exists() {
        warn!("People file not found, starting with an empty directory");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let people: Vec<Person> = serde_json::from_str(&content)?;
    info!(people = people.len(), "People loaded");
    Ok(people)
}

/// Load and validate the movement observations
///
/// The first record with an empty id or an unparseable time aborts the load.
#[instrument]
pub fn load_observations(path: &Path) -> TrackerResult<Vec<Observation>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<ObservationRecord> = serde_json::from_str(&content)?;

    let observations = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            Observation::try_from(record).map_err(|e| {
                error!(record = idx, error = %e, "Rejected movement record");
                e
            })
        })
        .collect::<TrackerResult<Vec<_>>>()?;

    info!(observations = observations.len(), "Movements loaded");
    Ok(observations)
}

/// Write the people directory in the same shape it is read
#[instrument(skip(people), fields(people = people.len()))]
pub fn export_people(path: &Path, people: &[Person]) -> TrackerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(people)?;
    fs::write(path, json)?;
    info!("People exported");
    Ok(())
}

/// Parse a role given on the command line
pub fn parse_role(value: &str) -> TrackerResult<Role> {
    value.parse().map_err(|_| TrackerError::invalid_role(value))
}
