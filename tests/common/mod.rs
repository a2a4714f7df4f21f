//! Shared helpers for the integration tests
//!
//! The fixture dataset under `tests/fixtures/` describes one campus day:
//! eleven locations, seven known people and 26 shuffled observations, one
//! visitor (id 55) being unknown to the directory.

#![allow(dead_code)]

use campus_movement_tracker::*;
use chrono::NaiveTime;
use std::fs;
use std::path::{Path, PathBuf};

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

pub fn fixture_config() -> TrackerConfig {
    TrackerConfig {
        map_file: fixture_path("campus_map.json"),
        movements_file: fixture_path("movements.json"),
        people_file: fixture_path("people.json"),
        log_directory: None,
    }
}

/// Tracker loaded from the read-only fixture files
pub fn fixture_tracker() -> CampusTracker {
    CampusTracker::load(&fixture_config()).expect("fixture dataset must load")
}

/// Copy the fixtures into `dir` so that people exports do not touch them
pub fn writable_config(dir: &Path) -> TrackerConfig {
    for name in ["campus_map.json", "movements.json", "people.json"] {
        fs::copy(fixture_path(name), dir.join(name)).expect("copy fixture");
    }
    TrackerConfig {
        map_file: dir.join("campus_map.json"),
        movements_file: dir.join("movements.json"),
        people_file: dir.join("people.json"),
        log_directory: None,
    }
}

pub fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

pub fn window(start: &str, end: &str) -> TimeWindow {
    TimeWindow::checked(parse_clock_time(start).unwrap(), parse_clock_time(end).unwrap()).unwrap()
}

pub fn location_ids(events: &[&MovementEvent]) -> Vec<String> {
    events.iter().map(|e| e.location_id.to_string()).collect()
}

pub fn contact_ids(contacts: &[Contact<'_>]) -> Vec<String> {
    contacts.iter().map(|c| c.event.person_id.to_string()).collect()
}

pub fn route_ids(route: &Route) -> Vec<&str> {
    route.path.iter().map(LocationId::as_str).collect()
}
