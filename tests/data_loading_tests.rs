//! Tests for loading malformed or inconsistent input files
//!
//! Every ingestion failure must stop the load with a typed error instead of
//! producing a partial tracker.

mod common;

use campus_movement_tracker::*;
use common::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_map_fails_validation() {
    let dir = tempdir().unwrap();
    let config = writable_config(dir.path());
    fs::remove_file(&config.map_file).unwrap();

    match CampusTracker::load(&config) {
        Err(TrackerError::Configuration(message)) => assert!(message.contains("map")),
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[test]
fn test_observation_at_unknown_location_is_fatal() {
    let dir = tempdir().unwrap();
    let config = writable_config(dir.path());
    fs::write(
        &config.movements_file,
        r#"[
            {"location_id": "SA", "person_id": "1", "time": "08:00:00"},
            {"location_id": "Z9", "person_id": "1", "time": "09:00:00"}
        ]"#,
    )
    .unwrap();

    match CampusTracker::load(&config) {
        Err(err @ TrackerError::UnknownLocation { .. }) => {
            assert!(err.is_fatal());
            assert_eq!(err.to_string(), "Unknown location 'Z9'");
        }
        other => panic!("Expected UnknownLocation error, got {:?}", other),
    }
}

#[test]
fn test_empty_person_id_is_fatal() {
    let dir = tempdir().unwrap();
    let config = writable_config(dir.path());
    fs::write(
        &config.movements_file,
        r#"[{"location_id": "SA", "person_id": "", "time": "08:00:00"}]"#,
    )
    .unwrap();

    match CampusTracker::load(&config) {
        Err(TrackerError::EmptyIdentifier { field }) => assert_eq!(field, "person_id"),
        other => panic!("Expected EmptyIdentifier error, got {:?}", other),
    }
}

#[test]
fn test_leap_second_time_is_fatal() {
    let dir = tempdir().unwrap();
    let config = writable_config(dir.path());
    fs::write(
        &config.movements_file,
        r#"[
            {"location_id": "SA", "person_id": "1", "time": "08:00:00"},
            {"location_id": "A1", "person_id": "1", "time": "23:59:60"}
        ]"#,
    )
    .unwrap();

    match CampusTracker::load(&config) {
        Err(err @ TrackerError::InvalidTime { .. }) => {
            assert!(err.is_fatal());
            assert_eq!(err.category(), "Ingestion");
        }
        other => panic!("Expected InvalidTime error, got {:?}", other),
    }
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let dir = tempdir().unwrap();
    let config = writable_config(dir.path());
    fs::write(&config.map_file, "{ not json").unwrap();

    let err = CampusTracker::load(&config).unwrap_err();
    assert_eq!(err.category(), "Serialization");
}

#[test]
fn test_unknown_role_in_people_file_is_rejected() {
    let dir = tempdir().unwrap();
    let config = writable_config(dir.path());
    fs::write(&config.people_file, r#"[{"id": "1", "name": "Carlos", "role": "JANITOR"}]"#)
        .unwrap();

    assert!(matches!(CampusTracker::load(&config), Err(TrackerError::Serialization(_))));
}

#[test]
fn test_lenient_formats_are_accepted() {
    let dir = tempdir().unwrap();
    let config = writable_config(dir.path());
    fs::write(
        &config.map_file,
        r#"{
            "locations": [
                {"id": "SA", "name": "Reception Hall", "maximum_capacity": 20},
                {"id": "T1", "name": "Staff Room", "maximum_capacity": 8, "restricted_to": "teacher"},
                {"id": "C1", "name": "Cafeteria", "maximum_capacity": 80, "restricted_to": null}
            ]
        }"#,
    )
    .unwrap();
    fs::write(
        &config.movements_file,
        r#"[
            {"location_id": "T1", "person_id": "7", "time": "16:00"},
            {"location_id": "SA", "person_id": "7", "time": "16:45:00.250"}
        ]"#,
    )
    .unwrap();

    let tracker = CampusTracker::load(&config).unwrap();
    assert_eq!(tracker.store().get_location("T1").unwrap().restricted_to, Some(Role::Teacher));
    assert_eq!(tracker.store().get_location("C1").unwrap().restricted_to, None);
    assert_eq!(tracker.graph().edge_count(), 0);
    assert_eq!(tracker.violations().len(), 1);
    assert!(tracker.emergency_route("7").is_none());
}

#[test]
fn test_append_observation_after_load() {
    let mut tracker = fixture_tracker();
    let observation = Observation::new(
        PersonId::new("2").unwrap(),
        LocationId::new("SA").unwrap(),
        hms(19, 0, 0),
    );
    tracker.append_observation(observation).unwrap();
    assert_eq!(tracker.current_location("2").unwrap().id.as_str(), "SA");
    assert_eq!(tracker.occupancy(None).get("A2"), 2);

    let late = Observation::new(
        PersonId::new("1").unwrap(),
        LocationId::new("A1").unwrap(),
        hms(18, 0, 0),
    );
    assert!(matches!(
        tracker.append_observation(late),
        Err(TrackerError::OutOfOrderObservation { .. })
    ));
}
