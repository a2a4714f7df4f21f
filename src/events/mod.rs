//! Observations, movement events and chronology reconstruction
//!
//! This module turns raw sensor readings into the ordered event history the
//! analysis engines scan.
//!
//! # Overview
//!
//! - **Observation**: a validated `(person, location, time)` sensor reading
//! - **MovementEvent**: a stay at one location, with an inferred end
//! - **EventEnd**: `Open` for a person's latest event, `Closed(t)` otherwise
//! - **Chronology**: the time-ordered history with per-person lookup
//!
//! # Usage Example
//!
//! ```rust
//! use campus_movement_tracker::campus::*;
//! use campus_movement_tracker::events::*;
//! use campus_movement_tracker::types::*;
//!
//! let mut store = EntityStore::new();
//! store.add_location(Location::new(LocationId::new("SA").unwrap(), "Reception Hall", 20, None));
//! store.add_location(Location::new(LocationId::new("A1").unwrap(), "Auditorium", 120, None));
//!
//! let observations = vec![
//!     Observation::new(PersonId::new("1").unwrap(), LocationId::new("A1").unwrap(), parse_clock_time("12:15").unwrap()),
//!     Observation::new(PersonId::new("1").unwrap(), LocationId::new("SA").unwrap(), parse_clock_time("11:50").unwrap()),
//! ];
//! let chronology = Chronology::build(observations, &store).unwrap();
//!
//! let now = chronology.current_event("1").unwrap();
//! assert_eq!(now.location_id.as_str(), "A1");
//! assert_eq!(now.end, EventEnd::Open);
//! ```

pub mod chronology;
pub mod movement_event;

// Re-export all public types for convenience
pub use chronology::Chronology;
pub use movement_event::{EventEnd, MovementEvent, Observation, ObservationRecord};
