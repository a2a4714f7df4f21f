//! Campus Movement Tracker
//!
//! Reconstructs people's movements across a campus from unordered, timestamped
//! sensor observations and answers operational questions over that history.
//!
//! # Overview
//!
//! Sensors report `(person, location, time)` readings in no particular order.
//! The tracker sorts them into a per-person timeline in which each stay ends
//! exactly when the next one starts, and then answers questions over it.
//!
//! ## Key Features
//!
//! - **Chronology**: ordered, gap-free movement history with open last events
//! - **Occupancy**: per-location headcounts now or over any time window
//! - **Contact tracing**: every overlapping stay at the same location
//! - **Access control**: unknown visitors, role-restricted rooms and capacity alerts
//! - **Evacuation routing**: cheapest walking route to the emergency spot (Dijkstra)
//!
//! ## Quick Start
//!
//! ```rust
//! use campus_movement_tracker::*;
//!
//! let map = CampusMap {
//!     locations: vec![
//!         Location::new(LocationId::new("SA").unwrap(), "Reception Hall", 20, None),
//!         Location::new(LocationId::new("A1").unwrap(), "Auditorium", 120, None),
//!     ],
//!     relationships: vec![
//!         Relationship { from: "A1".into(), to: "SA".into(), distance: 20.0 },
//!         Relationship { from: "SA".into(), to: EMERGENCY_SPOT_ID.into(), distance: 10.0 },
//!     ],
//! };
//! let people = vec![Person::new(PersonId::new("1").unwrap(), "Carlos Sousa", Role::Student)];
//! let observations = vec![
//!     Observation::new(PersonId::new("1").unwrap(), LocationId::new("A1").unwrap(), parse_clock_time("12:15")?),
//!     Observation::new(PersonId::new("1").unwrap(), LocationId::new("SA").unwrap(), parse_clock_time("11:50")?),
//! ];
//!
//! let tracker = CampusTracker::new(map, people, observations)?;
//! assert_eq!(tracker.current_location("1").unwrap().name, "Auditorium");
//! assert_eq!(tracker.emergency_route("1").unwrap().cost, 30.0);
//! # Ok::<(), TrackerError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, roles, time windows and configuration
//! - [`campus`]: people, locations, the entity store and the location graph
//! - [`events`]: observations, movement events and the chronology
//! - [`analysis`]: occupancy, contact tracing and access control
//! - [`tracker`]: the session facade, file loading, errors and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Campus    │    │   Events    │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ EntityStore │◄───┤ Chronology  │
//! │ Roles       │    │ Graph       │    │             │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                            ▲                   ▲
//!                            │                   │
//!                    ┌─────────────┐    ┌─────────────┐
//!                    │   Tracker   │    │  Analysis   │
//!                    │             │    │             │
//!                    │ Facade      ├───►│ Occupancy   │
//!                    │ Loader      │    │ Contacts    │
//!                    │ Logging     │    │ Access      │
//!                    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod analysis;
pub mod campus;
pub mod events;
pub mod tracker;
pub mod types;

// Core types and identifiers
pub use types::{
    parse_clock_time, CliArgs, Command, ConfigValidationError, LocationId, PersonId, Role,
    TimeWindow, TrackerConfig,
};

// Campus entities and routing
pub use campus::{
    EntityStore, Location, LocationGraph, Person, Relationship, Route, EMERGENCY_SPOT_ID,
};

// Events and chronology
pub use events::{Chronology, EventEnd, MovementEvent, Observation};

// Analysis engines
pub use analysis::{
    AccessViolation, CapacityAlert, CapacityLevel, Contact, ContactSummary, OccupancyReport,
    ViolationKind,
};

// Tracker session
pub use tracker::{CampusMap, CampusTracker, LoggingConfig, TrackerError, TrackerResult};
