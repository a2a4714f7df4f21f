//! Campus entities and the location graph
//!
//! This module holds the Entity Store (locations and people with id-based
//! lookup) and the weighted location graph used for evacuation routing.
//!
//! # Overview
//!
//! - **Location**: a monitored room or area with a capacity and optional role restriction
//! - **Person**: an entry of the people directory
//! - **EntityStore**: ordered collections plus O(1) lookup by id
//! - **LocationGraph**: undirected weighted graph with a synthetic emergency spot
//!
//! # Usage Example
//!
//! ```rust
//! use campus_movement_tracker::campus::*;
//! use campus_movement_tracker::types::*;
//!
//! let lobby = Location::new(LocationId::new("SA").unwrap(), "Reception Hall", 20, None);
//! let mut store = EntityStore::new();
//! assert!(store.add_location(lobby));
//!
//! let graph = LocationGraph::build(
//!     &store,
//!     &[Relationship { from: "SA".into(), to: EMERGENCY_SPOT_ID.into(), distance: 10.0 }],
//! );
//! let route = graph.route_to_emergency("SA").unwrap();
//! assert_eq!(route.cost, 10.0);
//! ```

pub mod graph;
pub mod location;
pub mod person;
pub mod registry;

// Re-export all public types for convenience
pub use graph::{LocationGraph, Relationship, Route, EMERGENCY_SPOT_ID};
pub use location::Location;
pub use person::Person;
pub use registry::EntityStore;
