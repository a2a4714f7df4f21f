//! Tracker session, file loading, errors and logging
//!
//! # Overview
//!
//! - **CampusTracker**: owns the store, the chronology and the graph, and answers queries
//! - **loader**: JSON import of the map, people and movements files, and people export
//! - **TrackerError**: error type for ingestion, mutation and query-shape failures
//! - **LoggingConfig**: tracing subscriber setup
//!
//! # Usage Example
//!
//! ```rust
//! use campus_movement_tracker::campus::*;
//! use campus_movement_tracker::events::Observation;
//! use campus_movement_tracker::tracker::*;
//! use campus_movement_tracker::types::*;
//!
//! let map = CampusMap {
//!     locations: vec![Location::new(LocationId::new("SA").unwrap(), "Reception Hall", 20, None)],
//!     relationships: vec![Relationship { from: "SA".into(), to: EMERGENCY_SPOT_ID.into(), distance: 10.0 }],
//! };
//! let observations = vec![Observation::new(
//!     PersonId::new("7").unwrap(),
//!     LocationId::new("SA").unwrap(),
//!     parse_clock_time("16:45").unwrap(),
//! )];
//!
//! let tracker = CampusTracker::new(map, vec![], observations)?;
//! assert_eq!(tracker.emergency_route("7").unwrap().cost, 10.0);
//! assert_eq!(tracker.violations().len(), 1);
//! # Ok::<(), TrackerError>(())
//! ```

pub mod campus_tracker;
pub mod error;
pub mod loader;
pub mod logging;

// Re-export all public types for convenience
pub use campus_tracker::CampusTracker;
pub use error::{TrackerError, TrackerResult};
pub use loader::CampusMap;
pub use logging::{LoggingConfig, LoggingGuard};
