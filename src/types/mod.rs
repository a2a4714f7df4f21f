//! Core types and identifiers for the campus movement tracker
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the tracker.
//!
//! # Overview
//!
//! - **Identifiers**: non-empty string identifiers for people and locations
//! - **Enums**: the campus [`Role`] shared by people and location restrictions
//! - **Time windows**: wall-clock parsing and inclusive query windows
//! - **Configuration**: CLI arguments, config file and validation
//!
//! # Usage Example
//!
//! ```rust
//! use campus_movement_tracker::types::*;
//!
//! let person_id = PersonId::new("55").unwrap();
//! let location_id = LocationId::new("A2").unwrap();
//! let role: Role = "teacher".parse().unwrap();
//!
//! let window = TimeWindow::checked(
//!     parse_clock_time("12:00:00").unwrap(),
//!     parse_clock_time("13:55:30").unwrap(),
//! )
//! .unwrap();
//! assert!(window.contains(parse_clock_time("13:00").unwrap()));
//! # let _ = (person_id, location_id, role);
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;
pub mod time_window;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
pub use time_window::*;
