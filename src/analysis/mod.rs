//! Analysis engines over the event history
//!
//! - **occupancy**: per-location headcounts, now or over a window
//! - **contacts**: overlapping events of a person and their digest
//! - **access_control**: role/identity violations and capacity alerts

pub mod access_control;
pub mod contacts;
pub mod occupancy;

// Re-export all public types for convenience
pub use access_control::{
    capacity_alerts, capacity_levels, scan_violations, violates_restriction, AccessViolation,
    CapacityAlert, CapacityLevel, ViolationKind,
};
pub use contacts::{trace, Contact, ContactSummary, ContactedPerson};
pub use occupancy::{OccupancyMode, OccupancyReport};
