//! Error types and handling
//!
//! This module contains the error type shared by ingestion, chronology
//! mutation and query-shape validation.

use chrono::NaiveTime;
use thiserror::Error;

/// Errors that can occur while loading data or mutating the tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A time value could not be parsed
    #[error("Invalid time value '{value}', expected HH:MM:SS or HH:MM")]
    InvalidTime {
        /// The rejected text
        value: String,
    },

    /// A required identifier was empty
    #[error("Empty identifier in field '{field}'")]
    EmptyIdentifier {
        /// Name of the offending field
        field: &'static str,
    },

    /// An observation or relationship referenced a location that does not exist
    #[error("Unknown location '{location_id}'")]
    UnknownLocation {
        /// The unresolved location id
        location_id: String,
    },

    /// A role string did not match any known role
    #[error("Invalid role '{value}'")]
    InvalidRole {
        /// The rejected text
        value: String,
    },

    /// An appended observation precedes the latest recorded event
    #[error("Observation at {time} precedes the latest recorded event at {latest}")]
    OutOfOrderObservation {
        /// Time of the rejected observation
        time: NaiveTime,
        /// Start of the most recent event in the chronology
        latest: NaiveTime,
    },

    /// A query window ends before it starts
    #[error("Time window ends at {end} before it starts at {start}")]
    InvertedWindow {
        /// Window start
        start: NaiveTime,
        /// Window end
        end: NaiveTime,
    },

    /// A window reaching back `hours` from `end` would cross midnight
    #[error("Cannot look back {hours} hours from {end} without crossing midnight")]
    WindowBeforeMidnight {
        /// End of the requested window
        end: NaiveTime,
        /// Requested look-back
        hours: u32,
    },

    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TrackerError {
    /// Create an invalid time error
    pub fn invalid_time(value: impl Into<String>) -> Self {
        Self::InvalidTime { value: value.into() }
    }

    /// Create an empty identifier error
    pub fn empty_identifier(field: &'static str) -> Self {
        Self::EmptyIdentifier { field }
    }

    /// Create an unknown location error
    pub fn unknown_location(location_id: impl Into<String>) -> Self {
        Self::UnknownLocation { location_id: location_id.into() }
    }

    /// Create an invalid role error
    pub fn invalid_role(value: impl Into<String>) -> Self {
        Self::InvalidRole { value: value.into() }
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error must stop the program
    ///
    /// Ingestion and configuration failures leave the tracker without a usable
    /// dataset. The remaining variants only reject a single request.
    pub fn is_fatal(&self) -> bool {
        match self {
            TrackerError::Io(_)
            | TrackerError::Serialization(_)
            | TrackerError::InvalidTime { .. }
            | TrackerError::EmptyIdentifier { .. }
            | TrackerError::UnknownLocation { .. }
            | TrackerError::InvalidRole { .. }
            | TrackerError::Configuration(_) => true,
            TrackerError::OutOfOrderObservation { .. }
            | TrackerError::InvertedWindow { .. }
            | TrackerError::WindowBeforeMidnight { .. } => false,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            TrackerError::Io(_) => "IO",
            TrackerError::Serialization(_) => "Serialization",
            TrackerError::InvalidTime { .. }
            | TrackerError::EmptyIdentifier { .. }
            | TrackerError::UnknownLocation { .. }
            | TrackerError::InvalidRole { .. } => "Ingestion",
            TrackerError::OutOfOrderObservation { .. } => "Chronology",
            TrackerError::InvertedWindow { .. } | TrackerError::WindowBeforeMidnight { .. } => {
                "Query"
            }
            TrackerError::Configuration(_) => "Configuration",
        }
    }
}

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
