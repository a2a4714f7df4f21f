//! Configuration structures for the campus movement tracker
//!
//! This module contains the command line interface, the optional JSON
//! configuration file and the merged [`TrackerConfig`] with its validation.

use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default input file locations
pub mod defaults {
    /// Map file holding locations and their relationships
    pub const MAP_FILE: &str = "data/campus_map.json";

    /// Movement observations captured by the sensors
    pub const MOVEMENTS_FILE: &str = "data/movements.json";

    /// Known people (optional on disk)
    pub const PEOPLE_FILE: &str = "data/people.json";
}

fn parse_time_arg(value: &str) -> Result<NaiveTime, String> {
    crate::types::parse_clock_time(value).map_err(|e| e.to_string())
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "campus-tracker",
    version,
    about = "Campus Movement Tracker - reconstructs movement history from sensor observations",
    long_about = "Reconstructs each person's movements across campus from unordered sensor observations and answers questions over that history: current locations, contacts, access violations, occupancy and evacuation routes.

EXAMPLES:
    # Where is person 7 right now?
    campus-tracker locate 7

    # Who did person 2 cross paths with this afternoon?
    campus-tracker contacts 2 --from 15:00:00 --to 17:00:00

    # Access violations and capacity alerts
    campus-tracker alerts

    # Evacuation routes for everyone
    campus-tracker evacuate

CONFIGURATION:
    Input file paths can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag, JSON)
    3. Default values (lowest priority)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(short, long, help = "Configuration file path (JSON format)")]
    pub config: Option<String>,

    /// Map file with locations and relationships
    #[arg(long, help = "Map file (locations and relationships)")]
    pub map_file: Option<PathBuf>,

    /// Movement observations file
    #[arg(long, help = "Movement observations file")]
    pub movements_file: Option<PathBuf>,

    /// People file
    #[arg(long, help = "People file (optional on disk)")]
    pub people_file: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, help = "Write JSON logs to a daily rolling file in this directory")]
    pub log_dir: Option<String>,

    /// Emit logs as JSON
    #[arg(long, help = "Emit console logs as JSON")]
    pub json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - load and validate the data without answering a query
    #[arg(long, help = "Load and validate the input files, then exit")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,

    /// Query to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Queries and people-management operations exposed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the current location of a person
    Locate {
        /// Person identifier
        person_id: String,
    },

    /// Show the current location of every known person
    LocateAll,

    /// List the movements of a person, optionally restricted to a time window
    History {
        /// Person identifier
        person_id: String,
        /// Window start (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg, requires = "to")]
        from: Option<NaiveTime>,
        /// Window end (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg, requires = "from")]
        to: Option<NaiveTime>,
    },

    /// Show the first location of a person within a time window
    FirstLocation {
        /// Person identifier
        person_id: String,
        /// Window start (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg)]
        from: NaiveTime,
        /// Window end (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg)]
        to: NaiveTime,
    },

    /// Trace the contacts of a person
    Contacts {
        /// Person identifier
        person_id: String,
        /// Window start (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg, requires = "to", conflicts_with = "last_hours")]
        from: Option<NaiveTime>,
        /// Window end (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg, requires = "from", conflicts_with = "last_hours")]
        to: Option<NaiveTime>,
        /// Only the N hours before the person's most recent movement
        #[arg(long)]
        last_hours: Option<u32>,
    },

    /// Show access violations and capacity alerts
    Alerts,

    /// Show per-location occupancy, now or within a time window
    Occupancy {
        /// Window start (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg, requires = "to")]
        from: Option<NaiveTime>,
        /// Window end (HH:MM:SS)
        #[arg(long, value_parser = parse_time_arg, requires = "from")]
        to: Option<NaiveTime>,
    },

    /// Compute evacuation routes, for one person or for everyone
    Evacuate {
        /// Person identifier (all known people when omitted)
        person_id: Option<String>,
    },

    /// Print every location with its connections
    Map,

    /// Manage the people directory
    #[command(subcommand)]
    People(PeopleCommand),
}

/// People directory operations
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum PeopleCommand {
    /// List known people
    List,

    /// Add a person and export the directory
    Add {
        /// Unique identifier
        #[arg(long)]
        id: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Role (student, teacher, worker, other)
        #[arg(long)]
        role: String,
    },

    /// Remove a person and export the directory
    Remove {
        /// Person identifier
        person_id: String,
    },
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Map file with locations and relationships
    pub map_file: Option<PathBuf>,

    /// Movement observations file
    pub movements_file: Option<PathBuf>,

    /// People file
    pub people_file: Option<PathBuf>,

    /// Directory for rolling log files
    pub log_directory: Option<String>,
}

/// Configuration for a tracker session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackerConfig {
    /// Map file with locations and relationships
    pub map_file: PathBuf,

    /// Movement observations file
    pub movements_file: PathBuf,

    /// People file; a missing file means an empty directory
    pub people_file: PathBuf,

    /// Directory for rolling log files
    pub log_directory: Option<String>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for tracker configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A required path is empty
    #[error("Path for {0} must not be empty")]
    EmptyPath(&'static str),

    /// A required input file does not exist
    #[error("The {kind} file does not exist: {path}")]
    MissingFile {
        /// Which input the file holds
        kind: &'static str,
        /// The path that was checked
        path: String,
    },
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            map_file: PathBuf::from(defaults::MAP_FILE),
            movements_file: PathBuf::from(defaults::MOVEMENTS_FILE),
            people_file: PathBuf::from(defaults::PEOPLE_FILE),
            log_directory: None,
        }
    }
}

impl TrackerConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file, merging with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            map_file: config_file.map_file.unwrap_or(defaults.map_file),
            movements_file: config_file.movements_file.unwrap_or(defaults.movements_file),
            people_file: config_file.people_file.unwrap_or(defaults.people_file),
            log_directory: config_file.log_directory.or(defaults.log_directory),
        }
    }

    fn apply_cli_overrides(config: &mut Self, args: &CliArgs) {
        if let Some(value) = &args.map_file {
            config.map_file = value.clone();
        }
        if let Some(value) = &args.movements_file {
            config.movements_file = value.clone();
        }
        if let Some(value) = &args.people_file {
            config.people_file = value.clone();
        }
        if let Some(value) = &args.log_dir {
            config.log_directory = Some(value.clone());
        }
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration
    ///
    /// The map and movements files are mandatory; the people file may be absent.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.map_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("map_file"));
        }
        if self.movements_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("movements_file"));
        }
        if self.people_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("people_file"));
        }

        if !self.map_file.exists() {
            return Err(ConfigValidationError::MissingFile {
                kind: "map",
                path: self.map_file.display().to_string(),
            });
        }
        if !self.movements_file.exists() {
            return Err(ConfigValidationError::MissingFile {
                kind: "movements",
                path: self.movements_file.display().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_tracker_config_default() {
        let config = TrackerConfig::default();
        assert_eq!(config.map_file, PathBuf::from("data/campus_map.json"));
        assert_eq!(config.movements_file, PathBuf::from("data/movements.json"));
        assert_eq!(config.people_file, PathBuf::from("data/people.json"));
        assert!(config.log_directory.is_none());
    }

    #[test]
    fn test_config_file_loading_merges_defaults() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file
            .write_all(br#"{ "movements_file": "/srv/sensors/today.json" }"#)
            .unwrap();
        temp_file.flush().unwrap();

        let config = TrackerConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.movements_file, PathBuf::from("/srv/sensors/today.json"));
        assert_eq!(config.map_file, PathBuf::from(defaults::MAP_FILE));
    }

    #[test]
    fn test_config_file_unsupported_extension() {
        let temp_file = Builder::new().suffix(".yaml").tempfile().unwrap();
        match TrackerConfig::from_file(temp_file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            other => panic!("Expected UnsupportedFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_file_missing() {
        match TrackerConfig::from_file("/definitely/not/here.json") {
            Err(ConfigError::FileNotFound(_)) => {}
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::try_parse_from([
            "campus-tracker",
            "--map-file",
            "maps/north.json",
            "--log-dir",
            "logs",
            "alerts",
        ])
        .unwrap();

        let config = TrackerConfig::from_cli_args(&args).unwrap();
        assert_eq!(config.map_file, PathBuf::from("maps/north.json"));
        assert_eq!(config.movements_file, PathBuf::from(defaults::MOVEMENTS_FILE));
        assert_eq!(config.log_directory, Some("logs".to_string()));
        assert_eq!(args.command, Some(Command::Alerts));
    }

    #[test]
    fn test_validation_requires_map_and_movements() {
        let map = Builder::new().suffix(".json").tempfile().unwrap();
        let config = TrackerConfig {
            map_file: map.path().to_path_buf(),
            movements_file: PathBuf::from("/missing/movements.json"),
            people_file: PathBuf::from("/missing/people.json"),
            log_directory: None,
        };

        match config.validate() {
            Err(ConfigValidationError::MissingFile { kind: "movements", .. }) => {}
            other => panic!("Expected MissingFile error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_allows_missing_people_file() {
        let map = Builder::new().suffix(".json").tempfile().unwrap();
        let movements = Builder::new().suffix(".json").tempfile().unwrap();
        let config = TrackerConfig {
            map_file: map.path().to_path_buf(),
            movements_file: movements.path().to_path_buf(),
            people_file: PathBuf::from("/missing/people.json"),
            log_directory: None,
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let config = TrackerConfig { map_file: PathBuf::new(), ..TrackerConfig::default() };
        match config.validate() {
            Err(ConfigValidationError::EmptyPath("map_file")) => {}
            other => panic!("Expected EmptyPath error, got {:?}", other),
        }
    }

    #[test]
    fn test_print_json_round_trip() {
        let config = TrackerConfig::default();
        let json = config.print_json().unwrap();
        let parsed: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
