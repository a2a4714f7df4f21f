// Campus Movement Tracker - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/campus-tracker locate 7
// ```
//
// Or against other input files:
//
// ```console
// $ ./target/release/campus-tracker --map-file map.json --movements-file day.json alerts -v
// ```

use anyhow::{bail, Context, Result};
use campus_movement_tracker::analysis::ViolationKind;
use campus_movement_tracker::campus::{Location, Person, Route};
use campus_movement_tracker::events::MovementEvent;
use campus_movement_tracker::tracker::{loader, CampusTracker, LoggingConfig, LoggingGuard};
use campus_movement_tracker::types::{
    CliArgs, Command, PeopleCommand, PersonId, TimeWindow, TrackerConfig,
};
use chrono::NaiveTime;
use clap::Parser;
use std::process;
use tracing::{error, info, Level};

fn main() {
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require loading any data
    if args.print_config {
        match TrackerConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let config = match TrackerConfig::from_cli_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let _logging_guard = match init_logging(&args, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Campus Movement Tracker");

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    let mut tracker = match CampusTracker::load(&config) {
        Ok(tracker) => tracker,
        Err(e) => {
            error!(category = e.category(), "Failed to load tracker data: {}", e);
            process::exit(1);
        }
    };

    if args.dry_run {
        eprintln!("Input files loaded and validated successfully!");
        eprintln!("Dry run mode - no query will be answered.");
        print_data_summary(&tracker);
        return;
    }

    let Some(command) = args.command else {
        print_data_summary(&tracker);
        eprintln!("\nNo command given. Run with --help to list the available queries.");
        return;
    };

    if let Err(e) = run_command(&mut tracker, command) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn init_logging(args: &CliArgs, config: &TrackerConfig) -> Result<LoggingGuard, String> {
    let mut logging = if args.debug {
        LoggingConfig::new().with_level(Level::DEBUG).with_span_events()
    } else if args.verbose {
        LoggingConfig::new().with_level(Level::INFO).with_span_events()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new()
    };
    if args.json_logs {
        logging = logging.with_json_format();
    }
    if let Some(directory) = &config.log_directory {
        logging = logging.with_file_logging(directory.clone());
    }
    logging.init().map_err(|e| e.to_string())
}

fn run_command(tracker: &mut CampusTracker, command: Command) -> Result<()> {
    match command {
        Command::Locate { person_id } => locate(tracker, &person_id),
        Command::LocateAll => locate_all(tracker),
        Command::History { person_id, from, to } => {
            let window = optional_window(from, to)?;
            history(tracker, &person_id, window.as_ref())
        }
        Command::FirstLocation { person_id, from, to } => {
            let window = TimeWindow::checked(from, to)?;
            first_location(tracker, &person_id, &window)
        }
        Command::Contacts { person_id, from, to, last_hours } => {
            contacts(tracker, &person_id, optional_window(from, to)?, last_hours)
        }
        Command::Alerts => alerts(tracker),
        Command::Occupancy { from, to } => occupancy(tracker, optional_window(from, to)?),
        Command::Evacuate { person_id } => evacuate(tracker, person_id.as_deref()),
        Command::Map => map(tracker),
        Command::People(command) => people(tracker, command),
    }
}

/// Reject inverted windows before they reach the engines
fn optional_window(from: Option<NaiveTime>, to: Option<NaiveTime>) -> Result<Option<TimeWindow>> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(TimeWindow::checked(from, to)?)),
        (None, None) => Ok(None),
        _ => bail!("--from and --to must be given together"),
    }
}

fn person_label(tracker: &CampusTracker, person_id: &str) -> String {
    match tracker.store().get_person(person_id) {
        Some(person) => person.to_string(),
        None => format!("Unknown ({})", person_id),
    }
}

fn location_label(tracker: &CampusTracker, event: &MovementEvent) -> String {
    tracker
        .store()
        .get_location(event.location_id.as_str())
        .map(Location::to_string)
        .unwrap_or_else(|| event.location_id.to_string())
}

fn hhmmss(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

fn print_stay(tracker: &CampusTracker, event: &MovementEvent) {
    println!(
        "  {} - {:<10}  {}",
        hhmmss(event.start),
        event.end.to_string(),
        location_label(tracker, event)
    );
}

fn locate(tracker: &CampusTracker, person_id: &str) -> Result<()> {
    let label = person_label(tracker, person_id);
    match tracker.current_event(person_id) {
        Some(event) => println!(
            "{} is at {} since {}",
            label,
            location_label(tracker, event),
            hhmmss(event.start)
        ),
        None => println!("No movements recorded for {}", label),
    }
    Ok(())
}

fn locate_all(tracker: &CampusTracker) -> Result<()> {
    for (person, event) in tracker.locate_all() {
        match event {
            Some(event) => println!("{}: {}", person, location_label(tracker, event)),
            None => println!("{}: no movements recorded", person),
        }
    }
    Ok(())
}

fn history(tracker: &CampusTracker, person_id: &str, window: Option<&TimeWindow>) -> Result<()> {
    let events = tracker.history(person_id, window);
    match window {
        Some(window) => println!("Movements of {} in {}:", person_label(tracker, person_id), window),
        None => println!("Movements of {}:", person_label(tracker, person_id)),
    }
    if events.is_empty() {
        println!("  (none)");
    }
    for event in events {
        print_stay(tracker, event);
    }
    Ok(())
}

fn first_location(tracker: &CampusTracker, person_id: &str, window: &TimeWindow) -> Result<()> {
    let label = person_label(tracker, person_id);
    match tracker.first_location(person_id, window) {
        Some(event) => println!("{} was first at {} in {}", label, location_label(tracker, event), window),
        None => println!("{} was not seen in {}", label, window),
    }
    Ok(())
}

fn contacts(
    tracker: &CampusTracker,
    person_id: &str,
    window: Option<TimeWindow>,
    last_hours: Option<u32>,
) -> Result<()> {
    let found = match last_hours {
        Some(hours) => tracker
            .contacts_in_last_hours(person_id, hours)
            .with_context(|| format!("Cannot trace the last {} hours of {}", hours, person_id))?,
        None => tracker.contacts(person_id, &window.unwrap_or_else(TimeWindow::whole_day)),
    };

    for contact in &found {
        println!(
            "  {} at {} ({} - {})",
            person_label(tracker, contact.event.person_id.as_str()),
            location_label(tracker, contact.event),
            hhmmss(contact.event.start),
            contact.event.end
        );
    }

    let person_id = PersonId::new(person_id)?;
    let summary = tracker.contact_summary(&person_id, &found);
    if summary.is_empty() {
        println!("{} had no contacts", summary.person);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

fn alerts(tracker: &CampusTracker) -> Result<()> {
    let violations = tracker.violations();
    println!("Access violations ({}):", violations.len());
    for violation in &violations {
        let who = match violation.kind {
            ViolationKind::UnknownPerson => format!("Unknown ({})", violation.event.person_id),
            ViolationKind::RoleRestriction { .. } => {
                person_label(tracker, violation.event.person_id.as_str())
            }
        };
        println!(
            "  {} {} at {}: {}",
            hhmmss(violation.event.start),
            who,
            location_label(tracker, violation.event),
            violation.kind
        );
    }

    let alerts = tracker.capacity_alerts();
    println!("Capacity alerts ({}):", alerts.len());
    for alert in &alerts {
        println!("  {}", alert);
    }
    Ok(())
}

fn occupancy(tracker: &CampusTracker, window: Option<TimeWindow>) -> Result<()> {
    let report = tracker.occupancy(window);
    println!("Occupancy ({}):", report.mode());
    for location in tracker.store().locations() {
        println!(
            "  {:<30} {:>4}/{}",
            location.to_string(),
            report.get(location.id.as_str()),
            location.maximum_capacity
        );
    }
    Ok(())
}

fn print_route(label: &str, route: Option<Route>) {
    match route {
        Some(route) => println!("{}: {}", label, route),
        None => println!("{}: no route", label),
    }
}

fn evacuate(tracker: &CampusTracker, person_id: Option<&str>) -> Result<()> {
    match person_id {
        Some(person_id) => {
            print_route(&person_label(tracker, person_id), tracker.emergency_route(person_id))
        }
        None => {
            for (person, route) in tracker.emergency_routes_for_all() {
                print_route(&person.to_string(), route);
            }
        }
    }
    Ok(())
}

fn map(tracker: &CampusTracker) -> Result<()> {
    for (id, neighbours) in tracker.topology() {
        let links: Vec<String> =
            neighbours.iter().map(|(to, distance)| format!("{} ({} m)", to, distance)).collect();
        println!("{}: {}", id, if links.is_empty() { "-".to_string() } else { links.join(", ") });
    }
    Ok(())
}

fn people(tracker: &mut CampusTracker, command: PeopleCommand) -> Result<()> {
    match command {
        PeopleCommand::List => {
            for person in tracker.store().people() {
                println!("{:<6} {:<30} {}", person.id, person.name, person.role);
            }
        }
        PeopleCommand::Add { id, name, role } => {
            let role = loader::parse_role(&role)?;
            let person = Person::new(PersonId::new(id)?, name, role);
            let label = person.to_string();
            if !tracker.add_person(person) {
                bail!("A person with this id already exists: {}", label);
            }
            tracker.save_people().context("Failed to export the people file")?;
            println!("Added {}", label);
        }
        PeopleCommand::Remove { person_id } => {
            let person_id = PersonId::new(person_id)?;
            let Some(removed) = tracker.remove_person(&person_id) else {
                bail!("No person with id {}", person_id);
            };
            tracker.save_people().context("Failed to export the people file")?;
            println!("Removed {}", removed);
        }
    }
    Ok(())
}

fn print_data_summary(tracker: &CampusTracker) {
    eprintln!("\nLoaded Data:");
    eprintln!("  Locations: {}", tracker.store().location_count());
    eprintln!("  People: {}", tracker.store().person_count());
    eprintln!("  Movement events: {}", tracker.chronology().len());
    eprintln!(
        "  Graph: {} vertices, {} edges",
        tracker.graph().vertex_count(),
        tracker.graph().edge_count()
    );
}
