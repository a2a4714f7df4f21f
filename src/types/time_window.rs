//! Time-of-day parsing and query windows
//!
//! All observations belong to a single day, so times are plain wall-clock
//! [`NaiveTime`] values.

use crate::tracker::error::{TrackerError, TrackerResult};
use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse a wall-clock time (`HH:MM:SS`, `HH:MM:SS.fff` or `HH:MM`)
pub fn parse_clock_time(value: &str) -> TrackerResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
        // chrono accepts a leap second (":60") in any minute
        .filter(|time| time.nanosecond() < 1_000_000_000)
        .ok_or_else(|| TrackerError::invalid_time(value))
}

/// Last representable instant of the day, used as the open end of query windows
pub fn end_of_day() -> NaiveTime {
    NaiveTime::MIN - Duration::nanoseconds(1)
}

/// Inclusive time window `[start, end]`
///
/// The core engines assume `start <= end`. Windows built from user input must
/// go through [`TimeWindow::checked`], which rejects inverted ranges; the
/// unchecked constructor exists for windows derived from trusted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First instant included in the window
    pub start: NaiveTime,
    /// Last instant included in the window
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Create a window without validating its orientation
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Create a window, rejecting `end < start`
    pub fn checked(start: NaiveTime, end: NaiveTime) -> TrackerResult<Self> {
        if end < start {
            return Err(TrackerError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the whole day
    pub fn whole_day() -> Self {
        Self { start: NaiveTime::MIN, end: end_of_day() }
    }

    /// Window from `start` until the end of the day
    pub fn from_until_end_of_day(start: NaiveTime) -> Self {
        Self { start, end: end_of_day() }
    }

    /// Window of `hours` hours ending at `end`
    ///
    /// Fails when the window would reach back past midnight.
    pub fn hours_before(end: NaiveTime, hours: u32) -> TrackerResult<Self> {
        if hours > end.hour() {
            return Err(TrackerError::WindowBeforeMidnight { end, hours });
        }
        let start = end - Duration::hours(i64::from(hours));
        Ok(Self { start, end })
    }

    /// Check whether a single instant falls inside the window
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.start.format("%H:%M:%S"), self.end.format("%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_parse_clock_time_formats() {
        assert_eq!(parse_clock_time("13:55:31").unwrap(), hms(13, 55, 31));
        assert_eq!(parse_clock_time("08:05").unwrap(), hms(8, 5, 0));
        assert_eq!(
            parse_clock_time("09:00:00.250").unwrap(),
            NaiveTime::from_hms_milli_opt(9, 0, 0, 250).unwrap()
        );
    }

    #[test]
    fn test_parse_clock_time_rejects_garbage() {
        for bad in ["", "25:00:00", "noon", "12-30-00", "10:15:60", "23:59:60", "23:59:60.5"] {
            match parse_clock_time(bad) {
                Err(TrackerError::InvalidTime { .. }) => {}
                other => panic!("Expected InvalidTime for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_last_valid_second_stays_inside_the_day() {
        let last = parse_clock_time("23:59:59.999").unwrap();
        assert!(TimeWindow::whole_day().contains(last));
    }

    #[test]
    fn test_checked_window_rejects_inverted_range() {
        assert!(TimeWindow::checked(hms(12, 0, 0), hms(12, 0, 0)).is_ok());
        match TimeWindow::checked(hms(13, 0, 0), hms(12, 0, 0)) {
            Err(TrackerError::InvertedWindow { .. }) => {}
            other => panic!("Expected InvertedWindow, got {:?}", other),
        }
    }

    #[test]
    fn test_whole_day_covers_every_instant() {
        let day = TimeWindow::whole_day();
        assert!(day.contains(NaiveTime::MIN));
        assert!(day.contains(hms(23, 59, 59)));
        assert_eq!(end_of_day(), NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap());
    }

    #[test]
    fn test_hours_before() {
        let window = TimeWindow::hours_before(hms(15, 30, 0), 2).unwrap();
        assert_eq!(window.start, hms(13, 30, 0));
        assert_eq!(window.end, hms(15, 30, 0));

        assert!(TimeWindow::hours_before(hms(1, 15, 0), 1).is_ok());
        match TimeWindow::hours_before(hms(1, 15, 0), 2) {
            Err(TrackerError::WindowBeforeMidnight { hours: 2, .. }) => {}
            other => panic!("Expected WindowBeforeMidnight, got {:?}", other),
        }
    }
}
