//! Minute-of-day time model.
//!
//! All schedule arithmetic happens on integer minutes since midnight. Clock
//! strings (`"HH:MM"`) only appear at the edges: parsing user or wire input
//! and formatting output. Every value handed out by the editor is a multiple
//! of [`SNAP_MINUTES`] inside `[0, 1440]`.
//!
//! ```rust
//! use dayplan_core::time::{minutes_to_time_string, position_to_minutes, TimeOfDay};
//!
//! // 9.2 hours down a 60px-per-hour grid snaps to 09:15.
//! let minutes = position_to_minutes(552.0, 60.0, 0);
//! assert_eq!(minutes, 555);
//! assert_eq!(minutes_to_time_string(minutes), "09:15");
//!
//! let time: TimeOfDay = "24:00".parse().unwrap();
//! assert_eq!(time.minutes(), 1440);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Grid resolution in minutes.
pub const SNAP_MINUTES: i32 = 15;

/// Shortest block the editor will ever produce.
pub const MIN_DURATION_MINUTES: i32 = 30;

/// First minute of the day.
pub const DAY_START_MINUTES: i32 = 0;

/// One past the last minute of the day (`24:00`).
pub const DAY_END_MINUTES: i32 = 24 * 60;

/// Rounds a raw minute value to the nearest grid line.
///
/// Values beyond what `i32` can hold saturate at the outermost grid line.
pub fn snap(minutes: f64) -> i32 {
    let limit = f64::from(i32::MAX / SNAP_MINUTES);
    let steps = (minutes / f64::from(SNAP_MINUTES)).round().clamp(-limit, limit);
    steps as i32 * SNAP_MINUTES
}

/// Converts a vertical pixel offset inside the grid into a snapped
/// minute-of-day value.
///
/// `pixels_per_hour` is the cell height of one hour row and `day_start_hour`
/// the hour shown at offset zero. The result is not clamped; callers decide
/// whether an out-of-grid position is meaningful.
pub fn position_to_minutes(pixel_offset: f64, pixels_per_hour: f64, day_start_hour: u32) -> i32 {
    let hours = pixel_offset / pixels_per_hour;
    snap(hours * 60.0 + f64::from(day_start_hour) * 60.0)
}

/// Clamps a minute value to `[day_start, day_end]`.
pub fn clamp(minutes: i32, day_start: i32, day_end: i32) -> i32 {
    minutes.max(day_start).min(day_end)
}

/// Formats minutes since midnight as `HH:MM`.
///
/// Values outside the day are clamped first so the output always parses back.
pub fn minutes_to_time_string(minutes: i32) -> String {
    let minutes = clamp(minutes, DAY_START_MINUTES, DAY_END_MINUTES);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses `HH:MM` into minutes since midnight.
///
/// Hours run 00–23 and minutes 00–59; `24:00` is accepted as the end of the
/// day.
pub fn parse_time_string(value: &str) -> Result<i32> {
    let invalid =
        || PlannerError::invalid_input("time").with_reason(format!("'{value}' must be HH:MM"));

    let (hour_str, minute_str) = value.trim().split_once(':').ok_or_else(invalid)?;
    if hour_str.len() != 2 || minute_str.len() != 2 {
        return Err(invalid());
    }
    let hour: i32 = hour_str.parse().map_err(|_| invalid())?;
    let minute: i32 = minute_str.parse().map_err(|_| invalid())?;

    match (hour, minute) {
        (24, 0) => Ok(DAY_END_MINUTES),
        (0..=23, 0..=59) => Ok(hour * 60 + minute),
        _ => Err(invalid()),
    }
}

/// Formats minutes since midnight on a 12-hour clock, e.g. `9:00 AM`.
pub fn format_12_hour(minutes: i32) -> String {
    let minutes = clamp(minutes, DAY_START_MINUTES, DAY_END_MINUTES);
    let hours = (minutes / 60) % 24;
    let hour12 = if hours % 12 == 0 { 12 } else { hours % 12 };
    let suffix = if hours >= 12 { "PM" } else { "AM" };
    format!("{hour12}:{:02} {suffix}", minutes % 60)
}

/// Hour axis label, e.g. `9 AM`, `12 PM`.
pub fn hour_label(hour: u32) -> String {
    let hour12 = if hour % 12 == 0 { 12 } else { hour % 12 };
    let suffix = if hour % 24 >= 12 { "PM" } else { "AM" };
    format!("{hour12} {suffix}")
}

/// A minute-of-day value in `[0, 1440]`.
///
/// Serialized as an `HH:MM` string, which is how time fields cross the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// `24:00`, the end of the day.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(DAY_END_MINUTES as u16);

    /// Creates a time from minutes since midnight.
    pub fn from_minutes(minutes: i32) -> Result<Self> {
        if !(DAY_START_MINUTES..=DAY_END_MINUTES).contains(&minutes) {
            return Err(PlannerError::invalid_input("time")
                .with_reason(format!("{minutes} is outside 00:00-24:00")));
        }
        Ok(Self(minutes as u16))
    }

    /// Creates a time, clamping out-of-day values to the nearest bound.
    pub fn clamped(minutes: i32) -> Self {
        Self(clamp(minutes, DAY_START_MINUTES, DAY_END_MINUTES) as u16)
    }

    /// Builds a time from hour and minute components.
    pub fn hm(hour: u8, minute: u8) -> Result<Self> {
        Self::from_minutes(i32::from(hour) * 60 + i32::from(minute))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> i32 {
        i32::from(self.0)
    }

    /// Whether the value sits on a 15-minute grid line.
    pub fn is_on_grid(self) -> bool {
        self.minutes() % SNAP_MINUTES == 0
    }

    /// 12-hour clock rendering.
    pub fn to_12_hour(self) -> String {
        format_12_hour(self.minutes())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&minutes_to_time_string(self.minutes()))
    }
}

impl FromStr for TimeOfDay {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time_string(s).and_then(Self::from_minutes)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// A validated block of time: on the grid, ordered, at least
/// [`MIN_DURATION_MINUTES`] long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeRange {
    /// Validates and builds a range.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if !start.is_on_grid() || !end.is_on_grid() {
            return Err(PlannerError::invalid_input("time").with_reason(format!(
                "{start}-{end} must align to {SNAP_MINUTES}-minute increments"
            )));
        }
        if end.minutes() - start.minutes() < MIN_DURATION_MINUTES {
            return Err(PlannerError::invalid_input("endTime").with_reason(format!(
                "{start}-{end} must span at least {MIN_DURATION_MINUTES} minutes"
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from minute values the caller has already clamped and
    /// ordered. Used by gesture math, which maintains the invariants itself.
    pub(crate) fn from_minutes(start: i32, end: i32) -> Self {
        Self {
            start: TimeOfDay::clamped(start),
            end: TimeOfDay::clamped(end),
        }
    }

    /// Parses a pair of `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(start.parse()?, end.parse()?)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Length in minutes.
    pub fn duration_minutes(&self) -> i32 {
        self.end.minutes() - self.start.minutes()
    }

    /// Moves the whole range by `delta` minutes, keeping its duration and
    /// pushing it back inside `[lower, upper]` when an edge would leave it.
    pub fn shifted(&self, delta: i32, lower: i32, upper: i32) -> Self {
        let duration = self.duration_minutes();
        let mut start = self.start.minutes() + delta;
        let mut end = start + duration;

        if start < lower {
            start = lower;
            end = start + duration;
        }
        if end > upper {
            end = upper;
            start = end - duration;
        }
        Self::from_minutes(start, end)
    }

    /// Moves one edge by `delta` minutes.
    ///
    /// The grabbed edge stops [`MIN_DURATION_MINUTES`] short of the anchored
    /// one, then both edges are kept inside `[lower, upper]`.
    pub fn resized(&self, edge: Edge, delta: i32, lower: i32, upper: i32) -> Self {
        let mut start = self.start.minutes();
        let mut end = self.end.minutes();

        match edge {
            Edge::Top => {
                start += delta;
                if end - start < MIN_DURATION_MINUTES {
                    start = end - MIN_DURATION_MINUTES;
                }
            }
            Edge::Bottom => {
                end += delta;
                if end - start < MIN_DURATION_MINUTES {
                    end = start + MIN_DURATION_MINUTES;
                }
            }
        }

        start = start.min(upper - MIN_DURATION_MINUTES).max(lower);
        end = end.min(upper).max(start + MIN_DURATION_MINUTES);
        Self::from_minutes(start, end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start.to_12_hour(), self.end.to_12_hour())
    }
}

/// Which edge of a block a resize handle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
}

impl FromStr for Edge {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" | "start" => Ok(Edge::Top),
            "bottom" | "end" => Ok(Edge::Bottom),
            _ => Err(format!("Invalid edge: {s}")),
        }
    }
}
