//! Event model: a block of time placed in one plan column on one date.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Resource;
use crate::{
    error::{PlannerError, Result},
    time::{TimeOfDay, TimeRange},
};

/// Title given to blocks drawn on the grid.
pub const DEFAULT_EVENT_TITLE: &str = "New Event";

/// A scheduled block of time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier
    pub id: u64,

    /// Display title
    pub title: String,

    /// Start of the block, on the 15-minute grid
    pub start_time: TimeOfDay,

    /// End of the block, at least 30 minutes after the start
    pub end_time: TimeOfDay,

    /// Calendar date the block belongs to
    pub date: Date,

    /// Plan column the block belongs to (`plan-a`..`plan-d`)
    pub resource_id: String,

    /// Fill color as a CSS hex string
    pub color: String,

    /// Set when a replan struck the block out
    #[serde(default)]
    pub is_crossed_off: bool,

    /// Cleared when a replan froze the block
    #[serde(default = "default_editable")]
    pub is_editable: bool,

    /// Timestamp when the event was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the event was last modified (UTC)
    pub updated_at: Timestamp,
}

fn default_editable() -> bool {
    true
}

impl Event {
    /// Whether any edit (move, resize, rename, delete) may touch this event.
    ///
    /// Plan membership is checked separately by the cutover controller; the
    /// store only knows about the event's own flags.
    pub fn is_mutable(&self) -> bool {
        self.is_editable && !self.is_crossed_off
    }

    /// The event's time range.
    pub fn range(&self) -> TimeRange {
        TimeRange::from_minutes(self.start_time.minutes(), self.end_time.minutes())
    }

    /// Applies a patch, validating the merged time range.
    ///
    /// `updated_at` is left alone; the store stamps it on write.
    pub fn apply(&mut self, patch: &EventPatch) -> Result<()> {
        let start = patch.start_time.unwrap_or(self.start_time);
        let end = patch.end_time.unwrap_or(self.end_time);
        let range = TimeRange::new(start, end)?;

        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(PlannerError::invalid_input("title").with_reason("Title is required"));
            }
            self.title.clone_from(title);
        }
        if let Some(color) = &patch.color {
            self.color.clone_from(color);
        }
        if let Some(crossed_off) = patch.is_crossed_off {
            self.is_crossed_off = crossed_off;
        }
        if let Some(editable) = patch.is_editable {
            self.is_editable = editable;
        }
        self.start_time = range.start();
        self.end_time = range.end();
        Ok(())
    }
}

/// Request to create an event. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub date: Date,
    pub resource_id: String,
    pub range: TimeRange,
    pub color: String,
}

impl NewEvent {
    /// Validates the fields the range type cannot guarantee.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("Title is required"));
        }
        if self.color.trim().is_empty() {
            return Err(PlannerError::invalid_input("color").with_reason("Color is required"));
        }
        if self.resource_id.trim().is_empty() {
            return Err(PlannerError::invalid_input("resourceId").with_reason("Plan is required"));
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and the event must also belong to
    /// one of `resources`.
    pub fn validate_for(&self, resources: &[Resource]) -> Result<()> {
        self.validate()?;
        if !resources.iter().any(|r| r.id == self.resource_id) {
            return Err(PlannerError::invalid_input("resourceId")
                .with_reason(format!("Unknown plan '{}'", self.resource_id)));
        }
        Ok(())
    }
}

/// Partial update for an event. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub color: Option<String>,
    pub is_crossed_off: Option<bool>,
    pub is_editable: Option<bool>,
}

impl EventPatch {
    /// Patch that moves or resizes an event.
    pub fn times(range: TimeRange) -> Self {
        Self {
            start_time: Some(range.start()),
            end_time: Some(range.end()),
            ..Self::default()
        }
    }

    /// Patch that renames an event.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Patch applied to events struck out by a replan.
    pub fn cross_off() -> Self {
        Self {
            is_crossed_off: Some(true),
            is_editable: Some(false),
            ..Self::default()
        }
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Human readable list of what the patch changes, for update summaries.
    pub fn describe(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(format!("Renamed to \"{title}\""));
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => changes.push(format!("Moved to {start}-{end}")),
            (Some(start), None) => changes.push(format!("Start set to {start}")),
            (None, Some(end)) => changes.push(format!("End set to {end}")),
            (None, None) => {}
        }
        if self.color.is_some() {
            changes.push("Changed color".to_string());
        }
        if self.is_crossed_off == Some(true) {
            changes.push("Crossed off".to_string());
        }
        changes
    }
}
