//! Result wrapper types for displaying operation outcomes.
//!
//! Create and update results print a one-line summary followed by the
//! resource itself; updates also list what changed, as produced by
//! [`EventPatch::describe`](crate::models::EventPatch::describe) and
//! [`TaskPatch::describe`](crate::models::TaskPatch::describe).
//!
//! ```rust
//! use dayplan_core::{display::UpdateResult, models::{Event, EventPatch}};
//! use dayplan_core::time::TimeRange;
//! use jiff::{civil::date, Timestamp};
//!
//! let range = TimeRange::parse("09:45", "10:45").unwrap();
//! let event = Event {
//!     id: 3,
//!     title: "Focus".to_string(),
//!     start_time: range.start(),
//!     end_time: range.end(),
//!     date: date(2025, 1, 15),
//!     resource_id: "plan-a".to_string(),
//!     color: "#3b82f6".to_string(),
//!     is_crossed_off: false,
//!     is_editable: true,
//!     created_at: Timestamp::UNIX_EPOCH,
//!     updated_at: Timestamp::UNIX_EPOCH,
//! };
//!
//! let output = UpdateResult::with_changes(event, EventPatch::times(range).describe()).to_string();
//! assert!(output.contains("- Moved to 09:45-10:45"));
//! ```

use std::fmt;

use crate::models::{Event, Task};

fn fmt_changes(f: &mut fmt::Formatter<'_>, changes: &[String]) -> fmt::Result {
    if changes.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "Changes made:")?;
    for change in changes {
        writeln!(f, "- {change}")?;
    }
    Ok(())
}

/// Outcome of a create operation.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Event> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created event with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource.details())
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of an update, with an optional list of changes.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Event> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated event with ID: {}", self.resource.id)?;
        fmt_changes(f, &self.changes)?;
        writeln!(f)?;
        write!(f, "{}", self.resource.details())
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task with ID: {}", self.resource.id)?;
        fmt_changes(f, &self.changes)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Event> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted event '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted task '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}
