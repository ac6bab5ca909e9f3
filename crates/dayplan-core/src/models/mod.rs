//! Data models for a planned day.
//!
//! Everything the planner persists is keyed by a calendar date: the events
//! placed into plan columns, the task list, a markdown note, the daily
//! metrics and the cutover records produced by replanning. Display
//! implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use dayplan_core::models::{Event, Resource};
//! use dayplan_core::time::TimeRange;
//! use jiff::{civil::date, Timestamp};
//!
//! let range = TimeRange::parse("09:00", "10:30").unwrap();
//! let event = Event {
//!     id: 1,
//!     title: "Deep work".to_string(),
//!     start_time: range.start(),
//!     end_time: range.end(),
//!     date: date(2025, 1, 15),
//!     resource_id: Resource::default_plans()[0].id.clone(),
//!     color: "#3b82f6".to_string(),
//!     is_crossed_off: false,
//!     is_editable: true,
//!     created_at: Timestamp::UNIX_EPOCH,
//!     updated_at: Timestamp::UNIX_EPOCH,
//! };
//! assert!(event.is_mutable());
//! assert_eq!(event.range().duration_minutes(), 90);
//! ```

pub mod cutover;
pub mod day;
pub mod event;
pub mod metrics;
pub mod note;
pub mod resource;
pub mod task;

#[cfg(test)]
mod tests;

pub use cutover::CutoverRecord;
pub use day::DayRecord;
pub use event::{Event, EventPatch, NewEvent};
pub use metrics::{DailyMetrics, MetricsPatch};
pub use note::Note;
pub use resource::Resource;
pub use task::{NewTask, Task, TaskPatch};
