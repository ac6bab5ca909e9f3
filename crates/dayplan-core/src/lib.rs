//! Core library for the dayplan day planner.
//!
//! A day is laid out as a time grid with one column per plan (`Plan A` ..
//! `Plan D`). Blocks are drawn, dragged and resized on a 15-minute grid, and
//! when the day goes off the rails the current plan is abandoned at a given
//! minute in favour of the next one: its remaining blocks are crossed off and
//! the next column takes over from that minute on.
//!
//! The crate is organised bottom-up:
//!
//! - [`time`]: minute arithmetic, snapping and the `HH:MM` wire format
//! - [`models`]: events, tasks, notes, metrics and cutover records
//! - [`interaction`]: the pointer state machine that turns gestures into
//!   create and update intents
//! - [`cutover`]: which plan is current and what a replan does
//! - [`editor`]: the schedule editor, its layout and its callbacks
//! - [`db`] / [`store`]: SQLite persistence behind the async
//!   [`store::DayRepository`] contract
//! - [`board`]: one loaded date, reconciling editor requests with storage
//! - [`display`] / [`params`]: markdown output and interface parameters
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dayplan_core::{
//!     board::DayBoard,
//!     editor::EditorConfig,
//!     store::DayStoreBuilder,
//!     time::TimeRange,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DayStoreBuilder::new()
//!     .with_database_path(Some("dayplan.db"))
//!     .build()
//!     .await?;
//!
//! let mut board = DayBoard::open(store, EditorConfig::default(), date(2025, 1, 15)).await?;
//! board
//!     .add_event(0, TimeRange::parse("09:00", "10:00")?, "Deep work")
//!     .await?;
//!
//! // Things slipped: abandon Plan A at noon.
//! board.replan_current_at("12:00".parse()?).await?;
//! assert_eq!(board.editor().cutover().current_plan().id, "plan-b");
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod cutover;
pub mod db;
pub mod display;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod models;
pub mod params;
pub mod store;
pub mod time;

// Re-export commonly used types
pub use board::DayBoard;
pub use cutover::{PlanCutover, Replan};
pub use db::Database;
pub use display::{CreateResult, DaySchedule, DeleteResult, OperationStatus, UpdateResult};
pub use editor::{EditorConfig, EditorRequest, ScheduleCallbacks, ScheduleEditor};
pub use error::{PlannerError, Result};
pub use models::{
    CutoverRecord, DailyMetrics, DayRecord, Event, EventPatch, MetricsPatch, NewEvent, NewTask,
    Note, Resource, Task, TaskPatch,
};
pub use store::{DayRepository, DayStore, DayStoreBuilder};
pub use time::{Edge, TimeOfDay, TimeRange};
