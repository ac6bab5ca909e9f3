//! Markdown formatting for the terminal.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as the outcome of an operation or the
//! column layout of a whole day. The CLI renders the resulting markdown with
//! termimad.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers        │    │   Markdown      │
//! │ (Event, Task)   │───▶│ (DaySchedule,   │───▶│   Output        │
//! │                 │    │  CreateResult)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: `Events`, `Tasks` and the `DaySchedule` day view
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp and date helpers

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{DaySchedule, Events, Tasks};
pub use datetime::{DateHeading, LocalDateTime};
pub use models::EventDetails;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
