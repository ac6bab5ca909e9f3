//! Async day repository.
//!
//! [`DayRepository`] is the contract the [`crate::board::DayBoard`] consumes.
//! [`DayStore`] implements it on top of the SQLite [`Database`], running every
//! query on Tokio's blocking pool. Each call opens its own connection, so a
//! store is cheap to clone and share between tasks.
//!
//! ```rust,no_run
//! use dayplan_core::store::{DayRepository, DayStoreBuilder};
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DayStoreBuilder::new()
//!     .with_database_path(Some("/tmp/dayplan.db"))
//!     .build()
//!     .await?;
//!
//! let day = store.load_day(date(2025, 1, 15)).await?;
//! println!("{} events", day.events.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jiff::civil::Date;
use tokio::task;

pub mod builder;


pub use builder::DayStoreBuilder;

use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::{
        CutoverRecord, DailyMetrics, DayRecord, Event, EventPatch, MetricsPatch, NewEvent,
        NewTask, Note, Task, TaskPatch,
    },
};

/// Storage operations the day board relies on.
#[async_trait]
pub trait DayRepository: Send + Sync {
    async fn load_day(&self, date: Date) -> Result<DayRecord>;
    async fn list_events(&self, date: Date) -> Result<Vec<Event>>;
    async fn create_event(&self, event: NewEvent) -> Result<Event>;
    async fn update_event(&self, id: u64, patch: EventPatch) -> Result<Event>;
    async fn delete_event(&self, id: u64) -> Result<Event>;
    /// Records a cutover and crosses off `crossed_off` atomically. Returns
    /// the struck events as stored.
    async fn apply_replan(
        &self,
        record: CutoverRecord,
        crossed_off: Vec<u64>,
    ) -> Result<Vec<Event>>;
}

/// SQLite-backed day storage.
#[derive(Debug, Clone)]
pub struct DayStore {
    db_path: PathBuf,
}

impl DayStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }

    pub async fn list_tasks(&self, date: Date) -> Result<Vec<Task>> {
        self.with_db(move |db| db.list_tasks(date)).await
    }

    pub async fn create_task(&self, task: NewTask) -> Result<Task> {
        self.with_db(move |db| db.create_task(&task)).await
    }

    pub async fn update_task(&self, id: u64, patch: TaskPatch) -> Result<Task> {
        self.with_db(move |db| db.update_task(id, &patch)).await
    }

    pub async fn delete_task(&self, id: u64) -> Result<Task> {
        self.with_db(move |db| db.delete_task(id)).await
    }

    pub async fn get_note(&self, date: Date) -> Result<Note> {
        self.with_db(move |db| db.get_note(date)).await
    }

    pub async fn upsert_note(&self, date: Date, content: String) -> Result<Note> {
        self.with_db(move |db| db.upsert_note(date, &content)).await
    }

    pub async fn get_metrics(&self, date: Date) -> Result<DailyMetrics> {
        self.with_db(move |db| db.get_metrics(date)).await
    }

    pub async fn upsert_metrics(&self, date: Date, patch: MetricsPatch) -> Result<DailyMetrics> {
        self.with_db(move |db| db.upsert_metrics(date, &patch)).await
    }

    pub async fn list_cutovers(&self, date: Date) -> Result<Vec<CutoverRecord>> {
        self.with_db(move |db| db.list_cutovers(date)).await
    }

    pub async fn get_event(&self, id: u64) -> Result<Event> {
        self.with_db(move |db| db.get_event(id)?.ok_or(PlannerError::EventNotFound { id }))
            .await
    }
}

#[async_trait]
impl DayRepository for DayStore {
    async fn load_day(&self, date: Date) -> Result<DayRecord> {
        self.with_db(move |db| db.load_day(date)).await
    }

    async fn list_events(&self, date: Date) -> Result<Vec<Event>> {
        self.with_db(move |db| db.list_events(date)).await
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event> {
        self.with_db(move |db| db.create_event(&event)).await
    }

    async fn update_event(&self, id: u64, patch: EventPatch) -> Result<Event> {
        self.with_db(move |db| db.update_event(id, &patch)).await
    }

    async fn delete_event(&self, id: u64) -> Result<Event> {
        self.with_db(move |db| db.delete_event(id)).await
    }

    async fn apply_replan(
        &self,
        record: CutoverRecord,
        crossed_off: Vec<u64>,
    ) -> Result<Vec<Event>> {
        self.with_db(move |db| db.apply_replan(&record, &crossed_off)).await
    }
}
