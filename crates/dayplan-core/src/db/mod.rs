//! SQLite persistence for dayplan.
//!
//! [`Database`] wraps a single connection and exposes synchronous queries
//! grouped by table: events, tasks, and the per-date note, metrics and
//! replan history. The async [`crate::store::DayStore`] runs these on the
//! blocking thread pool.

use std::path::Path;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Connection};

use crate::error::{DatabaseResultExt, Result};

pub mod day_queries;
pub mod event_queries;
pub mod migrations;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// An in-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(
    row: &rusqlite::Row<'_>,
    index: usize,
) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Reads a `YYYY-MM-DD` date column.
pub(crate) fn date_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(index)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}
