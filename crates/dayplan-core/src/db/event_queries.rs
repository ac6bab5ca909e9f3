//! Event CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, OptionalExtension};

use super::{date_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Event, EventPatch, NewEvent},
    time::TimeOfDay,
};

pub(super) const EVENT_COLUMNS: &str = "id, title, start_minutes, end_minutes, date, resource_id, \
     color, is_crossed_off, is_editable, created_at, updated_at";
const INSERT_EVENT_SQL: &str = "INSERT INTO events \
     (title, start_minutes, end_minutes, date, resource_id, color, is_crossed_off, is_editable, \
     created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, 1, ?7, ?8)";
const UPDATE_EVENT_SQL: &str = "UPDATE events \
     SET title = ?1, start_minutes = ?2, end_minutes = ?3, color = ?4, \
     is_crossed_off = ?5, is_editable = ?6, updated_at = ?7 WHERE id = ?8";
const DELETE_EVENT_SQL: &str = "DELETE FROM events WHERE id = ?1";

pub(super) fn event_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Event> {
    let minutes = |index: usize| -> rusqlite::Result<TimeOfDay> {
        let value: i32 = row.get(index)?;
        TimeOfDay::from_minutes(value).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(e))
        })
    };

    Ok(Event {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        start_time: minutes(2)?,
        end_time: minutes(3)?,
        date: date_column(row, 4)?,
        resource_id: row.get(5)?,
        color: row.get(6)?,
        is_crossed_off: row.get(7)?,
        is_editable: row.get(8)?,
        created_at: timestamp_column(row, 9)?,
        updated_at: timestamp_column(row, 10)?,
    })
}

impl super::Database {
    /// Lists the events of `date` ordered by start time.
    pub fn list_events(&self, date: Date) -> Result<Vec<Event>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {EVENT_COLUMNS} FROM events WHERE date = ?1 \
                 ORDER BY start_minutes, end_minutes, id"
            ))
            .db_context("Failed to prepare query")?;

        let events = stmt
            .query_map(params![date.to_string()], event_from_row)
            .db_context("Failed to query events")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read events")?;

        Ok(events)
    }

    /// Retrieves an event by its ID.
    pub fn get_event(&self, id: u64) -> Result<Option<Event>> {
        self.connection
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                params![id as i64],
                event_from_row,
            )
            .optional()
            .db_context("Failed to query event")
    }

    /// Inserts a new event and returns it with its assigned id.
    pub fn create_event(&mut self, new: &NewEvent) -> Result<Event> {
        new.validate()?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_EVENT_SQL,
            params![
                new.title,
                new.range.start().minutes(),
                new.range.end().minutes(),
                new.date.to_string(),
                new.resource_id,
                new.color,
                &now_str,
                &now_str,
            ],
        )
        .db_context("Failed to insert event")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Event {
            id,
            title: new.title.clone(),
            start_time: new.range.start(),
            end_time: new.range.end(),
            date: new.date,
            resource_id: new.resource_id.clone(),
            color: new.color.clone(),
            is_crossed_off: false,
            is_editable: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies `patch` to an event.
    ///
    /// Crossed-off and frozen events are immutable; any patch against them is
    /// rejected.
    pub fn update_event(&mut self, id: u64, patch: &EventPatch) -> Result<Event> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut event = tx
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                params![id as i64],
                event_from_row,
            )
            .optional()
            .db_context("Failed to query event")?
            .ok_or(PlannerError::EventNotFound { id })?;

        if !event.is_mutable() {
            return Err(PlannerError::invalid_input("id")
                .with_reason(format!("Event {id} is crossed off and can no longer be edited")));
        }

        event.apply(patch)?;
        event.updated_at = Timestamp::now();

        tx.execute(
            UPDATE_EVENT_SQL,
            params![
                event.title,
                event.start_time.minutes(),
                event.end_time.minutes(),
                event.color,
                event.is_crossed_off,
                event.is_editable,
                event.updated_at.to_string(),
                id as i64,
            ],
        )
        .db_context("Failed to update event")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(event)
    }

    /// Deletes an editable event and returns what was removed.
    pub fn delete_event(&mut self, id: u64) -> Result<Event> {
        let event = self
            .get_event(id)?
            .ok_or(PlannerError::EventNotFound { id })?;

        if !event.is_mutable() {
            return Err(PlannerError::invalid_input("id")
                .with_reason(format!("Event {id} is crossed off and cannot be deleted")));
        }

        self.connection
            .execute(DELETE_EVENT_SQL, params![id as i64])
            .db_context("Failed to delete event")?;
        Ok(event)
    }
}
