//! Per-date note, metrics and replan history.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension};

use super::{
    date_column,
    event_queries::{event_from_row, EVENT_COLUMNS},
    timestamp_column,
};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{CutoverRecord, DailyMetrics, DayRecord, Event, MetricsPatch, Note},
    time::TimeOfDay,
};

const SELECT_NOTE_SQL: &str = "SELECT date, content, updated_at FROM notes WHERE date = ?1";
const UPSERT_NOTE_SQL: &str = "INSERT INTO notes (date, content, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?3) \
     ON CONFLICT(date) DO UPDATE SET content = excluded.content, updated_at = excluded.updated_at";
const SELECT_METRICS_SQL: &str =
    "SELECT date, shutdown_complete, deep_hours FROM daily_metrics WHERE date = ?1";
const UPSERT_METRICS_SQL: &str = "INSERT INTO daily_metrics \
     (date, shutdown_complete, deep_hours, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) \
     ON CONFLICT(date) DO UPDATE SET shutdown_complete = excluded.shutdown_complete, \
     deep_hours = excluded.deep_hours, updated_at = excluded.updated_at";
const SELECT_CUTOVERS_SQL: &str = "SELECT date, resource_id, previous_resource_id, replan_time \
     FROM replan_history WHERE date = ?1 ORDER BY replan_time, id";
const CUTOVER_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM replan_history WHERE date = ?1 AND resource_id = ?2)";
const INSERT_CUTOVER_SQL: &str = "INSERT INTO replan_history \
     (date, resource_id, replan_time, previous_resource_id, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5)";
const CROSS_OFF_EVENT_SQL: &str = "UPDATE events \
     SET is_crossed_off = 1, is_editable = 0, updated_at = ?1 \
     WHERE id = ?2 AND date = ?3 AND resource_id = ?4 AND is_crossed_off = 0 AND is_editable = 1";

impl super::Database {
    /// The note for `date`, or an empty one.
    pub fn get_note(&self, date: Date) -> Result<Note> {
        let note = self
            .connection
            .query_row(SELECT_NOTE_SQL, params![date.to_string()], |row| {
                Ok(Note {
                    date: date_column(row, 0)?,
                    content: row.get(1)?,
                    updated_at: Some(timestamp_column(row, 2)?),
                })
            })
            .optional()
            .db_context("Failed to query note")?;
        Ok(note.unwrap_or_else(|| Note::empty(date)))
    }

    pub fn upsert_note(&mut self, date: Date, content: &str) -> Result<Note> {
        let now = Timestamp::now();
        self.connection
            .execute(
                UPSERT_NOTE_SQL,
                params![date.to_string(), content, now.to_string()],
            )
            .db_context("Failed to save note")?;
        Ok(Note {
            date,
            content: content.to_string(),
            updated_at: Some(now),
        })
    }

    /// The metrics for `date`, defaulting when none are stored.
    pub fn get_metrics(&self, date: Date) -> Result<DailyMetrics> {
        let metrics = self
            .connection
            .query_row(SELECT_METRICS_SQL, params![date.to_string()], |row| {
                Ok(DailyMetrics {
                    date: date_column(row, 0)?,
                    shutdown_complete: row.get(1)?,
                    deep_hours: row.get(2)?,
                })
            })
            .optional()
            .db_context("Failed to query metrics")?;
        Ok(metrics.unwrap_or_else(|| DailyMetrics::default_for(date)))
    }

    pub fn upsert_metrics(&mut self, date: Date, patch: &MetricsPatch) -> Result<DailyMetrics> {
        patch.validate()?;
        let metrics = patch.merged(self.get_metrics(date)?);
        self.connection
            .execute(
                UPSERT_METRICS_SQL,
                params![
                    date.to_string(),
                    metrics.shutdown_complete,
                    metrics.deep_hours,
                    Timestamp::now().to_string()
                ],
            )
            .db_context("Failed to save metrics")?;
        Ok(metrics)
    }

    /// Cutover records for `date` in the order they happened.
    pub fn list_cutovers(&self, date: Date) -> Result<Vec<CutoverRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CUTOVERS_SQL)
            .db_context("Failed to prepare query")?;

        let records = stmt
            .query_map(params![date.to_string()], |row| {
                let minutes: i32 = row.get(3)?;
                Ok(CutoverRecord {
                    date: date_column(row, 0)?,
                    resource_id: row.get(1)?,
                    previous_resource_id: row.get(2)?,
                    cutover_time: TimeOfDay::clamped(minutes),
                })
            })
            .db_context("Failed to query replan history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read replan history")?;
        Ok(records)
    }

    /// Stores a cutover together with the cross-off of `crossed_off`.
    ///
    /// Everything happens in one transaction: a plan can take over at most
    /// once per date, and every struck event must still be an editable event
    /// of the previous plan. Any violation rolls the whole replan back.
    pub fn apply_replan(
        &mut self,
        record: &CutoverRecord,
        crossed_off: &[u64],
    ) -> Result<Vec<Event>> {
        let date = record.date.to_string();
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CUTOVER_EXISTS_SQL, params![date, record.resource_id], |row| {
                row.get(0)
            })
            .db_context("Failed to query replan history")?;
        if exists {
            return Err(PlannerError::invalid_input("resourceId").with_reason(format!(
                "{} already took over on {}",
                record.resource_id, record.date
            )));
        }

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_CUTOVER_SQL,
            params![
                date,
                record.resource_id,
                record.cutover_time.minutes(),
                record.previous_resource_id,
                &now
            ],
        )
        .db_context("Failed to record replan")?;

        let mut events = Vec::with_capacity(crossed_off.len());
        for &id in crossed_off {
            let changed = tx
                .execute(
                    CROSS_OFF_EVENT_SQL,
                    params![&now, id as i64, date, record.previous_resource_id],
                )
                .db_context("Failed to cross off event")?;
            if changed == 0 {
                return Err(PlannerError::invalid_input("id").with_reason(format!(
                    "Event {id} is not an editable {} event",
                    record.previous_resource_id
                )));
            }
            let event = tx
                .query_row(
                    &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                    params![id as i64],
                    event_from_row,
                )
                .db_context("Failed to query event")?;
            events.push(event);
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(events)
    }

    /// Everything stored for `date`.
    pub fn load_day(&self, date: Date) -> Result<DayRecord> {
        Ok(DayRecord {
            date,
            events: self.list_events(date)?,
            tasks: self.list_tasks(date)?,
            note: self.get_note(date)?,
            metrics: self.get_metrics(date)?,
            cutovers: self.list_cutovers(date)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::super::Database;
    use crate::{
        models::{CutoverRecord, EventPatch, MetricsPatch, NewEvent},
        time::TimeRange,
    };

    fn cutover(previous: &str, next: &str) -> CutoverRecord {
        CutoverRecord {
            date: date(2025, 1, 15),
            resource_id: next.to_string(),
            previous_resource_id: previous.to_string(),
            cutover_time: "11:00".parse().unwrap(),
        }
    }

    fn plan_a_event(start: &str, end: &str) -> NewEvent {
        NewEvent {
            title: "Focus".to_string(),
            date: date(2025, 1, 15),
            resource_id: "plan-a".to_string(),
            range: TimeRange::parse(start, end).unwrap(),
            color: "#3b82f6".to_string(),
        }
    }

    #[test]
    fn test_note_upsert_replaces_content() {
        let mut db = Database::in_memory().unwrap();
        let day = date(2025, 1, 15);
        assert!(db.get_note(day).unwrap().is_empty());

        db.upsert_note(day, "# Morning").unwrap();
        db.upsert_note(day, "# Evening").unwrap();
        let note = db.get_note(day).unwrap();
        assert_eq!(note.content, "# Evening");
        assert!(note.updated_at.is_some());
    }

    #[test]
    fn test_metrics_default_and_partial_update() {
        let mut db = Database::in_memory().unwrap();
        let day = date(2025, 1, 15);
        let metrics = db.get_metrics(day).unwrap();
        assert!(!metrics.shutdown_complete);
        assert_eq!(metrics.deep_hours, 0);

        db.upsert_metrics(
            day,
            &MetricsPatch {
                deep_hours: Some(4),
                ..MetricsPatch::default()
            },
        )
        .unwrap();
        let metrics = db
            .upsert_metrics(
                day,
                &MetricsPatch {
                    shutdown_complete: Some(true),
                    ..MetricsPatch::default()
                },
            )
            .unwrap();
        assert_eq!(metrics.deep_hours, 4);
        assert!(metrics.shutdown_complete);
        assert_eq!(db.get_metrics(day).unwrap(), metrics);
    }

    #[test]
    fn test_cutover_recorded_once_per_plan() {
        let mut db = Database::in_memory().unwrap();
        let record = cutover("plan-a", "plan-b");
        assert!(db.apply_replan(&record, &[]).unwrap().is_empty());
        assert!(db.apply_replan(&record, &[]).unwrap_err().is_invalid_input());

        let day = db.load_day(date(2025, 1, 15)).unwrap();
        assert_eq!(day.cutovers, vec![record]);
        assert!(db.list_cutovers(date(2025, 1, 16)).unwrap().is_empty());
    }

    #[test]
    fn test_replan_crosses_off_in_the_same_transaction() {
        let mut db = Database::in_memory().unwrap();
        let first = db.create_event(&plan_a_event("11:00", "12:00")).unwrap();
        let second = db.create_event(&plan_a_event("14:00", "15:00")).unwrap();

        let struck = db
            .apply_replan(&cutover("plan-a", "plan-b"), &[first.id, second.id])
            .unwrap();
        assert_eq!(struck.len(), 2);
        assert!(struck.iter().all(|e| e.is_crossed_off && !e.is_editable));
        let stored = db.get_event(second.id).unwrap().unwrap();
        assert!(stored.is_crossed_off);
    }

    #[test]
    fn test_replan_rolls_back_when_an_event_is_frozen() {
        let mut db = Database::in_memory().unwrap();
        let open = db.create_event(&plan_a_event("11:00", "12:00")).unwrap();
        let frozen = db.create_event(&plan_a_event("14:00", "15:00")).unwrap();
        db.update_event(frozen.id, &EventPatch::cross_off()).unwrap();

        let error = db
            .apply_replan(&cutover("plan-a", "plan-b"), &[open.id, frozen.id])
            .unwrap_err();
        assert!(error.is_invalid_input());

        assert!(db.list_cutovers(date(2025, 1, 15)).unwrap().is_empty());
        let untouched = db.get_event(open.id).unwrap().unwrap();
        assert!(untouched.is_mutable());
    }
}
