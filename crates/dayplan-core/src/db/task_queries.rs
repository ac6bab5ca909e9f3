//! Task CRUD operations.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension};

use super::{date_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{NewTask, Task, TaskPatch},
};

const TASK_COLUMNS: &str = "id, title, description, completed, date, created_at, updated_at";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks \
     (title, description, completed, date, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const UPDATE_TASK_SQL: &str =
    "UPDATE tasks SET title = ?1, description = ?2, completed = ?3, updated_at = ?4 WHERE id = ?5";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        date: date_column(row, 4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

impl super::Database {
    /// Lists the tasks of `date` in creation order.
    pub fn list_tasks(&self, date: Date) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE date = ?1 ORDER BY created_at, id"
            ))
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![date.to_string()], task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read tasks")?;
        Ok(tasks)
    }

    pub fn get_task(&self, id: u64) -> Result<Option<Task>> {
        self.connection
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id as i64],
                task_from_row,
            )
            .optional()
            .db_context("Failed to query task")
    }

    pub fn create_task(&mut self, new: &NewTask) -> Result<Task> {
        new.validate()?;
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_TASK_SQL,
                params![
                    new.title,
                    new.description,
                    new.completed,
                    new.date.to_string(),
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert task")?;

        Ok(Task {
            id: self.connection.last_insert_rowid() as u64,
            title: new.title.clone(),
            description: new.description.clone(),
            completed: new.completed,
            date: new.date,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let mut task = self.get_task(id)?.ok_or(PlannerError::TaskNotFound { id })?;
        patch.apply_to(&mut task)?;
        task.updated_at = Timestamp::now();

        self.connection
            .execute(
                UPDATE_TASK_SQL,
                params![
                    task.title,
                    task.description,
                    task.completed,
                    task.updated_at.to_string(),
                    id as i64
                ],
            )
            .db_context("Failed to update task")?;
        Ok(task)
    }

    pub fn delete_task(&mut self, id: u64) -> Result<Task> {
        let task = self.get_task(id)?.ok_or(PlannerError::TaskNotFound { id })?;
        self.connection
            .execute(DELETE_TASK_SQL, params![id as i64])
            .db_context("Failed to delete task")?;
        Ok(task)
    }
}
