//! Task model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A to-do item captured for a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Short title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Whether the task has been checked off
    pub completed: bool,

    /// Date the task is planned for
    pub date: Date,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last modified (UTC)
    pub updated_at: Timestamp,
}

/// Request to create a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub date: Date,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl NewTask {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("Title is required"));
        }
        Ok(())
    }
}

/// Partial update for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Applies the patch in place.
    pub fn apply_to(&self, task: &mut Task) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(PlannerError::invalid_input("title").with_reason("Title is required"));
            }
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        Ok(())
    }

    pub fn describe(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(format!("Updated title to \"{title}\""));
        }
        if self.description.is_some() {
            changes.push("Updated description".to_string());
        }
        match self.completed {
            Some(true) => changes.push("Marked as completed".to_string()),
            Some(false) => changes.push("Marked as not completed".to_string()),
            None => {}
        }
        changes
    }
}
