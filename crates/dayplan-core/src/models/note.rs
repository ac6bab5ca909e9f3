//! The per-date markdown note.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// One markdown document per date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub date: Date,
    pub content: String,

    /// Absent for a date that has never been written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Note {
    /// The empty note returned for dates without one.
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            content: String::new(),
            updated_at: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
