//! Everything stored for one date.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{CutoverRecord, DailyMetrics, Event, Note, Task};

/// Snapshot of a single date as loaded from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: Date,
    pub events: Vec<Event>,
    pub tasks: Vec<Task>,
    pub note: Note,
    pub metrics: DailyMetrics,
    pub cutovers: Vec<CutoverRecord>,
}

impl DayRecord {
    /// An empty day.
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            events: Vec::new(),
            tasks: Vec::new(),
            note: Note::empty(date),
            metrics: DailyMetrics::default_for(date),
            cutovers: Vec::new(),
        }
    }

    /// Events in one plan column, in start order.
    pub fn events_for<'a>(&'a self, resource_id: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.resource_id == resource_id)
    }

    pub fn event(&self, id: u64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub(crate) fn event_mut(&mut self, id: u64) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Re-sorts events by start time, the order the store lists them in.
    pub(crate) fn sort_events(&mut self) {
        self.events
            .sort_by_key(|e| (e.start_time, e.end_time, e.id));
    }
}
