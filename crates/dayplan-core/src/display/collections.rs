//! Collection wrapper types for displaying groups of domain objects.
//!
//! [`DaySchedule`] renders a whole [`DayRecord`] as the CLI's `day` view:
//! one section per plan column, then tasks, note and metrics.

use std::fmt;

use super::datetime::DateHeading;
use crate::{
    cutover::PlanCutover,
    models::{DayRecord, Event, Task},
};

/// Newtype wrapper for displaying a list of events.
pub struct Events(pub Vec<Event>);

impl Events {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.0.iter()
    }
}

impl fmt::Display for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No events found.");
        }
        for event in &self.0 {
            write!(f, "{event}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a task list.
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of checked-off tasks.
    pub fn completed(&self) -> usize {
        self.0.iter().filter(|t| t.completed).count()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

/// A day rendered column by column.
///
/// The plan state is passed in rather than recomputed so the view matches
/// what the editor considers current, including session-only enablement.
pub struct DaySchedule<'a> {
    record: &'a DayRecord,
    cutover: &'a PlanCutover,
}

impl<'a> DaySchedule<'a> {
    pub fn new(record: &'a DayRecord, cutover: &'a PlanCutover) -> Self {
        Self { record, cutover }
    }

    fn fmt_columns(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, resource) in self.cutover.resources().iter().enumerate() {
            let mut heading = format!("## {resource}");
            if self.cutover.is_current(index) {
                heading.push_str(" (current)");
            } else if !self.cutover.is_enabled(index) {
                heading.push_str(" (disabled)");
            }
            writeln!(f, "{heading}")?;
            writeln!(f)?;
            if let Some(time) = self.cutover.cutover_time(&resource.id) {
                writeln!(f, "*Replanned at {time}*")?;
                writeln!(f)?;
            }

            let mut any = false;
            for event in self.record.events_for(&resource.id) {
                write!(f, "{event}")?;
                any = true;
            }
            if !any {
                writeln!(f, "No events.")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for DaySchedule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", DateHeading(self.record.date))?;
        writeln!(f)?;
        self.fmt_columns(f)?;

        writeln!(f, "## Tasks")?;
        writeln!(f)?;
        write!(f, "{}", Tasks(self.record.tasks.clone()))?;
        writeln!(f)?;

        writeln!(f, "## Note")?;
        writeln!(f)?;
        write!(f, "{}", self.record.note)?;
        writeln!(f)?;

        writeln!(f, "## Metrics")?;
        writeln!(f)?;
        write!(f, "{}", self.record.metrics)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::models::{CutoverRecord, Resource};

    fn event(id: u64, resource: &str, start: &str, end: &str, crossed: bool) -> Event {
        Event {
            id,
            title: format!("Event {id}"),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            date: date(2025, 1, 15),
            resource_id: resource.to_string(),
            color: "#3b82f6".to_string(),
            is_crossed_off: crossed,
            is_editable: !crossed,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Events(Vec::new()).to_string(), "No events found.\n");
        assert_eq!(Tasks(Vec::new()).to_string(), "No tasks found.\n");
    }

    #[test]
    fn test_day_schedule_marks_plans() {
        let mut record = DayRecord::empty(date(2025, 1, 15));
        record.events = vec![
            event(1, "plan-a", "09:00", "10:00", false),
            event(2, "plan-a", "13:00", "14:00", true),
            event(3, "plan-b", "13:00", "14:00", false),
        ];
        record.cutovers = vec![CutoverRecord {
            date: record.date,
            resource_id: "plan-b".to_string(),
            previous_resource_id: "plan-a".to_string(),
            cutover_time: "12:00".parse().unwrap(),
        }];
        let cutover = PlanCutover::restore(Resource::default_plans(), &record.cutovers).unwrap();

        let output = DaySchedule::new(&record, &cutover).to_string();
        assert!(output.starts_with("# Wednesday, January 15, 2025"));
        assert!(output.contains("## Plan A\n"));
        assert!(output.contains("## Plan B (current)"));
        assert!(output.contains("## Plan C (disabled)"));
        assert!(output.contains("*Replanned at 12:00*"));
        assert!(output.contains("- ~~13:00-14:00 Event 2 (ID: 2)~~"));
        assert!(output.contains("No tasks found."));
    }
}
