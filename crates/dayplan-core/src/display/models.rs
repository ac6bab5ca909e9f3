//! Display implementations for domain models.
//!
//! Output is markdown, rendered in the terminal by the CLI. Crossed-off
//! events are struck through so a replanned day still shows what was
//! abandoned.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{CutoverRecord, DailyMetrics, Event, Note, Resource, Task};

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = format!(
            "{}-{} {} (ID: {})",
            self.start_time, self.end_time, self.title, self.id
        );
        if self.is_crossed_off {
            writeln!(f, "- ~~{line}~~")
        } else if !self.is_editable {
            writeln!(f, "- {line} (locked)")
        } else {
            writeln!(f, "- {line}")
        }
    }
}

impl Event {
    /// Full detail view used after single-event operations.
    pub fn details(&self) -> EventDetails<'_> {
        EventDetails(self)
    }
}

/// Long form of an [`Event`], with metadata.
pub struct EventDetails<'a>(&'a Event);

impl fmt::Display for EventDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.0;
        writeln!(f, "# {}. {}", event.id, event.title)?;
        writeln!(f)?;
        writeln!(f, "- Date: {}", event.date)?;
        writeln!(f, "- Plan: {}", event.resource_id)?;
        writeln!(f, "- Time: {}", event.range())?;
        writeln!(f, "- Color: {}", event.color)?;
        if event.is_crossed_off {
            writeln!(f, "- Status: crossed off")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&event.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&event.updated_at))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.completed { "x" } else { " " };
        writeln!(f, "- [{check}] {} (ID: {})", self.title, self.id)?;
        if let Some(description) = &self.description {
            writeln!(f, "  {description}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No note for {}.", self.date);
        }
        writeln!(f, "{}", self.content.trim_end())?;
        if let Some(updated_at) = &self.updated_at {
            writeln!(f)?;
            writeln!(f, "*Updated {}*", LocalDateTime(updated_at))?;
        }
        Ok(())
    }
}

impl fmt::Display for DailyMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shutdown = if self.shutdown_complete { "done" } else { "not done" };
        writeln!(f, "- Shutdown: {shutdown}")?;
        writeln!(f, "- Deep work: {}h", self.deep_hours)
    }
}

impl fmt::Display for CutoverRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}: {} -> {}",
            self.cutover_time, self.previous_resource_id, self.resource_id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;

    fn event() -> Event {
        Event {
            id: 7,
            title: "Standup".to_string(),
            start_time: "09:00".parse().unwrap(),
            end_time: "09:30".parse().unwrap(),
            date: date(2025, 1, 15),
            resource_id: "plan-a".to_string(),
            color: "#3b82f6".to_string(),
            is_crossed_off: false,
            is_editable: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_event_line() {
        let mut event = event();
        assert_eq!(event.to_string(), "- 09:00-09:30 Standup (ID: 7)\n");
        event.is_crossed_off = true;
        assert_eq!(event.to_string(), "- ~~09:00-09:30 Standup (ID: 7)~~\n");
    }

    #[test]
    fn test_event_details() {
        let output = event().details().to_string();
        assert!(output.starts_with("# 7. Standup"));
        assert!(output.contains("- Time: 9:00 AM - 9:30 AM"));
        assert!(!output.contains("crossed off"));
    }

    #[test]
    fn test_empty_note() {
        let note = Note::empty(date(2025, 1, 15));
        assert_eq!(note.to_string(), "No note for 2025-01-15.\n");
    }

    #[test]
    fn test_metrics() {
        let metrics = DailyMetrics {
            deep_hours: 3,
            ..DailyMetrics::default_for(date(2025, 1, 15))
        };
        let output = metrics.to_string();
        assert!(output.contains("Shutdown: not done"));
        assert!(output.contains("Deep work: 3h"));
    }
}
