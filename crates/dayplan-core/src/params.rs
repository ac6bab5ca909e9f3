//! Parameter structures shared by the CLI and the HTTP server.
//!
//! These mirror the JSON bodies of the HTTP API (camelCase, times as
//! `"HH:MM"`, dates as `"YYYY-MM-DD"`) and convert into the validated model
//! types with `TryFrom`. Interface layers deserialize or build a parameter
//! struct and hand the converted model to the store:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI Args /     │    │  Core Params    │    │  Models         │
//! │  JSON body      │───▶│  (serde only)   │───▶│  (validated)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Times are kept as strings here so that a malformed value surfaces as an
//! [`PlannerError::InvalidInput`] naming the field, rather than as a generic
//! deserialization failure.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{CutoverRecord, EventPatch, MetricsPatch, NewEvent, NewTask, Resource, TaskPatch},
    time::{TimeOfDay, TimeRange},
};

/// Parses a `YYYY-MM-DD` date, reporting failures against `field`.
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|_| {
        PlannerError::invalid_input(field).with_reason("Date must be in YYYY-MM-DD format")
    })
}

fn parse_time(field: &str, value: &str) -> Result<TimeOfDay> {
    value.parse::<TimeOfDay>().map_err(|_| {
        PlannerError::invalid_input(field).with_reason("Time must be in HH:MM format")
    })
}

fn parse_optional_time(field: &str, value: Option<&str>) -> Result<Option<TimeOfDay>> {
    value.map(|v| parse_time(field, v)).transpose()
}

/// Query string carrying a single date, as in `GET /events?date=2025-01-15`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// The requested date. A missing date is an input error.
    pub fn date(&self) -> Result<Date> {
        match self.date.as_deref() {
            Some(value) if !value.trim().is_empty() => parse_date("date", value),
            _ => Err(PlannerError::invalid_input("date")
                .with_reason("Date query parameter is required")),
        }
    }
}

/// Body of `POST /events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub date: String,
    pub resource_id: String,
    pub color: String,
}

impl TryFrom<CreateEvent> for NewEvent {
    type Error = PlannerError;

    fn try_from(params: CreateEvent) -> Result<Self> {
        let start = parse_time("startTime", &params.start_time)?;
        let end = parse_time("endTime", &params.end_time)?;
        let event = NewEvent {
            title: params.title,
            date: parse_date("date", &params.date)?,
            resource_id: params.resource_id,
            range: TimeRange::new(start, end)?,
            color: params.color,
        };
        event.validate_for(&Resource::default_plans())?;
        Ok(event)
    }
}

/// Body of `PUT /events/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_crossed_off: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_editable: Option<bool>,
}

impl TryFrom<UpdateEvent> for EventPatch {
    type Error = PlannerError;

    fn try_from(params: UpdateEvent) -> Result<Self> {
        if params.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(PlannerError::invalid_input("title").with_reason("Title is required"));
        }
        Ok(EventPatch {
            title: params.title,
            start_time: parse_optional_time("startTime", params.start_time.as_deref())?,
            end_time: parse_optional_time("endTime", params.end_time.as_deref())?,
            color: params.color,
            is_crossed_off: params.is_crossed_off,
            is_editable: params.is_editable,
        })
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub date: String,
}

impl TryFrom<CreateTask> for NewTask {
    type Error = PlannerError;

    fn try_from(params: CreateTask) -> Result<Self> {
        let task = NewTask {
            date: parse_date("date", &params.date)?,
            title: params.title,
            description: params.description,
            completed: params.completed,
        };
        task.validate()?;
        Ok(task)
    }
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl From<UpdateTask> for TaskPatch {
    fn from(params: UpdateTask) -> Self {
        TaskPatch {
            title: params.title,
            description: params.description,
            completed: params.completed,
        }
    }
}

/// Body of `PUT /notes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetNote {
    pub date: String,
    #[serde(default)]
    pub content: String,
}

impl SetNote {
    pub fn date(&self) -> Result<Date> {
        parse_date("date", &self.date)
    }
}

/// Body of `PUT /metrics`.
///
/// `deepHours` is signed on the wire so that negative values are reported as
/// a range error rather than a type error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMetrics {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_hours: Option<i64>,
}

impl UpdateMetrics {
    /// Splits the body into the target date and a validated patch.
    pub fn into_patch(self) -> Result<(Date, MetricsPatch)> {
        let date = parse_date("date", &self.date)?;
        let deep_hours = self
            .deep_hours
            .map(|hours| {
                u32::try_from(hours).map_err(|_| {
                    PlannerError::invalid_input("deepHours").with_reason("must be between 0 and 24")
                })
            })
            .transpose()?;
        let patch = MetricsPatch {
            shutdown_complete: self.shutdown_complete,
            deep_hours,
        };
        patch.validate()?;
        Ok((date, patch))
    }
}

/// Body of `POST /replans`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReplan {
    pub date: String,
    pub resource_id: String,
    pub previous_resource_id: String,
    pub replan_time: String,
}

impl TryFrom<RecordReplan> for CutoverRecord {
    type Error = PlannerError;

    fn try_from(params: RecordReplan) -> Result<Self> {
        for (field, id) in [
            ("resourceId", &params.resource_id),
            ("previousResourceId", &params.previous_resource_id),
        ] {
            if !Resource::is_known(id) {
                return Err(
                    PlannerError::invalid_input(field).with_reason(format!("Unknown plan '{id}'"))
                );
            }
        }
        Ok(CutoverRecord {
            date: parse_date("date", &params.date)?,
            resource_id: params.resource_id,
            previous_resource_id: params.previous_resource_id,
            cutover_time: parse_time("replanTime", &params.replan_time)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn create_event() -> CreateEvent {
        CreateEvent {
            title: "Focus".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            date: "2025-01-15".to_string(),
            resource_id: "plan-a".to_string(),
            color: "#3b82f6".to_string(),
        }
    }

    fn invalid_field(error: PlannerError) -> String {
        match error {
            PlannerError::InvalidInput { field, .. } => field,
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_event_from_json() {
        let params: CreateEvent = serde_json::from_str(
            r##"{"title":"Focus","startTime":"09:00","endTime":"10:00",
                "date":"2025-01-15","resourceId":"plan-a","color":"#3b82f6"}"##,
        )
        .unwrap();
        let event = NewEvent::try_from(params).unwrap();
        assert_eq!(event.date, date(2025, 1, 15));
        assert_eq!(event.range.to_string(), "9:00 AM - 10:00 AM");
    }

    #[test]
    fn test_create_event_rejections_name_the_field() {
        let mut params = create_event();
        params.start_time = "9am".to_string();
        assert_eq!(invalid_field(NewEvent::try_from(params).unwrap_err()), "startTime");

        let mut params = create_event();
        params.date = "15/01/2025".to_string();
        assert_eq!(invalid_field(NewEvent::try_from(params).unwrap_err()), "date");

        let mut params = create_event();
        params.resource_id = "plan-z".to_string();
        assert_eq!(invalid_field(NewEvent::try_from(params).unwrap_err()), "resourceId");

        let mut params = create_event();
        params.end_time = "09:15".to_string();
        assert!(NewEvent::try_from(params).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_update_event_partial() {
        let params: UpdateEvent = serde_json::from_str(r#"{"startTime":"09:45"}"#).unwrap();
        let patch = EventPatch::try_from(params).unwrap();
        assert_eq!(patch.start_time, Some("09:45".parse().unwrap()));
        assert!(patch.end_time.is_none() && patch.title.is_none());

        let blank = UpdateEvent {
            title: Some(" ".to_string()),
            ..UpdateEvent::default()
        };
        assert_eq!(invalid_field(EventPatch::try_from(blank).unwrap_err()), "title");
    }

    #[test]
    fn test_date_query() {
        let query = DateQuery {
            date: Some("2025-01-15".to_string()),
        };
        assert_eq!(query.date().unwrap(), date(2025, 1, 15));
        assert!(DateQuery::default().date().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_update_metrics_bounds() {
        let params: UpdateMetrics =
            serde_json::from_str(r#"{"date":"2025-01-15","deepHours":4}"#).unwrap();
        let (day, patch) = params.into_patch().unwrap();
        assert_eq!(day, date(2025, 1, 15));
        assert_eq!(patch.deep_hours, Some(4));

        for hours in [-1, 25] {
            let params = UpdateMetrics {
                date: "2025-01-15".to_string(),
                deep_hours: Some(hours),
                ..UpdateMetrics::default()
            };
            assert_eq!(invalid_field(params.into_patch().unwrap_err()), "deepHours");
        }
    }

    #[test]
    fn test_create_task_requires_title() {
        let params = CreateTask {
            title: String::new(),
            date: "2025-01-15".to_string(),
            ..CreateTask::default()
        };
        assert_eq!(invalid_field(NewTask::try_from(params).unwrap_err()), "title");
    }

    #[test]
    fn test_record_replan() {
        let params: RecordReplan = serde_json::from_str(
            r#"{"date":"2025-01-15","resourceId":"plan-b",
                "previousResourceId":"plan-a","replanTime":"12:00"}"#,
        )
        .unwrap();
        let record = CutoverRecord::try_from(params).unwrap();
        assert_eq!(record.cutover_time.minutes(), 720);

        let params = RecordReplan {
            date: "2025-01-15".to_string(),
            resource_id: "plan-x".to_string(),
            previous_resource_id: "plan-a".to_string(),
            replan_time: "12:00".to_string(),
        };
        assert_eq!(invalid_field(CutoverRecord::try_from(params).unwrap_err()), "resourceId");
    }
}
