use jiff::{civil::date, Timestamp};

use crate::{
    models::{DailyMetrics, DayRecord, Event, EventPatch, MetricsPatch, NewEvent, Resource},
    time::{TimeOfDay, TimeRange},
};

fn sample_event() -> Event {
    Event {
        id: 7,
        title: "Write report".to_string(),
        start_time: TimeOfDay::hm(9, 0).unwrap(),
        end_time: TimeOfDay::hm(10, 0).unwrap(),
        date: date(2025, 1, 15),
        resource_id: "plan-a".to_string(),
        color: "#3b82f6".to_string(),
        is_crossed_off: false,
        is_editable: true,
        created_at: Timestamp::from_second(1_736_899_200).unwrap(),
        updated_at: Timestamp::from_second(1_736_899_200).unwrap(),
    }
}

#[test]
fn test_event_serializes_with_wire_names() {
    let json = serde_json::to_value(sample_event()).unwrap();
    assert_eq!(json["startTime"], "09:00");
    assert_eq!(json["endTime"], "10:00");
    assert_eq!(json["resourceId"], "plan-a");
    assert_eq!(json["date"], "2025-01-15");
    assert_eq!(json["isCrossedOff"], false);
    assert_eq!(json["isEditable"], true);
}

#[test]
fn test_event_mutability_flags() {
    let mut event = sample_event();
    assert!(event.is_mutable());

    event.apply(&EventPatch::cross_off()).unwrap();
    assert!(event.is_crossed_off);
    assert!(!event.is_editable);
    assert!(!event.is_mutable());
}

#[test]
fn test_event_apply_validates_merged_range() {
    let mut event = sample_event();
    let patch = EventPatch {
        end_time: Some(TimeOfDay::hm(9, 15).unwrap()),
        ..EventPatch::default()
    };
    assert!(event.apply(&patch).unwrap_err().is_invalid_input());
    assert_eq!(event.end_time.to_string(), "10:00");

    let patch = EventPatch::times(TimeRange::parse("13:00", "14:30").unwrap());
    event.apply(&patch).unwrap();
    assert_eq!(event.range().duration_minutes(), 90);
}

#[test]
fn test_event_apply_rejects_blank_title() {
    let mut event = sample_event();
    assert!(event.apply(&EventPatch::title("   ")).is_err());
    assert_eq!(event.title, "Write report");
}

#[test]
fn test_patch_describe_lists_changes() {
    let mut patch = EventPatch::times(TimeRange::parse("09:45", "10:45").unwrap());
    patch.title = Some("Standup".to_string());
    let changes = patch.describe();
    assert_eq!(changes[0], "Renamed to \"Standup\"");
    assert_eq!(changes[1], "Moved to 09:45-10:45");
    assert!(EventPatch::default().is_empty());
}

#[test]
fn test_new_event_validation() {
    let mut new = NewEvent {
        title: "New Event".to_string(),
        date: date(2025, 1, 15),
        resource_id: "plan-e".to_string(),
        range: TimeRange::parse("09:00", "10:00").unwrap(),
        color: "#10b981".to_string(),
    };
    assert!(new.validate().is_ok());
    assert!(new.validate_for(&Resource::default_plans()).is_err());
    let custom = [Resource::new("plan-e", "Plan E")];
    assert!(new.validate_for(&custom).is_ok());

    new.resource_id = "plan-b".to_string();
    assert!(new.validate_for(&Resource::default_plans()).is_ok());
    assert!(new.validate_for(&custom).is_err());
    new.color = String::new();
    assert!(new.validate().is_err());
}

#[test]
fn test_default_plans_are_ordered() {
    let plans = Resource::default_plans();
    let ids: Vec<_> = plans.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["plan-a", "plan-b", "plan-c", "plan-d"]);
    assert_eq!(plans[2].name, "Plan C");
    assert!(Resource::is_known("plan-d"));
    assert!(!Resource::is_known("plan-z"));
}

#[test]
fn test_metrics_patch_merges_and_validates() {
    let day = date(2025, 1, 15);
    let current = DailyMetrics::default_for(day);
    let patch = MetricsPatch {
        deep_hours: Some(3),
        ..MetricsPatch::default()
    };
    let merged = patch.merged(current);
    assert_eq!(merged.deep_hours, 3);
    assert!(!merged.shutdown_complete);
    assert_eq!(merged.date, day);

    let too_many = MetricsPatch {
        deep_hours: Some(25),
        ..MetricsPatch::default()
    };
    assert!(too_many.validate().is_err());
}

#[test]
fn test_day_record_event_lookup() {
    let mut record = DayRecord::empty(date(2025, 1, 15));
    let mut late = sample_event();
    late.id = 8;
    late.start_time = TimeOfDay::hm(14, 0).unwrap();
    late.end_time = TimeOfDay::hm(15, 0).unwrap();
    record.events = vec![late, sample_event()];
    record.sort_events();

    assert_eq!(record.events[0].id, 7);
    assert_eq!(record.events_for("plan-a").count(), 2);
    assert_eq!(record.events_for("plan-b").count(), 0);
    assert!(record.event(8).is_some());
    assert!(record.note.is_empty());
}
