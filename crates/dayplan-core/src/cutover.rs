//! Plan cutover controller.
//!
//! A day starts with only the first plan column enabled and current. A timed
//! replan hands control to the next column: editable events in the current
//! column that start at or after the cutover minute are crossed off, the next
//! column becomes current, and everything above the cutover minute in it is
//! inert.
//! Replans only move forward.

use std::collections::BTreeMap;

use jiff::civil::Date;
use log::{debug, warn};

use crate::{
    error::{PlannerError, Result},
    models::{CutoverRecord, Event, EventPatch, Resource},
    time::TimeOfDay,
};

/// Which plan columns are enabled, which one is current, and where each
/// column took over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCutover {
    resources: Vec<Resource>,
    current: usize,
    enabled: Vec<bool>,
    cutover_times: BTreeMap<String, TimeOfDay>,
}

/// The effects of a committed timed replan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replan {
    pub previous_resource_id: String,
    pub resource_id: String,
    pub cutover_time: TimeOfDay,
    /// Ids of the events struck out by this replan
    pub crossed_off: Vec<u64>,
}

impl Replan {
    /// Marks the struck-out events in `events`.
    pub fn apply_to(&self, events: &mut [Event]) {
        for event in events.iter_mut().filter(|e| self.crossed_off.contains(&e.id)) {
            event.is_crossed_off = true;
            event.is_editable = false;
        }
    }

    /// Store patches for the struck-out events.
    pub fn patches(&self) -> impl Iterator<Item = (u64, EventPatch)> + '_ {
        self.crossed_off.iter().map(|id| (*id, EventPatch::cross_off()))
    }

    /// The persisted form of this replan.
    pub fn record(&self, date: Date) -> CutoverRecord {
        CutoverRecord {
            date,
            resource_id: self.resource_id.clone(),
            previous_resource_id: self.previous_resource_id.clone(),
            cutover_time: self.cutover_time,
        }
    }
}

impl PlanCutover {
    /// Fresh state: first column enabled and current, no cutovers.
    pub fn new(resources: Vec<Resource>) -> Result<Self> {
        if resources.is_empty() {
            return Err(PlannerError::invalid_input("resources")
                .with_reason("at least one plan column is required"));
        }
        let mut enabled = vec![false; resources.len()];
        enabled[0] = true;
        Ok(Self {
            resources,
            current: 0,
            enabled,
            cutover_times: BTreeMap::new(),
        })
    }

    /// Rebuilds the state for a date from its persisted cutover records.
    ///
    /// Records are replayed in column order; a record that does not continue
    /// the chain from the current column is skipped.
    pub fn restore(resources: Vec<Resource>, records: &[CutoverRecord]) -> Result<Self> {
        let mut state = Self::new(resources)?;
        let mut records: Vec<&CutoverRecord> = records.iter().collect();
        records.sort_by_key(|r| state.index_of(&r.resource_id).unwrap_or(usize::MAX));

        for record in records {
            let next = state.current + 1;
            let continues = state.current_plan().id == record.previous_resource_id
                && state.resources.get(next).is_some_and(|r| r.id == record.resource_id);
            if continues {
                state.advance(record.cutover_time);
            } else {
                warn!(
                    "Skipping cutover record {} -> {} at {}",
                    record.previous_resource_id, record.resource_id, record.cutover_time
                );
            }
        }
        Ok(state)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_plan(&self) -> &Resource {
        &self.resources[self.current]
    }

    pub fn index_of(&self, resource_id: &str) -> Option<usize> {
        self.resources.iter().position(|r| r.id == resource_id)
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.enabled.get(index).copied().unwrap_or(false)
    }

    pub fn is_current(&self, index: usize) -> bool {
        index == self.current
    }

    /// A column accepts gestures only when it is both enabled and current.
    pub fn accepts_gestures(&self, index: usize) -> bool {
        self.is_enabled(index) && self.is_current(index)
    }

    /// Minute at which `resource_id` took over, if it did so by replan.
    pub fn cutover_time(&self, resource_id: &str) -> Option<TimeOfDay> {
        self.cutover_times.get(resource_id).copied()
    }

    pub fn cutover_times(&self) -> &BTreeMap<String, TimeOfDay> {
        &self.cutover_times
    }

    /// End of the inert region at the top of the current column.
    pub fn inert_until(&self) -> i32 {
        self.cutover_time(&self.current_plan().id)
            .map_or(0, TimeOfDay::minutes)
    }

    /// Whether `minutes` falls in `[0, cutover)` of the current column.
    pub fn is_inert(&self, minutes: i32) -> bool {
        minutes < self.inert_until()
    }

    /// Whether the editor may move, resize, rename or delete `event`.
    pub fn can_edit(&self, event: &Event) -> bool {
        event.is_mutable() && event.resource_id == self.current_plan().id
    }

    /// Enables every column. No cutover is recorded and the current column
    /// does not change.
    pub fn request_replan(&mut self) {
        debug!("Enabling all plan columns");
        self.enabled.iter_mut().for_each(|e| *e = true);
    }

    /// Hands control from the column at `resource_index` to the next one at
    /// minute `at`.
    ///
    /// Returns `None` without touching anything when `resource_index` is not
    /// the current column or there is no next column.
    pub fn request_replan_at(
        &mut self,
        at: TimeOfDay,
        resource_index: usize,
        events: &[Event],
    ) -> Option<Replan> {
        if resource_index != self.current {
            debug!("Ignoring replan on non-current column {resource_index}");
            return None;
        }
        let next = self.resources.get(self.current + 1)?.id.clone();
        let previous = self.current_plan().id.clone();

        let crossed_off = events
            .iter()
            .filter(|e| e.resource_id == previous && e.is_mutable() && e.start_time >= at)
            .map(|e| e.id)
            .collect();

        self.advance(at);
        Some(Replan {
            previous_resource_id: previous,
            resource_id: next,
            cutover_time: at,
            crossed_off,
        })
    }

    fn advance(&mut self, at: TimeOfDay) {
        self.current += 1;
        self.enabled[self.current] = true;
        let id = self.resources[self.current].id.clone();
        self.cutover_times.insert(id, at);
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;

    fn event(id: u64, resource: &str, start: &str, end: &str) -> Event {
        Event {
            id,
            title: format!("Event {id}"),
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            date: date(2025, 1, 15),
            resource_id: resource.to_string(),
            color: "#3b82f6".to_string(),
            is_crossed_off: false,
            is_editable: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn at(value: &str) -> TimeOfDay {
        value.parse().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = PlanCutover::new(Resource::default_plans()).unwrap();
        assert_eq!(state.current_plan().id, "plan-a");
        assert!(state.accepts_gestures(0));
        assert!(!state.is_enabled(1));
        assert!(!state.accepts_gestures(1));
        assert_eq!(state.inert_until(), 0);
        assert!(PlanCutover::new(Vec::new()).is_err());
    }

    #[test]
    fn test_replan_at_crosses_off_later_events() {
        let mut state = PlanCutover::new(Resource::default_plans()).unwrap();
        let mut events = vec![
            event(1, "plan-a", "09:00", "10:00"),
            event(2, "plan-a", "11:00", "12:00"),
            event(3, "plan-a", "14:00", "15:00"),
        ];

        let replan = state.request_replan_at(at("11:00"), 0, &events).unwrap();
        assert_eq!(replan.crossed_off, vec![2, 3]);
        assert_eq!(replan.previous_resource_id, "plan-a");
        assert_eq!(replan.resource_id, "plan-b");

        replan.apply_to(&mut events);
        assert!(!events[0].is_crossed_off);
        assert!(events[0].is_editable);
        assert!(events[1].is_crossed_off && !events[1].is_editable);
        assert!(events[2].is_crossed_off && !events[2].is_editable);

        assert_eq!(state.current_plan().id, "plan-b");
        assert!(state.is_enabled(1));
        assert_eq!(state.cutover_time("plan-b"), Some(at("11:00")));
        assert!(state.is_inert(600));
        assert!(!state.is_inert(660));
    }

    #[test]
    fn test_replan_skips_frozen_events() {
        let mut state = PlanCutover::new(Resource::default_plans()).unwrap();
        let mut frozen = event(2, "plan-a", "13:00", "14:00");
        frozen.is_editable = false;
        let mut struck = event(3, "plan-a", "15:00", "16:00");
        struck.is_crossed_off = true;
        let events = vec![event(1, "plan-a", "12:00", "13:00"), frozen, struck];

        let replan = state.request_replan_at(at("11:00"), 0, &events).unwrap();
        assert_eq!(replan.crossed_off, vec![1]);
    }

    #[test]
    fn test_replan_against_non_current_or_last_is_noop() {
        let mut state = PlanCutover::new(Resource::default_plans()).unwrap();
        let before = state.clone();
        assert!(state.request_replan_at(at("10:00"), 1, &[]).is_none());
        assert_eq!(state, before);

        for (index, time) in [(0, "08:00"), (1, "10:00"), (2, "12:00")] {
            assert!(state.request_replan_at(at(time), index, &[]).is_some());
        }
        assert_eq!(state.current_plan().id, "plan-d");
        let before = state.clone();
        assert!(state.request_replan_at(at("14:00"), 3, &[]).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_request_replan_enables_everything() {
        let mut state = PlanCutover::new(Resource::default_plans()).unwrap();
        state.request_replan();
        assert!((0..4).all(|i| state.is_enabled(i)));
        assert_eq!(state.current_index(), 0);
        assert!(state.cutover_times().is_empty());
        assert!(!state.accepts_gestures(2));
    }

    #[test]
    fn test_can_edit_requires_current_mutable_event() {
        let mut state = PlanCutover::new(Resource::default_plans()).unwrap();
        let a = event(1, "plan-a", "09:00", "10:00");
        let b = event(2, "plan-b", "09:00", "10:00");
        assert!(state.can_edit(&a));
        assert!(!state.can_edit(&b));

        state.request_replan_at(at("12:00"), 0, &[]);
        assert!(!state.can_edit(&a));
        assert!(state.can_edit(&b));
    }

    #[test]
    fn test_restore_replays_records_in_column_order() {
        let day = date(2025, 1, 15);
        let records = vec![
            CutoverRecord {
                date: day,
                resource_id: "plan-c".to_string(),
                previous_resource_id: "plan-b".to_string(),
                cutover_time: at("15:00"),
            },
            CutoverRecord {
                date: day,
                resource_id: "plan-b".to_string(),
                previous_resource_id: "plan-a".to_string(),
                cutover_time: at("11:00"),
            },
        ];
        let state = PlanCutover::restore(Resource::default_plans(), &records).unwrap();
        assert_eq!(state.current_plan().id, "plan-c");
        assert_eq!(state.inert_until(), 900);
        assert!(state.is_enabled(1));
        assert!(!state.is_enabled(3));
    }

    #[test]
    fn test_restore_skips_broken_chain() {
        let records = vec![CutoverRecord {
            date: date(2025, 1, 15),
            resource_id: "plan-c".to_string(),
            previous_resource_id: "plan-b".to_string(),
            cutover_time: at("15:00"),
        }];
        let state = PlanCutover::restore(Resource::default_plans(), &records).unwrap();
        assert_eq!(state.current_plan().id, "plan-a");
    }
}
