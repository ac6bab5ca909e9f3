use jiff::{civil::date, Timestamp};
use proptest::prelude::*;

use super::*;
use crate::{models::Resource, time::TimeOfDay};

fn palette() -> Vec<String> {
    ["#3b82f6", "#10b981", "#f59e0b"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

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

struct Fixture {
    geometry: GridGeometry,
    cutover: PlanCutover,
    events: Vec<Event>,
    palette: Vec<String>,
}

impl Fixture {
    fn new(events: Vec<Event>) -> Self {
        Self {
            geometry: GridGeometry::default(),
            cutover: PlanCutover::new(Resource::default_plans()).unwrap(),
            events,
            palette: palette(),
        }
    }

    fn ctx(&self) -> GestureContext<'_> {
        GestureContext {
            geometry: &self.geometry,
            cutover: &self.cutover,
            events: &self.events,
            palette: &self.palette,
        }
    }
}

const COLUMN_A: PointerTarget = PointerTarget::Column { resource_index: 0 };

fn create(fixture: &Fixture, from: f64, to: f64) -> Option<Gesture> {
    let mut machine = InteractionMachine::new();
    let ctx = fixture.ctx();
    machine.handle(&PointerInput::down(COLUMN_A, from), &ctx);
    machine.handle(&PointerInput::move_to(COLUMN_A, to), &ctx);
    let gesture = machine.handle(&PointerInput::up(COLUMN_A, to), &ctx);
    assert!(machine.is_idle());
    gesture
}

fn range(start: &str, end: &str) -> TimeRange {
    TimeRange::parse(start, end).unwrap()
}

#[test]
fn test_short_create_is_discarded() {
    let fixture = Fixture::new(Vec::new());
    assert_eq!(create(&fixture, 540.0, 555.0), None);
}

#[test]
fn test_create_emits_snapped_range_and_palette_color() {
    let fixture = Fixture::new(vec![event(1, "plan-a", "06:00", "07:00")]);
    let gesture = create(&fixture, 540.0, 600.0).unwrap();
    assert_eq!(
        gesture,
        Gesture::Create {
            resource_index: 0,
            range: range("09:00", "10:00"),
            color: "#10b981".to_string(),
        }
    );
}

#[test]
fn test_upward_create_is_ordered() {
    let fixture = Fixture::new(Vec::new());
    let Some(Gesture::Create { range: r, .. }) = create(&fixture, 660.0, 600.0) else {
        panic!("expected a create gesture");
    };
    assert_eq!(r, range("10:00", "11:00"));
}

#[test]
fn test_create_released_on_other_column_is_discarded() {
    let fixture = Fixture::new(Vec::new());
    let ctx = fixture.ctx();
    let mut machine = InteractionMachine::new();
    machine.handle(&PointerInput::down(COLUMN_A, 540.0), &ctx);
    let other = PointerTarget::Column { resource_index: 1 };
    assert_eq!(machine.handle(&PointerInput::up(other, 600.0), &ctx), None);
    assert!(machine.is_idle());

    machine.handle(&PointerInput::down(COLUMN_A, 540.0), &ctx);
    let outside = PointerInput::up(PointerTarget::Outside, 600.0);
    assert_eq!(machine.handle(&outside, &ctx), None);

    machine.handle(&PointerInput::down(COLUMN_A, 540.0), &ctx);
    assert_eq!(machine.handle(&PointerInput::up(COLUMN_A, 2000.0), &ctx), None);
}

#[test]
fn test_disabled_column_ignores_press() {
    let fixture = Fixture::new(Vec::new());
    let ctx = fixture.ctx();
    let mut machine = InteractionMachine::new();
    let column_b = PointerTarget::Column { resource_index: 1 };
    assert!(!machine.pointer_down(&PointerInput::down(column_b, 540.0), &ctx));
    assert!(machine.is_idle());
}

#[test]
fn test_secondary_press_starts_nothing() {
    let fixture = Fixture::new(Vec::new());
    let mut machine = InteractionMachine::new();
    let press = PointerInput::secondary_down(COLUMN_A, 540.0);
    assert!(!machine.pointer_down(&press, &fixture.ctx()));
}

#[test]
fn test_press_during_session_is_ignored() {
    let fixture = Fixture::new(Vec::new());
    let ctx = fixture.ctx();
    let mut machine = InteractionMachine::new();
    assert!(machine.pointer_down(&PointerInput::down(COLUMN_A, 540.0), &ctx));
    assert!(!machine.pointer_down(&PointerInput::down(COLUMN_A, 700.0), &ctx));
    assert_eq!(
        machine.session(),
        &Session::Creating {
            resource_index: 0,
            start: 540
        }
    );
}

#[test]
fn test_move_outside_session_is_noop() {
    let fixture = Fixture::new(Vec::new());
    let mut machine = InteractionMachine::new();
    assert_eq!(machine.pointer_move(600.0, &fixture.ctx()), None);
}

#[test]
fn test_drag_moves_by_snapped_delta() {
    let fixture = Fixture::new(vec![event(1, "plan-a", "09:00", "10:00")]);
    let ctx = fixture.ctx();
    let target = PointerTarget::Event {
        resource_index: 0,
        event_id: 1,
    };
    let mut machine = InteractionMachine::new();
    machine.handle(&PointerInput::down(target, 570.0), &ctx);

    let update = machine.handle(&PointerInput::move_to(target, 617.0), &ctx);
    assert_eq!(
        update,
        Some(Gesture::Update {
            event_id: 1,
            range: range("09:45", "10:45"),
        })
    );
    assert_eq!(machine.handle(&PointerInput::up(target, 617.0), &ctx), None);
    assert!(machine.is_idle());
}

#[test]
fn test_drag_clamps_to_day_end() {
    let fixture = Fixture::new(vec![event(1, "plan-a", "22:00", "23:30")]);
    let ctx = fixture.ctx();
    let target = PointerTarget::Event {
        resource_index: 0,
        event_id: 1,
    };
    let mut machine = InteractionMachine::new();
    machine.handle(&PointerInput::down(target, 1320.0), &ctx);
    let update = machine.handle(&PointerInput::move_to(target, 1439.0), &ctx);
    assert_eq!(
        update,
        Some(Gesture::Update {
            event_id: 1,
            range: range("22:30", "24:00"),
        })
    );
}

#[test]
fn test_drag_far_off_grid_stays_in_day() {
    let fixture = Fixture::new(vec![event(1, "plan-a", "22:00", "23:30")]);
    let ctx = fixture.ctx();
    let target = PointerTarget::Event {
        resource_index: 0,
        event_id: 1,
    };
    let mut machine = InteractionMachine::new();
    machine.handle(&PointerInput::down(target, 1320.0), &ctx);

    let down = machine.handle(&PointerInput::move_to(target, 1.0e10), &ctx);
    assert_eq!(
        down,
        Some(Gesture::Update {
            event_id: 1,
            range: range("22:30", "24:00"),
        })
    );
    let up = machine.handle(&PointerInput::move_to(target, -1.0e10), &ctx);
    assert_eq!(
        up,
        Some(Gesture::Update {
            event_id: 1,
            range: range("00:00", "01:30"),
        })
    );
}

#[test]
fn test_resize_cannot_shrink_below_minimum() {
    let fixture = Fixture::new(vec![event(1, "plan-a", "09:00", "09:30")]);
    let ctx = fixture.ctx();
    for (edge, press_y, drag_y) in [(Edge::Top, 540.0, 600.0), (Edge::Bottom, 570.0, 500.0)] {
        let target = PointerTarget::ResizeHandle {
            resource_index: 0,
            event_id: 1,
            edge,
        };
        let mut machine = InteractionMachine::new();
        machine.handle(&PointerInput::down(target, press_y), &ctx);
        let update = machine.handle(&PointerInput::move_to(target, drag_y), &ctx);
        assert_eq!(
            update,
            Some(Gesture::Update {
                event_id: 1,
                range: range("09:00", "09:30"),
            }),
            "{edge:?}"
        );
    }
}

#[test]
fn test_resize_top_keeps_bottom_edge() {
    let fixture = Fixture::new(vec![event(1, "plan-a", "09:00", "11:00")]);
    let ctx = fixture.ctx();
    let target = PointerTarget::ResizeHandle {
        resource_index: 0,
        event_id: 1,
        edge: Edge::Top,
    };
    let mut machine = InteractionMachine::new();
    machine.handle(&PointerInput::down(target, 540.0), &ctx);
    let update = machine.handle(&PointerInput::move_to(target, 480.0), &ctx);
    assert_eq!(
        update,
        Some(Gesture::Update {
            event_id: 1,
            range: range("08:00", "11:00"),
        })
    );
}

#[test]
fn test_crossed_off_event_cannot_be_grabbed() {
    let mut crossed = event(1, "plan-a", "09:00", "10:00");
    crossed.is_crossed_off = true;
    crossed.is_editable = false;
    let fixture = Fixture::new(vec![crossed]);
    let ctx = fixture.ctx();
    let mut machine = InteractionMachine::new();

    let body = PointerTarget::Event {
        resource_index: 0,
        event_id: 1,
    };
    assert!(!machine.pointer_down(&PointerInput::down(body, 570.0), &ctx));
    let handle = PointerTarget::ResizeHandle {
        resource_index: 0,
        event_id: 1,
        edge: Edge::Bottom,
    };
    assert!(!machine.pointer_down(&PointerInput::down(handle, 600.0), &ctx));
}

#[test]
fn test_inert_region_blocks_press_and_release() {
    let mut fixture = Fixture::new(Vec::new());
    fixture
        .cutover
        .request_replan_at(TimeOfDay::hm(12, 0).unwrap(), 0, &[]);
    let ctx = fixture.ctx();
    let column_b = PointerTarget::Column { resource_index: 1 };
    let mut machine = InteractionMachine::new();

    assert!(!machine.pointer_down(&PointerInput::down(column_b, 600.0), &ctx));

    machine.handle(&PointerInput::down(column_b, 780.0), &ctx);
    assert_eq!(machine.handle(&PointerInput::up(column_b, 660.0), &ctx), None);

    machine.handle(&PointerInput::down(column_b, 720.0), &ctx);
    let gesture = machine.handle(&PointerInput::up(column_b, 780.0), &ctx);
    assert!(matches!(gesture, Some(Gesture::Create { resource_index: 1, .. })));
}

#[derive(Debug, Clone)]
enum Step {
    Down(PointerTarget, f64),
    Move(f64),
    Up(PointerTarget, f64),
}

fn target_strategy() -> impl Strategy<Value = PointerTarget> {
    prop_oneof![
        (0usize..2).prop_map(|resource_index| PointerTarget::Column { resource_index }),
        (1u64..4).prop_map(|event_id| PointerTarget::Event {
            resource_index: 0,
            event_id
        }),
        (1u64..4, prop::bool::ANY).prop_map(|(event_id, top)| PointerTarget::ResizeHandle {
            resource_index: 0,
            event_id,
            edge: if top { Edge::Top } else { Edge::Bottom },
        }),
        Just(PointerTarget::Outside),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let y = -200.0f64..1700.0;
    prop_oneof![
        (target_strategy(), y.clone()).prop_map(|(t, y)| Step::Down(t, y)),
        y.clone().prop_map(Step::Move),
        (target_strategy(), y).prop_map(|(t, y)| Step::Up(t, y)),
    ]
}

proptest! {
    #[test]
    fn prop_gestures_stay_on_grid(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let fixture = Fixture::new(vec![
            event(1, "plan-a", "00:00", "00:30"),
            event(2, "plan-a", "09:00", "12:00"),
            event(3, "plan-a", "23:00", "24:00"),
        ]);
        let ctx = fixture.ctx();
        let mut machine = InteractionMachine::new();

        for step in steps {
            let input = match step {
                Step::Down(target, y) => PointerInput::down(target, y),
                Step::Move(y) => PointerInput::move_to(PointerTarget::Outside, y),
                Step::Up(target, y) => PointerInput::up(target, y),
            };
            let range = match machine.handle(&input, &ctx) {
                Some(Gesture::Create { range, .. }) | Some(Gesture::Update { range, .. }) => range,
                None => continue,
            };
            let (start, end) = (range.start().minutes(), range.end().minutes());
            prop_assert!(end - start >= 30);
            prop_assert_eq!(start % 15, 0);
            prop_assert_eq!(end % 15, 0);
            prop_assert!((0..=1440).contains(&start));
            prop_assert!((0..=1440).contains(&end));
            if matches!(input.phase, PointerPhase::Up) {
                prop_assert!(machine.is_idle());
            }
        }
    }

    #[test]
    fn prop_resize_moves_only_grabbed_edge(
        start_slot in 0i32..80,
        length_slots in 2i32..10,
        drag in -400.0f64..400.0,
        top in prop::bool::ANY,
    ) {
        let start = start_slot * 15;
        let end = start + length_slots * 15;
        let origin = TimeRange::from_minutes(start, end);
        let edge = if top { Edge::Top } else { Edge::Bottom };
        let delta = crate::time::snap(drag);
        let resized = origin.resized(edge, delta, 0, 1440);

        match edge {
            Edge::Top if start + delta >= 0 =>
                prop_assert_eq!(resized.end(), origin.end()),
            Edge::Bottom if end + delta <= 1440 =>
                prop_assert_eq!(resized.start(), origin.start()),
            _ => {}
        }
    }
}
