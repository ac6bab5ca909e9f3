//! Headless day schedule editor.
//!
//! [`ScheduleEditor`] owns the transient state of one rendered day: the
//! pointer gesture in progress, the plan cutover state, an open context menu
//! and a title edit. It never stores events itself. The host passes the
//! current events in and receives requests back through
//! [`ScheduleCallbacks`], which it is free to apply optimistically, persist,
//! or ignore.
//!
//! ```rust
//! use dayplan_core::editor::{EditorConfig, EditorRequest, ScheduleEditor};
//! use dayplan_core::interaction::{PointerInput, PointerTarget};
//! use jiff::civil::date;
//!
//! let mut editor = ScheduleEditor::new(EditorConfig::default(), date(2025, 1, 15)).unwrap();
//! let column = PointerTarget::Column { resource_index: 0 };
//! let mut requests: Vec<EditorRequest> = Vec::new();
//!
//! // 09:00 -> 10:00 on a 60px-per-hour grid
//! editor.handle_pointer(&PointerInput::down(column, 540.0), &[], &mut requests);
//! editor.handle_pointer(&PointerInput::up(column, 600.0), &[], &mut requests);
//!
//! assert!(matches!(&requests[..], [EditorRequest::Add(event)] if event.title == "New Event"));
//! ```

pub mod layout;


use jiff::{civil::Date, Zoned};
use log::{debug, info};

pub use layout::{BlockLayout, ColumnLayout, HourLabel, ScheduleLayout};

use crate::{
    cutover::{PlanCutover, Replan},
    error::{PlannerError, Result},
    interaction::{
        Gesture, GestureContext, GridGeometry, InteractionMachine, PointerButton, PointerInput,
        PointerPhase, Session,
    },
    models::{event::DEFAULT_EVENT_TITLE, CutoverRecord, Event, EventPatch, NewEvent, Resource},
    time::{TimeOfDay, TimeRange},
};

/// Default block colors, cycled by event count.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#06b6d4",
];

/// Grid and column configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Pixels per hour row
    pub cell_height: f64,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub palette: Vec<String>,
    pub resources: Vec<Resource>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_height: 60.0,
            day_start_hour: 0,
            day_end_hour: 24,
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            resources: Resource::default_plans(),
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_height.is_finite() && self.cell_height > 0.0) {
            return Err(PlannerError::invalid_input("cell_height").with_reason("must be positive"));
        }
        if self.day_start_hour >= self.day_end_hour || self.day_end_hour > 24 {
            return Err(PlannerError::invalid_input("day_end_hour")
                .with_reason("hours must satisfy start < end <= 24"));
        }
        if self.palette.is_empty() {
            return Err(PlannerError::invalid_input("palette").with_reason("cannot be empty"));
        }
        Ok(())
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.cell_height, self.day_start_hour, self.day_end_hour)
    }
}

/// Requests the editor makes of its host.
pub trait ScheduleCallbacks {
    fn on_add_event(&mut self, event: NewEvent);
    fn on_update_event(&mut self, id: u64, patch: EventPatch);
    fn on_delete_event(&mut self, id: u64);
    fn on_date_change(&mut self, date: Date);

    /// A timed replan committed; the record should be persisted.
    fn on_cutover(&mut self, _record: CutoverRecord) {}
}

/// A recorded callback, for hosts that process requests after the fact.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorRequest {
    Add(NewEvent),
    Update { id: u64, patch: EventPatch },
    Delete(u64),
    DateChange(Date),
    Cutover(CutoverRecord),
}

impl ScheduleCallbacks for Vec<EditorRequest> {
    fn on_add_event(&mut self, event: NewEvent) {
        self.push(EditorRequest::Add(event));
    }

    fn on_update_event(&mut self, id: u64, patch: EventPatch) {
        self.push(EditorRequest::Update { id, patch });
    }

    fn on_delete_event(&mut self, id: u64) {
        self.push(EditorRequest::Delete(id));
    }

    fn on_date_change(&mut self, date: Date) {
        self.push(EditorRequest::DateChange(date));
    }

    fn on_cutover(&mut self, record: CutoverRecord) {
        self.push(EditorRequest::Cutover(record));
    }
}

/// The replan menu opened by a secondary press on the current column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenu {
    pub resource_index: usize,
    /// Snapped minute under the press
    pub time: TimeOfDay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TitleEdit {
    event_id: u64,
    draft: String,
}

/// Transient editing state for one displayed date.
#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    config: EditorConfig,
    geometry: GridGeometry,
    date: Date,
    cutover: PlanCutover,
    interaction: InteractionMachine,
    context_menu: Option<ContextMenu>,
    title_edit: Option<TitleEdit>,
}

impl ScheduleEditor {
    pub fn new(config: EditorConfig, date: Date) -> Result<Self> {
        Self::with_cutovers(config, date, &[])
    }

    /// Creates an editor whose plan state is rebuilt from `records`.
    pub fn with_cutovers(
        config: EditorConfig,
        date: Date,
        records: &[CutoverRecord],
    ) -> Result<Self> {
        config.validate()?;
        let cutover = PlanCutover::restore(config.resources.clone(), records)?;
        Ok(Self {
            geometry: config.geometry(),
            config,
            date,
            cutover,
            interaction: InteractionMachine::new(),
            context_menu: None,
            title_edit: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn cutover(&self) -> &PlanCutover {
        &self.cutover
    }

    pub fn session(&self) -> &Session {
        self.interaction.session()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Event whose title is being edited and the current draft.
    pub fn title_edit(&self) -> Option<(u64, &str)> {
        self.title_edit
            .as_ref()
            .map(|edit| (edit.event_id, edit.draft.as_str()))
    }

    /// Replaces the plan state, e.g. after a failed save was rolled back.
    pub fn restore_cutovers(&mut self, records: &[CutoverRecord]) -> Result<()> {
        self.cutover = PlanCutover::restore(self.config.resources.clone(), records)?;
        Ok(())
    }

    /// Routes one pointer event. `events` are all events of the displayed
    /// date.
    pub fn handle_pointer<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        input: &PointerInput,
        events: &[Event],
        callbacks: &mut C,
    ) {
        if input.phase == PointerPhase::Down {
            if input.button == PointerButton::Secondary {
                // A gesture in progress keeps the pointer.
                if self.interaction.is_idle() {
                    self.open_context_menu(input);
                }
                return;
            }
            self.context_menu = None;
        }

        let ctx = GestureContext {
            geometry: &self.geometry,
            cutover: &self.cutover,
            events,
            palette: &self.config.palette,
        };
        let Some(gesture) = self.interaction.handle(input, &ctx) else {
            return;
        };

        match gesture {
            Gesture::Create {
                resource_index,
                range,
                color,
            } => {
                let resource_id = self.config.resources[resource_index].id.clone();
                debug!("Creating {range} on {resource_id}");
                callbacks.on_add_event(NewEvent {
                    title: DEFAULT_EVENT_TITLE.to_string(),
                    date: self.date,
                    resource_id,
                    range,
                    color,
                });
            }
            Gesture::Update { event_id, range } => {
                callbacks.on_update_event(event_id, EventPatch::times(range));
            }
        }
    }

    fn open_context_menu(&mut self, input: &PointerInput) {
        let Some(resource_index) = input.target.resource_index() else {
            return;
        };
        if !self.cutover.accepts_gestures(resource_index) || !self.geometry.contains(input.y) {
            return;
        }
        let time = TimeOfDay::clamped(self.geometry.clamped_minutes_at(input.y));
        self.context_menu = Some(ContextMenu {
            resource_index,
            time,
        });
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Runs the context menu's replan action.
    pub fn confirm_replan<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        events: &[Event],
        callbacks: &mut C,
    ) -> Option<Replan> {
        let menu = self.context_menu.take()?;
        self.replan_at(menu.time, menu.resource_index, events, callbacks)
    }

    /// Timed replan of the column at `resource_index`. Emits the cutover
    /// record followed by a cross-off update for every struck event. Invalid
    /// requests do nothing.
    pub fn replan_at<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        at: TimeOfDay,
        resource_index: usize,
        events: &[Event],
        callbacks: &mut C,
    ) -> Option<Replan> {
        let replan = self.cutover.request_replan_at(at, resource_index, events)?;
        info!(
            "Replanned {} -> {} at {}",
            replan.previous_resource_id, replan.resource_id, replan.cutover_time
        );
        callbacks.on_cutover(replan.record(self.date));
        for (id, patch) in replan.patches() {
            callbacks.on_update_event(id, patch);
        }
        Some(replan)
    }

    /// Requests a new event with an explicit range, under the same rules as
    /// drawing it: the column must accept gestures and the range must start
    /// outside the inert region.
    pub fn add_event<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        resource_index: usize,
        range: TimeRange,
        title: &str,
        events: &[Event],
        callbacks: &mut C,
    ) -> bool {
        let Some(resource) = self.config.resources.get(resource_index) else {
            return false;
        };
        let title = title.trim();
        let color = self.config.palette[events.len() % self.config.palette.len()].clone();
        let new = NewEvent {
            title: if title.is_empty() { DEFAULT_EVENT_TITLE } else { title }.to_string(),
            date: self.date,
            resource_id: resource.id.clone(),
            range,
            color,
        };
        self.create_event(new, callbacks)
    }

    /// Requests `new` unchanged, under the rules of [`add_event`](Self::add_event).
    /// It must also belong to the displayed date.
    pub fn create_event<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        new: NewEvent,
        callbacks: &mut C,
    ) -> bool {
        let Some(resource_index) = self.cutover.index_of(&new.resource_id) else {
            return false;
        };
        let (lower, upper) = self.geometry.bounds();
        let start = new.range.start().minutes();
        if new.date != self.date
            || !self.cutover.accepts_gestures(resource_index)
            || self.cutover.is_inert(start)
            || start < lower
            || new.range.end().minutes() > upper
        {
            debug!("Refusing new event on {} at {}", new.resource_id, new.range);
            return false;
        }
        callbacks.on_add_event(new);
        true
    }

    /// Requests an arbitrary patch of an editable event in the current plan.
    pub fn update_event<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        event_id: u64,
        patch: EventPatch,
        events: &[Event],
        callbacks: &mut C,
    ) -> bool {
        match events.iter().find(|e| e.id == event_id) {
            Some(event) if self.cutover.can_edit(event) => {
                callbacks.on_update_event(event_id, patch);
                true
            }
            _ => false,
        }
    }

    /// Enables every plan column without recording a cutover.
    pub fn request_replan(&mut self) {
        self.cutover.request_replan();
    }

    /// Starts editing the title of `event_id`. Returns false when the event
    /// is not editable.
    pub fn begin_title_edit(&mut self, event_id: u64, events: &[Event]) -> bool {
        match events.iter().find(|e| e.id == event_id) {
            Some(event) if self.cutover.can_edit(event) => {
                self.title_edit = Some(TitleEdit {
                    event_id,
                    draft: event.title.clone(),
                });
                true
            }
            _ => false,
        }
    }

    pub fn edit_title(&mut self, draft: impl Into<String>) {
        if let Some(edit) = self.title_edit.as_mut() {
            edit.draft = draft.into();
        }
    }

    /// Commits the title being edited. A blank title is dropped.
    pub fn finish_title_edit<C: ScheduleCallbacks + ?Sized>(&mut self, callbacks: &mut C) {
        let Some(edit) = self.title_edit.take() else {
            return;
        };
        let title = edit.draft.trim();
        if title.is_empty() {
            debug!("Ignoring empty title for event {}", edit.event_id);
            return;
        }
        callbacks.on_update_event(edit.event_id, EventPatch::title(title));
    }

    pub fn cancel_title_edit(&mut self) {
        self.title_edit = None;
    }

    /// Begins, fills and commits a title edit in one step.
    pub fn rename_event<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        event_id: u64,
        title: &str,
        events: &[Event],
        callbacks: &mut C,
    ) -> bool {
        if title.trim().is_empty() || !self.begin_title_edit(event_id, events) {
            return false;
        }
        self.edit_title(title);
        self.finish_title_edit(callbacks);
        true
    }

    /// Requests deletion of an editable event.
    pub fn delete_event<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        event_id: u64,
        events: &[Event],
        callbacks: &mut C,
    ) -> bool {
        match events.iter().find(|e| e.id == event_id) {
            Some(event) if self.cutover.can_edit(event) => {
                callbacks.on_delete_event(event_id);
                true
            }
            _ => false,
        }
    }

    pub fn previous_day<C: ScheduleCallbacks + ?Sized>(
        &mut self,
        callbacks: &mut C,
    ) -> Result<Date> {
        let date = self.date.yesterday().map_err(date_error)?;
        self.navigate(date, callbacks);
        Ok(date)
    }

    pub fn next_day<C: ScheduleCallbacks + ?Sized>(&mut self, callbacks: &mut C) -> Result<Date> {
        let date = self.date.tomorrow().map_err(date_error)?;
        self.navigate(date, callbacks);
        Ok(date)
    }

    pub fn today<C: ScheduleCallbacks + ?Sized>(&mut self, callbacks: &mut C) -> Date {
        let date = Zoned::now().date();
        self.navigate(date, callbacks);
        date
    }

    /// Switches to `date` with fresh plan state. Hosts follow up with
    /// [`restore_cutovers`](Self::restore_cutovers) once the date's records
    /// are loaded.
    pub fn navigate<C: ScheduleCallbacks + ?Sized>(&mut self, date: Date, callbacks: &mut C) {
        self.reset(date);
        callbacks.on_date_change(date);
    }

    fn reset(&mut self, date: Date) {
        self.date = date;
        self.interaction.reset();
        self.context_menu = None;
        self.title_edit = None;
        self.cutover = PlanCutover::restore(self.config.resources.clone(), &[])
            .unwrap_or_else(|_| self.cutover.clone());
    }
}

fn date_error(error: jiff::Error) -> PlannerError {
    PlannerError::invalid_input("date").with_reason(error.to_string())
}
