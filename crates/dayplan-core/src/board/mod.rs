//! Day board: one date's state plus its editor.
//!
//! The board is the single owner of a loaded [`DayRecord`]. Editor requests
//! are applied to the local record first and then persisted through the
//! [`DayRepository`]. When the repository rejects a request the local record
//! and plan state are reverted and the error is returned to the caller.
//!
//! ```text
//!  PointerInput ─▶ ScheduleEditor ─▶ EditorRequest ─▶ DayBoard ─▶ DayRepository
//!                                                       │  ▲
//!                                           local apply ▼  │ revert on failure
//!                                                     DayRecord
//! ```


use jiff::civil::Date;
use log::{debug, warn};

use crate::{
    cutover::Replan,
    editor::{EditorConfig, EditorRequest, ScheduleEditor, ScheduleLayout},
    error::{PlannerError, Result},
    interaction::{PointerInput, PointerTarget, Session},
    models::{DayRecord, Event, EventPatch, NewEvent},
    store::DayRepository,
    time::{Edge, TimeOfDay, TimeRange},
};

/// Owns one date's snapshot and reconciles editor requests with storage.
pub struct DayBoard<R> {
    repository: R,
    editor: ScheduleEditor,
    record: DayRecord,
}

impl<R: DayRepository> DayBoard<R> {
    /// Loads `date` and builds an editor with its plan state restored.
    pub async fn open(repository: R, config: EditorConfig, date: Date) -> Result<Self> {
        let record = repository.load_day(date).await?;
        let editor = ScheduleEditor::with_cutovers(config, date, &record.cutovers)?;
        Ok(Self {
            repository,
            editor,
            record,
        })
    }

    pub fn record(&self) -> &DayRecord {
        &self.record
    }

    pub fn events(&self) -> &[Event] {
        &self.record.events
    }

    pub fn editor(&self) -> &ScheduleEditor {
        &self.editor
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn date(&self) -> Date {
        self.editor.date()
    }

    pub fn layout(&self) -> ScheduleLayout {
        self.editor.layout(&self.record.events)
    }

    /// Feeds one pointer event through the editor and applies what it asks
    /// for.
    pub async fn pointer(&mut self, input: PointerInput) -> Result<()> {
        let mut requests = Vec::new();
        self.editor.handle_pointer(&input, &self.record.events, &mut requests);
        self.dispatch(requests).await
    }

    /// Runs the open context menu's replan action.
    pub async fn confirm_replan(&mut self) -> Result<Option<Replan>> {
        // The per-event requests are superseded by one atomic write.
        let mut superseded: Vec<EditorRequest> = Vec::new();
        let replan = self
            .editor
            .confirm_replan(&self.record.events, &mut superseded);
        if let Some(replan) = &replan {
            self.commit_replan(replan).await?;
        }
        Ok(replan)
    }

    /// Timed replan of the column at `resource_index`.
    pub async fn replan_at(
        &mut self,
        at: TimeOfDay,
        resource_index: usize,
    ) -> Result<Option<Replan>> {
        let mut superseded: Vec<EditorRequest> = Vec::new();
        let replan = self
            .editor
            .replan_at(at, resource_index, &self.record.events, &mut superseded);
        if let Some(replan) = &replan {
            self.commit_replan(replan).await?;
        }
        Ok(replan)
    }

    /// Stores the cutover and every cross-off of `replan` in one repository
    /// call. On failure the record and plan state go back to how they were.
    async fn commit_replan(&mut self, replan: &Replan) -> Result<()> {
        let snapshot = self.record.clone();
        let record = replan.record(self.record.date);
        self.record.cutovers.push(record.clone());
        replan.apply_to(&mut self.record.events);

        match self
            .repository
            .apply_replan(record, replan.crossed_off.clone())
            .await
        {
            Ok(stored) => {
                for event in stored {
                    if let Some(local) = self.record.event_mut(event.id) {
                        *local = event;
                    }
                }
                Ok(())
            }
            Err(error) => {
                warn!("Reverting replan after failed save: {error}");
                self.record = snapshot;
                self.editor.restore_cutovers(&self.record.cutovers)?;
                Err(error)
            }
        }
    }

    /// Timed replan of whichever column is current.
    pub async fn replan_current_at(&mut self, at: TimeOfDay) -> Result<Option<Replan>> {
        let current = self.editor.cutover().current_index();
        self.replan_at(at, current).await
    }

    /// Enables every plan column for this session.
    pub fn request_replan(&mut self) {
        self.editor.request_replan();
    }

    /// Creates an event in a column with an explicit range.
    pub async fn add_event(
        &mut self,
        resource_index: usize,
        range: TimeRange,
        title: &str,
    ) -> Result<Option<Event>> {
        let mut requests = Vec::new();
        let events = &self.record.events;
        if !self
            .editor
            .add_event(resource_index, range, title, events, &mut requests)
        {
            return Ok(None);
        }
        self.dispatch_create(requests).await
    }

    /// Creates `new` as given, keeping its title and color. Returns `None`
    /// when its column is not accepting gestures or the range starts in the
    /// inert region.
    pub async fn create_event(&mut self, new: NewEvent) -> Result<Option<Event>> {
        let mut requests = Vec::new();
        if !self.editor.create_event(new, &mut requests) {
            return Ok(None);
        }
        self.dispatch_create(requests).await
    }

    async fn dispatch_create(&mut self, requests: Vec<EditorRequest>) -> Result<Option<Event>> {
        let before: Vec<u64> = self.record.events.iter().map(|e| e.id).collect();
        self.dispatch(requests).await?;
        Ok(self
            .record
            .events
            .iter()
            .find(|e| !before.contains(&e.id))
            .cloned())
    }

    /// Applies `patch` to an editable event of the current plan. Returns
    /// `None` when the editor refused.
    pub async fn update_event(
        &mut self,
        event_id: u64,
        patch: EventPatch,
    ) -> Result<Option<Event>> {
        let mut requests = Vec::new();
        if !self
            .editor
            .update_event(event_id, patch, &self.record.events, &mut requests)
        {
            return Ok(None);
        }
        self.dispatch(requests).await?;
        Ok(self.record.event(event_id).cloned())
    }

    /// Drags an event so that it starts at `start`, through the same
    /// pointer path a user would take.
    pub async fn move_event(&mut self, event_id: u64, start: TimeOfDay) -> Result<Option<Event>> {
        let Some((resource_index, event)) = self.locate(event_id) else {
            return Err(PlannerError::EventNotFound { id: event_id });
        };
        let geometry = *self.editor.geometry();
        let target = PointerTarget::Event {
            resource_index,
            event_id,
        };
        let press_y = geometry.y_for(event.start_time.minutes());
        let release_y = geometry.y_for(start.minutes());
        self.drag(target, press_y, release_y, event_id).await
    }

    /// Drags one edge of an event to `to`.
    pub async fn resize_event(
        &mut self,
        event_id: u64,
        edge: Edge,
        to: TimeOfDay,
    ) -> Result<Option<Event>> {
        let Some((resource_index, event)) = self.locate(event_id) else {
            return Err(PlannerError::EventNotFound { id: event_id });
        };
        let geometry = *self.editor.geometry();
        let target = PointerTarget::ResizeHandle {
            resource_index,
            event_id,
            edge,
        };
        let grabbed = match edge {
            Edge::Top => event.start_time,
            Edge::Bottom => event.end_time,
        };
        let press_y = geometry.y_for(grabbed.minutes());
        let release_y = geometry.y_for(to.minutes());
        self.drag(target, press_y, release_y, event_id).await
    }

    async fn drag(
        &mut self,
        target: PointerTarget,
        press_y: f64,
        release_y: f64,
        event_id: u64,
    ) -> Result<Option<Event>> {
        self.pointer(PointerInput::down(target, press_y)).await?;
        if matches!(self.editor.session(), Session::Idle) {
            return Ok(None);
        }
        let moved = self.pointer(PointerInput::move_to(target, release_y)).await;
        self.pointer(PointerInput::up(target, release_y)).await?;
        moved?;
        Ok(self.record.event(event_id).cloned())
    }

    fn locate(&self, event_id: u64) -> Option<(usize, Event)> {
        let event = self.record.event(event_id)?.clone();
        let index = self.editor.cutover().index_of(&event.resource_id)?;
        Some((index, event))
    }

    /// Renames an editable event. Returns false when the editor refused.
    pub async fn rename_event(&mut self, event_id: u64, title: &str) -> Result<bool> {
        let mut requests = Vec::new();
        let accepted = self
            .editor
            .rename_event(event_id, title, &self.record.events, &mut requests);
        self.dispatch(requests).await?;
        Ok(accepted)
    }

    /// Deletes an editable event. Returns false when the editor refused.
    pub async fn delete_event(&mut self, event_id: u64) -> Result<bool> {
        let mut requests = Vec::new();
        let accepted = self
            .editor
            .delete_event(event_id, &self.record.events, &mut requests);
        self.dispatch(requests).await?;
        Ok(accepted)
    }

    pub async fn previous_day(&mut self) -> Result<Date> {
        let mut requests = Vec::new();
        let previous = self.editor.date();
        let date = self.editor.previous_day(&mut requests)?;
        self.dispatch_navigation(requests, previous).await?;
        Ok(date)
    }

    pub async fn next_day(&mut self) -> Result<Date> {
        let mut requests = Vec::new();
        let previous = self.editor.date();
        let date = self.editor.next_day(&mut requests)?;
        self.dispatch_navigation(requests, previous).await?;
        Ok(date)
    }

    pub async fn today(&mut self) -> Result<Date> {
        let mut requests = Vec::new();
        let previous = self.editor.date();
        let date = self.editor.today(&mut requests);
        self.dispatch_navigation(requests, previous).await?;
        Ok(date)
    }

    pub async fn go_to(&mut self, date: Date) -> Result<()> {
        let mut requests = Vec::new();
        let previous = self.editor.date();
        self.editor.navigate(date, &mut requests);
        self.dispatch_navigation(requests, previous).await
    }

    async fn dispatch_navigation(
        &mut self,
        requests: Vec<EditorRequest>,
        previous: Date,
    ) -> Result<()> {
        if let Err(error) = self.dispatch(requests).await {
            warn!("Staying on {previous}: {error}");
            self.editor.navigate(previous, &mut Vec::<EditorRequest>::new());
            self.editor.restore_cutovers(&self.record.cutovers)?;
            return Err(error);
        }
        Ok(())
    }

    /// Applies requests in order, reverting everything on the first failure.
    async fn dispatch(&mut self, requests: Vec<EditorRequest>) -> Result<()> {
        if requests.is_empty() {
            return Ok(());
        }
        let snapshot = self.record.clone();
        let mut persisted = 0usize;

        for request in requests {
            if let Err(error) = self.apply(request).await {
                warn!("Reverting local changes after failed save: {error}");
                self.record = snapshot;
                if persisted > 0 {
                    // Part of the batch reached storage; trust the stored state.
                    match self.repository.load_day(self.record.date).await {
                        Ok(record) => self.record = record,
                        Err(reload) => warn!("Reload after partial save failed: {reload}"),
                    }
                }
                self.editor.restore_cutovers(&self.record.cutovers)?;
                return Err(error);
            }
            persisted += 1;
        }
        Ok(())
    }

    async fn apply(&mut self, request: EditorRequest) -> Result<()> {
        match request {
            EditorRequest::Add(new) => {
                new.validate_for(&self.editor.config().resources)?;
                let event = self.repository.create_event(new).await?;
                debug!("Created event {}", event.id);
                self.record.events.push(event);
                self.record.sort_events();
            }
            EditorRequest::Update { id, patch } => {
                self.record
                    .event_mut(id)
                    .ok_or(PlannerError::EventNotFound { id })?
                    .apply(&patch)?;
                self.record.sort_events();
                let stored = self.repository.update_event(id, patch).await?;
                if let Some(event) = self.record.event_mut(id) {
                    *event = stored;
                }
            }
            EditorRequest::Delete(id) => {
                self.record.events.retain(|e| e.id != id);
                self.repository.delete_event(id).await?;
            }
            EditorRequest::Cutover(record) => {
                self.record.cutovers.push(record.clone());
                self.repository.apply_replan(record, Vec::new()).await?;
            }
            EditorRequest::DateChange(date) => {
                self.record = self.repository.load_day(date).await?;
                self.editor.restore_cutovers(&self.record.cutovers)?;
            }
        }
        Ok(())
    }
}
