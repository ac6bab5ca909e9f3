//! Command execution for the `dp` binary.
//!
//! Schedule edits (add, move, resize, rename, delete, replan) go through a
//! [`DayBoard`], so the same gesture rules apply as in an interactive editor:
//! only the current plan accepts changes, no gesture starts before a cutover
//! and crossed-off events stay frozen. Tasks, notes and metrics go straight to
//! the store.

use anyhow::{anyhow, bail, Context, Result};
use dayplan_core::{
    board::DayBoard,
    display::{
        CreateResult, DaySchedule, DeleteResult, Events, OperationStatus, Tasks, UpdateResult,
    },
    editor::EditorConfig,
    models::{EventPatch, NewTask, TaskPatch},
    params::{parse_date, UpdateMetrics, UpdateTask},
    store::{DayRepository, DayStore},
    time::{minutes_to_time_string, TimeRange},
};
use jiff::{civil::Date, Zoned};
use log::debug;

use crate::{
    args::{
        AddEventArgs, DateArg, DayArgs, EventCommands, MetricsCommands, NoteCommands,
        ReplanArgs, TaskCommands,
    },
    renderer::TerminalRenderer,
};

/// Executes parsed commands against a store and prints markdown.
pub struct Cli {
    store: DayStore,
    renderer: TerminalRenderer,
    config: EditorConfig,
}

impl Cli {
    pub fn new(store: DayStore, renderer: TerminalRenderer) -> Self {
        Self {
            store,
            renderer,
            config: EditorConfig::default(),
        }
    }

    fn resolve_date(arg: &DateArg) -> Result<Date> {
        match arg.date.as_deref() {
            Some(value) => Ok(parse_date("date", value)?),
            None => Ok(Zoned::now().date()),
        }
    }

    async fn open_board(&self, date: Date) -> Result<DayBoard<DayStore>> {
        DayBoard::open(self.store.clone(), self.config.clone(), date)
            .await
            .with_context(|| format!("Failed to load {date}"))
    }

    /// Opens the board for the date an existing event lives on.
    async fn board_for_event(&self, id: u64) -> Result<DayBoard<DayStore>> {
        let event = self.store.get_event(id).await?;
        self.open_board(event.date).await
    }

    pub async fn show_day(&self, args: DayArgs) -> Result<()> {
        let date = Self::resolve_date(&args.date)?;
        let board = self.open_board(date).await?;
        let schedule = DaySchedule::new(board.record(), board.editor().cutover());
        self.renderer.render(&schedule.to_string())
    }

    pub async fn handle_event_command(&self, command: EventCommands) -> Result<()> {
        match command {
            EventCommands::Add(args) => self.add_event(args).await,
            EventCommands::List(args) => {
                let date = Self::resolve_date(&args.date)?;
                let mut events = self.store.list_events(date).await?;
                if let Some(plan) = &args.plan {
                    events.retain(|e| &e.resource_id == plan);
                }
                self.renderer
                    .render(&format!("# Events for {date}\n\n{}", Events(events)))
            }
            EventCommands::Show(args) => {
                let event = self.store.get_event(args.id).await?;
                self.renderer.render(&event.details().to_string())
            }
            EventCommands::Move(args) => {
                let mut board = self.board_for_event(args.id).await?;
                let Some(event) = board.move_event(args.id, args.start).await? else {
                    bail!(
                        "Event {} cannot be moved: it is crossed off or not in the current plan",
                        args.id
                    );
                };
                let changes = EventPatch::times(event.range()).describe();
                self.renderer
                    .render(&UpdateResult::with_changes(event, changes).to_string())
            }
            EventCommands::Resize(args) => {
                let mut board = self.board_for_event(args.id).await?;
                let Some(event) = board.resize_event(args.id, args.edge, args.to).await? else {
                    bail!(
                        "Event {} cannot be resized: it is crossed off or not in the current plan",
                        args.id
                    );
                };
                let changes = EventPatch::times(event.range()).describe();
                self.renderer
                    .render(&UpdateResult::with_changes(event, changes).to_string())
            }
            EventCommands::Rename(args) => {
                let mut board = self.board_for_event(args.id).await?;
                if !board.rename_event(args.id, &args.title).await? {
                    bail!(
                        "Event {} cannot be renamed: it is frozen or the title is blank",
                        args.id
                    );
                }
                let event = board
                    .record()
                    .event(args.id)
                    .cloned()
                    .ok_or_else(|| anyhow!("Event {} disappeared after rename", args.id))?;
                let changes = EventPatch::title(event.title.clone()).describe();
                self.renderer
                    .render(&UpdateResult::with_changes(event, changes).to_string())
            }
            EventCommands::Delete(args) => {
                let event = self.store.get_event(args.id).await?;
                let mut board = self.open_board(event.date).await?;
                if !board.delete_event(args.id).await? {
                    bail!(
                        "Event {} cannot be deleted: it is crossed off or not in the current plan",
                        args.id
                    );
                }
                self.renderer.render(&DeleteResult::new(event).to_string())
            }
        }
    }

    async fn add_event(&self, args: AddEventArgs) -> Result<()> {
        let date = Self::resolve_date(&args.date)?;
        let range = TimeRange::new(args.start, args.end)?;
        let mut board = self.open_board(date).await?;

        let cutover = board.editor().cutover();
        let index = match &args.plan {
            Some(plan) => cutover
                .index_of(plan)
                .ok_or_else(|| anyhow!("Unknown plan '{plan}'"))?,
            None => cutover.current_index(),
        };
        let current = cutover.current_plan().id.clone();
        let inert_until = cutover.inert_until();
        debug!("Adding {range} to column {index} on {date}");

        match board.add_event(index, range, &args.title).await? {
            Some(event) => self.renderer.render(&CreateResult::new(event).to_string()),
            None if !board.editor().cutover().is_current(index) => {
                bail!("Only the current plan ({current}) accepts new events")
            }
            None => bail!(
                "{current} only accepts events from {} on",
                minutes_to_time_string(inert_until)
            ),
        }
    }

    pub async fn replan(&self, args: ReplanArgs) -> Result<()> {
        let date = Self::resolve_date(&args.date)?;
        let mut board = self.open_board(date).await?;
        let status = match board.replan_current_at(args.at).await? {
            Some(replan) => OperationStatus::success(format!(
                "Replanned from {} to {} at {}; crossed off {} event(s)",
                replan.previous_resource_id,
                replan.resource_id,
                replan.cutover_time,
                replan.crossed_off.len()
            )),
            None => OperationStatus::failure(format!(
                "{} is the last plan on {date}; nothing to replan to",
                board.editor().cutover().current_plan().id
            )),
        };
        self.renderer.render(&status.to_string())
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let date = Self::resolve_date(&args.date)?;
                let task = NewTask::try_from(args.into_params(date.to_string()))?;
                let created = self.store.create_task(task).await?;
                self.renderer.render(&CreateResult::new(created).to_string())
            }
            TaskCommands::List(args) => {
                let date = Self::resolve_date(&args.date)?;
                let tasks = Tasks(self.store.list_tasks(date).await?);
                let heading = format!(
                    "# Tasks for {date} ({}/{} done)",
                    tasks.completed(),
                    tasks.len()
                );
                self.renderer.render(&format!("{heading}\n\n{tasks}"))
            }
            TaskCommands::Done(args) => {
                let patch = TaskPatch {
                    completed: Some(true),
                    ..TaskPatch::default()
                };
                let changes = patch.describe();
                let task = self.store.update_task(args.id, patch).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(task, changes).to_string())
            }
            TaskCommands::Update(args) => {
                let id = args.id;
                let patch = TaskPatch::from(UpdateTask::from(args));
                let changes = patch.describe();
                let task = self.store.update_task(id, patch).await?;
                self.renderer
                    .render(&UpdateResult::with_changes(task, changes).to_string())
            }
            TaskCommands::Delete(args) => {
                let task = self.store.delete_task(args.id).await?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
        }
    }

    pub async fn handle_note_command(&self, command: NoteCommands) -> Result<()> {
        match command {
            NoteCommands::Show(args) => {
                let date = Self::resolve_date(&args.date)?;
                let note = self.store.get_note(date).await?;
                self.renderer
                    .render(&format!("# Note for {date}\n\n{note}"))
            }
            NoteCommands::Set(args) => {
                let date = Self::resolve_date(&args.date)?;
                self.store.upsert_note(date, args.content).await?;
                self.renderer
                    .render(&OperationStatus::success(format!("Note saved for {date}")).to_string())
            }
        }
    }

    pub async fn handle_metrics_command(&self, command: MetricsCommands) -> Result<()> {
        match command {
            MetricsCommands::Show(args) => {
                let date = Self::resolve_date(&args.date)?;
                let metrics = self.store.get_metrics(date).await?;
                self.renderer
                    .render(&format!("# Metrics for {date}\n\n{metrics}"))
            }
            MetricsCommands::Set(args) => {
                let date = Self::resolve_date(&args.date)?;
                let (date, patch) = UpdateMetrics {
                    date: date.to_string(),
                    shutdown_complete: args.shutdown,
                    deep_hours: args.deep_hours,
                }
                .into_patch()?;
                let metrics = self.store.upsert_metrics(date, patch).await?;
                self.renderer
                    .render(&format!("# Metrics for {date}\n\n{metrics}"))
            }
        }
    }
}
