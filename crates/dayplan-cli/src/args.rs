//! Command-line arguments using clap's derive API.
//!
//! Argument structs convert into the core parameter types from
//! [`dayplan_core::params`], so the CLI and the HTTP API validate input the
//! same way:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Models
//! ```

use std::{net::SocketAddr, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use dayplan_core::{
    params::{CreateTask, UpdateTask},
    time::{Edge, TimeOfDay},
};

/// Day planner with parallel plan columns and replanning
///
/// Each day is a time grid with four plan columns. Draw blocks into the
/// current plan, and when the day derails, replan: the rest of the current
/// plan is crossed off and the next column takes over.
#[derive(Parser)]
#[command(version, about, name = "dp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/dayplan/dayplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a day: plan columns, tasks, note and metrics
    #[command(alias = "d")]
    Day(DayArgs),
    /// Manage events on the schedule grid
    #[command(alias = "e")]
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Abandon the current plan at a given time and switch to the next one
    #[command(alias = "r")]
    Replan(ReplanArgs),
    /// Manage the task list of a day
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Read or write the note of a day
    #[command(alias = "n")]
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Read or write the daily metrics
    #[command(alias = "m")]
    Metrics {
        #[command(subcommand)]
        command: MetricsCommands,
    },
    /// Start the HTTP API server
    Serve(ServeArgs),
}

/// Date selection shared by most commands.
#[derive(ClapArgs, Clone, Default)]
pub struct DateArg {
    /// Date to operate on (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(ClapArgs)]
pub struct DayArgs {
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(ClapArgs)]
pub struct AddEventArgs {
    /// Title of the event
    pub title: String,
    /// Start time (HH:MM, 15-minute grid)
    #[arg(long)]
    pub start: TimeOfDay,
    /// End time (HH:MM, at least 30 minutes after the start)
    #[arg(long)]
    pub end: TimeOfDay,
    /// Plan column (plan-a .. plan-d). Defaults to the current plan
    #[arg(long)]
    pub plan: Option<String>,
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(ClapArgs)]
pub struct ListEventsArgs {
    /// Only show one plan column
    #[arg(long)]
    pub plan: Option<String>,
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(ClapArgs)]
pub struct MoveEventArgs {
    /// Event to move
    pub id: u64,
    /// New start time (HH:MM); the duration is kept
    pub start: TimeOfDay,
}

#[derive(ClapArgs)]
pub struct ResizeEventArgs {
    /// Event to resize
    pub id: u64,
    /// Edge to drag: top (start) or bottom (end)
    pub edge: Edge,
    /// Time to drag the edge to (HH:MM)
    pub to: TimeOfDay,
}

#[derive(ClapArgs)]
pub struct RenameEventArgs {
    /// Event to rename
    pub id: u64,
    /// New title
    pub title: String,
}

#[derive(ClapArgs)]
pub struct EventIdArgs {
    /// Event ID
    pub id: u64,
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// Add an event to a plan column
    #[command(alias = "a")]
    Add(AddEventArgs),
    /// List events of a day
    #[command(aliases = ["l", "ls"])]
    List(ListEventsArgs),
    /// Show one event
    #[command(alias = "s")]
    Show(EventIdArgs),
    /// Drag an event to a new start time
    #[command(alias = "mv")]
    Move(MoveEventArgs),
    /// Drag one edge of an event
    Resize(ResizeEventArgs),
    /// Rename an event
    Rename(RenameEventArgs),
    /// Delete an event
    #[command(aliases = ["d", "rm"])]
    Delete(EventIdArgs),
}

#[derive(ClapArgs)]
pub struct ReplanArgs {
    /// Time at which the current plan is abandoned (HH:MM)
    #[arg(long)]
    pub at: TimeOfDay,
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(ClapArgs)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    /// Optional longer description
    #[arg(short, long)]
    pub description: Option<String>,
    #[command(flatten)]
    pub date: DateArg,
}

impl AddTaskArgs {
    pub fn into_params(self, date: String) -> CreateTask {
        CreateTask {
            title: self.title,
            description: self.description,
            completed: false,
            date,
        }
    }
}

#[derive(ClapArgs)]
pub struct UpdateTaskArgs {
    /// Task to update
    pub id: u64,
    /// New title
    #[arg(short, long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Mark as completed or not
    #[arg(short, long)]
    pub completed: Option<bool>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            title: val.title,
            description: val.description,
            completed: val.completed,
        }
    }
}

#[derive(ClapArgs)]
pub struct TaskIdArgs {
    /// Task ID
    pub id: u64,
}

#[derive(ClapArgs)]
pub struct ListTasksArgs {
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List the tasks of a day
    #[command(aliases = ["l", "ls"])]
    List(ListTasksArgs),
    /// Mark a task as completed
    Done(TaskIdArgs),
    /// Update a task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Delete a task
    #[command(aliases = ["d", "rm"])]
    Delete(TaskIdArgs),
}

#[derive(ClapArgs)]
pub struct ShowNoteArgs {
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(ClapArgs)]
pub struct SetNoteArgs {
    /// Markdown content of the note
    pub content: String,
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Print the note
    #[command(alias = "s")]
    Show(ShowNoteArgs),
    /// Replace the note
    Set(SetNoteArgs),
}

#[derive(ClapArgs)]
pub struct ShowMetricsArgs {
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(ClapArgs)]
pub struct SetMetricsArgs {
    /// Whether the shutdown ritual is done
    #[arg(long)]
    pub shutdown: Option<bool>,
    /// Hours of deep work (0-24)
    #[arg(long, allow_negative_numbers = true)]
    pub deep_hours: Option<i64>,
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(Subcommand)]
pub enum MetricsCommands {
    /// Print the metrics
    #[command(alias = "s")]
    Show(ShowMetricsArgs),
    /// Update the metrics
    Set(SetMetricsArgs),
}

#[derive(ClapArgs)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:4096")]
    pub bind: SocketAddr,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_resize() {
        let args = Args::parse_from(["dp", "event", "resize", "3", "top", "08:45"]);
        let Some(Commands::Event {
            command: EventCommands::Resize(resize),
        }) = args.command
        else {
            panic!("expected event resize");
        };
        assert_eq!(resize.edge, Edge::Top);
        assert_eq!(resize.to.to_string(), "08:45");
    }

    #[test]
    fn test_invalid_time_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["dp", "replan", "--at", "noon"]).is_err());
    }
}
