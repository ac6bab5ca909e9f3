//! Pointer interaction state machine.
//!
//! Turns a stream of [`PointerInput`] events into create, move and resize
//! gestures. At most one gesture is in progress at a time:
//!
//! ```text
//!            down on column           up (valid release)
//!   Idle ─────────────────────▶ Creating ────────────────▶ Idle + Create
//!    │       down on event            move
//!    ├────────────────────────▶ Dragging ──▶ Update ─┐ up
//!    │       down on handle           move           ▼
//!    └────────────────────────▶ Resizing ──▶ Update ─▶ Idle
//! ```
//!
//! The machine knows nothing about rendering. Pixel offsets are converted to
//! minutes through [`GridGeometry`], and every minute value that leaves this
//! module is snapped to the 15-minute grid and at least 30 minutes long.

pub mod input;

#[cfg(test)]
mod tests;

use log::trace;

pub use input::{PointerButton, PointerInput, PointerPhase, PointerTarget};

use crate::{
    cutover::PlanCutover,
    models::Event,
    time::{clamp, position_to_minutes, Edge, TimeRange, MIN_DURATION_MINUTES},
};

/// Vertical layout of the hour axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Pixels per hour row
    pub cell_height: f64,
    /// Hour drawn at the top of the grid
    pub day_start_hour: u32,
    /// Hour drawn at the bottom of the grid
    pub day_end_hour: u32,
}

impl GridGeometry {
    pub fn new(cell_height: f64, day_start_hour: u32, day_end_hour: u32) -> Self {
        Self {
            cell_height,
            day_start_hour,
            day_end_hour,
        }
    }

    /// Snapped minute-of-day under pixel offset `y`.
    pub fn minutes_at(&self, y: f64) -> i32 {
        position_to_minutes(y, self.cell_height, self.day_start_hour)
    }

    /// Snapped and clamped minute-of-day under `y`.
    pub fn clamped_minutes_at(&self, y: f64) -> i32 {
        let (lower, upper) = self.bounds();
        clamp(self.minutes_at(y), lower, upper)
    }

    /// First and last minute shown on the grid.
    pub fn bounds(&self) -> (i32, i32) {
        (self.day_start_hour as i32 * 60, self.day_end_hour as i32 * 60)
    }

    pub fn total_height(&self) -> f64 {
        f64::from(self.day_end_hour - self.day_start_hour) * self.cell_height
    }

    /// Whether `y` lies on the grid.
    pub fn contains(&self, y: f64) -> bool {
        (0.0..=self.total_height()).contains(&y)
    }

    /// Pixel offset of a minute-of-day value.
    pub fn y_for(&self, minutes: i32) -> f64 {
        f64::from(minutes - self.bounds().0) / 60.0 * self.cell_height
    }

    /// Pixel height of a duration.
    pub fn height_for(&self, duration_minutes: i32) -> f64 {
        f64::from(duration_minutes) / 60.0 * self.cell_height
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(60.0, 0, 24)
    }
}

/// The gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Session {
    #[default]
    Idle,
    Creating {
        resource_index: usize,
        start: i32,
    },
    Dragging {
        event_id: u64,
        origin: TimeRange,
        start_y: f64,
    },
    Resizing {
        event_id: u64,
        edge: Edge,
        origin: TimeRange,
        start_y: f64,
    },
}

/// Everything a pointer event is judged against.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext<'a> {
    pub geometry: &'a GridGeometry,
    pub cutover: &'a PlanCutover,
    /// All events of the displayed date
    pub events: &'a [Event],
    pub palette: &'a [String],
}

/// What a finished or ongoing gesture asks the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// A block was drawn on an empty column
    Create {
        resource_index: usize,
        range: TimeRange,
        color: String,
    },
    /// An existing block was moved or resized
    Update { event_id: u64, range: TimeRange },
}

/// Tracks one gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct InteractionMachine {
    session: Session,
}

impl InteractionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.session, Session::Idle)
    }

    /// Drops any gesture in progress.
    pub fn reset(&mut self) {
        self.session = Session::Idle;
    }

    /// Feeds one pointer event through the machine.
    pub fn handle(&mut self, input: &PointerInput, ctx: &GestureContext<'_>) -> Option<Gesture> {
        match input.phase {
            PointerPhase::Down => {
                self.pointer_down(input, ctx);
                None
            }
            PointerPhase::Move => self.pointer_move(input.y, ctx),
            PointerPhase::Up => self.pointer_up(input, ctx),
        }
    }

    /// Starts a gesture if the press lands somewhere editable. Returns whether
    /// a session began.
    pub fn pointer_down(&mut self, input: &PointerInput, ctx: &GestureContext<'_>) -> bool {
        if !self.is_idle() || input.button != PointerButton::Primary {
            return false;
        }
        if !ctx.geometry.contains(input.y) {
            return false;
        }
        let minutes = ctx.geometry.clamped_minutes_at(input.y);

        let session = match input.target {
            PointerTarget::Column { resource_index } => {
                if !ctx.cutover.accepts_gestures(resource_index) || ctx.cutover.is_inert(minutes) {
                    return false;
                }
                Session::Creating {
                    resource_index,
                    start: minutes,
                }
            }
            PointerTarget::Event {
                resource_index,
                event_id,
            } => match editable_range(ctx, resource_index, event_id, minutes) {
                Some(origin) => Session::Dragging {
                    event_id,
                    origin,
                    start_y: input.y,
                },
                None => return false,
            },
            PointerTarget::ResizeHandle {
                resource_index,
                event_id,
                edge,
            } => match editable_range(ctx, resource_index, event_id, minutes) {
                Some(origin) => Session::Resizing {
                    event_id,
                    edge,
                    origin,
                    start_y: input.y,
                },
                None => return false,
            },
            PointerTarget::Outside => return false,
        };

        trace!("Gesture started: {session:?}");
        self.session = session;
        true
    }

    /// Produces the updated range of the block being moved or resized.
    pub fn pointer_move(&mut self, y: f64, ctx: &GestureContext<'_>) -> Option<Gesture> {
        let (lower, upper) = ctx.geometry.bounds();
        // The pointer may leave the grid mid-gesture.
        let y = y.clamp(0.0, ctx.geometry.total_height());
        match self.session {
            Session::Dragging {
                event_id,
                origin,
                start_y,
            } => {
                let delta = ctx.geometry.minutes_at(y) - ctx.geometry.minutes_at(start_y);
                Some(Gesture::Update {
                    event_id,
                    range: origin.shifted(delta, lower, upper),
                })
            }
            Session::Resizing {
                event_id,
                edge,
                origin,
                start_y,
            } => {
                let delta = ctx.geometry.minutes_at(y) - ctx.geometry.minutes_at(start_y);
                Some(Gesture::Update {
                    event_id,
                    range: origin.resized(edge, delta, lower, upper),
                })
            }
            Session::Idle | Session::Creating { .. } => None,
        }
    }

    /// Ends the gesture. Only a create produces anything here; moves and
    /// resizes were already reported by [`pointer_move`](Self::pointer_move).
    pub fn pointer_up(
        &mut self,
        input: &PointerInput,
        ctx: &GestureContext<'_>,
    ) -> Option<Gesture> {
        let session = std::mem::take(&mut self.session);
        let Session::Creating {
            resource_index,
            start,
        } = session
        else {
            return None;
        };

        if input.target.resource_index() != Some(resource_index) || !ctx.geometry.contains(input.y)
        {
            trace!("Create discarded: released off column {resource_index}");
            return None;
        }

        let end = ctx.geometry.clamped_minutes_at(input.y);
        let (lo, hi) = (start.min(end), start.max(end));
        if hi - lo < MIN_DURATION_MINUTES || ctx.cutover.is_inert(lo) {
            trace!("Create discarded: {lo}..{hi}");
            return None;
        }

        let color = if ctx.palette.is_empty() {
            String::new()
        } else {
            ctx.palette[ctx.events.len() % ctx.palette.len()].clone()
        };
        Some(Gesture::Create {
            resource_index,
            range: TimeRange::from_minutes(lo, hi),
            color,
        })
    }
}

fn editable_range(
    ctx: &GestureContext<'_>,
    resource_index: usize,
    event_id: u64,
    minutes: i32,
) -> Option<TimeRange> {
    if !ctx.cutover.accepts_gestures(resource_index) || ctx.cutover.is_inert(minutes) {
        return None;
    }
    ctx.events
        .iter()
        .find(|e| e.id == event_id)
        .filter(|e| ctx.cutover.can_edit(e))
        .map(Event::range)
}
