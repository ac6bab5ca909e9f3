//! Toolkit-neutral pointer input.

use crate::time::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left click or touch
    Primary,
    /// Right click or long press
    Secondary,
}

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty space in a plan column
    Column { resource_index: usize },
    /// The body of an event block
    Event { resource_index: usize, event_id: u64 },
    /// One of the resize grips of an event block
    ResizeHandle {
        resource_index: usize,
        event_id: u64,
        edge: Edge,
    },
    /// Anywhere off the grid columns
    Outside,
}

impl PointerTarget {
    /// Column the target belongs to, if any.
    pub fn resource_index(&self) -> Option<usize> {
        match *self {
            PointerTarget::Column { resource_index }
            | PointerTarget::Event { resource_index, .. }
            | PointerTarget::ResizeHandle { resource_index, .. } => Some(resource_index),
            PointerTarget::Outside => None,
        }
    }
}

/// A single pointer event. `y` is the vertical offset in pixels from the top
/// of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub button: PointerButton,
    pub y: f64,
    pub target: PointerTarget,
}

impl PointerInput {
    pub fn down(target: PointerTarget, y: f64) -> Self {
        Self {
            phase: PointerPhase::Down,
            button: PointerButton::Primary,
            y,
            target,
        }
    }

    pub fn secondary_down(target: PointerTarget, y: f64) -> Self {
        Self {
            button: PointerButton::Secondary,
            ..Self::down(target, y)
        }
    }

    pub fn move_to(target: PointerTarget, y: f64) -> Self {
        Self {
            phase: PointerPhase::Move,
            ..Self::down(target, y)
        }
    }

    pub fn up(target: PointerTarget, y: f64) -> Self {
        Self {
            phase: PointerPhase::Up,
            ..Self::down(target, y)
        }
    }
}
