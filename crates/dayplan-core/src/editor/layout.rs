//! Pixel layout of the schedule grid.

use jiff::civil::Date;

use super::ScheduleEditor;
use crate::{
    interaction::PointerTarget,
    models::{Event, Resource},
    time::{hour_label, Edge, TimeOfDay},
};

/// Height in pixels of the grab area at each end of a block.
pub const RESIZE_HANDLE_HEIGHT: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HourLabel {
    pub hour: u32,
    pub label: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    pub event_id: u64,
    pub title: String,
    pub top: f64,
    pub height: f64,
    pub color: String,
    pub crossed_off: bool,
    /// Whether the block can be grabbed, renamed or deleted
    pub interactive: bool,
    /// e.g. `9:00 AM - 10:00 AM`
    pub time_label: String,
}

impl BlockLayout {
    fn contains(&self, y: f64) -> bool {
        y >= self.top && y <= self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub resource: Resource,
    pub enabled: bool,
    pub current: bool,
    pub accepts_gestures: bool,
    pub cutover_time: Option<TimeOfDay>,
    /// Height of the inert band at the top of the column
    pub inert_height: f64,
    pub blocks: Vec<BlockLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleLayout {
    pub date: Date,
    pub total_height: f64,
    pub hours: Vec<HourLabel>,
    pub columns: Vec<ColumnLayout>,
}

impl ScheduleLayout {
    /// Finds what a press at `y` in column `resource_index` would hit.
    ///
    /// Resize handles win over the block body; later blocks win over earlier
    /// ones, matching paint order.
    pub fn target_at(&self, resource_index: usize, y: f64) -> PointerTarget {
        let Some(column) = self.columns.get(resource_index) else {
            return PointerTarget::Outside;
        };
        if !(0.0..=self.total_height).contains(&y) {
            return PointerTarget::Outside;
        }
        let Some(block) = column.blocks.iter().rev().find(|b| b.contains(y)) else {
            return PointerTarget::Column { resource_index };
        };

        let event_id = block.event_id;
        if y <= block.top + RESIZE_HANDLE_HEIGHT {
            PointerTarget::ResizeHandle {
                resource_index,
                event_id,
                edge: Edge::Top,
            }
        } else if y >= block.top + block.height - RESIZE_HANDLE_HEIGHT {
            PointerTarget::ResizeHandle {
                resource_index,
                event_id,
                edge: Edge::Bottom,
            }
        } else {
            PointerTarget::Event {
                resource_index,
                event_id,
            }
        }
    }

    pub fn block(&self, event_id: u64) -> Option<(usize, &BlockLayout)> {
        self.columns.iter().enumerate().find_map(|(index, column)| {
            column
                .blocks
                .iter()
                .find(|b| b.event_id == event_id)
                .map(|b| (index, b))
        })
    }
}

impl ScheduleEditor {
    /// Lays out `events` on the grid.
    pub fn layout(&self, events: &[Event]) -> ScheduleLayout {
        let geometry = &self.geometry;
        let cutover = &self.cutover;

        let hours = (geometry.day_start_hour..=geometry.day_end_hour)
            .map(|hour| HourLabel {
                hour,
                label: hour_label(hour),
                y: geometry.y_for(hour as i32 * 60),
            })
            .collect();

        let columns = cutover
            .resources()
            .iter()
            .enumerate()
            .map(|(index, resource)| {
                let current = cutover.is_current(index);
                let cutover_time = cutover.cutover_time(&resource.id);
                let inert_height = if current {
                    geometry.y_for(cutover.inert_until()).max(0.0)
                } else {
                    0.0
                };
                let blocks = events
                    .iter()
                    .filter(|e| e.resource_id == resource.id && e.date == self.date)
                    .map(|event| {
                        let range = event.range();
                        BlockLayout {
                            event_id: event.id,
                            title: event.title.clone(),
                            top: geometry.y_for(range.start().minutes()),
                            height: geometry.height_for(range.duration_minutes()),
                            color: event.color.clone(),
                            crossed_off: event.is_crossed_off,
                            interactive: cutover.can_edit(event),
                            time_label: range.to_string(),
                        }
                    })
                    .collect();

                ColumnLayout {
                    resource: resource.clone(),
                    enabled: cutover.is_enabled(index),
                    current,
                    accepts_gestures: cutover.accepts_gestures(index),
                    cutover_time,
                    inert_height,
                    blocks,
                }
            })
            .collect();

        ScheduleLayout {
            date: self.date,
            total_height: geometry.total_height(),
            hours,
            columns,
        }
    }
}
