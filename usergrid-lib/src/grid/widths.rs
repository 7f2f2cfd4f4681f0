//! Column widths and the drag-to-resize gesture.

use std::collections::BTreeMap;

use crate::model::ColumnKey;

/// Settings key under which widths are persisted.
pub const COLUMN_WIDTHS_KEY: &str = "grid.column_widths";

/// State of the resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A column edge is held.
    Dragging {
        column: ColumnKey,
        start_x: i32,
        start_width: u32,
    },
}

/// Current pixel width of every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidths {
    widths: BTreeMap<ColumnKey, u32>,
    min: u32,
    drag: DragState,
}

impl ColumnWidths {
    /// Creates widths from per-column defaults.
    ///
    /// Columns missing from `defaults` start at `min`.
    pub fn new(defaults: &BTreeMap<ColumnKey, u32>, min: u32) -> Self {
        let widths = ColumnKey::ALL
            .into_iter()
            .map(|key| (key, defaults.get(&key).copied().unwrap_or(min).max(min)))
            .collect();
        Self {
            widths,
            min,
            drag: DragState::Idle,
        }
    }

    /// Returns the width of a column.
    pub fn get(&self, key: ColumnKey) -> u32 {
        self.widths.get(&key).copied().unwrap_or(self.min)
    }

    /// Returns the minimum width.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Returns all widths in column order.
    pub fn as_map(&self) -> &BTreeMap<ColumnKey, u32> {
        &self.widths
    }

    /// Returns the gesture state.
    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Starts dragging the right edge of `column` from pointer position `x`.
    ///
    /// A drag already in progress is abandoned at its current width.
    pub fn begin_drag(&mut self, column: ColumnKey, x: i32) {
        self.drag = DragState::Dragging {
            column,
            start_x: x,
            start_width: self.get(column),
        };
    }

    /// Follows the pointer to `x`.
    ///
    /// Returns the resized column and its new width, or `None` when idle.
    pub fn drag_to(&mut self, x: i32) -> Option<(ColumnKey, u32)> {
        let DragState::Dragging {
            column,
            start_x,
            start_width,
        } = self.drag
        else {
            return None;
        };
        let width = self.apply(column, start_width, i64::from(x) - i64::from(start_x));
        Some((column, width))
    }

    /// Releases the held edge. Returns the column that was being dragged.
    pub fn end_drag(&mut self) -> Option<ColumnKey> {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging { column, .. } => Some(column),
            DragState::Idle => None,
        }
    }

    /// Widens (or narrows, for a negative `delta`) `column` in one step.
    pub fn resize(&mut self, column: ColumnKey, delta: i32) -> u32 {
        let start = self.get(column);
        self.apply(column, start, i64::from(delta))
    }

    /// Overlays a persisted snapshot.
    ///
    /// Unknown column names are ignored and widths below the minimum are
    /// raised to it.
    pub fn restore(&mut self, saved: &BTreeMap<String, u32>) {
        for (name, width) in saved {
            match name.parse::<ColumnKey>() {
                Ok(key) => {
                    self.widths.insert(key, (*width).max(self.min));
                }
                Err(_) => log::debug!("Ignoring saved width for unknown column {:?}", name),
            }
        }
    }

    /// The snapshot to persist, keyed by column name.
    pub fn to_persisted(&self) -> BTreeMap<String, u32> {
        self.widths
            .iter()
            .map(|(key, width)| (key.as_str().to_string(), *width))
            .collect()
    }

    fn apply(&mut self, column: ColumnKey, start: u32, delta: i64) -> u32 {
        let width = (i64::from(start) + delta).clamp(i64::from(self.min), i64::from(u32::MAX));
        let width = u32::try_from(width).unwrap_or(u32::MAX);
        self.widths.insert(column, width);
        width
    }
}
