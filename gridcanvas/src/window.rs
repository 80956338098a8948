use crate::{RowRange, Window};

/// Local mirror of the display range supplied by the owner.
///
/// Only `display_start`/`display_end` are mirrored; visible and column ranges are always read
/// straight from the current props.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportWindow {
    display_start: usize,
    display_end: usize,
}

impl ViewportWindow {
    pub fn new(window: &Window) -> Self {
        Self {
            display_start: window.display_start,
            display_end: window.display_end,
        }
    }

    pub fn display_start(&self) -> usize {
        self.display_start
    }

    pub fn display_end(&self) -> usize {
        self.display_end
    }

    /// Mirrors the incoming display range if it differs by value. Returns whether it changed.
    pub fn sync(&mut self, incoming: &Window) -> bool {
        if incoming.display_start == self.display_start && incoming.display_end == self.display_end
        {
            return false;
        }
        vdebug!(
            from_start = self.display_start,
            from_end = self.display_end,
            to_start = incoming.display_start,
            to_end = incoming.display_end,
            "ViewportWindow::sync"
        );
        self.display_start = incoming.display_start;
        self.display_end = incoming.display_end;
        true
    }

    /// The display range to materialize, clamped so that `start <= end <= rows_count`.
    pub fn clamped(&self, rows_count: usize) -> RowRange {
        let end = self.display_end.min(rows_count);
        let start = self.display_start.min(end);
        if start != self.display_start || end != self.display_end {
            vwarn!(
                display_start = self.display_start,
                display_end = self.display_end,
                rows_count,
                "display range out of bounds; clamping"
            );
        }
        RowRange { start, end }
    }
}
