use crate::{ScrollSurface, Window};

/// Which edge of the rendered window the overlay reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryHit {
    Top,
    Bottom,
    Left,
    Right,
}

/// Distance from `scroll_top` to the start of the next row, or 0 when already aligned.
pub fn snap_offset(scroll_top: u64, row_height: u32) -> u64 {
    let row_height = u64::from(row_height);
    if row_height == 0 {
        return 0;
    }
    let remainder = scroll_top % row_height;
    if remainder > 0 { row_height - remainder } else { 0 }
}

/// Turns boundary hits into row- or column-quantized scroll surface mutations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundaryHitDispatcher {
    pub row_height: u32,
    pub col_visible_start: usize,
    pub col_visible_end: usize,
}

impl BoundaryHitDispatcher {
    pub fn new(row_height: u32, window: &Window) -> Self {
        Self {
            row_height,
            col_visible_start: window.col_visible_start,
            col_visible_end: window.col_visible_end,
        }
    }

    /// Mutates the surface for `hit`:
    ///
    /// - `Bottom` completes the partially shown row, then steps one more row down.
    /// - `Top` steps back by one row minus the snap offset.
    /// - `Left` steps the *vertical* offset back by one row.
    /// - `Right` steps the horizontal offset back by the visible column span times the row
    ///   height.
    ///
    /// Decrements saturate at 0.
    pub fn dispatch<S: ScrollSurface + ?Sized>(&self, surface: &mut S, hit: BoundaryHit) {
        let row_height = u64::from(self.row_height);
        let scroll_top = surface.scroll_top();
        match hit {
            BoundaryHit::Bottom => {
                let offset = snap_offset(scroll_top, self.row_height);
                surface.set_scroll_top(scroll_top.saturating_add(row_height + offset));
            }
            BoundaryHit::Top => {
                let offset = snap_offset(scroll_top, self.row_height);
                surface.set_scroll_top(scroll_top.saturating_sub(row_height - offset));
            }
            BoundaryHit::Left => {
                surface.set_scroll_top(scroll_top.saturating_sub(row_height));
            }
            BoundaryHit::Right => {
                let span = self.col_visible_end.saturating_sub(self.col_visible_start) as u64;
                let delta = span.saturating_mul(row_height);
                let scroll_left = surface.scroll_left();
                surface.set_scroll_left(scroll_left.saturating_sub(delta));
            }
        }
        vtrace!(
            ?hit,
            scroll_top = surface.scroll_top(),
            scroll_left = surface.scroll_left(),
            "boundary hit"
        );
    }
}
