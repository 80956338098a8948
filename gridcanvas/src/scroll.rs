use crate::{OnScrollCallback, RowRegistry, ScrollEvent, ScrollState, ScrollSurface, SurfaceId};

/// Owns the cached scroll offsets of a canvas and keeps row instances horizontally aligned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollCoordinator {
    state: ScrollState,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The offsets cached from the last accepted scroll event.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ScrollState::default();
    }

    /// Handles a scroll event.
    ///
    /// Events whose target is not `surface` (bubbled from a nested scrollable) are ignored.
    /// Otherwise the event's offsets are cached and reported to `on_scroll`.
    pub fn on_scroll(
        &mut self,
        surface: SurfaceId,
        event: &ScrollEvent,
        on_scroll: Option<&OnScrollCallback>,
    ) {
        if event.target != surface {
            vtrace!(target_id = event.target.0, surface_id = surface.0, "ignored scroll event");
            return;
        }
        let state = ScrollState {
            scroll_top: event.scroll_top,
            scroll_left: event.scroll_left,
        };
        vtrace!(
            scroll_top = state.scroll_top,
            scroll_left = state.scroll_left,
            "on_scroll"
        );
        self.state = state;
        if let Some(cb) = on_scroll {
            cb(state);
        }
    }

    /// Reads live offsets from the surface rather than the cache.
    pub fn get_scroll<S: ScrollSurface + ?Sized>(surface: &S) -> ScrollState {
        ScrollState {
            scroll_top: surface.scroll_top(),
            scroll_left: surface.scroll_left(),
        }
    }

    /// Applies `scroll_left` to every live handle among the first `realized_count` slots that can
    /// follow a horizontal offset. Returns how many rows were updated.
    pub fn set_scroll_left(registry: &RowRegistry, realized_count: usize, scroll_left: u64) -> usize {
        if realized_count == 0 {
            return 0;
        }
        let mut applied = 0usize;
        registry.for_each_live(realized_count, |_, handle| {
            if let Some(sync) = handle.underlying().scroll_left_sync() {
                sync.set_scroll_left(scroll_left);
                applied += 1;
            }
        });
        vtrace!(scroll_left, realized_count, applied, "set_scroll_left");
        applied
    }
}

/// Vertical offset that brings `index` to the top, without scrolling past the last full page.
pub fn scroll_to_row_offset(index: usize, row_height: u32, rows_count: usize, height: u32) -> u64 {
    let row_height = u64::from(row_height);
    let target = (index as u64).saturating_mul(row_height);
    let max = (rows_count as u64)
        .saturating_mul(row_height)
        .saturating_sub(u64::from(height));
    target.min(max)
}

/// Width of the vertical scrollbar of `surface`.
pub fn scrollbar_width<S: ScrollSurface + ?Sized>(surface: &S) -> u32 {
    surface.offset_width().saturating_sub(surface.client_width())
}
