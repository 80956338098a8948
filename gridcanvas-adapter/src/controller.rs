use gridcanvas::{
    Canvas, CanvasFrame, CanvasOptions, GridRow, ScrollEvent, ScrollSurface, Window,
};

use crate::{GridMetrics, Overscan, compute_window};

/// A framework-neutral owner for a [`Canvas`].
///
/// It plays the role of the grid viewport: it turns scroll events into new windows, runs the
/// canvas lifecycle, and debounces the `is_scrolling` flag using the canvas's
/// `row_scroll_timeout_ms`.
///
/// Adapters drive it by calling:
/// - `on_scroll(event, now_ms)` when the surface scrolls
/// - `frame()` to render, then `commit()` once the frame is on screen
/// - `tick(now_ms)` each frame/timer tick
pub struct GridController<R, N, S> {
    canvas: Canvas<R, N, S>,
    overscan: Overscan,
    width: u32,
    mounted: bool,
    last_scroll_event_ms: Option<u64>,
}

impl<R, N, S> GridController<R, N, S>
where
    R: GridRow<N> + Clone,
    N: Clone,
    S: ScrollSurface,
{
    /// Creates a controller for a viewport `width` pixels wide. The initial window is computed
    /// from the surface's current offsets, replacing whatever window `options` carried.
    pub fn new(options: CanvasOptions<R, N>, surface: S, width: u32, overscan: Overscan) -> Self {
        let mut this = Self {
            canvas: Canvas::new(options, surface),
            overscan,
            width,
            mounted: false,
            last_scroll_event_ms: None,
        };
        let window = this.compute_window();
        vdebug!(
            display_start = window.display_start,
            display_end = window.display_end,
            "GridController::new"
        );
        this.canvas.set_window(window);
        this
    }

    pub fn canvas(&self) -> &Canvas<R, N, S> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<R, N, S> {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> Canvas<R, N, S> {
        self.canvas
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_scrolling(&self) -> bool {
        self.canvas.options().is_scrolling
    }

    fn metrics(&self) -> GridMetrics<'_> {
        let opts = self.canvas.options();
        GridMetrics {
            rows_count: opts.rows_count,
            row_height: opts.row_height,
            height: opts.height,
            width: self.width,
            columns: &opts.columns,
            overscan: self.overscan,
        }
    }

    fn compute_window(&self) -> Window {
        compute_window(&self.metrics(), self.canvas.get_scroll())
    }

    /// Recomputes the window from the live surface offsets. Returns `true` if it changed.
    pub fn refresh_window(&mut self) -> bool {
        let window = self.compute_window();
        if window == self.canvas.options().window {
            return false;
        }
        vtrace!(
            display_start = window.display_start,
            display_end = window.display_end,
            "refresh_window"
        );
        self.canvas.set_window(window);
        true
    }

    /// Forwards a scroll event to the canvas.
    ///
    /// Events from other surfaces are ignored. For the canvas's own events, marks the grid as
    /// scrolling and recomputes the window. Returns `true` when the window changed and a new
    /// frame should be rendered.
    pub fn on_scroll(&mut self, event: &ScrollEvent, now_ms: u64) -> bool {
        self.canvas.on_scroll(event);
        if !self.canvas.owns_event(event) {
            return false;
        }
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
        self.refresh_window()
    }

    /// Clears `is_scrolling` once `row_scroll_timeout_ms` has elapsed since the last scroll
    /// event. Returns `true` when the flag changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.is_scrolling() {
            return false;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return false;
        };
        let timeout = self.canvas.options().row_scroll_timeout_ms;
        if now_ms.saturating_sub(last) < timeout {
            return false;
        }
        self.last_scroll_event_ms = None;
        self.set_is_scrolling(false)
    }

    fn set_is_scrolling(&mut self, is_scrolling: bool) -> bool {
        if self.is_scrolling() == is_scrolling {
            return false;
        }
        vtrace!(is_scrolling, "set_is_scrolling");
        self.canvas
            .update_options(|o| o.is_scrolling = is_scrolling);
        true
    }

    /// Renders the current window.
    pub fn frame(&mut self) -> CanvasFrame<N> {
        self.canvas.render()
    }

    /// Runs the post-render hook: `did_mount` for the first frame, `did_update` afterwards.
    ///
    /// A scroll-to-row target moves the surface here, so the window is refreshed afterwards.
    /// Returns `true` when that changed the window.
    pub fn commit(&mut self) -> bool {
        if self.mounted {
            self.canvas.did_update();
        } else {
            self.canvas.did_mount();
            self.mounted = true;
        }
        self.refresh_window()
    }

    pub fn scroll_to_row(&mut self, index: Option<usize>) {
        self.canvas
            .update_options(|o| o.scroll_to_row_index = index);
    }

    pub fn on_viewport_size(&mut self, width: u32, height: u32) -> bool {
        self.width = width;
        if self.canvas.options().height != height {
            self.canvas.update_options(|o| o.height = height);
        }
        self.refresh_window()
    }

    pub fn set_rows_count(&mut self, rows_count: usize) -> bool {
        if self.canvas.options().rows_count != rows_count {
            self.canvas.update_options(|o| o.rows_count = rows_count);
        }
        self.refresh_window()
    }

    pub fn unmount(&mut self) {
        self.canvas.unmount();
        self.mounted = false;
        self.last_scroll_event_ms = None;
    }
}

impl<R, N, S: core::fmt::Debug> core::fmt::Debug for GridController<R, N, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridController")
            .field("canvas", &self.canvas)
            .field("overscan", &self.overscan)
            .field("width", &self.width)
            .field("mounted", &self.mounted)
            .field("last_scroll_event_ms", &self.last_scroll_event_ms)
            .finish()
    }
}
