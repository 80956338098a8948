use alloc::boxed::Box;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::scroll::{scroll_to_row_offset, scrollbar_width};
use crate::{
    BoundaryHit, BoundaryHitDispatcher, CanvasFrame, CanvasInfo, CanvasOptions, CanvasRow,
    GridRow, OverlayProps, Placeholder, PlaceholderSlot, RealizedRow, RowHandle, RowProps,
    RowRange, RowRegistry, RowRenderer, RowsContainer, ScrollCoordinator, ScrollEvent,
    ScrollState, ScrollSurface, ViewportWindow,
};

/// The grid canvas: a stateful scheduler over a virtual row list.
///
/// The canvas holds no UI objects. A host drives it through a render lifecycle:
///
/// 1. [`Canvas::render`] produces a [`CanvasFrame`] for the current window.
/// 2. The host mounts the realized rows and registers their handles with
///    [`Canvas::attach_row`].
/// 3. [`Canvas::did_mount`] (first pass) or [`Canvas::did_update`] (later passes) runs the
///    post-render side effects: horizontal offset resync, scroll-to-row and the row
///    materialization callback.
///
/// Scroll events go through [`Canvas::on_scroll`]; the owner answers them with a new window via
/// [`Canvas::receive_options`] or [`Canvas::set_window`].
pub struct Canvas<R, N, S> {
    options: CanvasOptions<R, N>,
    surface: S,
    window: ViewportWindow,
    scroll: ScrollCoordinator,
    registry: RowRegistry,
    realized_count: usize,
    current_range: Option<RowRange>,
    last_notified: Option<RowRange>,
}

impl<R, N, S> Canvas<R, N, S>
where
    R: GridRow<N> + Clone,
    N: Clone,
    S: ScrollSurface,
{
    pub fn new(options: CanvasOptions<R, N>, surface: S) -> Self {
        vdebug!(
            rows_count = options.rows_count,
            row_height = options.row_height,
            height = options.height,
            "Canvas::new"
        );
        Self {
            window: ViewportWindow::new(&options.window),
            options,
            surface,
            scroll: ScrollCoordinator::new(),
            registry: RowRegistry::new(),
            realized_count: 0,
            current_range: None,
            last_notified: None,
        }
    }

    pub fn options(&self) -> &CanvasOptions<R, N> {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn window(&self) -> &ViewportWindow {
        &self.window
    }

    /// Accepts new props from the owner, mirroring the display range if it changed.
    pub fn receive_options(&mut self, options: CanvasOptions<R, N>) {
        self.window.sync(&options.window);
        self.options = options;
    }

    /// Clones the current options, applies `f`, then delegates to `receive_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut CanvasOptions<R, N>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.receive_options(next);
    }

    pub fn set_window(&mut self, window: crate::Window) {
        self.window.sync(&window);
        self.options.window = window;
    }

    /// Records `[display_start, display_end)` as the range to report, then materializes it.
    pub fn get_rows(&mut self, display_start: usize, display_end: usize) -> Vec<RealizedRow<R>> {
        self.current_range = Some(RowRange {
            start: display_start,
            end: display_end,
        });
        self.options.rows.window(
            display_start,
            display_end,
            self.options.sub_row_details.as_ref(),
        )
    }

    pub fn is_row_selected(&self, index: usize, row: &R) -> bool {
        self.options.selection_resolver().is_row_selected(index, row)
    }

    pub fn canvas_info(&self) -> CanvasInfo {
        CanvasInfo {
            window: self.options.window,
            row_height: self.options.row_height,
            height: self.options.height,
            rows_count: self.options.rows_count,
            is_scrolling: self.options.is_scrolling,
        }
    }

    /// Runs a render pass over the mirrored display range.
    pub fn render(&mut self) -> CanvasFrame<N> {
        let requested = self.window.clamped(self.options.rows_count);
        let realized = self.get_rows(requested.start, requested.end);
        // A slice shorter than `rows_count` yields fewer rows than asked for.
        let range = RowRange {
            start: requested.start,
            end: requested.start + realized.len(),
        };
        if range.len() < requested.len() {
            vwarn!(
                start = range.start,
                end = range.end,
                rows_count = self.options.rows_count,
                "row source shorter than rows_count"
            );
        }
        self.current_range = Some(range);
        self.realized_count = range.len();

        let info = self.canvas_info();
        let opts = &self.options;
        let win = &opts.window;
        let row_height = u64::from(opts.row_height);
        let selection = opts.selection_resolver();

        let mut rows = Vec::with_capacity(realized.len() + 2);
        if range.start > 0 {
            rows.push(CanvasRow::Placeholder(Placeholder::new(
                PlaceholderSlot::Top,
                (range.start as u64).saturating_mul(row_height),
                &opts.columns,
            )));
        }

        for (position, r) in realized.iter().enumerate() {
            let idx = range.start + position;
            let props = RowProps {
                key: format!("row-{idx}"),
                idx,
                position,
                row: &r.row,
                height: opts.row_height,
                visible_start: win.visible_start,
                visible_end: win.visible_end,
                col_display_start: win.col_display_start,
                col_display_end: win.col_display_end,
                col_visible_start: win.col_visible_start,
                col_visible_end: win.col_visible_end,
                columns: &opts.columns,
                is_selected: selection.is_row_selected(idx, &r.row),
                expanded_rows: &opts.expanded_rows,
                cell_metadata: &opts.cell_metadata,
                sub_row_details: &r.sub_row_details,
                is_scrolling: opts.is_scrolling,
            };
            let renderer =
                RowRenderer::resolve(r.row.meta(), opts.group_renderer.as_ref(), &opts.row_renderer);
            let node = renderer.render(&info, &props);
            rows.push(CanvasRow::Row {
                key: props.key,
                idx,
                position,
                node,
            });
        }

        let remaining = opts.rows_count.saturating_sub(range.end);
        if remaining > 0 {
            rows.push(CanvasRow::Placeholder(Placeholder::new(
                PlaceholderSlot::Bottom,
                (remaining as u64).saturating_mul(row_height),
                &opts.columns,
            )));
        }

        vtrace!(
            start = range.start,
            end = range.end,
            realized = realized.len(),
            "render"
        );

        CanvasFrame {
            width: opts.total_width,
            height: opts.height,
            overlay: OverlayProps {
                width: opts.total_width,
                height: opts.height,
                row_height: opts.row_height,
                columns: Arc::clone(&opts.columns),
                visible_start: win.visible_start,
                visible_end: win.visible_end,
                col_visible_start: win.col_visible_start,
                col_visible_end: win.col_visible_end,
                on_cell_click: Arc::clone(&opts.cell_metadata.on_cell_click),
            },
            rows: RowsContainer {
                width: opts.width,
                rows,
                context_menu: opts.context_menu.clone(),
            },
        }
    }

    /// Post-render hook for the first pass.
    pub fn did_mount(&mut self) {
        vdebug!("Canvas::did_mount");
        self.notify_rows();
    }

    /// Post-render hook for every later pass.
    ///
    /// Re-applies the cached horizontal offset (per `scroll_left_resync_policy`), enforces
    /// `scroll_to_row_index`, then reports the materialized range.
    pub fn did_update(&mut self) {
        let scroll = self.scroll.state();
        if self.options.scroll_left_resync_policy.should_resync(scroll) {
            self.set_scroll_left(scroll.scroll_left);
        }
        if let Some(index) = self.options.scroll_to_row_index.filter(|&i| i != 0) {
            let top = scroll_to_row_offset(
                index,
                self.options.row_height,
                self.options.rows_count,
                self.options.height,
            );
            vtrace!(index, top, "scroll_to_row_index");
            self.surface.set_scroll_top(top);
        }
        self.notify_rows();
    }

    /// Resets per-mount state. The canvas can be rendered again afterwards as a fresh mount.
    pub fn unmount(&mut self) {
        vdebug!("Canvas::unmount");
        self.realized_count = 0;
        self.current_range = None;
        self.last_notified = None;
        self.scroll.reset();
        self.registry.clear();
    }

    fn notify_rows(&mut self) {
        let pending = self.current_range.take();
        if !self
            .options
            .rows_notify_policy
            .should_notify(pending, self.last_notified)
        {
            return;
        }
        let range = pending.unwrap_or_default();
        vtrace!(start = range.start, end = range.end, "on_rows");
        self.last_notified = Some(range);
        if let Some(cb) = &self.options.on_rows {
            cb(range);
        }
    }

    /// Whether `event` was fired by this canvas's own surface.
    pub fn owns_event(&self, event: &ScrollEvent) -> bool {
        event.target == self.surface.id()
    }

    /// Handles a scroll event from the host. Bubbled events from other surfaces are ignored.
    pub fn on_scroll(&mut self, event: &ScrollEvent) {
        self.scroll
            .on_scroll(self.surface.id(), event, self.options.on_scroll.as_ref());
    }

    /// Offsets cached from the last accepted scroll event.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll.state()
    }

    /// Live offsets read from the surface.
    pub fn get_scroll(&self) -> ScrollState {
        ScrollCoordinator::get_scroll(&self.surface)
    }

    pub fn scrollbar_width(&self) -> u32 {
        scrollbar_width(&self.surface)
    }

    /// Applies `scroll_left` to every realized row able to follow it. Returns how many rows were
    /// updated.
    pub fn set_scroll_left(&self, scroll_left: u64) -> usize {
        ScrollCoordinator::set_scroll_left(&self.registry, self.realized_count, scroll_left)
    }

    /// Registers the handle of the row mounted at realized `position`.
    pub fn attach_row(&mut self, position: usize, handle: Box<dyn RowHandle>) {
        self.registry.attach(position, handle);
    }

    pub fn detach_row(&mut self, position: usize) -> Option<Box<dyn RowHandle>> {
        self.registry.detach(position)
    }

    pub fn registry(&self) -> &RowRegistry {
        &self.registry
    }

    /// Number of rows realized by the last render pass.
    pub fn realized_count(&self) -> usize {
        self.realized_count
    }

    pub fn boundary_dispatcher(&self) -> BoundaryHitDispatcher {
        BoundaryHitDispatcher::new(self.options.row_height, &self.options.window)
    }

    pub fn on_boundary_hit(&mut self, hit: BoundaryHit) {
        let dispatcher = self.boundary_dispatcher();
        dispatcher.dispatch(&mut self.surface, hit);
    }

    pub fn on_hit_bottom_boundary(&mut self) {
        self.on_boundary_hit(BoundaryHit::Bottom);
    }

    pub fn on_hit_top_boundary(&mut self) {
        self.on_boundary_hit(BoundaryHit::Top);
    }

    pub fn on_hit_left_boundary(&mut self) {
        self.on_boundary_hit(BoundaryHit::Left);
    }

    pub fn on_hit_right_boundary(&mut self) {
        self.on_boundary_hit(BoundaryHit::Right);
    }
}

impl<R, N, S: core::fmt::Debug> core::fmt::Debug for Canvas<R, N, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("options", &self.options)
            .field("surface", &self.surface)
            .field("window", &self.window)
            .field("scroll", &self.scroll)
            .field("registry", &self.registry)
            .field("realized_count", &self.realized_count)
            .field("current_range", &self.current_range)
            .field("last_notified", &self.last_notified)
            .finish()
    }
}
