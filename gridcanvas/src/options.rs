use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{
    CellMetaData, Column, DefaultRowRenderer, GroupRenderer, RowRange, RowRenderFn,
    RowSelection, RowSelectionResolver, RowSource, RowProps, ScrollState, SelectedRow,
    SubRowDetails, SubRowResolver, Window,
};

/// A callback fired after a render pass with the materialized row range.
pub type OnRowsCallback = Arc<dyn Fn(RowRange) + Send + Sync>;

/// A callback fired for every scroll event that originates on the canvas surface.
pub type OnScrollCallback = Arc<dyn Fn(ScrollState) + Send + Sync>;

/// When the row-materialization callback fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowsNotifyPolicy {
    /// After every render pass, whether or not the range moved.
    #[default]
    Always,
    /// Only when a render pass produced a range that differs from the last one reported.
    OnChange,
}

impl RowsNotifyPolicy {
    /// `pending` is the range realized since the last notification, `None` if nothing was
    /// rendered in between.
    pub fn should_notify(self, pending: Option<RowRange>, last: Option<RowRange>) -> bool {
        match self {
            Self::Always => true,
            Self::OnChange => pending.is_some_and(|range| last != Some(range)),
        }
    }
}

/// When the post-update hook re-applies the cached horizontal offset to every row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollLeftResyncPolicy {
    /// Only when both cached offsets are non-zero. A canvas scrolled sideways while at the very
    /// top does not resync.
    #[default]
    BothAxesNonZero,
    /// Whenever the cached horizontal offset is non-zero.
    HorizontalNonZero,
}

impl ScrollLeftResyncPolicy {
    pub fn should_resync(self, scroll: ScrollState) -> bool {
        match self {
            Self::BothAxesNonZero => scroll.scroll_top != 0 && scroll.scroll_left != 0,
            Self::HorizontalNonZero => scroll.scroll_left != 0,
        }
    }
}

/// Configuration (props) for [`crate::Canvas`].
///
/// Callbacks and the row source live behind `Arc`s, so owners can clone the options, change a
/// few fields and hand them back through `Canvas::receive_options` cheaply.
pub struct CanvasOptions<R, N> {
    pub rows_count: usize,
    pub row_height: u32,
    /// Viewport height of the scroll surface.
    pub height: u32,
    /// Width of the rows container.
    pub width: Option<u32>,
    /// Width of the scroll surface (sum of column widths).
    pub total_width: Option<u32>,
    pub window: Window,
    pub rows: RowSource<R>,
    pub columns: Arc<[Column]>,
    pub cell_metadata: CellMetaData,

    pub row_renderer: DefaultRowRenderer<R, N>,
    pub group_renderer: Option<GroupRenderer<R, N>>,
    pub context_menu: Option<N>,

    /// Explicit per-row selection states. When present it is the only selection model consulted.
    pub selected_rows: Option<Arc<[SelectedRow]>>,
    /// Field used to match rows against `selected_rows`.
    pub row_key: Option<String>,
    pub row_selection: Option<RowSelection>,

    /// Indexes of expanded rows, passed through to row renderers.
    pub expanded_rows: Arc<[usize]>,
    pub sub_row_details: Option<SubRowResolver<R>>,

    /// Programmatic scroll-to-row target, enforced on every update. `Some(0)` is ignored.
    pub scroll_to_row_index: Option<usize>,
    pub is_scrolling: bool,
    /// Scroll debounce in milliseconds. Not used by the canvas itself; owners read it to drive
    /// `is_scrolling`.
    pub row_scroll_timeout_ms: u64,

    pub on_rows: Option<OnRowsCallback>,
    pub on_scroll: Option<OnScrollCallback>,

    pub rows_notify_policy: RowsNotifyPolicy,
    pub scroll_left_resync_policy: ScrollLeftResyncPolicy,
}

impl<R, N: Clone> Clone for CanvasOptions<R, N> {
    fn clone(&self) -> Self {
        Self {
            rows_count: self.rows_count,
            row_height: self.row_height,
            height: self.height,
            width: self.width,
            total_width: self.total_width,
            window: self.window,
            rows: self.rows.clone(),
            columns: Arc::clone(&self.columns),
            cell_metadata: self.cell_metadata.clone(),
            row_renderer: self.row_renderer.clone(),
            group_renderer: self.group_renderer.clone(),
            context_menu: self.context_menu.clone(),
            selected_rows: self.selected_rows.clone(),
            row_key: self.row_key.clone(),
            row_selection: self.row_selection.clone(),
            expanded_rows: Arc::clone(&self.expanded_rows),
            sub_row_details: self.sub_row_details.clone(),
            scroll_to_row_index: self.scroll_to_row_index,
            is_scrolling: self.is_scrolling,
            row_scroll_timeout_ms: self.row_scroll_timeout_ms,
            on_rows: self.on_rows.clone(),
            on_scroll: self.on_scroll.clone(),
            rows_notify_policy: self.rows_notify_policy,
            scroll_left_resync_policy: self.scroll_left_resync_policy,
        }
    }
}

impl<R, N> CanvasOptions<R, N> {
    /// Creates options for `rows_count` rows of a fixed `row_height`, shown in a viewport of
    /// `height` pixels.
    ///
    /// The window starts empty; owners supply one with [`Self::with_window`] once they know the
    /// scroll position.
    pub fn new(
        rows_count: usize,
        row_height: u32,
        height: u32,
        rows: RowSource<R>,
        row_renderer: DefaultRowRenderer<R, N>,
    ) -> Self {
        Self {
            rows_count,
            row_height,
            height,
            width: None,
            total_width: None,
            window: Window::default(),
            rows,
            columns: Arc::from(Vec::new()),
            cell_metadata: CellMetaData::default(),
            row_renderer,
            group_renderer: None,
            context_menu: None,
            selected_rows: None,
            row_key: None,
            row_selection: None,
            expanded_rows: Arc::from(Vec::new()),
            sub_row_details: None,
            scroll_to_row_index: None,
            is_scrolling: false,
            row_scroll_timeout_ms: 0,
            on_rows: None,
            on_scroll: None,
            rows_notify_policy: RowsNotifyPolicy::default(),
            scroll_left_resync_policy: ScrollLeftResyncPolicy::default(),
        }
    }

    /// Shorthand for a function default renderer.
    pub fn with_render_fn(
        rows_count: usize,
        row_height: u32,
        height: u32,
        rows: RowSource<R>,
        render: impl Fn(&RowProps<'_, R>) -> N + Send + Sync + 'static,
    ) -> Self {
        let render: RowRenderFn<R, N> = Arc::new(render);
        Self::new(
            rows_count,
            row_height,
            height,
            rows,
            DefaultRowRenderer::Function(render),
        )
    }

    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    pub fn with_width(mut self, width: Option<u32>, total_width: Option<u32>) -> Self {
        self.width = width;
        self.total_width = total_width;
        self
    }

    pub fn with_columns(mut self, columns: impl Into<Arc<[Column]>>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn with_cell_metadata(mut self, cell_metadata: CellMetaData) -> Self {
        self.cell_metadata = cell_metadata;
        self
    }

    pub fn with_group_renderer(
        mut self,
        group_renderer: Option<impl Fn(&crate::GroupRowProps<'_, R>) -> N + Send + Sync + 'static>,
    ) -> Self {
        self.group_renderer = group_renderer.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_context_menu(mut self, context_menu: Option<N>) -> Self {
        self.context_menu = context_menu;
        self
    }

    pub fn with_selected_rows(
        mut self,
        selected_rows: Option<Vec<SelectedRow>>,
        row_key: Option<impl Into<String>>,
    ) -> Self {
        self.selected_rows = selected_rows.map(Arc::from);
        self.row_key = row_key.map(Into::into);
        self
    }

    pub fn with_row_selection(mut self, row_selection: Option<RowSelection>) -> Self {
        self.row_selection = row_selection;
        self
    }

    pub fn with_expanded_rows(mut self, expanded_rows: impl Into<Arc<[usize]>>) -> Self {
        self.expanded_rows = expanded_rows.into();
        self
    }

    pub fn with_sub_row_details(
        mut self,
        sub_row_details: Option<impl Fn(&R) -> SubRowDetails + Send + Sync + 'static>,
    ) -> Self {
        self.sub_row_details = sub_row_details.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_scroll_to_row_index(mut self, scroll_to_row_index: Option<usize>) -> Self {
        self.scroll_to_row_index = scroll_to_row_index;
        self
    }

    pub fn with_is_scrolling(mut self, is_scrolling: bool) -> Self {
        self.is_scrolling = is_scrolling;
        self
    }

    pub fn with_row_scroll_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.row_scroll_timeout_ms = timeout_ms;
        self
    }

    pub fn with_on_rows(
        mut self,
        on_rows: Option<impl Fn(RowRange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_rows = on_rows.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(ScrollState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_rows_notify_policy(mut self, policy: RowsNotifyPolicy) -> Self {
        self.rows_notify_policy = policy;
        self
    }

    pub fn with_scroll_left_resync_policy(mut self, policy: ScrollLeftResyncPolicy) -> Self {
        self.scroll_left_resync_policy = policy;
        self
    }

    /// Total scrollable height of all rows.
    pub fn content_height(&self) -> u64 {
        (self.rows_count as u64).saturating_mul(u64::from(self.row_height))
    }

    pub fn selection_resolver(&self) -> RowSelectionResolver<'_> {
        RowSelectionResolver {
            selected_rows: self.selected_rows.as_deref(),
            row_key: self.row_key.as_deref(),
            row_selection: self.row_selection.as_ref(),
        }
    }
}

impl<R, N> core::fmt::Debug for CanvasOptions<R, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasOptions")
            .field("rows_count", &self.rows_count)
            .field("row_height", &self.row_height)
            .field("height", &self.height)
            .field("width", &self.width)
            .field("total_width", &self.total_width)
            .field("window", &self.window)
            .field("rows", &self.rows)
            .field("columns", &self.columns.len())
            .field("row_renderer", &self.row_renderer)
            .field("selected_rows", &self.selected_rows)
            .field("row_key", &self.row_key)
            .field("row_selection", &self.row_selection)
            .field("scroll_to_row_index", &self.scroll_to_row_index)
            .field("is_scrolling", &self.is_scrolling)
            .field("row_scroll_timeout_ms", &self.row_scroll_timeout_ms)
            .field("rows_notify_policy", &self.rows_notify_policy)
            .field("scroll_left_resync_policy", &self.scroll_left_resync_policy)
            .finish_non_exhaustive()
    }
}
