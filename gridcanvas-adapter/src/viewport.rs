use gridcanvas::{Column, ScrollState, Window};

/// Extra rows/columns rendered beyond the viewport on each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overscan {
    pub rows: usize,
    pub columns: usize,
}

impl Overscan {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }
}

/// Grid geometry needed to derive a [`Window`] from scroll offsets.
#[derive(Clone, Copy, Debug)]
pub struct GridMetrics<'a> {
    pub rows_count: usize,
    pub row_height: u32,
    /// Viewport height.
    pub height: u32,
    /// Viewport width.
    pub width: u32,
    pub columns: &'a [Column],
    pub overscan: Overscan,
}

/// Computes the window an owner should hand to the canvas for `scroll`.
///
/// The visible range covers every row intersecting the viewport; the display range extends it by
/// the overscan on both sides. Everything is clamped to the row/column counts, so the result is
/// always well formed.
pub fn compute_window(metrics: &GridMetrics<'_>, scroll: ScrollState) -> Window {
    let (visible_start, visible_end) = visible_rows(metrics, scroll.scroll_top);
    let (col_visible_start, col_visible_end) =
        visible_columns(metrics.columns, scroll.scroll_left, metrics.width);

    let overscan = metrics.overscan;
    let columns = metrics.columns.len();
    Window {
        display_start: visible_start.saturating_sub(overscan.rows),
        display_end: visible_end.saturating_add(overscan.rows).min(metrics.rows_count),
        visible_start,
        visible_end,
        col_display_start: col_visible_start.saturating_sub(overscan.columns),
        col_display_end: col_visible_end.saturating_add(overscan.columns).min(columns),
        col_visible_start,
        col_visible_end,
    }
}

fn visible_rows(metrics: &GridMetrics<'_>, scroll_top: u64) -> (usize, usize) {
    let rows_count = metrics.rows_count;
    if rows_count == 0 || metrics.row_height == 0 {
        return (0, 0);
    }
    let row_height = u64::from(metrics.row_height);
    let first = usize::try_from(scroll_top / row_height).unwrap_or(usize::MAX);
    let start = first.min(rows_count);
    let per_page = u64::from(metrics.height).div_ceil(row_height);
    let per_page = usize::try_from(per_page).unwrap_or(usize::MAX);
    let end = start.saturating_add(per_page).min(rows_count);
    (start, end)
}

/// Columns intersecting `[scroll_left, scroll_left + width)`.
pub fn visible_columns(columns: &[Column], scroll_left: u64, width: u32) -> (usize, usize) {
    let view_end = scroll_left.saturating_add(u64::from(width));
    let mut start = columns.len();
    let mut end = columns.len();
    let mut left = 0u64;
    for (i, column) in columns.iter().enumerate() {
        let right = left.saturating_add(u64::from(column.width));
        if start == columns.len() && right > scroll_left {
            start = i;
        }
        if left >= view_end {
            end = i;
            break;
        }
        left = right;
    }
    (start, end.max(start))
}
