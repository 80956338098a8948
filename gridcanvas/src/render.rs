use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{CanvasInfo, Column, FieldValue, GroupMeta, RowFields, SubRowDetails};

/// Position of a clicked cell, passed through to the owner's click handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPosition {
    pub row_idx: usize,
    pub idx: usize,
}

pub type CellClickHandler = Arc<dyn Fn(CellPosition) + Send + Sync>;

/// Cell-level callbacks shared by every row and by the overlay.
#[derive(Clone)]
pub struct CellMetaData {
    pub on_cell_click: CellClickHandler,
}

impl CellMetaData {
    pub fn new(on_cell_click: impl Fn(CellPosition) + Send + Sync + 'static) -> Self {
        Self {
            on_cell_click: Arc::new(on_cell_click),
        }
    }
}

impl Default for CellMetaData {
    fn default() -> Self {
        Self::new(|_| {})
    }
}

impl core::fmt::Debug for CellMetaData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CellMetaData").finish_non_exhaustive()
    }
}

/// A renderer carried by an individual row; called with canvas geometry and the row index.
pub type CustomRowRenderer<N> = Arc<dyn Fn(&CanvasInfo, usize) -> N + Send + Sync>;

/// Rendering metadata a row may carry.
pub enum RowMeta<N> {
    /// The row renders itself.
    Custom(CustomRowRenderer<N>),
    /// The row is a group header.
    Group(GroupMeta),
}

impl<N> Clone for RowMeta<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
            Self::Group(g) => Self::Group(g.clone()),
        }
    }
}

impl<N> core::fmt::Debug for RowMeta<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Group(g) => f.debug_tuple("Group").field(g).finish(),
        }
    }
}

/// A row the canvas can render: field lookup plus optional rendering metadata.
pub trait GridRow<N>: RowFields {
    fn meta(&self) -> Option<&RowMeta<N>> {
        None
    }
}

impl<N> GridRow<N> for BTreeMap<String, FieldValue> {}

#[cfg(feature = "std")]
impl<N, S: core::hash::BuildHasher> GridRow<N>
    for std::collections::HashMap<String, FieldValue, S>
{
}

/// Everything a row renderer receives for one realized row.
#[derive(Debug)]
pub struct RowProps<'a, R> {
    /// Stable render key, `row-{idx}`.
    pub key: String,
    pub idx: usize,
    /// Slot in the row registry; hosts attach the mounted handle here.
    pub position: usize,
    pub row: &'a R,
    pub height: u32,
    pub visible_start: usize,
    pub visible_end: usize,
    pub col_display_start: usize,
    pub col_display_end: usize,
    pub col_visible_start: usize,
    pub col_visible_end: usize,
    pub columns: &'a [Column],
    pub is_selected: bool,
    pub expanded_rows: &'a [usize],
    pub cell_metadata: &'a CellMetaData,
    pub sub_row_details: &'a SubRowDetails,
    pub is_scrolling: bool,
}

/// Props for a group header row.
#[derive(Debug)]
pub struct GroupRowProps<'a, R> {
    pub row: &'a RowProps<'a, R>,
    pub group: &'a GroupMeta,
}

pub type RowRenderFn<R, N> = Arc<dyn Fn(&RowProps<'_, R>) -> N + Send + Sync>;
pub type GroupRenderer<R, N> = Arc<dyn Fn(&GroupRowProps<'_, R>) -> N + Send + Sync>;
pub type TemplateCloneFn<R, N> = Arc<dyn Fn(&N, &RowProps<'_, R>) -> N + Send + Sync>;

/// The configured default row renderer.
pub enum DefaultRowRenderer<R, N> {
    /// A render function called with the row props.
    Function(RowRenderFn<R, N>),
    /// A template node cloned with per-row props.
    Template {
        template: N,
        clone_with: TemplateCloneFn<R, N>,
    },
}

impl<R, N> DefaultRowRenderer<R, N> {
    pub fn function(f: impl Fn(&RowProps<'_, R>) -> N + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    pub fn template(
        template: N,
        clone_with: impl Fn(&N, &RowProps<'_, R>) -> N + Send + Sync + 'static,
    ) -> Self {
        Self::Template {
            template,
            clone_with: Arc::new(clone_with),
        }
    }
}

impl<R, N: Clone> Clone for DefaultRowRenderer<R, N> {
    fn clone(&self) -> Self {
        match self {
            Self::Function(f) => Self::Function(Arc::clone(f)),
            Self::Template {
                template,
                clone_with,
            } => Self::Template {
                template: template.clone(),
                clone_with: Arc::clone(clone_with),
            },
        }
    }
}

impl<R, N> core::fmt::Debug for DefaultRowRenderer<R, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Template { .. } => f.write_str("Template(..)"),
        }
    }
}

/// The renderer chosen for one row.
///
/// Resolution order: a renderer carried by the row, then the group renderer for group rows, then
/// the configured default.
pub enum RowRenderer<'a, R, N> {
    Custom(&'a CustomRowRenderer<N>),
    Group {
        renderer: &'a GroupRenderer<R, N>,
        group: &'a GroupMeta,
    },
    Function(&'a RowRenderFn<R, N>),
    Template {
        template: &'a N,
        clone_with: &'a TemplateCloneFn<R, N>,
    },
}

impl<'a, R, N> RowRenderer<'a, R, N> {
    /// Picks the renderer for a row. Group rows fall back to the default renderer when no group
    /// renderer is configured.
    pub fn resolve(
        meta: Option<&'a RowMeta<N>>,
        group_renderer: Option<&'a GroupRenderer<R, N>>,
        default: &'a DefaultRowRenderer<R, N>,
    ) -> Self {
        match (meta, group_renderer) {
            (Some(RowMeta::Custom(f)), _) => Self::Custom(f),
            (Some(RowMeta::Group(group)), Some(renderer)) => Self::Group { renderer, group },
            _ => match default {
                DefaultRowRenderer::Function(f) => Self::Function(f),
                DefaultRowRenderer::Template {
                    template,
                    clone_with,
                } => Self::Template {
                    template,
                    clone_with,
                },
            },
        }
    }

    pub fn render(self, info: &CanvasInfo, props: &RowProps<'_, R>) -> N {
        match self {
            Self::Custom(f) => f(info, props.idx),
            Self::Group { renderer, group } => renderer(&GroupRowProps { row: props, group }),
            Self::Function(f) => f(props),
            Self::Template {
                template,
                clone_with,
            } => clone_with(template, props),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaceholderSlot {
    Top,
    Bottom,
}

/// A non-interactive spacer standing in for rows outside the display range.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    pub slot: PlaceholderSlot,
    pub height: u64,
    /// One empty block per column, sized to the column width.
    pub cell_widths: Vec<u32>,
}

impl Placeholder {
    pub fn new(slot: PlaceholderSlot, height: u64, columns: &[Column]) -> Self {
        Self {
            slot,
            height,
            cell_widths: columns.iter().map(|c| c.width).collect(),
        }
    }

    pub fn key(&self) -> &'static str {
        match self.slot {
            PlaceholderSlot::Top => "top",
            PlaceholderSlot::Bottom => "bottom",
        }
    }
}

/// One entry of the rows container.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasRow<N> {
    Placeholder(Placeholder),
    Row {
        key: String,
        idx: usize,
        position: usize,
        node: N,
    },
}

impl<N> CanvasRow<N> {
    pub fn height(&self, row_height: u32) -> u64 {
        match self {
            Self::Placeholder(p) => p.height,
            Self::Row { .. } => u64::from(row_height),
        }
    }

    pub fn node(&self) -> Option<&N> {
        match self {
            Self::Row { node, .. } => Some(node),
            Self::Placeholder(_) => None,
        }
    }
}

/// Props for the rows container.
#[derive(Clone, Debug, PartialEq)]
pub struct RowsContainer<N> {
    pub width: Option<u32>,
    pub rows: Vec<CanvasRow<N>>,
    pub context_menu: Option<N>,
}

impl<N> RowsContainer<N> {
    /// Sum of placeholder and realized-row heights.
    pub fn total_height(&self, row_height: u32) -> u64 {
        self.rows.iter().map(|r| r.height(row_height)).sum()
    }

    pub fn placeholder(&self, slot: PlaceholderSlot) -> Option<&Placeholder> {
        self.rows.iter().find_map(|r| match r {
            CanvasRow::Placeholder(p) if p.slot == slot => Some(p),
            _ => None,
        })
    }

    pub fn realized(&self) -> impl Iterator<Item = &N> {
        self.rows.iter().filter_map(CanvasRow::node)
    }
}

/// Props for the overlay (mask) component that detects boundary hits and cell clicks.
#[derive(Clone)]
pub struct OverlayProps {
    pub width: Option<u32>,
    pub height: u32,
    pub row_height: u32,
    pub columns: Arc<[Column]>,
    pub visible_start: usize,
    pub visible_end: usize,
    pub col_visible_start: usize,
    pub col_visible_end: usize,
    pub on_cell_click: CellClickHandler,
}

impl core::fmt::Debug for OverlayProps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayProps")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("row_height", &self.row_height)
            .field("columns", &self.columns.len())
            .field("visible_start", &self.visible_start)
            .field("visible_end", &self.visible_end)
            .field("col_visible_start", &self.col_visible_start)
            .field("col_visible_end", &self.col_visible_end)
            .finish_non_exhaustive()
    }
}

/// Output of one render pass.
#[derive(Clone, Debug)]
pub struct CanvasFrame<N> {
    /// Width of the scroll surface (the grid's total width).
    pub width: Option<u32>,
    pub height: u32,
    pub overlay: OverlayProps,
    pub rows: RowsContainer<N>,
}
