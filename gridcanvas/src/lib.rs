//! A headless row-windowing and scroll-synchronization engine for data grid canvases.
//!
//! For a reference owner (window computation from scroll offsets, scroll debouncing), see the
//! `gridcanvas-adapter` crate.
//!
//! This crate decides which slice of a potentially unbounded row collection to materialize,
//! pads the rest with spacer placeholders, keeps independently rendered rows horizontally
//! aligned, and turns "edge of the rendered window reached" signals into scroll adjustments.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - a scroll surface ([`ScrollSurface`]) and its scroll events
//! - row nodes (any `N`) built by the configured row renderers
//! - row handles for mounted rows ([`RowHandle`])
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod boundary;
mod canvas;
mod handle;
mod options;
mod render;
mod rows;
mod scroll;
mod selection;
mod surface;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use boundary::{BoundaryHit, BoundaryHitDispatcher, snap_offset};
pub use canvas::Canvas;
pub use handle::{RowHandle, RowRegistry, ScrollLeftSync};
pub use options::{
    CanvasOptions, OnRowsCallback, OnScrollCallback, RowsNotifyPolicy, ScrollLeftResyncPolicy,
};
pub use render::{
    CanvasFrame, CanvasRow, CellClickHandler, CellMetaData, CellPosition, CustomRowRenderer,
    DefaultRowRenderer, GridRow, GroupRenderer, GroupRowProps, OverlayProps, Placeholder,
    PlaceholderSlot, RowMeta, RowProps, RowRenderFn, RowRenderer, RowsContainer, TemplateCloneFn,
};
pub use rows::{RealizedRow, RowSource, SubRowResolver};
pub use scroll::{ScrollCoordinator, scroll_to_row_offset, scrollbar_width};
pub use selection::{FieldValue, RowFields, RowSelection, RowSelectionResolver, SelectedRow};
pub use surface::{MemorySurface, ScrollEvent, ScrollSurface, SurfaceId};
pub use types::{CanvasInfo, Column, GroupMeta, RowRange, ScrollState, SubRowDetails, Window};
pub use window::ViewportWindow;
