//! Owner-side utilities for the `gridcanvas` crate.
//!
//! The `gridcanvas` crate is UI-agnostic and leaves window computation to its owner. This crate
//! provides a small, framework-neutral reference owner:
//!
//! - Window computation from scroll offsets, viewport size and column widths (with overscan)
//! - A controller that routes scroll events, runs the render lifecycle, and debounces
//!   `is_scrolling`
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod viewport;


pub use controller::GridController;
pub use viewport::{GridMetrics, Overscan, compute_window, visible_columns};
