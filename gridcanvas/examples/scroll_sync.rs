// Example: keep mounted rows horizontally aligned and react to boundary hits.
use std::cell::Cell;
use std::rc::Rc;

use gridcanvas::{
    Canvas, CanvasOptions, MemorySurface, RowHandle, RowProps, RowSource, ScrollLeftResyncPolicy,
    ScrollLeftSync, SurfaceId, Window,
};

#[derive(Clone, Debug)]
struct Line(usize);

impl gridcanvas::RowFields for Line {
    fn field(&self, name: &str) -> Option<gridcanvas::FieldValue> {
        (name == "n").then(|| gridcanvas::FieldValue::Int(self.0 as i64))
    }
}

impl gridcanvas::GridRow<String> for Line {}

#[derive(Clone, Default)]
struct MountedRow(Rc<Cell<u64>>);

impl ScrollLeftSync for MountedRow {
    fn set_scroll_left(&self, scroll_left: u64) {
        self.0.set(scroll_left);
    }
}

impl RowHandle for MountedRow {
    fn scroll_left_sync(&self) -> Option<&dyn ScrollLeftSync> {
        Some(self)
    }
}

fn main() {
    let lines: Vec<Line> = (0..200).map(Line).collect();
    let opts = CanvasOptions::with_render_fn(
        200,
        20,
        100,
        RowSource::from_vec(lines),
        |p: &RowProps<'_, Line>| format!("line {}", p.idx),
    )
    .with_window(Window::rows(0, 8).with_visible(0, 5))
    .with_scroll_left_resync_policy(ScrollLeftResyncPolicy::HorizontalNonZero);

    let mut canvas = Canvas::new(opts, MemorySurface::new(SurfaceId(7)));
    let frame = canvas.render();

    let mounted: Vec<MountedRow> = frame.rows.realized().map(|_| MountedRow::default()).collect();
    for (position, row) in mounted.iter().enumerate() {
        canvas.attach_row(position, Box::new(row.clone()));
    }
    canvas.did_mount();

    canvas.surface_mut().scroll_left = 64;
    let event = canvas.surface().scroll_event();
    canvas.on_scroll(&event);
    let _ = canvas.render();
    canvas.did_update();

    let offsets: Vec<u64> = mounted.iter().map(|m| m.0.get()).collect();
    println!("row offsets after resync: {offsets:?}");

    canvas.surface_mut().scroll_top = 25;
    canvas.on_hit_bottom_boundary();
    println!("scroll_top after bottom hit: {}", canvas.surface().scroll_top);
}
