// Example: render a window over a million generated rows.
use std::collections::BTreeMap;

use gridcanvas::{
    Canvas, CanvasOptions, FieldValue, MemorySurface, PlaceholderSlot, RowSource, SurfaceId,
    Window,
};

fn main() {
    let rows = RowSource::from_fn(|i| {
        let mut row = BTreeMap::new();
        row.insert("id".to_string(), FieldValue::Int(i as i64));
        row
    });
    let opts = CanvasOptions::with_render_fn(1_000_000, 20, 400, rows, |p| {
        format!("{} selected={}", p.key, p.is_selected)
    })
    .with_window(Window::rows(500, 530).with_visible(505, 525));

    let mut canvas = Canvas::new(opts, MemorySurface::new(SurfaceId(1)));
    let frame = canvas.render();
    canvas.did_mount();

    println!(
        "top={:?} bottom={:?}",
        frame.rows.placeholder(PlaceholderSlot::Top).map(|p| p.height),
        frame.rows.placeholder(PlaceholderSlot::Bottom).map(|p| p.height)
    );
    println!("first_row={:?}", frame.rows.realized().next());
    println!("total_height={}", frame.rows.total_height(20));
}
