use std::collections::BTreeMap;

use gridcanvas::{CanvasOptions, Column, FieldValue, MemorySurface, RowSource, SurfaceId};
use gridcanvas_adapter::{GridController, Overscan};

fn main() {
    // Example: a frame loop driving the canvas through the controller, without any UI objects.
    //
    // An adapter would:
    // - forward scroll events from the real container to on_scroll(event, now_ms)
    // - call tick(now_ms) on a timer to settle the is_scrolling flag
    // - render frame() and call commit() once it is on screen
    let rows = RowSource::from_fn(|i| {
        let mut row = BTreeMap::new();
        row.insert("id".to_string(), FieldValue::Int(i as i64));
        row
    });
    let columns: Vec<Column> = (0..8).map(|i| Column::new(format!("c{i}"), 90)).collect();
    let options = CanvasOptions::with_render_fn(100_000, 24, 480, rows, |p| {
        format!("{} cols={}..{}", p.key, p.col_visible_start, p.col_visible_end)
    })
    .with_columns(columns)
    .with_row_scroll_timeout_ms(120)
    .with_on_rows(Some(|r: gridcanvas::RowRange| {
        println!("rows {}..{}", r.start, r.end);
    }));

    let mut c = GridController::new(
        options,
        MemorySurface::new(SurfaceId(1)),
        400,
        Overscan::new(8, 1),
    );
    let _ = c.frame();
    c.commit();

    let mut now_ms = 0u64;
    for step in 1..=20u64 {
        now_ms += 16;
        let surface = c.canvas_mut().surface_mut();
        surface.scroll_top = step * 300;
        surface.scroll_left = step * 10;
        let event = surface.scroll_event();
        if c.on_scroll(&event, now_ms) {
            let frame = c.frame();
            if let Some(first) = frame.rows.realized().next() {
                println!("t={now_ms} first={first} height={}", frame.rows.total_height(24));
            }
            c.commit();
        }
    }

    while !c.tick(now_ms) {
        now_ms += 16;
    }
    println!("settled at t={now_ms} scrolling={}", c.is_scrolling());
}
