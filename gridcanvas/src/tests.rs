use crate::*;

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::rc::Rc;
use std::sync::Mutex;

#[derive(Clone, Debug)]
struct Person {
    id: i64,
    name: String,
    starred: bool,
    meta: Option<RowMeta<String>>,
}

impl Person {
    fn new(id: i64) -> Self {
        Self {
            id,
            name: format!("p{id}"),
            starred: id % 2 == 0,
            meta: None,
        }
    }
}

impl RowFields for Person {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Int(self.id)),
            "name" => Some(FieldValue::Str(self.name.clone())),
            "starred" => Some(FieldValue::Bool(self.starred)),
            _ => None,
        }
    }
}

impl GridRow<String> for Person {
    fn meta(&self) -> Option<&RowMeta<String>> {
        self.meta.as_ref()
    }
}

fn people(n: usize) -> Vec<Person> {
    (0..n).map(|i| Person::new(i as i64)).collect()
}

fn render_fn(p: &RowProps<'_, Person>) -> String {
    format!("{}|{}", p.key, p.is_selected)
}

fn options(rows_count: usize, window: Window) -> CanvasOptions<Person, String> {
    CanvasOptions::with_render_fn(
        rows_count,
        20,
        200,
        RowSource::from_vec(people(rows_count)),
        render_fn,
    )
    .with_window(window)
    .with_columns(vec![Column::new("id", 50), Column::new("name", 120)])
}

fn canvas(opts: CanvasOptions<Person, String>) -> Canvas<Person, String, MemorySurface> {
    Canvas::new(opts, MemorySurface::new(SurfaceId(1)))
}

#[derive(Clone, Default)]
struct RecordingRow {
    seen: Rc<Cell<Option<u64>>>,
}

impl ScrollLeftSync for RecordingRow {
    fn set_scroll_left(&self, scroll_left: u64) {
        self.seen.set(Some(scroll_left));
    }
}

impl RowHandle for RecordingRow {
    fn scroll_left_sync(&self) -> Option<&dyn ScrollLeftSync> {
        Some(self)
    }
}

/// A row wrapped by a drop target; only the inner row can follow the offset.
struct DropTarget {
    inner: RecordingRow,
}

impl RowHandle for DropTarget {
    fn decorated(&self) -> Option<&dyn RowHandle> {
        Some(&self.inner)
    }
}

struct Inert;

impl RowHandle for Inert {}

fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(T) + Send + Sync + 'static) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let log = Arc::clone(&log);
        move |v: T| log.lock().unwrap().push(v)
    };
    (log, sink)
}

#[test]
fn get_rows_returns_window_in_ascending_order() {
    let opts = CanvasOptions::with_render_fn(
        1_000_000,
        20,
        200,
        RowSource::from_fn(|i| Person::new(i as i64)),
        render_fn,
    );
    let mut c = canvas(opts);

    for (start, end) in [(0usize, 0usize), (0, 15), (40, 60), (999_990, 1_000_000)] {
        let rows = c.get_rows(start, end);
        assert_eq!(rows.len(), end - start);
        let ids: Vec<i64> = rows.iter().map(|r| r.row.id).collect();
        let expected: Vec<i64> = (start..end).map(|i| i as i64).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn slice_source_round_trips_without_resolver() {
    let source = people(8);
    let mut c = canvas(options(8, Window::rows(0, 8)));
    let rows = c.get_rows(0, 8);
    assert_eq!(rows.len(), 8);
    for (r, expected) in rows.iter().zip(source.iter()) {
        assert_eq!(r.row.id, expected.id);
        assert_eq!(r.row.name, expected.name);
        assert_eq!(r.sub_row_details, SubRowDetails::default());
    }
}

#[test]
fn slice_source_clamps_to_its_length() {
    let source: RowSource<Person> = RowSource::from_vec(people(5));
    assert_eq!(source.fixed_len(), Some(5));
    assert_eq!(source.window(3, 10, None).len(), 2);
    assert!(source.window(7, 10, None).is_empty());
}

#[test]
fn sub_row_resolver_runs_once_per_row() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    CALLS.store(0, Ordering::SeqCst);

    let opts = options(50, Window::rows(10, 20)).with_sub_row_details(Some(|p: &Person| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        SubRowDetails {
            can_expand: p.id % 5 == 0,
            tree_depth: 1,
            ..SubRowDetails::default()
        }
    }));
    let mut c = canvas(opts);
    let rows = c.get_rows(10, 20);
    assert_eq!(CALLS.load(Ordering::SeqCst), 10);
    assert!(rows[0].sub_row_details.can_expand);
    assert!(!rows[1].sub_row_details.can_expand);
    assert!(rows.iter().all(|r| r.sub_row_details.tree_depth == 1));
}

#[test]
fn placeholders_preserve_total_height() {
    let mut c = canvas(options(100, Window::rows(40, 60)));
    let frame = c.render();
    let container = &frame.rows;

    let top = container.placeholder(PlaceholderSlot::Top).unwrap();
    let bottom = container.placeholder(PlaceholderSlot::Bottom).unwrap();
    assert_eq!(top.height, 800);
    assert_eq!(bottom.height, 800);
    assert_eq!(top.key(), "top");
    assert_eq!(bottom.key(), "bottom");
    assert_eq!(top.cell_widths, vec![50, 120]);

    assert_eq!(container.realized().count(), 20);
    let realized_height: u64 = container
        .rows
        .iter()
        .filter(|r| matches!(r, CanvasRow::Row { .. }))
        .map(|r| r.height(20))
        .sum();
    assert_eq!(realized_height, 400);
    assert_eq!(container.total_height(20), 100 * 20);

    assert!(matches!(container.rows.first(), Some(CanvasRow::Placeholder(_))));
    assert!(matches!(container.rows.last(), Some(CanvasRow::Placeholder(_))));
}

#[test]
fn placeholders_are_omitted_at_the_edges() {
    let mut c = canvas(options(10, Window::rows(0, 10)));
    let frame = c.render();
    assert!(frame.rows.placeholder(PlaceholderSlot::Top).is_none());
    assert!(frame.rows.placeholder(PlaceholderSlot::Bottom).is_none());
    assert_eq!(frame.rows.total_height(20), 200);

    let mut c = canvas(options(10, Window::rows(0, 4)));
    let frame = c.render();
    assert!(frame.rows.placeholder(PlaceholderSlot::Top).is_none());
    assert_eq!(
        frame.rows.placeholder(PlaceholderSlot::Bottom).map(|p| p.height),
        Some(120)
    );
}

#[test]
fn realized_rows_carry_keys_and_positions() {
    let mut c = canvas(options(100, Window::rows(40, 43)));
    let frame = c.render();
    let rows: Vec<(String, usize, usize)> = frame
        .rows
        .rows
        .iter()
        .filter_map(|r| match r {
            CanvasRow::Row {
                key, idx, position, ..
            } => Some((key.clone(), *idx, *position)),
            CanvasRow::Placeholder(_) => None,
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("row-40".to_string(), 40, 0),
            ("row-41".to_string(), 41, 1),
            ("row-42".to_string(), 42, 2),
        ]
    );
    assert_eq!(c.realized_count(), 3);
}

#[test]
fn out_of_bounds_window_is_clamped() {
    let mut c = canvas(options(10, Window::rows(8, 25)));
    let frame = c.render();
    assert_eq!(frame.rows.realized().count(), 2);
    assert_eq!(frame.rows.total_height(20), 200);
}

#[test]
fn set_scroll_left_reaches_exactly_the_realized_rows() {
    let mut c = canvas(options(100, Window::rows(10, 15)));
    let _ = c.render();
    assert_eq!(c.realized_count(), 5);

    // Seven slots: two stale entries from a previous, larger pass.
    let handles: Vec<RecordingRow> = (0..7).map(|_| RecordingRow::default()).collect();
    for (position, h) in handles.iter().enumerate() {
        c.attach_row(position, Box::new(h.clone()));
    }

    assert_eq!(c.set_scroll_left(42), 5);
    for h in &handles[..5] {
        assert_eq!(h.seen.get(), Some(42));
    }
    for h in &handles[5..] {
        assert_eq!(h.seen.get(), None);
    }
}

#[test]
fn set_scroll_left_tolerates_gaps_and_follows_decoration() {
    let mut c = canvas(options(100, Window::rows(0, 4)));
    let _ = c.render();

    let plain = RecordingRow::default();
    let wrapped = RecordingRow::default();
    c.attach_row(0, Box::new(plain.clone()));
    c.attach_row(1, Box::new(Inert));
    c.attach_row(
        3,
        Box::new(DropTarget {
            inner: wrapped.clone(),
        }),
    );

    assert_eq!(c.set_scroll_left(7), 2);
    assert_eq!(plain.seen.get(), Some(7));
    assert_eq!(wrapped.seen.get(), Some(7));

    assert!(c.detach_row(0).is_some());
    assert!(c.detach_row(2).is_none());
    assert_eq!(c.set_scroll_left(9), 1);
    assert_eq!(plain.seen.get(), Some(7));
}

#[test]
fn set_scroll_left_is_a_no_op_before_any_render() {
    let mut c = canvas(options(100, Window::rows(0, 4)));
    let h = RecordingRow::default();
    c.attach_row(0, Box::new(h.clone()));
    assert_eq!(c.set_scroll_left(5), 0);
    assert_eq!(h.seen.get(), None);
}

#[test]
fn underlying_is_identity_for_undecorated_handles() {
    let h = RecordingRow::default();
    let handle: &dyn RowHandle = &h;
    assert!(handle.underlying().scroll_left_sync().is_some());

    let inert: &dyn RowHandle = &Inert;
    assert!(inert.underlying().scroll_left_sync().is_none());
}

#[test]
fn explicit_selection_list_matches_by_row_key() {
    let list = vec![SelectedRow::new("a", true), SelectedRow::new("c", false)];
    let resolver = RowSelectionResolver {
        selected_rows: Some(list.as_slice()),
        row_key: Some("id"),
        row_selection: None,
    };

    let row = |id: &str| {
        let mut m = BTreeMap::new();
        m.insert("id".to_string(), FieldValue::from(id));
        m
    };
    assert!(resolver.is_row_selected(0, &row("a")));
    assert!(!resolver.is_row_selected(0, &row("b")));
    assert!(!resolver.is_row_selected(0, &row("c")));
}

#[test]
fn explicit_selection_works_for_plain_field_rows() {
    let list = vec![SelectedRow::new(3i64, true)];
    let resolver = RowSelectionResolver {
        selected_rows: Some(list.as_slice()),
        row_key: Some("id"),
        row_selection: None,
    };
    assert!(resolver.is_row_selected(0, &Person::new(3)));
    assert!(!resolver.is_row_selected(3, &Person::new(4)));
}

#[test]
fn explicit_selection_without_row_key_selects_nothing() {
    let list = vec![SelectedRow::new(3i64, true)];
    let resolver = RowSelectionResolver {
        selected_rows: Some(list.as_slice()),
        row_key: None,
        row_selection: None,
    };
    assert!(!resolver.is_row_selected(3, &Person::new(3)));
}

#[test]
fn index_selection() {
    let selection = RowSelection::Indexes(vec![2]);
    let resolver = RowSelectionResolver {
        selected_rows: None,
        row_key: None,
        row_selection: Some(&selection),
    };
    let row = Person::new(0);
    assert!(resolver.is_row_selected(2, &row));
    assert!(!resolver.is_row_selected(3, &row));
}

#[test]
fn flag_and_key_value_selection() {
    let flag = RowSelection::IsSelectedKey("starred".to_string());
    let resolver = RowSelectionResolver {
        selected_rows: None,
        row_key: None,
        row_selection: Some(&flag),
    };
    assert!(resolver.is_row_selected(0, &Person::new(2)));
    assert!(!resolver.is_row_selected(0, &Person::new(3)));

    let missing = RowSelection::IsSelectedKey("nope".to_string());
    let resolver = RowSelectionResolver {
        row_selection: Some(&missing),
        ..resolver
    };
    assert!(!resolver.is_row_selected(0, &Person::new(2)));

    let keys = RowSelection::Keys {
        row_key: "name".to_string(),
        values: vec![FieldValue::from("p7"), FieldValue::from("p9")],
    };
    let resolver = RowSelectionResolver {
        row_selection: Some(&keys),
        ..resolver
    };
    assert!(resolver.is_row_selected(0, &Person::new(7)));
    assert!(!resolver.is_row_selected(7, &Person::new(8)));
}

#[test]
fn explicit_list_takes_precedence_over_descriptor() {
    let list = vec![SelectedRow::new(5i64, true)];
    let selection = RowSelection::Indexes(vec![2]);
    let resolver = RowSelectionResolver {
        selected_rows: Some(list.as_slice()),
        row_key: Some("id"),
        row_selection: Some(&selection),
    };
    assert!(!resolver.is_row_selected(2, &Person::new(2)));
    assert!(resolver.is_row_selected(9, &Person::new(5)));

    // An empty list still wins.
    let empty: Vec<SelectedRow> = Vec::new();
    let resolver = RowSelectionResolver {
        selected_rows: Some(empty.as_slice()),
        ..resolver
    };
    assert!(!resolver.is_row_selected(2, &Person::new(2)));
}

#[test]
fn no_selection_model_selects_nothing() {
    let resolver = RowSelectionResolver {
        selected_rows: None,
        row_key: Some("id"),
        row_selection: None,
    };
    assert!(!resolver.is_row_selected(0, &Person::new(0)));
}

#[test]
fn field_value_truthiness() {
    assert!(!FieldValue::Null.is_truthy());
    assert!(!FieldValue::from(false).is_truthy());
    assert!(!FieldValue::from(0i64).is_truthy());
    assert!(!FieldValue::from("").is_truthy());
    assert!(FieldValue::from(true).is_truthy());
    assert!(FieldValue::from(-1i64).is_truthy());
    assert!(FieldValue::from("x").is_truthy());
}

#[test]
fn render_marks_selected_rows() {
    let opts = options(20, Window::rows(0, 4)).with_row_selection(Some(RowSelection::Indexes(
        vec![1, 3],
    )));
    let mut c = canvas(opts);
    let frame = c.render();
    let nodes: Vec<&String> = frame.rows.realized().collect();
    assert_eq!(
        nodes,
        vec!["row-0|false", "row-1|true", "row-2|false", "row-3|true"]
    );
    assert!(c.is_row_selected(3, &Person::new(3)));
}

#[test]
fn snap_offset_completes_partial_rows() {
    assert_eq!(snap_offset(25, 20), 15);
    assert_eq!(snap_offset(40, 20), 0);
    assert_eq!(snap_offset(0, 20), 0);
    assert_eq!(snap_offset(25, 0), 0);
}

#[test]
fn bottom_and_top_hits_snap_to_rows() {
    let mut c = canvas(options(100, Window::rows(0, 10)));
    c.surface_mut().scroll_top = 25;
    c.on_hit_bottom_boundary();
    // 25 + 20 + 15
    assert_eq!(c.surface().scroll_top, 60);

    c.surface_mut().scroll_top = 25;
    c.on_hit_top_boundary();
    // 25 - (20 - 15)
    assert_eq!(c.surface().scroll_top, 20);

    c.surface_mut().scroll_top = 40;
    c.on_hit_top_boundary();
    assert_eq!(c.surface().scroll_top, 20);

    c.surface_mut().scroll_top = 5;
    c.on_hit_top_boundary();
    assert_eq!(c.surface().scroll_top, 0);
}

#[test]
fn left_hit_moves_vertically_while_right_hit_moves_horizontally() {
    let window = Window::rows(0, 10).with_columns(0, 8, 2, 5);
    let mut c = canvas(options(100, window));
    c.surface_mut().scroll_top = 25;
    c.surface_mut().scroll_left = 100;

    // The left edge steps the vertical offset back by one row; the horizontal offset is untouched.
    c.on_hit_left_boundary();
    assert_eq!(c.surface().scroll_top, 5);
    assert_eq!(c.surface().scroll_left, 100);

    // The right edge steps the horizontal offset back by (5 - 2) * 20.
    c.on_hit_right_boundary();
    assert_eq!(c.surface().scroll_left, 40);
    assert_eq!(c.surface().scroll_top, 5);

    c.on_hit_right_boundary();
    assert_eq!(c.surface().scroll_left, 0);

    c.on_hit_left_boundary();
    assert_eq!(c.surface().scroll_top, 0);
}

#[test]
fn boundary_dispatcher_works_on_any_surface() {
    let mut surface = MemorySurface::new(SurfaceId(9)).with_max_scroll(50, 0);
    surface.scroll_top = 25;
    let d = BoundaryHitDispatcher::new(20, &Window::default());
    d.dispatch(&mut surface, BoundaryHit::Bottom);
    assert_eq!(surface.scroll_top, 50);
}

#[test]
fn scroll_events_from_other_targets_are_ignored() {
    let (log, sink) = recorder::<ScrollState>();
    let opts = options(100, Window::rows(0, 10)).with_on_scroll(Some(sink));
    let mut c = canvas(opts);

    let bubbled = ScrollEvent {
        target: SurfaceId(2),
        scroll_top: 300,
        scroll_left: 40,
    };
    assert!(!c.owns_event(&bubbled));
    c.on_scroll(&bubbled);
    assert_eq!(c.scroll_state(), ScrollState::default());
    assert!(log.lock().unwrap().is_empty());

    let own = ScrollEvent {
        target: SurfaceId(1),
        ..bubbled
    };
    c.on_scroll(&own);
    let expected = ScrollState {
        scroll_top: 300,
        scroll_left: 40,
    };
    assert_eq!(c.scroll_state(), expected);
    assert_eq!(*log.lock().unwrap(), vec![expected]);
}

#[test]
fn get_scroll_reads_the_live_surface() {
    let mut c = canvas(options(100, Window::rows(0, 10)));
    c.surface_mut().scroll_top = 120;
    let event = c.surface().scroll_event();
    c.on_scroll(&event);
    c.surface_mut().scroll_top = 180;
    c.surface_mut().scroll_left = 3;

    assert_eq!(c.scroll_state().scroll_top, 120);
    assert_eq!(
        c.get_scroll(),
        ScrollState {
            scroll_top: 180,
            scroll_left: 3,
        }
    );
}

#[test]
fn rows_callback_fires_every_pass_by_default() {
    let (log, sink) = recorder::<RowRange>();
    let opts = options(100, Window::rows(10, 20)).with_on_rows(Some(sink));
    let mut c = canvas(opts);

    let _ = c.render();
    c.did_mount();
    let _ = c.render();
    c.did_update();

    let range = RowRange { start: 10, end: 20 };
    assert_eq!(*log.lock().unwrap(), vec![range, range]);
}

#[test]
fn rows_callback_on_change_policy_skips_repeats() {
    let (log, sink) = recorder::<RowRange>();
    let opts = options(100, Window::rows(10, 20))
        .with_on_rows(Some(sink))
        .with_rows_notify_policy(RowsNotifyPolicy::OnChange);
    let mut c = canvas(opts);

    let _ = c.render();
    c.did_mount();
    let _ = c.render();
    c.did_update();
    c.set_window(Window::rows(12, 22));
    let _ = c.render();
    c.did_update();

    assert_eq!(
        *log.lock().unwrap(),
        vec![RowRange { start: 10, end: 20 }, RowRange { start: 12, end: 22 }]
    );
}

#[test]
fn rows_callback_reports_reset_range_without_a_render() {
    let (log, sink) = recorder::<RowRange>();
    let opts = options(100, Window::rows(10, 20)).with_on_rows(Some(sink));
    let mut c = canvas(opts);
    let _ = c.render();
    c.did_update();
    c.did_update();
    assert_eq!(
        *log.lock().unwrap(),
        vec![RowRange { start: 10, end: 20 }, RowRange::default()]
    );
}

#[test]
fn on_change_policy_ignores_updates_without_a_render() {
    let (log, sink) = recorder::<RowRange>();
    let opts = options(100, Window::rows(10, 20))
        .with_on_rows(Some(sink))
        .with_rows_notify_policy(RowsNotifyPolicy::OnChange);
    let mut c = canvas(opts);
    let _ = c.render();
    c.did_mount();
    c.did_update();
    c.did_update();
    let _ = c.render();
    c.did_update();
    assert_eq!(*log.lock().unwrap(), vec![RowRange { start: 10, end: 20 }]);
}

#[test]
fn short_slice_keeps_total_height() {
    let (log, sink) = recorder::<RowRange>();
    let opts = CanvasOptions::with_render_fn(
        100,
        20,
        200,
        RowSource::from_vec(people(50)),
        render_fn,
    )
    .with_window(Window::rows(40, 60))
    .with_on_rows(Some(sink));
    let mut c = canvas(opts);
    let frame = c.render();

    assert_eq!(frame.rows.realized().count(), 10);
    assert_eq!(c.realized_count(), 10);
    assert_eq!(
        frame.rows.placeholder(PlaceholderSlot::Top).map(|p| p.height),
        Some(800)
    );
    assert_eq!(
        frame.rows.placeholder(PlaceholderSlot::Bottom).map(|p| p.height),
        Some(1000)
    );
    assert_eq!(frame.rows.total_height(20), 100 * 20);

    c.did_mount();
    let reported = log.lock().unwrap()[0];
    assert_eq!(reported, RowRange { start: 40, end: 50 });
    assert_eq!(reported.len(), 10);
}

#[test]
fn slice_ending_before_the_window_realizes_nothing() {
    let (log, sink) = recorder::<RowRange>();
    let opts = CanvasOptions::with_render_fn(
        100,
        20,
        200,
        RowSource::from_vec(people(30)),
        render_fn,
    )
    .with_window(Window::rows(40, 60))
    .with_on_rows(Some(sink));
    let mut c = canvas(opts);
    let frame = c.render();

    assert_eq!(frame.rows.realized().count(), 0);
    assert_eq!(frame.rows.total_height(20), 100 * 20);
    c.did_mount();
    assert!(log.lock().unwrap()[0].is_empty());
}

#[test]
fn resync_requires_both_offsets_by_default() {
    let mut c = canvas(options(100, Window::rows(0, 3)));
    let _ = c.render();
    let h = RecordingRow::default();
    c.attach_row(0, Box::new(h.clone()));

    c.on_scroll(&ScrollEvent {
        target: SurfaceId(1),
        scroll_top: 0,
        scroll_left: 30,
    });
    c.did_update();
    assert_eq!(h.seen.get(), None);

    c.on_scroll(&ScrollEvent {
        target: SurfaceId(1),
        scroll_top: 20,
        scroll_left: 30,
    });
    c.did_update();
    assert_eq!(h.seen.get(), Some(30));
}

#[test]
fn horizontal_resync_policy_ignores_vertical_offset() {
    let opts = options(100, Window::rows(0, 3))
        .with_scroll_left_resync_policy(ScrollLeftResyncPolicy::HorizontalNonZero);
    let mut c = canvas(opts);
    let _ = c.render();
    let h = RecordingRow::default();
    c.attach_row(0, Box::new(h.clone()));

    c.on_scroll(&ScrollEvent {
        target: SurfaceId(1),
        scroll_top: 0,
        scroll_left: 30,
    });
    c.did_update();
    assert_eq!(h.seen.get(), Some(30));
}

#[test]
fn scroll_to_row_is_enforced_on_every_update() {
    let opts = options(100, Window::rows(0, 10)).with_scroll_to_row_index(Some(10));
    let mut c = canvas(opts);
    let _ = c.render();
    c.did_update();
    assert_eq!(c.surface().scroll_top, 200);

    c.surface_mut().scroll_top = 0;
    c.did_update();
    assert_eq!(c.surface().scroll_top, 200);

    // Clamped so the last page stays full: 100 * 20 - 200.
    c.update_options(|o| o.scroll_to_row_index = Some(99));
    c.did_update();
    assert_eq!(c.surface().scroll_top, 1800);

    c.update_options(|o| o.scroll_to_row_index = Some(0));
    c.surface_mut().scroll_top = 33;
    c.did_update();
    assert_eq!(c.surface().scroll_top, 33);
}

#[test]
fn scroll_to_row_offset_saturates_for_short_content() {
    assert_eq!(scroll_to_row_offset(3, 20, 5, 400), 0);
    assert_eq!(scroll_to_row_offset(3, 20, 100, 200), 60);
}

#[test]
fn window_mirror_updates_only_on_value_change() {
    let mut w = ViewportWindow::new(&Window::rows(0, 10));
    assert!(!w.sync(&Window::rows(0, 10).with_visible(2, 8)));
    assert!(w.sync(&Window::rows(5, 15)));
    assert_eq!((w.display_start(), w.display_end()), (5, 15));
    assert_eq!(w.clamped(12), RowRange { start: 5, end: 12 });
}

#[test]
fn received_window_drives_the_next_render() {
    let mut c = canvas(options(100, Window::rows(0, 10)));
    assert_eq!(c.render().rows.realized().count(), 10);

    let next = options(100, Window::rows(30, 35).with_visible(31, 34));
    c.receive_options(next);
    let frame = c.render();
    assert_eq!(frame.rows.realized().next().map(String::as_str), Some("row-30|false"));
    assert_eq!(frame.rows.realized().count(), 5);
    assert_eq!(frame.overlay.visible_start, 31);
    assert_eq!(frame.overlay.visible_end, 34);
}

#[test]
fn custom_row_renderer_wins() {
    let mut rows = people(4);
    let custom: CustomRowRenderer<String> = Arc::new(|info: &CanvasInfo, idx: usize| {
        format!("custom-{idx}-of-{}", info.rows_count)
    });
    rows[1].meta = Some(RowMeta::Custom(custom));
    let opts = CanvasOptions::with_render_fn(4, 20, 80, RowSource::from_vec(rows), render_fn)
        .with_window(Window::rows(0, 4))
        .with_group_renderer(Some(|g: &GroupRowProps<'_, Person>| {
            format!("group-{}", g.group.name)
        }));
    let mut c = canvas(opts);
    let frame = c.render();
    let nodes: Vec<&String> = frame.rows.realized().collect();
    assert_eq!(nodes[1], "custom-1-of-4");
    assert_eq!(nodes[0], "row-0|false");
}

#[test]
fn group_rows_use_the_group_renderer_or_fall_back() {
    let mut rows = people(3);
    rows[2].meta = Some(RowMeta::Group(GroupMeta {
        name: "Berlin".to_string(),
        column_name: "city".to_string(),
        tree_depth: 1,
        is_expanded: true,
        ..GroupMeta::default()
    }));

    let base = CanvasOptions::with_render_fn(3, 20, 60, RowSource::from_vec(rows), render_fn)
        .with_window(Window::rows(0, 3));

    let mut with_group = canvas(base.clone().with_group_renderer(Some(
        |g: &GroupRowProps<'_, Person>| {
            format!("{}:{}@{}", g.group.column_name, g.group.name, g.row.idx)
        },
    )));
    let frame = with_group.render();
    assert_eq!(frame.rows.realized().last().map(String::as_str), Some("city:Berlin@2"));

    let mut without_group = canvas(base);
    let frame = without_group.render();
    assert_eq!(frame.rows.realized().last().map(String::as_str), Some("row-2|false"));
}

#[test]
fn template_renderer_is_cloned_per_row() {
    let opts: CanvasOptions<Person, String> = CanvasOptions::new(
        3,
        20,
        60,
        RowSource::from_vec(people(3)),
        DefaultRowRenderer::template(
            "tpl".to_string(),
            |tpl: &String, p: &RowProps<'_, Person>| format!("{tpl}#{}", p.idx),
        ),
    )
    .with_window(Window::rows(0, 3));
    let mut c = canvas(opts);
    let frame = c.render();
    let nodes: Vec<&String> = frame.rows.realized().collect();
    assert_eq!(nodes, vec!["tpl#0", "tpl#1", "tpl#2"]);
}

#[test]
fn renderer_resolution_is_a_single_variant() {
    let default: DefaultRowRenderer<Person, String> = DefaultRowRenderer::function(render_fn);
    let group = RowMeta::<String>::Group(GroupMeta::default());
    assert!(matches!(
        RowRenderer::resolve(Some(&group), None, &default),
        RowRenderer::Function(_)
    ));
    assert!(matches!(
        RowRenderer::resolve(None, None, &default),
        RowRenderer::Function(_)
    ));
}

#[test]
fn frame_carries_overlay_and_container_props() {
    let clicks = Arc::new(AtomicUsize::new(0));
    let cell_metadata = CellMetaData::new({
        let clicks = Arc::clone(&clicks);
        move |pos: CellPosition| {
            clicks.fetch_add(pos.row_idx + pos.idx, Ordering::SeqCst);
        }
    });
    let opts = options(100, Window::rows(0, 10).with_columns(0, 2, 0, 2))
        .with_width(Some(170), Some(190))
        .with_cell_metadata(cell_metadata)
        .with_context_menu(Some("menu".to_string()));
    let mut c = canvas(opts);
    let frame = c.render();

    assert_eq!(frame.width, Some(190));
    assert_eq!(frame.height, 200);
    assert_eq!(frame.rows.width, Some(170));
    assert_eq!(frame.rows.context_menu.as_deref(), Some("menu"));
    assert_eq!(frame.overlay.row_height, 20);
    assert_eq!(frame.overlay.columns.len(), 2);
    assert_eq!(frame.overlay.col_visible_end, 2);

    (frame.overlay.on_cell_click)(CellPosition { row_idx: 3, idx: 1 });
    assert_eq!(clicks.load(Ordering::SeqCst), 4);
}

#[test]
fn row_props_pass_through_window_and_expansion() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let opts = CanvasOptions::with_render_fn(10, 20, 200, RowSource::from_vec(people(10)), {
        let seen = Arc::clone(&seen);
        move |p: &RowProps<'_, Person>| {
            seen.lock().unwrap().push((
                p.visible_start,
                p.col_visible_end,
                p.expanded_rows.contains(&p.idx),
                p.is_scrolling,
            ));
            String::new()
        }
    })
    .with_window(Window::rows(2, 4).with_visible(2, 3).with_columns(0, 3, 1, 2))
    .with_expanded_rows(vec![3usize])
    .with_is_scrolling(true);
    let mut c = canvas(opts);
    let _ = c.render();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(2, 2, false, true), (2, 2, true, true)]
    );
}

#[test]
fn unmount_resets_mount_state() {
    let (log, sink) = recorder::<RowRange>();
    let opts = options(100, Window::rows(10, 20)).with_on_rows(Some(sink));
    let mut c = canvas(opts);
    let _ = c.render();
    c.attach_row(0, Box::new(Inert));
    c.on_scroll(&ScrollEvent {
        target: SurfaceId(1),
        scroll_top: 200,
        scroll_left: 10,
    });

    c.unmount();
    assert_eq!(c.realized_count(), 0);
    assert_eq!(c.scroll_state(), ScrollState::default());
    assert_eq!(c.registry().capacity(), 0);

    c.did_mount();
    assert_eq!(*log.lock().unwrap(), vec![RowRange::default()]);
}

#[test]
fn scrollbar_width_is_outer_minus_inner() {
    let surface = MemorySurface::new(SurfaceId(1)).with_widths(417, 400);
    let c = Canvas::new(options(10, Window::rows(0, 10)), surface);
    assert_eq!(c.scrollbar_width(), 17);
    assert_eq!(scrollbar_width(&MemorySurface::default()), 0);
}
