// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_waypoint::{
    Document, ElementSurface, FrameScheduler, ScheduleError, Waypoints, class_list,
};

const ROW_HEIGHT: f64 = 24.0;
const VIEWPORT: f64 = 800.0;

struct Row {
    index: usize,
    class: RefCell<String>,
}

#[derive(Clone)]
struct RowRef {
    row: Rc<Row>,
    scroll: Rc<Cell<f64>>,
}

impl ElementSurface for RowRef {
    fn bounding_rect(&self) -> Rect {
        let top = self.row.index as f64 * ROW_HEIGHT - self.scroll.get();
        Rect::new(0.0, top, 400.0, top + ROW_HEIGHT)
    }

    fn has_marker(&self, marker: &str) -> bool {
        class_list::contains(&self.row.class.borrow(), marker)
    }

    fn add_marker(&self, marker: &str) {
        let next = class_list::with_token(&self.row.class.borrow(), marker);
        if let Some(next) = next {
            *self.row.class.borrow_mut() = next;
        }
    }

    fn remove_marker(&self, marker: &str) {
        let next = class_list::without_token(&self.row.class.borrow(), marker);
        if let Some(next) = next {
            *self.row.class.borrow_mut() = next;
        }
    }
}

/// A uniform list; `.row` matches every row, `#N` matches row N.
struct List {
    rows: Vec<RowRef>,
    scroll: Rc<Cell<f64>>,
}

impl List {
    fn new(len: usize) -> Self {
        let scroll = Rc::new(Cell::new(0.0));
        let rows = (0..len)
            .map(|index| RowRef {
                row: Rc::new(Row {
                    index,
                    class: RefCell::new(String::from("row")),
                }),
                scroll: scroll.clone(),
            })
            .collect();
        Self { rows, scroll }
    }
}

impl Document for List {
    type Element = RowRef;

    fn query_selector_all(&self, selector: &str) -> Vec<RowRef> {
        if selector == ".row" {
            return self.rows.clone();
        }
        selector
            .strip_prefix('#')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| self.rows.get(n).cloned())
            .into_iter()
            .collect()
    }

    fn viewport_height(&self) -> f64 {
        VIEWPORT
    }
}

struct Immediate;

impl FrameScheduler for Immediate {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), ScheduleError> {
        callback();
        Ok(())
    }
}

fn bench_selector_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("waypoint_pass/one_selector");
    for &rows in &[100_usize, 1_000, 10_000] {
        let list = List::new(rows);
        let scroll = list.scroll.clone();
        let waypoints = Waypoints::new(list, Immediate);
        let fired = Rc::new(Cell::new(0_usize));
        let counter = fired.clone();
        waypoints
            .register_selector(".row")
            .unwrap()
            .on_visible(move |_| counter.set(counter.get() + 1))
            .on_no_longer_visible(|_| {});
        let step = ROW_HEIGHT * 7.0;
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            let end = rows as f64 * ROW_HEIGHT;
            b.iter(|| {
                let next = scroll.get() + step;
                scroll.set(if next > end { 0.0 } else { next });
                black_box(waypoints.evaluate_now())
            });
        });
        black_box(fired.get());
    }
    group.finish();
}

fn bench_many_element_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("waypoint_pass/element_targets");
    for &rows in &[100_usize, 1_000] {
        let list = List::new(rows);
        let scroll = list.scroll.clone();
        let targets = list.rows.clone();
        let waypoints = Waypoints::new(list, Immediate);
        for row in targets {
            waypoints.register_element(row).unwrap().on_visible(|_| {});
        }
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            let end = rows as f64 * ROW_HEIGHT;
            b.iter(|| {
                let next = scroll.get() + VIEWPORT / 2.0;
                scroll.set(if next > end { 0.0 } else { next });
                black_box(waypoints.evaluate_now())
            });
        });
    }
    group.finish();
}

fn bench_scroll_burst(c: &mut Criterion) {
    c.bench_function("waypoint_pass/coalesced_scrolls", |b| {
        let queued: Rc<RefCell<Vec<Box<dyn FnOnce()>>>> = Rc::default();
        let list = List::new(1_000);
        let scroll = list.scroll.clone();
        let waypoints = Waypoints::new(list, Deferred(queued.clone()));
        waypoints.register_selector(".row").unwrap();
        b.iter(|| {
            for _ in 0..32 {
                scroll.set(scroll.get() + 3.0);
                black_box(waypoints.handle_scroll());
            }
            let frames: Vec<_> = queued.borrow_mut().drain(..).collect();
            for frame in frames {
                frame();
            }
            if scroll.get() > 20_000.0 {
                scroll.set(0.0);
            }
        });
    });
}

struct Deferred(Rc<RefCell<Vec<Box<dyn FnOnce()>>>>);

impl FrameScheduler for Deferred {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), ScheduleError> {
        self.0.borrow_mut().push(callback);
        Ok(())
    }
}

criterion_group!(
    benches,
    bench_selector_pass,
    bench_many_element_targets,
    bench_scroll_burst
);
criterion_main!(benches);
