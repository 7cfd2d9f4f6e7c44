// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A fake document and frame scheduler shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use kurbo::Rect;
use understory_waypoint::{
    Document, ElementSurface, FrameScheduler, ScheduleError, TargetValue, Waypoints, class_list,
};

pub const VIEWPORT_HEIGHT: f64 = 600.0;

struct Node {
    id: String,
    group: String,
    top: Cell<f64>,
    height: f64,
    class: RefCell<String>,
    connected: Cell<bool>,
    marker_writes: Cell<usize>,
}

/// An element with a mutable vertical position and a class string.
#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

impl FakeElement {
    pub fn new(id: &str, group: &str, top: f64, height: f64) -> Self {
        Self(Rc::new(Node {
            id: id.to_owned(),
            group: group.to_owned(),
            top: Cell::new(top),
            height,
            class: RefCell::new(String::new()),
            connected: Cell::new(true),
            marker_writes: Cell::new(0),
        }))
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn set_top(&self, top: f64) {
        self.0.top.set(top);
    }

    pub fn class(&self) -> String {
        self.0.class.borrow().clone()
    }

    pub fn set_class(&self, class: &str) {
        *self.0.class.borrow_mut() = class.to_owned();
    }

    pub fn has_class(&self, token: &str) -> bool {
        class_list::contains(&self.0.class.borrow(), token)
    }

    /// Number of `add_marker`/`remove_marker` calls that changed the class.
    pub fn marker_writes(&self) -> usize {
        self.0.marker_writes.get()
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            return self.0.id == id;
        }
        if let Some(group) = selector.strip_prefix('.') {
            return self.0.group == group;
        }
        false
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FakeElement(#{})", self.0.id)
    }
}

impl ElementSurface for FakeElement {
    fn bounding_rect(&self) -> Rect {
        if !self.0.connected.get() {
            return Rect::ZERO;
        }
        let top = self.0.top.get();
        Rect::new(0.0, top, 320.0, top + self.0.height)
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.has_class(marker)
    }

    fn add_marker(&self, marker: &str) {
        let next = class_list::with_token(&self.0.class.borrow(), marker);
        if let Some(next) = next {
            *self.0.class.borrow_mut() = next;
            self.0.marker_writes.set(self.0.marker_writes.get() + 1);
        }
    }

    fn remove_marker(&self, marker: &str) {
        let next = class_list::without_token(&self.0.class.borrow(), marker);
        if let Some(next) = next {
            *self.0.class.borrow_mut() = next;
            self.0.marker_writes.set(self.0.marker_writes.get() + 1);
        }
    }

    fn is_connected(&self) -> bool {
        self.0.connected.get()
    }
}

struct DocState {
    elements: RefCell<Vec<FakeElement>>,
    viewport_height: Cell<f64>,
    queries: Cell<usize>,
}

/// A document holding elements in insertion (document) order.
#[derive(Clone)]
pub struct FakeDocument(Rc<DocState>);

impl FakeDocument {
    pub fn new() -> Self {
        Self(Rc::new(DocState {
            elements: RefCell::new(Vec::new()),
            viewport_height: Cell::new(VIEWPORT_HEIGHT),
            queries: Cell::new(0),
        }))
    }

    /// Appends a new connected element and returns it.
    pub fn append(&self, id: &str, group: &str, top: f64) -> FakeElement {
        let element = FakeElement::new(id, group, top, 40.0);
        self.0.elements.borrow_mut().push(element.clone());
        element
    }

    /// Removes `element` from the document.
    pub fn detach(&self, element: &FakeElement) {
        self.0.elements.borrow_mut().retain(|e| e != element);
        element.0.connected.set(false);
    }

    /// Reinserts a previously detached element at the end of the document.
    pub fn reattach(&self, element: &FakeElement) {
        element.0.connected.set(true);
        self.0.elements.borrow_mut().push(element.clone());
    }

    /// Scrolls the document down by `dy`, moving every element up.
    pub fn scroll_by(&self, dy: f64) {
        for element in self.0.elements.borrow().iter() {
            element.set_top(element.0.top.get() - dy);
        }
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.0.viewport_height.set(height);
    }

    /// Number of selector queries issued so far.
    pub fn queries(&self) -> usize {
        self.0.queries.get()
    }
}

impl Document for FakeDocument {
    type Element = FakeElement;

    fn query_selector_all(&self, selector: &str) -> Vec<FakeElement> {
        self.0.queries.set(self.0.queries.get() + 1);
        self.0
            .elements
            .borrow()
            .iter()
            .filter(|e| e.matches(selector))
            .cloned()
            .collect()
    }

    fn viewport_height(&self) -> f64 {
        self.0.viewport_height.get()
    }
}

/// Frame scheduler whose frames run only when the test says so.
#[derive(Clone, Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<VecDeque<Box<dyn FnOnce()>>>>,
    refuse: Rc<Cell<bool>>,
}

impl ManualFrames {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn set_refuse(&self, refuse: bool) {
        self.refuse.set(refuse);
    }

    /// Runs every frame queued before this call. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        let count = due.len();
        for callback in due {
            callback();
        }
        count
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), ScheduleError> {
        if self.refuse.get() {
            return Err(ScheduleError);
        }
        self.queue.borrow_mut().push_back(callback);
        Ok(())
    }
}

/// A dynamically typed registration argument.
pub enum Value {
    Str(String),
    Num(f64),
    Elem(FakeElement),
}

impl TargetValue<FakeElement> for Value {
    fn as_selector(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn as_element(&self) -> Option<FakeElement> {
        match self {
            Self::Elem(e) => Some(e.clone()),
            _ => None,
        }
    }
}

/// Ordered record of callback invocations.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    /// Returns a callback that records `label:id`.
    pub fn callback(&self, label: &'static str) -> impl Fn(&FakeElement) + 'static {
        let log = self.clone();
        move |element| log.push(format!("{label}:{}", element.id()))
    }

    pub fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == entry).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

pub type Engine = Waypoints<FakeDocument, ManualFrames>;

pub fn engine() -> (Engine, FakeDocument, ManualFrames) {
    let document = FakeDocument::new();
    let frames = ManualFrames::default();
    let waypoints = Waypoints::new(document.clone(), frames.clone());
    (waypoints, document, frames)
}
