// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_waypoint --heading-base-level=0

//! Understory Waypoint: scroll-driven visibility tracking for document elements.
//!
//! A *waypoint* pairs a target (a selector, or one element) with optional
//! callbacks that fire when a matched element enters or leaves the viewport.
//! The engine also stamps two markers on each element it observes:
//!
//! - an **ever-visible** marker (`waypoint-once` by default), set the first
//!   time the element is seen and never removed;
//! - a **currently-visible** marker (`waypoint-visible` by default), present
//!   while the element overlaps the viewport.
//!
//! Visibility is vertical only: an element is visible unless its bottom edge
//! is above the viewport or its top edge is below it.
//!
//! ## Architecture
//!
//! - [`Registry`] and [`WaypointHandle`]: the ordered list of waypoints, with
//!   callback slots that can be (re)assigned after registration.
//! - [`ScrollCoordinator`]: folds bursts of scroll events into at most one
//!   pass per frame.
//! - [`Evaluator`]: runs one pass, applying the enter/exit state machine.
//! - [`geometry`]: the viewport intersection test.
//! - [`Waypoints`]: the engine tying these together.
//!
//! The crate never touches a real DOM. Hosts implement [`Document`],
//! [`ElementSurface`] and [`FrameScheduler`]; see `understory_waypoint_web`
//! for the browser binding.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use understory_waypoint::{
//!     Document, ElementSurface, FrameScheduler, ScheduleError, Waypoints, class_list,
//! };
//!
//! // A one-element document.
//! #[derive(Clone)]
//! struct Node {
//!     top: Rc<Cell<f64>>,
//!     class: Rc<RefCell<String>>,
//! }
//!
//! impl ElementSurface for Node {
//!     fn bounding_rect(&self) -> Rect {
//!         let top = self.top.get();
//!         Rect::new(0.0, top, 100.0, top + 20.0)
//!     }
//!     fn has_marker(&self, marker: &str) -> bool {
//!         class_list::contains(&self.class.borrow(), marker)
//!     }
//!     fn add_marker(&self, marker: &str) {
//!         let next = class_list::with_token(&self.class.borrow(), marker);
//!         if let Some(next) = next {
//!             *self.class.borrow_mut() = next;
//!         }
//!     }
//!     fn remove_marker(&self, marker: &str) {
//!         let next = class_list::without_token(&self.class.borrow(), marker);
//!         if let Some(next) = next {
//!             *self.class.borrow_mut() = next;
//!         }
//!     }
//! }
//!
//! struct Page(Node);
//!
//! impl Document for Page {
//!     type Element = Node;
//!     fn query_selector_all(&self, selector: &str) -> Vec<Node> {
//!         if selector == "#footer" { vec![self.0.clone()] } else { vec![] }
//!     }
//!     fn viewport_height(&self) -> f64 {
//!         600.0
//!     }
//! }
//!
//! // Frames are queued and run by hand.
//! #[derive(Clone, Default)]
//! struct Frames(Rc<RefCell<Vec<Box<dyn FnOnce()>>>>);
//!
//! impl FrameScheduler for Frames {
//!     fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), ScheduleError> {
//!         self.0.borrow_mut().push(callback);
//!         Ok(())
//!     }
//! }
//!
//! let footer = Node { top: Rc::new(Cell::new(900.0)), class: Rc::default() };
//! let frames = Frames::default();
//! let waypoints = Waypoints::new(Page(footer.clone()), frames.clone());
//!
//! let arrived = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&arrived);
//! waypoints
//!     .register_selector("#footer")
//!     .unwrap()
//!     .on_visible(move |_| counter.set(counter.get() + 1));
//!
//! // Scroll the footer into view; many scroll events, one frame.
//! footer.top.set(500.0);
//! for _ in 0..10 {
//!     waypoints.handle_scroll();
//! }
//! let pending: Vec<_> = frames.0.borrow_mut().drain(..).collect();
//! assert_eq!(pending.len(), 1);
//! for frame in pending {
//!     frame();
//! }
//!
//! assert_eq!(arrived.get(), 1);
//! assert_eq!(footer.class.borrow().as_str(), "waypoint-visible waypoint-once");
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//! - `tracing`: emit pass and scheduling diagnostics through `tracing`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod class_list;
mod coordinator;
mod error;
mod evaluator;
pub mod geometry;
mod options;
mod platform;
mod registry;
mod waypoints;

pub use coordinator::{ScrollCoordinator, ScrollOutcome};
pub use error::{InvalidArgument, ScheduleError, WaypointError};
pub use evaluator::{Evaluator, PassStats, Transition};
pub use geometry::Probe;
pub use options::{
    DEFAULT_CURRENTLY_VISIBLE_MARKER, DEFAULT_EVER_VISIBLE_MARKER, DetachedElementPolicy, Markers,
    WaypointOptions,
};
pub use platform::{Document, ElementSurface, FrameScheduler, TargetValue};
pub use registry::{Callback, Registry, Target, WaypointHandle};
pub use waypoints::Waypoints;
