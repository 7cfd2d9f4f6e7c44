// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility evaluator: one pass over a list of waypoints.
//!
//! For each waypoint, in order, the evaluator resolves its candidate elements,
//! classifies each one with the [geometry probe](crate::geometry), and applies
//! the per-element state machine:
//!
//! | was visible | visible now | markers                                   | callback                     |
//! |-------------|-------------|-------------------------------------------|------------------------------|
//! | no          | yes         | add currently-visible; add ever-visible   | `visible_callback`           |
//! | yes         | no          | remove currently-visible                  | `no_longer_visible_callback` |
//! | same        | same        | none                                      | none                         |
//!
//! "Was visible" is read from the element's currently-visible marker, so the
//! state survives elements being matched by different selectors on different
//! passes. Markers are written before the callback runs.

use core::ops::AddAssign;

use crate::geometry::Probe;
use crate::options::{DetachedElementPolicy, WaypointOptions};
use crate::platform::{Document, ElementSurface};
use crate::registry::{Target, WaypointHandle};

/// Outcome of evaluating one element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The element entered the viewport.
    Entered,
    /// The element left the viewport.
    Exited,
    /// Nothing changed.
    Unchanged,
}

impl Transition {
    /// Computes the transition from the previous state to the current one.
    #[must_use]
    pub fn between(was_visible: bool, visible_now: bool) -> Self {
        match (was_visible, visible_now) {
            (false, true) => Self::Entered,
            (true, false) => Self::Exited,
            _ => Self::Unchanged,
        }
    }
}

/// Counters for one pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PassStats {
    /// Waypoints evaluated (retired ones are not counted).
    pub waypoints: usize,
    /// Candidate elements examined.
    pub elements: usize,
    /// Enter-visible transitions.
    pub entered: usize,
    /// Exit-visible transitions.
    pub exited: usize,
    /// Element targets skipped because they were detached.
    pub detached: usize,
}

impl AddAssign for PassStats {
    fn add_assign(&mut self, rhs: Self) {
        self.waypoints += rhs.waypoints;
        self.elements += rhs.elements;
        self.entered += rhs.entered;
        self.exited += rhs.exited;
        self.detached += rhs.detached;
    }
}

/// Runs passes against one document.
#[derive(Debug)]
pub struct Evaluator<'a, D> {
    document: &'a D,
    options: &'a WaypointOptions,
}

impl<'a, D: Document> Evaluator<'a, D> {
    /// Creates an evaluator over `document`.
    #[must_use]
    pub fn new(document: &'a D, options: &'a WaypointOptions) -> Self {
        Self { document, options }
    }

    /// Evaluates every waypoint in `waypoints`, in order.
    ///
    /// The viewport height is sampled once, at the start. A waypoint that is
    /// retired by the time the loop reaches it is skipped, so a reset issued
    /// by a callback stops the remainder of the pass.
    pub fn run(&self, waypoints: &[WaypointHandle<D::Element>]) -> PassStats {
        let viewport_height = self.document.viewport_height();
        let mut stats = PassStats::default();
        for waypoint in waypoints {
            if waypoint.is_retired() {
                continue;
            }
            stats += self.run_waypoint(waypoint, viewport_height);
        }
        stats
    }

    fn run_waypoint(
        &self,
        waypoint: &WaypointHandle<D::Element>,
        viewport_height: f64,
    ) -> PassStats {
        let mut stats = PassStats {
            waypoints: 1,
            ..PassStats::default()
        };
        match waypoint.target() {
            Target::Selector(selector) => {
                for element in self.document.query_selector_all(selector) {
                    // A callback earlier in this loop may have reset the registry.
                    if waypoint.is_retired() {
                        break;
                    }
                    stats.elements += 1;
                    self.apply(waypoint, &element, viewport_height, &mut stats);
                }
            }
            Target::Element(element) => {
                if self.options.detached == DetachedElementPolicy::Skip
                    && !element.is_connected()
                {
                    stats.detached += 1;
                    return stats;
                }
                stats.elements += 1;
                self.apply(waypoint, element, viewport_height, &mut stats);
            }
        }
        stats
    }

    fn apply(
        &self,
        waypoint: &WaypointHandle<D::Element>,
        element: &D::Element,
        viewport_height: f64,
        stats: &mut PassStats,
    ) {
        let markers = &self.options.markers;
        let visible_now = Probe::read(element, viewport_height).is_visible();
        let was_visible = element.has_marker(markers.currently_visible());
        match Transition::between(was_visible, visible_now) {
            Transition::Entered => {
                element.add_marker(markers.currently_visible());
                if !element.has_marker(markers.ever_visible()) {
                    element.add_marker(markers.ever_visible());
                }
                stats.entered += 1;
                if let Some(callback) = waypoint.visible_callback() {
                    callback(element);
                }
            }
            Transition::Exited => {
                element.remove_marker(markers.currently_visible());
                stats.exited += 1;
                if let Some(callback) = waypoint.no_longer_visible_callback() {
                    callback(element);
                }
            }
            Transition::Unchanged => {}
        }
    }
}
