// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypoint records, handles, and the ordered registry.
//!
//! A waypoint is shared between the registry and the [`WaypointHandle`]
//! returned to the caller. Callback slots live behind interior mutability so
//! that the caller can attach or replace callbacks at any time; the evaluator
//! reads whatever is in the slot when a transition happens.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// A visibility callback. Receives the element whose state changed.
pub type Callback<E> = Rc<dyn Fn(&E)>;

/// What a waypoint tracks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<E> {
    /// Every element matching the selector, re-resolved on each pass.
    Selector(String),
    /// One element, held directly.
    Element(E),
}

impl<E> Target<E> {
    /// Returns the selector, for selector targets.
    #[must_use]
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::Selector(selector) => Some(selector),
            Self::Element(_) => None,
        }
    }

    /// Returns the element, for element targets.
    #[must_use]
    pub fn element(&self) -> Option<&E> {
        match self {
            Self::Selector(_) => None,
            Self::Element(element) => Some(element),
        }
    }
}

struct Record<E> {
    target: Target<E>,
    visible: RefCell<Option<Callback<E>>>,
    no_longer_visible: RefCell<Option<Callback<E>>>,
    retired: Cell<bool>,
}

/// Shared handle to a registered waypoint.
///
/// Cloning the handle does not register anything new; all clones refer to the
/// same waypoint.
pub struct WaypointHandle<E> {
    record: Rc<Record<E>>,
}

impl<E> Clone for WaypointHandle<E> {
    fn clone(&self) -> Self {
        Self {
            record: Rc::clone(&self.record),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for WaypointHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaypointHandle")
            .field("target", &self.record.target)
            .field("has_visible_callback", &self.has_visible_callback())
            .field(
                "has_no_longer_visible_callback",
                &self.has_no_longer_visible_callback(),
            )
            .field("retired", &self.is_retired())
            .finish()
    }
}

impl<E> WaypointHandle<E> {
    pub(crate) fn new(target: Target<E>) -> Self {
        Self {
            record: Rc::new(Record {
                target,
                visible: RefCell::new(None),
                no_longer_visible: RefCell::new(None),
                retired: Cell::new(false),
            }),
        }
    }

    /// Returns the waypoint's target.
    #[must_use]
    pub fn target(&self) -> &Target<E> {
        &self.record.target
    }

    /// Attaches the enter-visible callback, replacing any previous one.
    pub fn on_visible(self, callback: impl Fn(&E) + 'static) -> Self {
        self.set_visible_callback(Some(Rc::new(callback)));
        self
    }

    /// Attaches the exit-visible callback, replacing any previous one.
    pub fn on_no_longer_visible(self, callback: impl Fn(&E) + 'static) -> Self {
        self.set_no_longer_visible_callback(Some(Rc::new(callback)));
        self
    }

    /// Replaces the enter-visible callback. `None` removes it.
    pub fn set_visible_callback(&self, callback: Option<Callback<E>>) {
        *self.record.visible.borrow_mut() = callback;
    }

    /// Replaces the exit-visible callback. `None` removes it.
    pub fn set_no_longer_visible_callback(&self, callback: Option<Callback<E>>) {
        *self.record.no_longer_visible.borrow_mut() = callback;
    }

    /// Returns the current enter-visible callback.
    #[must_use]
    pub fn visible_callback(&self) -> Option<Callback<E>> {
        self.record.visible.borrow().clone()
    }

    /// Returns the current exit-visible callback.
    #[must_use]
    pub fn no_longer_visible_callback(&self) -> Option<Callback<E>> {
        self.record.no_longer_visible.borrow().clone()
    }

    /// Returns `true` if an enter-visible callback is attached.
    #[must_use]
    pub fn has_visible_callback(&self) -> bool {
        self.record.visible.borrow().is_some()
    }

    /// Returns `true` if an exit-visible callback is attached.
    #[must_use]
    pub fn has_no_longer_visible_callback(&self) -> bool {
        self.record.no_longer_visible.borrow().is_some()
    }

    /// Returns `true` once the waypoint has been discarded by a reset.
    ///
    /// Retired waypoints are never evaluated again.
    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.record.retired.get()
    }

    /// Returns `true` if both handles refer to the same waypoint.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.record, &other.record)
    }

    fn retire(&self) {
        self.record.retired.set(true);
    }
}

/// Ordered collection of waypoints.
///
/// Supports appending and wholesale clearing only.
pub struct Registry<E> {
    waypoints: Vec<WaypointHandle<E>>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for Registry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.waypoints.iter()).finish()
    }
}

impl<E> Registry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
        }
    }

    /// Appends a waypoint for `target` and returns its handle.
    pub fn push(&mut self, target: Target<E>) -> WaypointHandle<E> {
        let handle = WaypointHandle::new(target);
        self.waypoints.push(handle.clone());
        handle
    }

    /// Discards all waypoints and retires them.
    ///
    /// Clearing an empty registry does nothing.
    pub fn clear(&mut self) {
        for waypoint in self.waypoints.drain(..) {
            waypoint.retire();
        }
    }

    /// Returns the number of registered waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Iterates waypoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &WaypointHandle<E>> {
        self.waypoints.iter()
    }

    /// Copies the current waypoint list.
    ///
    /// A pass iterates the snapshot, so registrations made while it runs are
    /// picked up by the next pass.
    #[must_use]
    pub fn snapshot(&self) -> Vec<WaypointHandle<E>> {
        self.waypoints.clone()
    }
}
