// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The waypoint engine.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::coordinator::{PassGuard, ScrollCoordinator, ScrollOutcome};
use crate::error::{InvalidArgument, WaypointError};
use crate::evaluator::{Evaluator, PassStats};
use crate::options::WaypointOptions;
use crate::platform::{Document, FrameScheduler, TargetValue};
use crate::registry::{Registry, Target, WaypointHandle};

struct Inner<D: Document, S> {
    document: D,
    scheduler: S,
    options: WaypointOptions,
    registry: RefCell<Registry<D::Element>>,
    coordinator: ScrollCoordinator,
    evaluating: Cell<bool>,
}

/// A waypoint engine bound to one document and one frame scheduler.
///
/// `Waypoints` is a cheap, reference-counted handle: clones share the same
/// registry and coordinator. Callbacks can capture a clone and register or
/// reset from inside a pass.
///
/// # Reentrancy
///
/// - Each pass iterates a snapshot of the registry taken when it starts.
///   Waypoints registered during a pass are first evaluated on the next pass.
/// - [`reset`](Self::reset) retires every registered waypoint at once. A pass
///   in progress skips retired waypoints, so a reset from a callback ends the
///   rest of that pass.
/// - Passes never nest. [`evaluate_now`](Self::evaluate_now) called from a
///   callback returns empty [`PassStats`] without evaluating anything.
/// - No internal borrow is held while a callback runs.
///
/// # Panics in callbacks
///
/// Callbacks are plain `Fn(&E)`. A panicking callback is not caught: it
/// unwinds out of the pass and skips whatever was left of it. The coordinator
/// still records the pass as finished, so later scroll events schedule new
/// passes as usual.
pub struct Waypoints<D: Document, S> {
    inner: Rc<Inner<D, S>>,
}

impl<D: Document, S> Clone for Waypoints<D, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: Document, S> fmt::Debug for Waypoints<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waypoints")
            .field("waypoints", &self.inner.registry.borrow().len())
            .field(
                "pass_scheduled",
                &self.inner.coordinator.is_pass_scheduled(),
            )
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

impl<D, S> Waypoints<D, S>
where
    D: Document + 'static,
    S: FrameScheduler + 'static,
{
    /// Creates an engine with default options.
    #[must_use]
    pub fn new(document: D, scheduler: S) -> Self {
        Self::with_options(document, scheduler, WaypointOptions::default())
    }

    /// Creates an engine with the given options.
    #[must_use]
    pub fn with_options(document: D, scheduler: S, options: WaypointOptions) -> Self {
        Self {
            inner: Rc::new(Inner {
                document,
                scheduler,
                options,
                registry: RefCell::new(Registry::new()),
                coordinator: ScrollCoordinator::new(),
                evaluating: Cell::new(false),
            }),
        }
    }

    /// Returns the document this engine evaluates against.
    #[must_use]
    pub fn document(&self) -> &D {
        &self.inner.document
    }

    /// Returns the frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.inner.scheduler
    }

    /// Returns the engine options.
    #[must_use]
    pub fn options(&self) -> &WaypointOptions {
        &self.inner.options
    }

    /// Returns the scroll coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &ScrollCoordinator {
        &self.inner.coordinator
    }

    /// Tracks every element matching `selector`.
    ///
    /// The selector is resolved again on every pass, so elements added to or
    /// removed from the document are picked up automatically.
    ///
    /// The selector is not checked here. One the document cannot parse, or
    /// an empty one, simply matches nothing.
    ///
    /// # Errors
    ///
    /// Infallible for string selectors; the `Result` mirrors
    /// [`try_register_selector`](Self::try_register_selector).
    pub fn register_selector(
        &self,
        selector: &str,
    ) -> Result<WaypointHandle<D::Element>, WaypointError> {
        Ok(self.push(Target::Selector(selector.into())))
    }

    /// Tracks a single element.
    ///
    /// # Errors
    ///
    /// Infallible for statically typed elements; the `Result` mirrors the
    /// other registration entry points.
    pub fn register_element(
        &self,
        element: D::Element,
    ) -> Result<WaypointHandle<D::Element>, WaypointError> {
        Ok(self.push(Target::Element(element)))
    }

    /// Registers a selector given as a dynamically typed value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::SelectorNotString`] if `value` is not a
    /// string.
    pub fn try_register_selector<V>(
        &self,
        value: &V,
    ) -> Result<WaypointHandle<D::Element>, WaypointError>
    where
        V: TargetValue<D::Element> + ?Sized,
    {
        let selector = value
            .as_selector()
            .ok_or(InvalidArgument::SelectorNotString)?;
        self.register_selector(&selector)
    }

    /// Registers an element given as a dynamically typed value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::NotAnElement`] if `value` fails the element
    /// capability check.
    pub fn try_register_element<V>(
        &self,
        value: &V,
    ) -> Result<WaypointHandle<D::Element>, WaypointError>
    where
        V: TargetValue<D::Element> + ?Sized,
    {
        let element = value.as_element().ok_or(InvalidArgument::NotAnElement)?;
        self.register_element(element)
    }

    /// Discards every waypoint.
    ///
    /// Markers already applied to elements are left in place. A pass that is
    /// already scheduled still runs, and finds nothing to do.
    pub fn reset(&self) {
        self.inner.registry.borrow_mut().clear();
        #[cfg(feature = "tracing")]
        tracing::debug!("waypoints reset");
    }

    /// Returns the number of registered waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Returns `true` if no waypoints are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.registry.borrow().is_empty()
    }

    /// Returns `true` while a pass is scheduled but has not run yet.
    #[must_use]
    pub fn is_pass_scheduled(&self) -> bool {
        self.inner.coordinator.is_pass_scheduled()
    }

    /// Feeds one scroll event into the coordinator.
    ///
    /// Schedules a pass on the next frame unless one is already pending.
    pub fn handle_scroll(&self) -> ScrollOutcome {
        let weak = Rc::downgrade(&self.inner);
        let outcome = self.inner.coordinator.on_scroll(|| {
            self.inner
                .scheduler
                .request_frame(Box::new(move || run_scheduled(&weak)))
        });
        #[cfg(feature = "tracing")]
        trace_scroll(outcome);
        outcome
    }

    /// Runs a pass immediately, outside the scroll schedule.
    ///
    /// Useful after layout changes that move elements without scrolling.
    /// Does not affect a pending scheduled pass. Called while a pass is
    /// already running (from one of its callbacks), it does nothing and
    /// returns empty stats.
    pub fn evaluate_now(&self) -> PassStats {
        let Some(_running) = Running::enter(&self.inner.evaluating) else {
            #[cfg(feature = "tracing")]
            tracing::debug!("nested waypoint pass ignored");
            return PassStats::default();
        };
        let snapshot = self.inner.registry.borrow().snapshot();
        let stats = Evaluator::new(&self.inner.document, &self.inner.options).run(&snapshot);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            waypoints = stats.waypoints,
            elements = stats.elements,
            entered = stats.entered,
            exited = stats.exited,
            detached = stats.detached,
            "waypoint pass finished"
        );
        stats
    }

    fn push(&self, target: Target<D::Element>) -> WaypointHandle<D::Element> {
        self.inner.registry.borrow_mut().push(target)
    }
}

/// Marks a pass as running until dropped.
struct Running<'a>(&'a Cell<bool>);

impl<'a> Running<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for Running<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(feature = "tracing")]
fn trace_scroll(outcome: ScrollOutcome) {
    match outcome {
        ScrollOutcome::Scheduled => tracing::trace!("waypoint pass scheduled"),
        ScrollOutcome::Coalesced => tracing::trace!("scroll coalesced into pending pass"),
        ScrollOutcome::Refused => tracing::warn!("frame scheduler refused waypoint pass"),
    }
}

fn run_scheduled<D, S>(inner: &Weak<Inner<D, S>>)
where
    D: Document + 'static,
    S: FrameScheduler + 'static,
{
    // The engine may have been dropped while the frame was pending.
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let engine = Waypoints { inner };
    let _guard = PassGuard::new(&engine.inner.coordinator);
    engine.evaluate_now();
}
