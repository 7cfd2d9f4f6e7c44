// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities consumed by the engine.
//!
//! The engine never touches a real document. Instead, a host (a browser
//! binding, a headless layout engine, or a test fake) implements:
//!
//! - [`ElementSurface`]: the per-element capability check. Anything that has a
//!   queryable bounding rectangle and a marker surface can be tracked.
//! - [`Document`]: resolves selectors to elements and reports the viewport
//!   height.
//! - [`FrameScheduler`]: runs a callback before the next repaint.
//! - [`TargetValue`]: classifies dynamically typed values at a scripting
//!   boundary, so that registration can reject non-strings and non-elements.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::error::ScheduleError;

/// An element the engine can observe and mark.
///
/// Markers are opaque class-like tokens. Implementations must make
/// [`add_marker`](Self::add_marker) and [`remove_marker`](Self::remove_marker)
/// idempotent and must leave unrelated markers alone.
pub trait ElementSurface {
    /// Returns the element's bounding rectangle in viewport coordinates.
    ///
    /// `y0` is the top edge and `y1` the bottom edge, as reported by
    /// `getBoundingClientRect` in a browser.
    fn bounding_rect(&self) -> Rect;

    /// Returns `true` if the element currently carries `marker`.
    fn has_marker(&self, marker: &str) -> bool;

    /// Adds `marker` to the element.
    fn add_marker(&self, marker: &str);

    /// Removes `marker` from the element.
    fn remove_marker(&self, marker: &str);

    /// Returns `false` once the element has been detached from its document.
    ///
    /// Hosts that cannot tell may keep the default.
    fn is_connected(&self) -> bool {
        true
    }
}

/// The document a set of waypoints is evaluated against.
pub trait Document {
    /// Element handle type. Cloning must be cheap and preserve identity.
    type Element: ElementSurface + Clone;

    /// Returns every element currently matching `selector`, in document order.
    ///
    /// Malformed selectors are the host's business; returning an empty list
    /// is the expected degradation.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Returns the current viewport height in the same units as
    /// [`ElementSurface::bounding_rect`].
    fn viewport_height(&self) -> f64;
}

/// Schedules work to run before the next repaint.
pub trait FrameScheduler {
    /// Arranges for `callback` to run once, asynchronously.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the callback will never run.
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), ScheduleError>;
}

/// A dynamically typed registration argument.
///
/// Statically typed callers use
/// [`Waypoints::register_selector`](crate::Waypoints::register_selector) and
/// [`Waypoints::register_element`](crate::Waypoints::register_element)
/// directly. Bindings for dynamic languages implement this for their value
/// type and go through the `try_register_*` entry points instead.
pub trait TargetValue<E> {
    /// Returns the value as a selector string, if it is a string.
    fn as_selector(&self) -> Option<String>;

    /// Returns the value as an element, if it passes the element capability
    /// check.
    fn as_element(&self) -> Option<E>;
}
