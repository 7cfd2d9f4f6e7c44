// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window scroll wiring.

use understory_waypoint::{Waypoints, WaypointOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, Window};

use crate::dom::WebDocument;
use crate::frame::AnimationFrameScheduler;

/// A waypoint engine over the browser DOM.
pub type WebWaypoints = Waypoints<WebDocument, AnimationFrameScheduler>;

/// A `scroll` listener feeding an engine. Removed from the window on drop.
pub struct ScrollListener {
    window: Window,
    closure: Closure<dyn FnMut(Event)>,
}

impl core::fmt::Debug for ScrollListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollListener").finish_non_exhaustive()
    }
}

impl ScrollListener {
    /// Listens for `scroll` on `window` and forwards each event to
    /// [`Waypoints::handle_scroll`].
    ///
    /// # Errors
    ///
    /// Propagates a failure to add the listener.
    pub fn listen(window: &Window, waypoints: &WebWaypoints) -> Result<Self, JsValue> {
        let waypoints = waypoints.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            waypoints.handle_scroll();
        });
        window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        Ok(Self {
            window: window.clone(),
            closure,
        })
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref());
    }
}

/// An engine together with its scroll listener.
#[derive(Debug)]
pub struct Attached {
    waypoints: WebWaypoints,
    _listener: ScrollListener,
}

impl Attached {
    /// Returns the engine.
    #[must_use]
    pub fn waypoints(&self) -> &WebWaypoints {
        &self.waypoints
    }
}

/// Builds an engine for `window` with default options and starts listening
/// for scroll events.
///
/// # Errors
///
/// Fails if the window has no document or the listener cannot be added.
pub fn attach(window: &Window) -> Result<Attached, JsValue> {
    attach_with_options(window, WaypointOptions::default())
}

/// Like [`attach`], with explicit options.
///
/// # Errors
///
/// Fails if the window has no document or the listener cannot be added.
pub fn attach_with_options(
    window: &Window,
    options: WaypointOptions,
) -> Result<Attached, JsValue> {
    let document = WebDocument::new(window.clone())?;
    let scheduler = AnimationFrameScheduler::new(window.clone());
    let waypoints = Waypoints::with_options(document, scheduler, options);
    let listener = ScrollListener::listen(window, &waypoints)?;
    Ok(Attached {
        waypoints,
        _listener: listener,
    })
}
