// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` scheduling.

use understory_waypoint::{FrameScheduler, ScheduleError};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// Runs callbacks through `window.requestAnimationFrame`.
///
/// Legacy fallbacks (vendor prefixes, timer emulation) are the page's
/// business; install a polyfill before attaching if you need one.
#[derive(Clone, Debug)]
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    /// Schedules against `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), ScheduleError> {
        let js = Closure::once_into_js(move |_timestamp: f64| callback());
        match self.window.request_animation_frame(js.unchecked_ref()) {
            Ok(_id) => Ok(()),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = ?_err, "requestAnimationFrame failed");
                Err(ScheduleError)
            }
        }
    }
}
