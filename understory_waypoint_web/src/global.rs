// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JavaScript-facing API over a per-thread engine.
//!
//! ```js
//! import { register_selector, reset } from "understory_waypoint_web";
//!
//! const footer = register_selector("#footer");
//! footer.visible_callback = (el) => console.log("arrived", el);
//! footer.no_longer_visible_callback = (el) => console.log("left", el);
//! ```
//!
//! The engine is created on first use and bound to the global `window`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use understory_waypoint::{Callback, WaypointError, WaypointHandle};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::dom::{JsTarget, WebElement};
use crate::scroll::{Attached, WebWaypoints, attach};

thread_local! {
    static GLOBAL: RefCell<Option<Attached>> = const { RefCell::new(None) };
}

fn global() -> Result<WebWaypoints, JsValue> {
    GLOBAL.with(|slot| {
        if let Some(attached) = slot.borrow().as_ref() {
            return Ok(attached.waypoints().clone());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let attached = attach(&window)?;
        let waypoints = attached.waypoints().clone();
        *slot.borrow_mut() = Some(attached);
        Ok(waypoints)
    })
}

fn to_js_error(err: WaypointError) -> JsValue {
    js_sys::TypeError::new(&err.to_string()).into()
}

/// Wraps a JavaScript function as a waypoint callback.
///
/// An exception thrown by the function is reported to the console and does
/// not interrupt the pass.
fn js_callback(function: Function) -> Callback<WebElement> {
    Rc::new(move |element: &WebElement| {
        if let Err(err) = function.call1(&JsValue::NULL, element.as_ref()) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = ?err, "waypoint callback threw");
            web_sys::console::error_2(&JsValue::from_str("waypoint callback threw"), &err);
        }
    })
}

/// A registered waypoint, as seen from JavaScript.
///
/// Both callback properties can be read and reassigned at any time; the
/// next visibility change uses whatever is assigned then.
#[wasm_bindgen(js_name = Waypoint)]
#[derive(Debug)]
pub struct JsWaypoint {
    handle: WaypointHandle<WebElement>,
    visible: RefCell<Option<Function>>,
    no_longer_visible: RefCell<Option<Function>>,
}

impl JsWaypoint {
    fn new(
        handle: WaypointHandle<WebElement>,
        visible: Option<Function>,
        no_longer_visible: Option<Function>,
    ) -> Self {
        let waypoint = Self {
            handle,
            visible: RefCell::new(None),
            no_longer_visible: RefCell::new(None),
        };
        waypoint.set_visible_callback(visible);
        waypoint.set_no_longer_visible_callback(no_longer_visible);
        waypoint
    }
}

#[wasm_bindgen(js_class = Waypoint)]
impl JsWaypoint {
    /// Function called with the element when it becomes visible.
    #[wasm_bindgen(getter)]
    pub fn visible_callback(&self) -> Option<Function> {
        self.visible.borrow().clone()
    }

    /// Replaces the enter-visible function; `undefined` removes it.
    #[wasm_bindgen(setter)]
    pub fn set_visible_callback(&self, function: Option<Function>) {
        self.handle
            .set_visible_callback(function.clone().map(js_callback));
        *self.visible.borrow_mut() = function;
    }

    /// Function called with the element when it stops being visible.
    #[wasm_bindgen(getter)]
    pub fn no_longer_visible_callback(&self) -> Option<Function> {
        self.no_longer_visible.borrow().clone()
    }

    /// Replaces the exit-visible function; `undefined` removes it.
    #[wasm_bindgen(setter)]
    pub fn set_no_longer_visible_callback(&self, function: Option<Function>) {
        self.handle
            .set_no_longer_visible_callback(function.clone().map(js_callback));
        *self.no_longer_visible.borrow_mut() = function;
    }

    /// The selector this waypoint tracks, or `undefined` for element targets.
    #[wasm_bindgen(getter)]
    pub fn selector(&self) -> Option<String> {
        self.handle.target().selector().map(str::to_owned)
    }
}

/// Tracks elements matching `selector`.
///
/// # Errors
///
/// Throws a `TypeError` if `selector` is not a non-blank string.
#[wasm_bindgen]
pub fn register_selector(
    selector: JsValue,
    visible_callback: Option<Function>,
    no_longer_visible_callback: Option<Function>,
) -> Result<JsWaypoint, JsValue> {
    let handle = global()?
        .try_register_selector(&JsTarget(&selector))
        .map_err(to_js_error)?;
    Ok(JsWaypoint::new(
        handle,
        visible_callback,
        no_longer_visible_callback,
    ))
}

/// Tracks one element.
///
/// # Errors
///
/// Throws a `TypeError` if `element` is not a DOM element.
#[wasm_bindgen]
pub fn register_element(
    element: JsValue,
    visible_callback: Option<Function>,
    no_longer_visible_callback: Option<Function>,
) -> Result<JsWaypoint, JsValue> {
    let handle = global()?
        .try_register_element(&JsTarget(&element))
        .map_err(to_js_error)?;
    Ok(JsWaypoint::new(
        handle,
        visible_callback,
        no_longer_visible_callback,
    ))
}

/// Discards every waypoint. Classes already applied stay in place.
#[wasm_bindgen]
pub fn reset() {
    GLOBAL.with(|slot| {
        if let Some(attached) = slot.borrow().as_ref() {
            attached.waypoints().reset();
        }
    });
}

/// Evaluates all waypoints now, without waiting for a scroll event.
///
/// Handy after the page lays out for the first time.
///
/// # Errors
///
/// Throws if no engine can be bound to the global window.
#[wasm_bindgen]
pub fn evaluate() -> Result<(), JsValue> {
    global()?.evaluate_now();
    Ok(())
}
