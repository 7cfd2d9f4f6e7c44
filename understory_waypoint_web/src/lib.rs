// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_waypoint_web --heading-base-level=0

//! Browser binding for [`understory_waypoint`].
//!
//! On `wasm32` this crate provides:
//!
//! - `WebElement` and `WebDocument`, which read `getBoundingClientRect`,
//!   `window.innerHeight` and `querySelectorAll`, and store markers as CSS
//!   classes on `classList`.
//! - `AnimationFrameScheduler`, which defers passes to
//!   `requestAnimationFrame`.
//! - `attach`, which builds an engine for a window and installs the `scroll`
//!   listener that drives it.
//! - A JavaScript-facing API (`register_selector`, `register_element`,
//!   `reset`, `evaluate` and the `Waypoint` class) backed by one engine per
//!   thread, bound to the global window on first use.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn track_footer() -> Result<(), wasm_bindgen::JsValue> {
//!     let window = web_sys::window().ok_or("no window")?;
//!     let attached = understory_waypoint_web::attach(&window)?;
//!     attached
//!         .waypoints()
//!         .register_selector("#footer")
//!         .map_err(|err| wasm_bindgen::JsValue::from_str(&err.to_string()))?
//!         .on_visible(|footer| web_sys::console::log_1(footer.as_ref()));
//!     // Keep `attached` alive for as long as the page should be tracked.
//!     core::mem::forget(attached);
//!     Ok(())
//! }
//! ```
//!
//! Exceptions thrown by JavaScript callbacks are reported with
//! `console.error` and do not stop the pass. Enable the `tracing` feature to
//! route diagnostics from both crates to a `tracing` subscriber.
//!
//! On other targets the crate is empty.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod global;
#[cfg(target_arch = "wasm32")]
mod scroll;
#[cfg(any(target_arch = "wasm32", test))]
mod viewport;

#[cfg(target_arch = "wasm32")]
pub use dom::{JsTarget, WebDocument, WebElement};
#[cfg(target_arch = "wasm32")]
pub use frame::AnimationFrameScheduler;
#[cfg(target_arch = "wasm32")]
pub use global::{JsWaypoint, evaluate, register_element, register_selector, reset};
#[cfg(target_arch = "wasm32")]
pub use scroll::{Attached, ScrollListener, WebWaypoints, attach, attach_with_options};
