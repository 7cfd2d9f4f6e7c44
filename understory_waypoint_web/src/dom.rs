// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-backed [`Document`] and [`ElementSurface`].

use kurbo::Rect;
use understory_waypoint::{Document, ElementSurface, TargetValue};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Window};

use crate::viewport;

/// A DOM element. Markers are CSS classes on its `classList`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebElement(Element);

impl WebElement {
    /// Wraps `element`.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self(element)
    }

    /// Returns the wrapped element.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl AsRef<JsValue> for WebElement {
    fn as_ref(&self) -> &JsValue {
        self.0.as_ref()
    }
}

impl From<Element> for WebElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl ElementSurface for WebElement {
    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.0.class_list().contains(marker)
    }

    fn add_marker(&self, marker: &str) {
        // `classList.add` only throws for empty or whitespace tokens, which
        // `Markers` rules out.
        let _ = self.0.class_list().add_1(marker);
    }

    fn remove_marker(&self, marker: &str) {
        let _ = self.0.class_list().remove_1(marker);
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

/// The window's document.
#[derive(Clone, Debug)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// Binds to `window`'s document.
    ///
    /// # Errors
    ///
    /// Fails if the window has no document (for example, inside a worker).
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self { window, document })
    }

    /// Returns the window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn query_selector_all(&self, selector: &str) -> Vec<WebElement> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(selector, error = ?_err, "selector query failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebElement)
            .collect()
    }

    fn viewport_height(&self) -> f64 {
        let inner = self.window.inner_height().ok().and_then(|h| h.as_f64());
        viewport::pick_height(inner, || {
            self.document
                .document_element()
                .map(|root| f64::from(root.client_height()))
        })
    }
}

/// A JavaScript value offered as a registration target.
#[derive(Clone, Copy, Debug)]
pub struct JsTarget<'a>(pub &'a JsValue);

impl TargetValue<WebElement> for JsTarget<'_> {
    fn as_selector(&self) -> Option<String> {
        self.0.as_string()
    }

    fn as_element(&self) -> Option<WebElement> {
        self.0.dyn_ref::<Element>().cloned().map(WebElement)
    }
}
