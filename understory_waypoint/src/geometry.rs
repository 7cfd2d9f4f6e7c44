// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry probe: vertical viewport intersection.

use kurbo::Rect;

use crate::platform::ElementSurface;

/// A single geometry reading for one element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Probe {
    /// Bounding rectangle in viewport coordinates.
    pub rect: Rect,
    /// Viewport height at the time of the reading.
    pub viewport_height: f64,
}

impl Probe {
    /// Reads `element`'s rectangle against a viewport of `viewport_height`.
    #[must_use]
    pub fn read<E: ElementSurface + ?Sized>(element: &E, viewport_height: f64) -> Self {
        Self {
            rect: element.bounding_rect(),
            viewport_height,
        }
    }

    /// Returns `true` if the rectangle overlaps the viewport vertically.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        intersects_viewport(self.rect, self.viewport_height)
    }
}

/// Returns `true` unless `rect` lies entirely above or entirely below a
/// viewport spanning `0..=viewport_height`.
///
/// Only the vertical axis is considered. Touching an edge counts as visible.
#[must_use]
pub fn intersects_viewport(rect: Rect, viewport_height: f64) -> bool {
    !(rect.max_y() < 0.0 || rect.min_y() > viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_is_visible() {
        assert!(intersects_viewport(Rect::new(0.0, 100.0, 50.0, 200.0), 600.0));
    }

    #[test]
    fn above_and_below_are_hidden() {
        assert!(!intersects_viewport(Rect::new(0.0, -80.0, 50.0, -1.0), 600.0));
        assert!(!intersects_viewport(Rect::new(0.0, 601.0, 50.0, 700.0), 600.0));
    }

    #[test]
    fn edges_count_as_visible() {
        assert!(intersects_viewport(Rect::new(0.0, -50.0, 10.0, 0.0), 600.0));
        assert!(intersects_viewport(Rect::new(0.0, 600.0, 10.0, 650.0), 600.0));
    }

    #[test]
    fn partial_overlap_is_visible() {
        assert!(intersects_viewport(Rect::new(0.0, -50.0, 10.0, 20.0), 600.0));
        assert!(intersects_viewport(Rect::new(0.0, 590.0, 10.0, 900.0), 600.0));
    }

    #[test]
    fn horizontal_position_is_ignored() {
        assert!(intersects_viewport(
            Rect::new(-5000.0, 10.0, -4000.0, 20.0),
            600.0
        ));
    }

    #[test]
    fn zero_rect_is_visible_at_origin() {
        // A detached element in a browser reports an all-zero rectangle.
        assert!(intersects_viewport(Rect::ZERO, 600.0));
    }
}
