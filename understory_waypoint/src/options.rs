// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use alloc::borrow::Cow;

use crate::class_list;
use crate::error::{InvalidArgument, WaypointError};

/// Default marker applied the first time an element is seen visible.
pub const DEFAULT_EVER_VISIBLE_MARKER: &str = "waypoint-once";

/// Default marker present while an element is visible.
pub const DEFAULT_CURRENTLY_VISIBLE_MARKER: &str = "waypoint-visible";

/// Marker names stamped onto elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    ever_visible: Cow<'static, str>,
    currently_visible: Cow<'static, str>,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            ever_visible: Cow::Borrowed(DEFAULT_EVER_VISIBLE_MARKER),
            currently_visible: Cow::Borrowed(DEFAULT_CURRENTLY_VISIBLE_MARKER),
        }
    }
}

impl Markers {
    /// Creates a marker pair.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidArgument`] if either name is not a
    /// single class token, or if both names are equal.
    pub fn new(
        ever_visible: impl Into<Cow<'static, str>>,
        currently_visible: impl Into<Cow<'static, str>>,
    ) -> Result<Self, WaypointError> {
        let markers = Self {
            ever_visible: ever_visible.into(),
            currently_visible: currently_visible.into(),
        };
        markers.validate()?;
        Ok(markers)
    }

    /// Marker that is set once and never cleared.
    #[must_use]
    pub fn ever_visible(&self) -> &str {
        &self.ever_visible
    }

    /// Marker that tracks current visibility.
    #[must_use]
    pub fn currently_visible(&self) -> &str {
        &self.currently_visible
    }

    fn validate(&self) -> Result<(), InvalidArgument> {
        for name in [self.ever_visible(), self.currently_visible()] {
            if name.is_empty() {
                return Err(InvalidArgument::BlankMarker);
            }
            if !class_list::is_token(name) {
                return Err(InvalidArgument::MarkerWhitespace);
            }
        }
        if self.ever_visible == self.currently_visible {
            return Err(InvalidArgument::DuplicateMarker);
        }
        Ok(())
    }
}

/// What to do with an element target that has been detached from its
/// document.
///
/// Browsers report an all-zero rectangle for detached elements, which says
/// nothing about where the element would be if it came back.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetachedElementPolicy {
    /// Leave the element's markers alone and fire nothing while it is
    /// detached. Evaluation resumes if it is reattached.
    #[default]
    Skip,
    /// Evaluate the element's reported rectangle like any other.
    Evaluate,
}

/// Options for a [`Waypoints`](crate::Waypoints) engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaypointOptions {
    /// Marker names.
    pub markers: Markers,
    /// Handling of detached element targets.
    pub detached: DetachedElementPolicy,
}

impl WaypointOptions {
    /// Returns the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the marker names.
    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Sets the detached element policy.
    #[must_use]
    pub fn with_detached(mut self, policy: DetachedElementPolicy) -> Self {
        self.detached = policy;
        self
    }
}
