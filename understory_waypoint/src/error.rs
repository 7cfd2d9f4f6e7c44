// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::fmt;

/// Why an argument was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidArgument {
    /// A selector registration was given a value that is not a string.
    SelectorNotString,
    /// An element registration was given a value that is not an element.
    NotAnElement,
    /// A marker name was empty.
    BlankMarker,
    /// A marker name contained whitespace, so it is not a single class token.
    MarkerWhitespace,
    /// The ever-visible and currently-visible markers used the same name.
    DuplicateMarker,
}

impl InvalidArgument {
    fn describe(self) -> &'static str {
        match self {
            Self::SelectorNotString => "selector must be a string",
            Self::NotAnElement => "target is not an element",
            Self::BlankMarker => "marker name must not be empty",
            Self::MarkerWhitespace => "marker name must not contain whitespace",
            Self::DuplicateMarker => "ever-visible and currently-visible markers must differ",
        }
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl core::error::Error for InvalidArgument {}

/// Errors reported synchronously by registration and configuration.
///
/// Evaluation never produces errors: unmatched selectors and off-screen
/// elements are ordinary outcomes of a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum WaypointError {
    /// The caller passed an argument that fails validation.
    InvalidArgument(InvalidArgument),
}

impl WaypointError {
    /// Returns the rejected-argument reason, if this is an `InvalidArgument`.
    #[must_use]
    pub fn invalid_argument(&self) -> Option<InvalidArgument> {
        match self {
            Self::InvalidArgument(reason) => Some(*reason),
        }
    }
}

impl From<InvalidArgument> for WaypointError {
    fn from(reason: InvalidArgument) -> Self {
        Self::InvalidArgument(reason)
    }
}

impl fmt::Display for WaypointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
        }
    }
}

impl core::error::Error for WaypointError {}

/// A frame scheduler could not accept a callback.
///
/// The coordinator treats this as "no pass is pending" so that the next
/// scroll event can try again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScheduleError;

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("frame scheduler rejected the callback")
    }
}

impl core::error::Error for ScheduleError {}
