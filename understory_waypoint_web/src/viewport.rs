// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport height selection.

/// Picks the viewport height from `window.innerHeight`, falling back to
/// `documentElement.clientHeight` when the former is missing or zero.
pub(crate) fn pick_height(inner: Option<f64>, client: impl FnOnce() -> Option<f64>) -> f64 {
    inner
        .filter(|h| *h > 0.0)
        .or_else(client)
        .unwrap_or(0.0)
}
