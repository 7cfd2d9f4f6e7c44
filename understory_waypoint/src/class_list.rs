// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whitespace-separated token lists, as used by a `class` attribute.
//!
//! Hosts that store markers in a single class string (rather than a native
//! token list API) can implement [`ElementSurface`](crate::ElementSurface)'s
//! marker methods with these helpers. Edits are idempotent and preserve the
//! order of unrelated tokens.
//!
//! ```rust
//! use understory_waypoint::class_list;
//!
//! let class = class_list::with_token("intro  lead", "waypoint-visible");
//! assert_eq!(class.as_deref(), Some("intro  lead waypoint-visible"));
//! assert_eq!(class_list::with_token("a waypoint-visible", "waypoint-visible"), None);
//!
//! let class = class_list::without_token("intro waypoint-visible lead", "waypoint-visible");
//! assert_eq!(class.as_deref(), Some("intro lead"));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

/// Returns `true` if `list` contains `token` as a whole token.
#[must_use]
pub fn contains(list: &str, token: &str) -> bool {
    list.split_ascii_whitespace().any(|t| t == token)
}

/// Returns `list` with `token` appended, or `None` if it is already present.
#[must_use]
pub fn with_token(list: &str, token: &str) -> Option<String> {
    if contains(list, token) {
        return None;
    }
    let trimmed = list.trim_end();
    let mut out = String::with_capacity(trimmed.len() + token.len() + 1);
    out.push_str(trimmed);
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(token);
    Some(out)
}

/// Returns `list` with every occurrence of `token` removed, or `None` if it
/// was absent.
///
/// The remaining tokens are re-joined with single spaces.
#[must_use]
pub fn without_token(list: &str, token: &str) -> Option<String> {
    if !contains(list, token) {
        return None;
    }
    let kept: Vec<&str> = list
        .split_ascii_whitespace()
        .filter(|t| *t != token)
        .collect();
    Some(kept.join(" "))
}

/// Returns `true` if `token` is usable as a single class token.
#[must_use]
pub fn is_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}
