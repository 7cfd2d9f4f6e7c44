// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll coordinator: at most one pending pass per frame.
//!
//! Scroll events arrive in bursts, often several per frame. The coordinator
//! keeps one "pass scheduled" flag:
//!
//! - On a scroll event with no pass pending, it requests a frame and sets the
//!   flag.
//! - On a scroll event with a pass pending, it does nothing.
//! - The flag clears once the scheduled pass has finished, or immediately if
//!   the frame request was refused.
//!
//! The pass therefore sees the viewport as it is when the frame runs, not as
//! it was at the first scroll event of the burst.
//!
//! ```rust
//! use understory_waypoint::ScrollCoordinator;
//!
//! let coordinator = ScrollCoordinator::new();
//! let mut requested = 0;
//! for _ in 0..10 {
//!     coordinator.on_scroll(|| {
//!         requested += 1;
//!         Ok(())
//!     });
//! }
//! assert_eq!(requested, 1);
//! assert!(coordinator.is_pass_scheduled());
//!
//! // The frame runs; the pass finishes.
//! coordinator.pass_finished();
//! assert!(!coordinator.is_pass_scheduled());
//! ```

use core::cell::Cell;

use crate::error::ScheduleError;

/// What a scroll event did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollOutcome {
    /// A new pass was scheduled.
    Scheduled,
    /// A pass was already pending; the event was folded into it.
    Coalesced,
    /// The scheduler refused the request; nothing is pending.
    Refused,
}

/// Coalesces scroll events into scheduled passes.
#[derive(Debug, Default)]
pub struct ScrollCoordinator {
    scheduled: Cell<bool>,
    passes_requested: Cell<u64>,
    scrolls_coalesced: Cell<u64>,
}

impl ScrollCoordinator {
    /// Creates a coordinator with no pass pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one scroll event.
    ///
    /// `schedule` is called only when no pass is pending. It should hand the
    /// pass to the frame scheduler; the pass must call
    /// [`pass_finished`](Self::pass_finished) when it completes.
    pub fn on_scroll(
        &self,
        schedule: impl FnOnce() -> Result<(), ScheduleError>,
    ) -> ScrollOutcome {
        if self.scheduled.get() {
            self.scrolls_coalesced.set(self.scrolls_coalesced.get() + 1);
            return ScrollOutcome::Coalesced;
        }
        // Set before scheduling so that a scheduler which runs the callback
        // synchronously still sees a consistent flag.
        self.scheduled.set(true);
        match schedule() {
            Ok(()) => {
                self.passes_requested.set(self.passes_requested.get() + 1);
                ScrollOutcome::Scheduled
            }
            Err(ScheduleError) => {
                self.scheduled.set(false);
                ScrollOutcome::Refused
            }
        }
    }

    /// Marks the pending pass as complete.
    pub fn pass_finished(&self) {
        self.scheduled.set(false);
    }

    /// Returns `true` while a pass is scheduled but has not finished.
    #[must_use]
    pub fn is_pass_scheduled(&self) -> bool {
        self.scheduled.get()
    }

    /// Total passes successfully requested from the scheduler.
    #[must_use]
    pub fn passes_requested(&self) -> u64 {
        self.passes_requested.get()
    }

    /// Total scroll events folded into an already pending pass.
    #[must_use]
    pub fn scrolls_coalesced(&self) -> u64 {
        self.scrolls_coalesced.get()
    }
}

/// Clears the coordinator's flag when dropped, including during unwinding.
pub(crate) struct PassGuard<'a> {
    coordinator: &'a ScrollCoordinator,
}

impl<'a> PassGuard<'a> {
    pub(crate) fn new(coordinator: &'a ScrollCoordinator) -> Self {
        Self { coordinator }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.coordinator.pass_finished();
    }
}
