// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-instance timer state for timeout operators.
//!
//! A [`Deadline`] is either idle or armed with exactly one [`TimerHandle`]. Every arm gets a
//! fresh epoch and first cancels the previous handle. The callback receives its epoch and must
//! pass it to [`Deadline::fire`] under the operator's lock; a stale epoch is rejected, so a timer
//! that lost the race against a re-arm, a cancel or a disposal never takes effect.
//!
//! ```
//! use junction_runtime::{Deadline, TokioScheduler};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let scheduler = TokioScheduler::default();
//! let mut deadline = Deadline::new();
//!
//! let first = deadline.arm(&scheduler, Duration::from_secs(1), |_epoch| {});
//! let second = deadline.arm(&scheduler, Duration::from_secs(1), |_epoch| {});
//!
//! assert!(!deadline.fire(first)); // superseded by the second arm
//! assert!(deadline.fire(second));
//! assert!(!deadline.is_armed());
//! # }
//! ```

use crate::scheduler::{Scheduler, TimerHandle};
use std::time::Duration;

#[derive(Debug, Default)]
enum DeadlineState {
    #[default]
    Idle,
    Armed {
        epoch: u64,
        handle: TimerHandle,
    },
}

/// Idle/Armed timer state machine with epoch-checked firing.
#[derive(Debug, Default)]
pub struct Deadline {
    epoch: u64,
    state: DeadlineState,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is armed, then arm a new timer for `delay`.
    ///
    /// `on_fire` receives the epoch of this arm and is expected to call [`fire`](Self::fire)
    /// with it under the same lock that guards the deadline. Returns that epoch.
    pub fn arm<S, F>(&mut self, scheduler: &S, delay: Duration, on_fire: F) -> u64
    where
        S: Scheduler,
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();

        self.epoch = self.epoch.wrapping_add(1);
        let epoch = self.epoch;
        let handle = scheduler.schedule_once(delay, move || on_fire(epoch));
        trace!(epoch, "deadline armed");

        self.state = DeadlineState::Armed { epoch, handle };
        epoch
    }

    /// Cancel the armed timer, if any, and go idle.
    pub fn cancel(&mut self) {
        if let DeadlineState::Armed { handle, .. } = std::mem::take(&mut self.state) {
            handle.cancel();
            trace!("deadline cancelled");
        }
    }

    /// Accept a firing timer.
    ///
    /// Returns `true` and goes idle iff the deadline is still armed with `epoch`.
    pub fn fire(&mut self, epoch: u64) -> bool {
        match self.state {
            DeadlineState::Armed { epoch: armed, .. } if armed == epoch => {
                self.state = DeadlineState::Idle;
                trace!(epoch, "deadline fired");
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, DeadlineState::Armed { .. })
    }
}
