// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `with_latest_from` with a staleness timer on the driving stream.
//!
//! # Behavior
//!
//! Each driving arrival, in one critical section:
//!
//! 1. stores the value in the driving slot
//! 2. cancels the armed timer, if any
//! 3. arms a new timer for `duration`
//! 4. publishes `combinator(&driving, &latest)` if both slots are defined
//!
//! If the timer fires before the next driving arrival, `timeout_handler` runs on the values
//! stored at that moment (if both are defined) and its result is published. A timer that was
//! re-armed, cancelled or disposed never publishes. Latest-from arrivals only update their slot.
//!
//! Completion follows `with_latest_from`: the driving stream completing, or the latest-from
//! stream completing without a value, ends the output and cancels the timer.
//!
//! # Example
//!
//! ```rust
//! use junction_runtime::TokioScheduler;
//! use junction_stream_time::WithLatestFromTimeoutExt;
//! use junction_test_utils::{test_channel, unwrap_stream};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (readings_tx, readings) = test_channel::<u32>();
//! let (unit_tx, unit) = test_channel::<&str>();
//!
//! let mut labelled = readings.with_latest_from_timeout(
//!     unit,
//!     |value, unit| format!("{value}{unit}"),
//!     Duration::from_millis(100),
//!     TokioScheduler::default(),
//!     |value, unit| format!("{value}{unit} (stale)"),
//! );
//!
//! unit_tx.send("C").unwrap();
//! tokio::task::yield_now().await;
//! readings_tx.send(21).unwrap();
//! assert_eq!(unwrap_stream(&mut labelled, 500).await.unwrap(), "21C");
//! assert_eq!(unwrap_stream(&mut labelled, 500).await.unwrap(), "21C (stale)");
//! # }
//! ```

use crate::timed::{rearm, Timed};
use futures::Stream;
use junction_core::{Emitter, Ending, Joined, OperatorCore, Slot, SlotSet, StreamItem, Teardown};
use junction_runtime::{Deadline, Scheduler};
use std::time::Duration;

struct TimeoutJoin<T, T1, F, H> {
    slots: (Slot<T>, Slot<T1>),
    deadline: Deadline,
    combinator: F,
    timeout_handler: H,
}

impl<T, T1, F, H> TimeoutJoin<T, T1, F, H> {
    fn publish<R>(&mut self, emitter: &Emitter<R>)
    where
        F: FnMut(&T, &T1) -> R,
    {
        if let Some((value, latest)) = self.slots.latest() {
            emitter.next((self.combinator)(value, latest));
        }
    }

    fn publish_timeout<R>(&mut self, emitter: &Emitter<R>)
    where
        H: FnMut(&T, &T1) -> R,
    {
        if let Some((value, latest)) = self.slots.latest() {
            emitter.next((self.timeout_handler)(value, latest));
        }
    }
}

impl<T, T1, F, H> Teardown for TimeoutJoin<T, T1, F, H> {
    fn teardown(&mut self) {
        self.deadline.cancel();
    }
}

impl<T, T1, F, H> Timed for TimeoutJoin<T, T1, F, H>
where
    T: Send + 'static,
    T1: Send + 'static,
    F: Send + 'static,
    H: Send + 'static,
{
    fn deadline(&mut self) -> &mut Deadline {
        &mut self.deadline
    }
}

/// Extension trait providing `with_latest_from_timeout`.
///
/// Must be called from within a Tokio runtime.
pub trait WithLatestFromTimeoutExt<T>: Stream<Item = StreamItem<T>> + Sized + Send + 'static
where
    T: Send + 'static,
{
    /// See the [module documentation](self).
    fn with_latest_from_timeout<S1, T1, R, F, Sch, H>(
        self,
        other: S1,
        combinator: F,
        duration: Duration,
        scheduler: Sch,
        timeout_handler: H,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1) -> R + Send + 'static,
        Sch: Scheduler,
        H: FnMut(&T, &T1) -> R + Send + 'static,
    {
        self.with_latest_from_timeout_with_defaults(
            other,
            (None, None),
            combinator,
            duration,
            scheduler,
            timeout_handler,
        )
    }

    /// [`with_latest_from_timeout`](Self::with_latest_from_timeout) with optional initial
    /// values for the driving and the latest-from slot.
    fn with_latest_from_timeout_with_defaults<S1, T1, R, F, Sch, H>(
        self,
        other: S1,
        defaults: (Option<T>, Option<T1>),
        combinator: F,
        duration: Duration,
        scheduler: Sch,
        timeout_handler: H,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1) -> R + Send + 'static,
        Sch: Scheduler,
        H: FnMut(&T, &T1) -> R + Send + 'static,
    {
        let state = TimeoutJoin {
            slots: <(Slot<T>, Slot<T1>)>::from_defaults(defaults),
            deadline: Deadline::new(),
            combinator,
            timeout_handler,
        };
        let (core, receiver) = OperatorCore::<_, R>::new("with_latest_from_timeout", state);

        let driving = core.input(
            self,
            {
                let core = core.clone();
                move |state: &mut TimeoutJoin<T, T1, F, H>, emitter: &Emitter<R>, value: T| {
                    state.slots.0.set(value);
                    rearm(&core, state, &scheduler, duration, |state, emitter| {
                        state.publish_timeout(emitter)
                    });
                    state.publish(emitter);
                }
            },
            |_| Ending::Complete,
        );
        let latest = core.input(
            other,
            |state, _, value| state.slots.1.set(value),
            |state| {
                if state.slots.1.is_defined() {
                    Ending::Continue
                } else {
                    Ending::Complete
                }
            },
        );

        core.into_joined(receiver, vec![latest, driving])
    }
}

impl<S, T> WithLatestFromTimeoutExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
}
