// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Accumulating `with_latest_from` that also folds on timeouts of the driving stream.
//!
//! Both operators keep an accumulator of type `R`, a driving slot, a latest-from slot and a
//! `timeout_expired` flag that starts out `true`.
//!
//! - A driving arrival stores its value, re-arms the timer for `duration` and, if both slots
//!   are defined, publishes `accumulator(&value, &latest, previous, expired)`. `expired` tells
//!   whether the timer had run out since the previous driving arrival (always `true` for the
//!   first one). The flag is cleared. It deliberately reports the state seen before the
//!   arrival rather than being cleared first and always passing `false`.
//! - When the timer fires, `timeout_expired` becomes `true` and, if both slots are defined,
//!   `timeout_handler(&value, &latest, previous)` is published.
//!
//! The two variants differ in how they treat latest-from arrivals:
//!
//! - [`scan_with_latest_from_timeout`](ScanWithLatestFromTimeoutExt::scan_with_latest_from_timeout)
//!   only stores them.
//! - [`scan_with_latest_from_timeout_accumulator`](ScanWithLatestFromTimeoutExt::scan_with_latest_from_timeout_accumulator)
//!   additionally re-runs `timeout_handler` with the new value while the timeout is expired,
//!   so context that shows up late is folded in without waiting for the driving stream. The
//!   timer is not re-armed by this.
//!
//! Completion follows `with_latest_from`.
//!
//! ```rust
//! use junction_runtime::TokioScheduler;
//! use junction_stream_time::ScanWithLatestFromTimeoutExt;
//! use junction_test_utils::{test_channel, unwrap_stream};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (beats_tx, beats) = test_channel::<u32>();
//! let (_weight_tx, weight) = test_channel::<u32>();
//!
//! // count consecutive timely beats, reset on timeouts
//! let mut streak = beats.scan_with_latest_from_timeout_with_defaults(
//!     0u32,
//!     weight,
//!     (None, Some(1)),
//!     |_, weight, streak, expired| if expired { *weight } else { streak + weight },
//!     Duration::from_millis(100),
//!     TokioScheduler::default(),
//!     |_, _, _| 0,
//! );
//!
//! beats_tx.send(1).unwrap();
//! assert_eq!(unwrap_stream(&mut streak, 500).await.unwrap(), 1);
//! beats_tx.send(2).unwrap();
//! assert_eq!(unwrap_stream(&mut streak, 500).await.unwrap(), 2);
//! assert_eq!(unwrap_stream(&mut streak, 500).await.unwrap(), 0);
//! # }
//! ```

use crate::timed::{rearm, Timed};
use futures::Stream;
use junction_core::{
    Accumulator, Emitter, Ending, Joined, OperatorCore, Slot, SlotSet, StreamItem, Teardown,
};
use junction_runtime::{Deadline, Scheduler};
use std::mem;
use std::time::Duration;

/// What a latest-from arrival does besides updating its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LateContext {
    Store,
    Refold,
}

struct ScanTimeout<T, T1, R, F, H> {
    slots: (Slot<T>, Slot<T1>),
    state: Accumulator<R>,
    deadline: Deadline,
    timeout_expired: bool,
    late_context: LateContext,
    accumulator: F,
    timeout_handler: H,
}

impl<T, T1, R, F, H> ScanTimeout<T, T1, R, F, H>
where
    R: Clone,
    F: FnMut(&T, &T1, R, bool) -> R,
    H: FnMut(&T, &T1, R) -> R,
{
    fn on_driving(&mut self, emitter: &Emitter<R>) {
        let expired = mem::replace(&mut self.timeout_expired, false);
        if let Some((value, latest)) = self.slots.latest() {
            let accumulator = &mut self.accumulator;
            if let Some(next) = self
                .state
                .step(|previous| accumulator(value, latest, previous, expired))
            {
                emitter.next(next.clone());
            }
        }
    }

    fn on_context(&mut self, latest: T1, emitter: &Emitter<R>) {
        self.slots.1.set(latest);
        if self.late_context == LateContext::Refold && self.timeout_expired {
            self.fold_timeout(emitter);
        }
    }

    fn on_timeout(&mut self, emitter: &Emitter<R>) {
        self.timeout_expired = true;
        self.fold_timeout(emitter);
    }

    fn fold_timeout(&mut self, emitter: &Emitter<R>) {
        if let Some((value, latest)) = self.slots.latest() {
            let handler = &mut self.timeout_handler;
            if let Some(next) = self.state.step(|previous| handler(value, latest, previous)) {
                emitter.next(next.clone());
            }
        }
    }
}

impl<T, T1, R, F, H> Teardown for ScanTimeout<T, T1, R, F, H> {
    fn teardown(&mut self) {
        self.deadline.cancel();
    }
}

impl<T, T1, R, F, H> Timed for ScanTimeout<T, T1, R, F, H>
where
    T: Send + 'static,
    T1: Send + 'static,
    R: Send + 'static,
    F: Send + 'static,
    H: Send + 'static,
{
    fn deadline(&mut self) -> &mut Deadline {
        &mut self.deadline
    }
}

#[allow(clippy::too_many_arguments)]
fn scan_timeout<S, S1, T, T1, R, F, Sch, H>(
    name: &'static str,
    late_context: LateContext,
    driving: S,
    other: S1,
    initial: R,
    defaults: (Option<T>, Option<T1>),
    accumulator: F,
    duration: Duration,
    scheduler: Sch,
    timeout_handler: H,
) -> Joined<R>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    S1: Stream<Item = StreamItem<T1>> + Send + 'static,
    T: Send + 'static,
    T1: Send + 'static,
    R: Clone + Send + 'static,
    F: FnMut(&T, &T1, R, bool) -> R + Send + 'static,
    Sch: Scheduler,
    H: FnMut(&T, &T1, R) -> R + Send + 'static,
{
    let state = ScanTimeout {
        slots: <(Slot<T>, Slot<T1>)>::from_defaults(defaults),
        state: Accumulator::new(initial),
        deadline: Deadline::new(),
        timeout_expired: true,
        late_context,
        accumulator,
        timeout_handler,
    };
    let (core, receiver) = OperatorCore::<_, R>::new(name, state);

    let driving = core.input(
        driving,
        {
            let core = core.clone();
            move |state: &mut ScanTimeout<T, T1, R, F, H>, emitter: &Emitter<R>, value: T| {
                state.slots.0.set(value);
                rearm(&core, state, &scheduler, duration, |state, emitter| {
                    state.on_timeout(emitter)
                });
                state.on_driving(emitter);
            }
        },
        |_| Ending::Complete,
    );
    let latest = core.input(
        other,
        |state, emitter, value| state.on_context(value, emitter),
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

/// Extension trait providing the timeout-aware `scan_with_latest_from` variants.
///
/// Must be called from within a Tokio runtime.
pub trait ScanWithLatestFromTimeoutExt<T>:
    Stream<Item = StreamItem<T>> + Sized + Send + 'static
where
    T: Send + 'static,
{
    /// Fold driving arrivals and timeouts; latest-from arrivals are only stored.
    ///
    /// See the [module documentation](self).
    fn scan_with_latest_from_timeout<S1, T1, R, F, Sch, H>(
        self,
        initial: R,
        other: S1,
        accumulator: F,
        duration: Duration,
        scheduler: Sch,
        timeout_handler: H,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Clone + Send + 'static,
        F: FnMut(&T, &T1, R, bool) -> R + Send + 'static,
        Sch: Scheduler,
        H: FnMut(&T, &T1, R) -> R + Send + 'static,
    {
        self.scan_with_latest_from_timeout_with_defaults(
            initial,
            other,
            (None, None),
            accumulator,
            duration,
            scheduler,
            timeout_handler,
        )
    }

    /// [`scan_with_latest_from_timeout`](Self::scan_with_latest_from_timeout) with optional
    /// initial values for the driving and the latest-from slot.
    #[allow(clippy::too_many_arguments)]
    fn scan_with_latest_from_timeout_with_defaults<S1, T1, R, F, Sch, H>(
        self,
        initial: R,
        other: S1,
        defaults: (Option<T>, Option<T1>),
        accumulator: F,
        duration: Duration,
        scheduler: Sch,
        timeout_handler: H,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Clone + Send + 'static,
        F: FnMut(&T, &T1, R, bool) -> R + Send + 'static,
        Sch: Scheduler,
        H: FnMut(&T, &T1, R) -> R + Send + 'static,
    {
        scan_timeout(
            "scan_with_latest_from_timeout",
            LateContext::Store,
            self,
            other,
            initial,
            defaults,
            accumulator,
            duration,
            scheduler,
            timeout_handler,
        )
    }

    /// Like [`scan_with_latest_from_timeout`](Self::scan_with_latest_from_timeout), but a
    /// latest-from arrival while the timeout is expired re-runs `timeout_handler` at once.
    fn scan_with_latest_from_timeout_accumulator<S1, T1, R, F, Sch, H>(
        self,
        initial: R,
        other: S1,
        accumulator: F,
        duration: Duration,
        scheduler: Sch,
        timeout_handler: H,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Clone + Send + 'static,
        F: FnMut(&T, &T1, R, bool) -> R + Send + 'static,
        Sch: Scheduler,
        H: FnMut(&T, &T1, R) -> R + Send + 'static,
    {
        self.scan_with_latest_from_timeout_accumulator_with_defaults(
            initial,
            other,
            (None, None),
            accumulator,
            duration,
            scheduler,
            timeout_handler,
        )
    }

    /// [`scan_with_latest_from_timeout_accumulator`](Self::scan_with_latest_from_timeout_accumulator)
    /// with optional initial values for the driving and the latest-from slot.
    #[allow(clippy::too_many_arguments)]
    fn scan_with_latest_from_timeout_accumulator_with_defaults<S1, T1, R, F, Sch, H>(
        self,
        initial: R,
        other: S1,
        defaults: (Option<T>, Option<T1>),
        accumulator: F,
        duration: Duration,
        scheduler: Sch,
        timeout_handler: H,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Clone + Send + 'static,
        F: FnMut(&T, &T1, R, bool) -> R + Send + 'static,
        Sch: Scheduler,
        H: FnMut(&T, &T1, R) -> R + Send + 'static,
    {
        scan_timeout(
            "scan_with_latest_from_timeout_accumulator",
            LateContext::Refold,
            self,
            other,
            initial,
            defaults,
            accumulator,
            duration,
            scheduler,
            timeout_handler,
        )
    }
}

impl<S, T> ScanWithLatestFromTimeoutExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
}
