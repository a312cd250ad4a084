// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing periodic sampling of the latest value.
//!
//! - [`periodic`](PeriodicExt::periodic) re-emits the most recent value on every tick, also
//!   when it did not change since the previous tick. Nothing is emitted until a value is known.
//! - [`state_periodic`](PeriodicExt::state_periodic) folds every arrival into a state and lets
//!   each tick turn `(state, latest value)` into an output and the next state.
//!
//! Ticking starts when the operator is created; the first tick comes one `period` later. It
//! stops when the source completes, fails or the output is disposed.
//!
//! # Example
//!
//! ```rust
//! use junction_runtime::TokioScheduler;
//! use junction_stream_time::PeriodicExt;
//! use junction_test_utils::{test_channel, unwrap_stream};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (tx, source) = test_channel::<&str>();
//! let mut sampled = source.periodic(Duration::from_millis(10), TokioScheduler::default());
//!
//! tx.send("idle").unwrap();
//! assert_eq!(unwrap_stream(&mut sampled, 100).await.unwrap(), "idle");
//! assert_eq!(unwrap_stream(&mut sampled, 100).await.unwrap(), "idle");
//! # }
//! ```

use futures::Stream;
use junction_core::{Accumulator, Emitter, Ending, Joined, OperatorCore, Slot, StreamItem, Teardown};
use junction_runtime::{Scheduler, TimerHandle};
use std::time::Duration;

struct Sampler<T, S, A, H> {
    latest: Slot<T>,
    state: Accumulator<S>,
    ticker: Option<TimerHandle>,
    addition_handler: A,
    schedule_handler: H,
}

impl<T, S, A, H> Sampler<T, S, A, H> {
    fn add(&mut self, value: T)
    where
        A: FnMut(S, &T) -> S,
    {
        self.latest.set(value);
        if let Some(value) = self.latest.get() {
            let addition_handler = &mut self.addition_handler;
            self.state.step(|state| addition_handler(state, value));
        }
    }

    fn tick<R>(&mut self, emitter: &Emitter<R>)
    where
        H: FnMut(S, &T) -> (S, R),
    {
        if let Some(value) = self.latest.get() {
            let schedule_handler = &mut self.schedule_handler;
            if let Some(output) = self.state.step_with(|state| schedule_handler(state, value)) {
                emitter.next(output);
            }
        }
    }
}

impl<T, S, A, H> Teardown for Sampler<T, S, A, H> {
    fn teardown(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_periodically<Src, T, S, R, A, Sch, H>(
    name: &'static str,
    source: Src,
    initial: S,
    default: Option<T>,
    addition_handler: A,
    period: Duration,
    scheduler: Sch,
    schedule_handler: H,
) -> Joined<R>
where
    Src: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
    S: Send + 'static,
    R: Send + 'static,
    A: FnMut(S, &T) -> S + Send + 'static,
    Sch: Scheduler,
    H: FnMut(S, &T) -> (S, R) + Send + 'static,
{
    let sampler = Sampler {
        latest: Slot::new(default),
        state: Accumulator::new(initial),
        ticker: None,
        addition_handler,
        schedule_handler,
    };
    let (core, receiver) = OperatorCore::<_, R>::new(name, sampler);

    let ticker = {
        let core = core.clone();
        scheduler.schedule_periodically(period, period, move || {
            core.update(|sampler, emitter| sampler.tick(emitter));
        })
    };
    core.update(move |sampler, _| sampler.ticker = Some(ticker));

    let input = core.input(
        source,
        |sampler, _, value| sampler.add(value),
        |_| Ending::Complete,
    );

    core.into_joined(receiver, vec![input])
}

/// Extension trait providing `periodic` and `state_periodic`.
///
/// Must be called from within a Tokio runtime.
pub trait PeriodicExt<T>: Stream<Item = StreamItem<T>> + Sized + Send + 'static
where
    T: Send + 'static,
{
    /// Re-emit the latest value every `period`.
    fn periodic<Sch>(self, period: Duration, scheduler: Sch) -> Joined<T>
    where
        T: Clone,
        Sch: Scheduler,
    {
        sample_periodically(
            "periodic",
            self,
            (),
            None,
            |(), _| (),
            period,
            scheduler,
            |(), value: &T| ((), value.clone()),
        )
    }

    /// [`periodic`](Self::periodic), ticking with `default` until the source produces a value.
    fn periodic_with_default<Sch>(self, default: T, period: Duration, scheduler: Sch) -> Joined<T>
    where
        T: Clone,
        Sch: Scheduler,
    {
        sample_periodically(
            "periodic",
            self,
            (),
            Some(default),
            |(), _| (),
            period,
            scheduler,
            |(), value: &T| ((), value.clone()),
        )
    }

    /// Fold arrivals into a state and derive an output from it on every tick.
    ///
    /// Each arrival replaces the latest value and the state becomes
    /// `addition_handler(state, &value)`. Each tick, once a value is known, computes
    /// `(state, output) = schedule_handler(state, &latest)` and publishes `output`. Arrivals and
    /// ticks never interleave.
    ///
    /// ```rust
    /// use junction_runtime::TokioScheduler;
    /// use junction_stream_time::PeriodicExt;
    /// use junction_test_utils::{test_channel, unwrap_stream};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread", start_paused = true)]
    /// # async fn main() {
    /// let (tx, requests) = test_channel::<u32>();
    ///
    /// // requests per tick
    /// let mut rate = requests.state_periodic(
    ///     0u32,
    ///     None,
    ///     |count, _| count + 1,
    ///     Duration::from_secs(1),
    ///     TokioScheduler::default(),
    ///     |count, _| (0, count),
    /// );
    ///
    /// tx.send(7).unwrap();
    /// tx.send(8).unwrap();
    /// assert_eq!(unwrap_stream(&mut rate, 5_000).await.unwrap(), 2);
    /// assert_eq!(unwrap_stream(&mut rate, 5_000).await.unwrap(), 0);
    /// # }
    /// ```
    fn state_periodic<S, R, A, Sch, H>(
        self,
        initial: S,
        default: Option<T>,
        addition_handler: A,
        period: Duration,
        scheduler: Sch,
        schedule_handler: H,
    ) -> Joined<R>
    where
        S: Send + 'static,
        R: Send + 'static,
        A: FnMut(S, &T) -> S + Send + 'static,
        Sch: Scheduler,
        H: FnMut(S, &T) -> (S, R) + Send + 'static,
    {
        sample_periodically(
            "state_periodic",
            self,
            initial,
            default,
            addition_handler,
            period,
            scheduler,
            schedule_handler,
        )
    }
}

impl<St, T> PeriodicExt<T> for St
where
    St: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
}
