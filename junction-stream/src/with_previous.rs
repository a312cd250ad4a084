// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-stream stateful operators: pair each value with its predecessor, or fold the stream.
//!
//! These run through the same per-instance critical section as the joins, so a handler never
//! observes a half-updated "previous" value.
//!
//! # Example
//!
//! ```rust
//! use junction_stream::WithPreviousExt;
//! use junction_test_utils::{test_channel, helpers::unwrap_stream};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, readings) = test_channel::<i32>();
//! let mut deltas = readings.with_previous(0, |previous, current| current - previous);
//!
//! tx.send(5).unwrap();
//! tx.send(8).unwrap();
//! assert_eq!(unwrap_stream(&mut deltas, 500).await.unwrap(), 5);
//! assert_eq!(unwrap_stream(&mut deltas, 500).await.unwrap(), 3);
//! # }
//! ```

use futures::Stream;
use junction_core::{Accumulator, Emitter, Ending, Joined, OperatorCore, Slot, StreamItem, Teardown};

struct Previous<T, F> {
    previous: Slot<T>,
    handler: F,
}

impl<T, F> Teardown for Previous<T, F> {}

struct Fold<R, F> {
    state: Accumulator<R>,
    accumulator: F,
}

impl<R, F> Teardown for Fold<R, F> {}

/// Stateful single-stream operators for streams of [`StreamItem`].
///
/// Must be called from within a Tokio runtime. The output completes with the source.
pub trait WithPreviousExt<T>: Stream<Item = StreamItem<T>> + Sized + Send + 'static
where
    T: Send + 'static,
{
    /// Publish `handler(&previous, &current)` for every value, `initial` standing in as the
    /// predecessor of the first one. The current value then becomes the previous one.
    fn with_previous<R, F>(self, initial: T, mut handler: F) -> Joined<R>
    where
        R: Send + 'static,
        F: FnMut(&T, &T) -> R + Send + 'static,
    {
        attach_previous(
            "with_previous",
            self,
            Some(initial),
            move |previous: Option<&T>, current: &T, emitter: &Emitter<R>| {
                if let Some(previous) = previous {
                    emitter.next(handler(previous, current));
                }
            },
        )
    }

    /// Like [`with_previous`](Self::with_previous), but the predecessor is optional: the first
    /// value sees `initial`, which may be `None`.
    fn with_previous_opt<R, F>(self, initial: Option<T>, mut handler: F) -> Joined<R>
    where
        R: Send + 'static,
        F: FnMut(Option<&T>, &T) -> R + Send + 'static,
    {
        attach_previous(
            "with_previous_opt",
            self,
            initial,
            move |previous: Option<&T>, current: &T, emitter: &Emitter<R>| {
                emitter.next(handler(previous, current));
            },
        )
    }

    /// Fold every value into an accumulator starting at `initial`, publishing each new
    /// accumulated value.
    fn accumulate<R, F>(self, initial: R, accumulator: F) -> Joined<R>
    where
        R: Clone + Send + 'static,
        F: FnMut(R, &T) -> R + Send + 'static,
    {
        let state = Fold {
            state: Accumulator::new(initial),
            accumulator,
        };
        let (core, receiver) = OperatorCore::<_, R>::new("accumulate", state);
        let input = core.input(
            self,
            |fold: &mut Fold<R, F>, emitter, value: T| {
                let accumulator = &mut fold.accumulator;
                if let Some(next) = fold.state.step(|acc| accumulator(acc, &value)) {
                    emitter.next(next.clone());
                }
            },
            |_| Ending::Complete,
        );
        core.into_joined(receiver, vec![input])
    }
}

impl<S, T> WithPreviousExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
}

fn attach_previous<S, T, R, F>(name: &'static str, source: S, initial: Option<T>, handler: F) -> Joined<R>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(Option<&T>, &T, &Emitter<R>) + Send + 'static,
{
    let state = Previous {
        previous: Slot::new(initial),
        handler,
    };
    let (core, receiver) = OperatorCore::<_, R>::new(name, state);
    let input = core.input(
        source,
        |state: &mut Previous<T, F>, emitter, value: T| {
            (state.handler)(state.previous.get(), &value, emitter);
            state.previous.set(value);
        },
        |_| Ending::Complete,
    );
    core.into_joined(receiver, vec![input])
}
