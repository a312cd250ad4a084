// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing `with_latest_from` and `scan_with_latest_from`.
//!
//! The stream the methods are called on is the *driving* stream; the others only supply
//! context.
//!
//! # Behavior
//!
//! - Latest-from arrivals overwrite their slot and never publish
//! - A driving arrival stores its value and, if every slot (its own included) is defined,
//!   publishes the combinator over the latest values in positional order
//! - Driving arrivals that happen before every latest-from stream produced a value are
//!   remembered but publish nothing
//! - The output completes with the driving stream, or as soon as a latest-from stream completes
//!   without ever having produced a value
//! - An upstream error from any input is forwarded and ends the output
//!
//! # Ordering
//!
//! Values of each input are applied in order. Latest-from values already waiting when a driving
//! value is taken are applied first, so context pushed before a driving value is always seen by
//! it. Beyond that, arrivals on different inputs are not ordered by push time; await between
//! pushes on different inputs when a driving value must *not* see a later context value.
//!
//! # Example
//!
//! ```rust
//! use junction_stream::WithLatestFromExt;
//! use junction_test_utils::{test_channel, helpers::unwrap_stream};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (clicks_tx, clicks) = test_channel::<u32>();
//! let (user_tx, user) = test_channel::<&str>();
//!
//! let mut tagged = clicks.with_latest_from(user, |click, user| format!("{user}:{click}"));
//!
//! user_tx.send("ann").unwrap();
//! tokio::task::yield_now().await;
//! clicks_tx.send(1).unwrap();
//! assert_eq!(unwrap_stream(&mut tagged, 500).await.unwrap(), "ann:1");
//! # }
//! ```

#[macro_use]
mod implementation;

use crate::join::{Combine, JoinState, Reaction, Scan};
use futures::Stream;
use junction_core::{Ending, Joined, OperatorCore, Slot, SlotSet, StreamItem};

define_with_latest_from!(with_latest1, [s1: S1 => T1 . 1]);
define_with_latest_from!(with_latest2, [s1: S1 => T1 . 1, s2: S2 => T2 . 2]);
define_with_latest_from!(with_latest3, [s1: S1 => T1 . 1, s2: S2 => T2 . 2, s3: S3 => T3 . 3]);

/// withLatestFrom operators for streams of [`StreamItem`].
///
/// Must be called from within a Tokio runtime: the inputs are drained by one task per instance.
pub trait WithLatestFromExt<T>: Stream<Item = StreamItem<T>> + Sized + Send + 'static
where
    T: Send + 'static,
{
    /// Publish `combinator(&driving, &other)` on every driving arrival once `other` has a value.
    fn with_latest_from<S1, T1, R, F>(self, other: S1, combinator: F) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1) -> R + Send + 'static,
    {
        self.with_latest_from_with_defaults(other, (None, None), combinator)
    }

    /// [`with_latest_from`](Self::with_latest_from) with optional initial values for the
    /// driving and the latest-from slot.
    fn with_latest_from_with_defaults<S1, T1, R, F>(
        self,
        other: S1,
        defaults: (Option<T>, Option<T1>),
        combinator: F,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1) -> R + Send + 'static,
    {
        with_latest1("with_latest_from", self, other, defaults, Combine(combinator))
    }

    fn with_latest_from2<S1, T1, S2, T2, R, F>(self, s1: S1, s2: S2, combinator: F) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        S2: Stream<Item = StreamItem<T2>> + Send + 'static,
        T2: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1, &T2) -> R + Send + 'static,
    {
        self.with_latest_from2_with_defaults(s1, s2, Default::default(), combinator)
    }

    fn with_latest_from2_with_defaults<S1, T1, S2, T2, R, F>(
        self,
        s1: S1,
        s2: S2,
        defaults: (Option<T>, Option<T1>, Option<T2>),
        combinator: F,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        S2: Stream<Item = StreamItem<T2>> + Send + 'static,
        T2: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1, &T2) -> R + Send + 'static,
    {
        with_latest2("with_latest_from", self, s1, s2, defaults, Combine(combinator))
    }

    fn with_latest_from3<S1, T1, S2, T2, S3, T3, R, F>(
        self,
        s1: S1,
        s2: S2,
        s3: S3,
        combinator: F,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        S2: Stream<Item = StreamItem<T2>> + Send + 'static,
        T2: Send + 'static,
        S3: Stream<Item = StreamItem<T3>> + Send + 'static,
        T3: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1, &T2, &T3) -> R + Send + 'static,
    {
        self.with_latest_from3_with_defaults(s1, s2, s3, Default::default(), combinator)
    }

    #[allow(clippy::type_complexity)]
    fn with_latest_from3_with_defaults<S1, T1, S2, T2, S3, T3, R, F>(
        self,
        s1: S1,
        s2: S2,
        s3: S3,
        defaults: (Option<T>, Option<T1>, Option<T2>, Option<T3>),
        combinator: F,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        S2: Stream<Item = StreamItem<T2>> + Send + 'static,
        T2: Send + 'static,
        S3: Stream<Item = StreamItem<T3>> + Send + 'static,
        T3: Send + 'static,
        R: Send + 'static,
        F: FnMut(&T, &T1, &T2, &T3) -> R + Send + 'static,
    {
        with_latest3(
            "with_latest_from",
            self,
            s1,
            s2,
            s3,
            defaults,
            Combine(combinator),
        )
    }

    /// Fold every driving arrival, together with the latest value of `other`, into an
    /// accumulator starting at `initial`, publishing each new accumulated value.
    fn scan_with_latest_from<S1, T1, R, F>(self, initial: R, other: S1, accumulator: F) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Clone + Send + 'static,
        F: FnMut(&T, &T1, R) -> R + Send + 'static,
    {
        self.scan_with_latest_from_with_defaults(initial, other, (None, None), accumulator)
    }

    fn scan_with_latest_from_with_defaults<S1, T1, R, F>(
        self,
        initial: R,
        other: S1,
        defaults: (Option<T>, Option<T1>),
        accumulator: F,
    ) -> Joined<R>
    where
        S1: Stream<Item = StreamItem<T1>> + Send + 'static,
        T1: Send + 'static,
        R: Clone + Send + 'static,
        F: FnMut(&T, &T1, R) -> R + Send + 'static,
    {
        with_latest1(
            "scan_with_latest_from",
            self,
            other,
            defaults,
            Scan::new(initial, accumulator),
        )
    }
}

impl<S, T> WithLatestFromExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
}
