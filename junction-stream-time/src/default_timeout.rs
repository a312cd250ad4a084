// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `default_timeout` operator.
//!
//! Every value is passed through unchanged. When `duration` elapses without a new arrival, a
//! clone of `default` is emitted once. The timer restarts on every arrival, so only the most
//! recent arrival can lead to a default; after a default the operator waits for the next value
//! before arming again. Nothing is emitted before the first arrival.
//!
//! # Example
//!
//! ```rust
//! use junction_runtime::TokioScheduler;
//! use junction_stream_time::DefaultTimeoutExt;
//! use junction_test_utils::{test_channel, unwrap_stream};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let (tx, speed) = test_channel::<u32>();
//! let mut speed = speed.default_timeout(Duration::from_secs(1), 0, TokioScheduler::default());
//!
//! tx.send(42).unwrap();
//! assert_eq!(unwrap_stream(&mut speed, 5_000).await.unwrap(), 42);
//! assert_eq!(unwrap_stream(&mut speed, 5_000).await.unwrap(), 0);
//! # }
//! ```

use crate::timed::{rearm, Timed};
use futures::Stream;
use junction_core::{Emitter, Ending, Joined, OperatorCore, StreamItem, Teardown};
use junction_runtime::{Deadline, Scheduler};
use std::time::Duration;

struct Fallback<T> {
    default: T,
    deadline: Deadline,
}

impl<T> Teardown for Fallback<T> {
    fn teardown(&mut self) {
        self.deadline.cancel();
    }
}

impl<T: Send + 'static> Timed for Fallback<T> {
    fn deadline(&mut self) -> &mut Deadline {
        &mut self.deadline
    }
}

/// Extension trait providing `default_timeout`.
///
/// Must be called from within a Tokio runtime.
pub trait DefaultTimeoutExt<T>: Stream<Item = StreamItem<T>> + Sized + Send + 'static
where
    T: Clone + Send + 'static,
{
    /// See the [module documentation](self).
    fn default_timeout<Sch>(self, duration: Duration, default: T, scheduler: Sch) -> Joined<T>
    where
        Sch: Scheduler,
    {
        let state = Fallback {
            default,
            deadline: Deadline::new(),
        };
        let (core, receiver) = OperatorCore::<_, T>::new("default_timeout", state);

        let input = core.input(
            self,
            {
                let core = core.clone();
                move |state: &mut Fallback<T>, emitter: &Emitter<T>, value: T| {
                    rearm(&core, state, &scheduler, duration, |state, emitter| {
                        emitter.next(state.default.clone())
                    });
                    emitter.next(value);
                }
            },
            |_| Ending::Complete,
        );

        core.into_joined(receiver, vec![input])
    }
}

impl<S, T> DefaultTimeoutExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
}
