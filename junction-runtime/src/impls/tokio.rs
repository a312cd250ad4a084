// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use crate::scheduler::TimerScheduler;
use crate::timer::Timer;

/// [`Timer`] backed by `tokio::time`.
///
/// Uses Tokio's own `Instant`, so tests running with a paused clock
/// (`#[tokio::test(start_paused = true)]`) control it through `tokio::time::advance`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    type Instant = tokio::time::Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}

/// The default scheduler: callbacks run on Tokio tasks, timed by [`TokioTimer`].
pub type TokioScheduler = TimerScheduler<TokioTimer>;
