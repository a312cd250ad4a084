// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delayed and periodic callbacks with cancellable handles.

use crate::timer::Timer;
use futures::future::{select, Either};
use junction_core::JunctionTask;
use std::pin::pin;
use std::time::Duration;

/// Runs callbacks later.
///
/// Implementations must never invoke a callback synchronously from inside `schedule_once` or
/// `schedule_periodically`: operators arm timers while holding their own lock and the callback
/// takes that same lock. A zero delay means "as soon as the timer gets to it", not "now".
pub trait Scheduler: Clone + Send + Sync + 'static {
    /// Run `callback` once after `delay`, unless the handle is cancelled first.
    fn schedule_once<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static;

    /// Run `callback` after `initial_delay` and then every `period`, until the handle is
    /// cancelled.
    fn schedule_periodically<F>(
        &self,
        initial_delay: Duration,
        period: Duration,
        callback: F,
    ) -> TimerHandle
    where
        F: FnMut() + Send + 'static;
}

/// A pending (or periodic) callback.
///
/// [`cancel`](Self::cancel) is idempotent and keeps a callback that has not started yet from
/// ever running. A callback already running when `cancel` is called completes. Dropping the
/// handle cancels it.
#[derive(Debug)]
pub struct TimerHandle {
    task: JunctionTask,
}

impl TimerHandle {
    pub fn new(task: JunctionTask) -> Self {
        Self { task }
    }

    pub fn cancel(&self) {
        self.task.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_cancelled()
    }
}

/// [`Scheduler`] that sleeps on a [`Timer`] inside spawned tasks, one task per handle.
#[derive(Clone, Debug, Default)]
pub struct TimerScheduler<TM: Timer> {
    timer: TM,
}

impl<TM: Timer> TimerScheduler<TM> {
    pub fn new(timer: TM) -> Self {
        Self { timer }
    }
}

impl<TM: Timer> Scheduler for TimerScheduler<TM> {
    fn schedule_once<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let timer = self.timer.clone();
        let due = timer.now() + delay;
        TimerHandle::new(JunctionTask::spawn(move |cancel| async move {
            let sleep = pin!(timer.sleep_future(remaining(&timer, due)));
            let cancelled = pin!(cancel.cancelled());

            match select(cancelled, sleep).await {
                Either::Left(_) => trace!("timer cancelled"),
                // The sleep and a cancel may have completed together
                Either::Right(_) if cancel.is_cancelled() => trace!("timer cancelled"),
                Either::Right(_) => {
                    trace!(delay_ms = delay.as_millis() as u64, "timer fired");
                    callback();
                }
            }
        }))
    }

    fn schedule_periodically<F>(
        &self,
        initial_delay: Duration,
        period: Duration,
        mut callback: F,
    ) -> TimerHandle
    where
        F: FnMut() + Send + 'static,
    {
        let timer = self.timer.clone();
        let first_tick = timer.now() + initial_delay;
        TimerHandle::new(JunctionTask::spawn(move |cancel| async move {
            let mut cancelled = pin!(cancel.cancelled());
            let mut next_tick = first_tick;

            loop {
                let sleep = pin!(timer.sleep_future(remaining(&timer, next_tick)));
                if let Either::Left(_) = select(cancelled.as_mut(), sleep).await {
                    break;
                }
                if cancel.is_cancelled() {
                    break;
                }

                trace!(period_ms = period.as_millis() as u64, "periodic tick");
                callback();
                next_tick = next_tick + period;
            }
            trace!("periodic timer cancelled");
        }))
    }
}

/// Time left until `due`, measured when the sleep starts rather than when it was scheduled.
fn remaining<TM: Timer>(timer: &TM, due: TM::Instant) -> Duration {
    let now = timer.now();
    if due > now {
        due - now
    } else {
        Duration::ZERO
    }
}
