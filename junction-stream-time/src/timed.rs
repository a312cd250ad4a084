// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Glue between an operator instance and its [`Deadline`].

use junction_core::{Emitter, OperatorCore, Teardown};
use junction_runtime::{Deadline, Scheduler};
use std::time::Duration;

/// Operator state owning exactly one deadline.
pub(crate) trait Timed: Teardown + Send + 'static {
    fn deadline(&mut self) -> &mut Deadline;
}

/// Cancel the armed timer of `state` and arm a new one for `duration`.
///
/// When the timer fires, `on_timeout` runs inside the instance's critical section, but only if
/// this arm is still the current one.
pub(crate) fn rearm<St, R, Sch, H>(
    core: &OperatorCore<St, R>,
    state: &mut St,
    scheduler: &Sch,
    duration: Duration,
    on_timeout: H,
) where
    St: Timed,
    R: Send + 'static,
    Sch: Scheduler,
    H: FnOnce(&mut St, &Emitter<R>) + Send + 'static,
{
    let core = core.clone();
    state.deadline().arm(scheduler, duration, move |epoch| {
        core.update(|state, emitter| {
            if state.deadline().fire(epoch) {
                trace!(operator = core.name(), "timeout elapsed");
                on_timeout(state, emitter);
            }
        });
    });
}
