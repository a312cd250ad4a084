// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timers and schedulers for junction's time-driven operators.
//!
//! - [`Timer`] abstracts the clock and sleeping; [`TokioTimer`] is the Tokio implementation.
//! - [`Scheduler`] runs a callback after a delay or periodically and hands back a
//!   cancellable [`TimerHandle`]. [`TimerScheduler`] implements it on top of any `Timer`.
//! - [`Deadline`] is the Idle/Armed state machine an operator keeps per instance so that only
//!   the most recently armed timer can ever take effect.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod deadline;
pub mod impls;
pub mod scheduler;
pub mod timer;

pub use self::deadline::Deadline;
pub use self::scheduler::{Scheduler, TimerHandle, TimerScheduler};
pub use self::timer::Timer;

#[cfg(feature = "runtime-tokio")]
pub use self::impls::tokio::{TokioScheduler, TokioTimer};
