// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Junction
//!
//! Push-based operators that join independently-updating async streams.
//!
//! ## Overview
//!
//! The inputs of an operator are drained by one task per instance into a critical section that
//! remembers the latest value of every input. Depending on the operator, an arrival on any
//! input (`combine_latest`), on the driving input only (`with_latest_from`), a timer
//! (`with_latest_from_timeout`, `default_timeout`) or a fixed tick (`periodic`) turns those
//! latest values into an output.
//!
//! - [`junction_core`] - `StreamItem`, errors, slots, the operator core, `Subject`
//! - [`junction_runtime`] - timers, schedulers and cancellable timer handles
//! - [`junction_stream`] - `combine_latest`, `with_latest_from` and their accumulating variants
//! - [`junction_stream_time`] - the timer-driven operators
//!
//! ## Quick Start
//!
//! ```rust
//! use junction::prelude::*;
//! use junction_test_utils::unwrap_stream;
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (temperature_tx, temperature) = mpsc::unbounded_channel::<f32>();
//! let (setpoint_tx, setpoint) = mpsc::unbounded_channel::<f32>();
//!
//! let mut error = combine_latest2(
//!     temperature.into_junction_stream(),
//!     setpoint.into_junction_stream(),
//!     |temperature, setpoint| setpoint - temperature,
//! );
//!
//! temperature_tx.send(19.5).unwrap();
//! setpoint_tx.send(21.0).unwrap();
//! assert_eq!(unwrap_stream(&mut error, 500).await.unwrap(), 1.5);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod receiver_ext;

pub use junction_core::{
    Accumulator, Joined, JunctionError, Result, Slot, SlotSet, StreamItem, Subject, SubjectError,
};
pub use junction_runtime::{Deadline, Scheduler, TimerHandle, TimerScheduler};
#[cfg(feature = "runtime-tokio")]
pub use junction_runtime::{TokioScheduler, TokioTimer};
pub use receiver_ext::UnboundedReceiverExt;

pub use junction_core;
pub use junction_runtime;
pub use junction_stream;
pub use junction_stream_time;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::receiver_ext::UnboundedReceiverExt;
    pub use junction_core::{Joined, JunctionError, StreamItem, Subject};
    pub use junction_runtime::Scheduler;
    #[cfg(feature = "runtime-tokio")]
    pub use junction_runtime::TokioScheduler;
    pub use junction_stream::prelude::*;
    pub use junction_stream_time::{
        DefaultTimeoutExt, PeriodicExt, ScanWithLatestFromTimeoutExt, WithLatestFromTimeoutExt,
    };
}
