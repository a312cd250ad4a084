// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timer-driven join operators.
//!
//! | Operator | Emits |
//! |----------|-------|
//! | [`WithLatestFromTimeoutExt::with_latest_from_timeout`] | on driving arrivals, and once more if the driving stream goes quiet |
//! | [`ScanWithLatestFromTimeoutExt::scan_with_latest_from_timeout`] | accumulated values on driving arrivals and on timeouts |
//! | [`ScanWithLatestFromTimeoutExt::scan_with_latest_from_timeout_accumulator`] | same, also folding context that arrives after a timeout |
//! | [`PeriodicExt::periodic`] / [`PeriodicExt::state_periodic`] | on every tick of a fixed period |
//! | [`DefaultTimeoutExt::default_timeout`] | every value, plus a default after a quiet period |
//!
//! Every operator takes a [`Scheduler`](junction_runtime::Scheduler); use
//! `junction_runtime::TokioScheduler` in production and a paused Tokio clock in tests. Each
//! instance keeps at most one armed timer per concern. Re-arming cancels the previous timer
//! and a timer that lost the race against a newer arrival, completion or disposal never emits.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

mod timed;

pub mod default_timeout;
pub mod periodic;
pub mod prelude;
pub mod scan_with_latest_from_timeout;
pub mod with_latest_from_timeout;

pub use default_timeout::DefaultTimeoutExt;
pub use periodic::PeriodicExt;
pub use scan_with_latest_from_timeout::ScanWithLatestFromTimeoutExt;
pub use with_latest_from_timeout::WithLatestFromTimeoutExt;
