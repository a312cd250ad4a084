// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-value join operators for streams of [`StreamItem`](junction_core::StreamItem).
//!
//! # Operators
//!
//! | Operator | Emits when |
//! |----------|------------|
//! | [`combine_latest2`](combine_latest::combine_latest2) .. `combine_latest5` | any input arrives, once all have a value |
//! | [`scan_combine_latest2`](combine_latest::scan_combine_latest2) .. `scan_combine_latest5` | same, folding into an accumulator |
//! | [`WithLatestFromExt::with_latest_from`] (and `2`, `3`) | the driving stream arrives, once all have a value |
//! | [`WithLatestFromExt::scan_with_latest_from`] | same, folding into an accumulator |
//! | [`WithPreviousExt`] | every value, paired with its predecessor or folded |
//!
//! Every operator returns a [`Joined`](junction_core::Joined) stream. All inputs of an
//! instance are drained by one Tokio task, so operators must be created inside a Tokio runtime;
//! producers may push from any number of threads.
//!
//! # Ordering
//!
//! Values of one input are applied in the order they were produced. When several inputs have a
//! value waiting at the same time, `combine_latest` takes them in argument order and
//! `with_latest_from` applies waiting latest-from values before the driving value. Values pushed
//! into different inputs back to back are otherwise not interleaved in push order: yield (or
//! await the output) between such pushes when their relative order matters.
//!
//! # Errors
//!
//! The first upstream error is forwarded and ends the output. A panicking user callback ends it
//! with [`JunctionError::CallbackPanicked`](junction_core::JunctionError::CallbackPanicked).

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod combine_latest;
mod join;
pub mod latest;
pub mod prelude;
pub mod with_latest_from;
pub mod with_previous;

pub use combine_latest::{
    combine_latest2, combine_latest2_with_defaults, combine_latest3, combine_latest3_with_defaults,
    combine_latest4, combine_latest4_with_defaults, combine_latest5, combine_latest5_with_defaults,
    scan_combine_latest2, scan_combine_latest2_with_defaults, scan_combine_latest3,
    scan_combine_latest3_with_defaults, scan_combine_latest4, scan_combine_latest4_with_defaults,
    scan_combine_latest5, scan_combine_latest5_with_defaults,
};
pub use latest::{LatestFn, ScanLatestFn};
pub use with_latest_from::WithLatestFromExt;
pub use with_previous::WithPreviousExt;
