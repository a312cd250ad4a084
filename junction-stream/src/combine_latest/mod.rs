// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `combine_latest` for 2 to 5 streams, plus the accumulating `scan_combine_latest`.
//!
//! # Behavior
//!
//! - Each input has a latest-value slot, optionally defined from the start by a default
//! - Nothing is published while any slot is undefined
//! - Once every slot is defined, each arrival on any input publishes exactly once
//! - Slot write, completeness check, user callback and publish form one critical section per
//!   instance, whatever the arity
//! - An upstream error is forwarded and ends the output; so does a panicking callback
//! - The output completes when every input completed, or as soon as an input completes without
//!   ever having produced a value
//!
//! The scan variants only call their accumulator once every slot is defined.
//!
//! # Ordering
//!
//! Values of each input are applied in order, and every applied value publishes against the
//! latest values applied so far from the other inputs. When several inputs have a value waiting
//! at the same time the first argument wins, so values pushed into different inputs back to back
//! may be applied grouped per input. Await between such pushes when every intermediate
//! combination must be observed.
//!
//! # Example
//!
//! ```rust
//! use junction_stream::combine_latest::combine_latest2;
//! use junction_test_utils::{test_channel, helpers::unwrap_stream};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (numbers_tx, numbers) = test_channel::<i32>();
//! let (letters_tx, letters) = test_channel::<&str>();
//!
//! let mut combined = combine_latest2(numbers, letters, |n, l| format!("{n}{l}"));
//!
//! numbers_tx.send(1).unwrap();
//! letters_tx.send("x").unwrap();
//! assert_eq!(unwrap_stream(&mut combined, 500).await.unwrap(), "1x");
//!
//! numbers_tx.send(2).unwrap();
//! assert_eq!(unwrap_stream(&mut combined, 500).await.unwrap(), "2x");
//! # }
//! ```

#[macro_use]
mod implementation;

use crate::join::{Combine, JoinState, Reaction, Scan};
use futures::Stream;
use junction_core::{Joined, OperatorCore, Slot, SlotSet, StreamItem};

define_join_all!(join2, [s1: S1 => T1 . 0, s2: S2 => T2 . 1]);
define_join_all!(join3, [s1: S1 => T1 . 0, s2: S2 => T2 . 1, s3: S3 => T3 . 2]);
define_join_all!(join4, [s1: S1 => T1 . 0, s2: S2 => T2 . 1, s3: S3 => T3 . 2, s4: S4 => T4 . 3]);
define_join_all!(join5, [s1: S1 => T1 . 0, s2: S2 => T2 . 1, s3: S3 => T3 . 2, s4: S4 => T4 . 3, s5: S5 => T5 . 4]);

define_combine_latest! {
    arity: 2,
    combine: combine_latest2,
    combine_with_defaults: combine_latest2_with_defaults,
    scan: scan_combine_latest2,
    scan_with_defaults: scan_combine_latest2_with_defaults,
    join: join2,
    inputs: [s1: S1 => T1 . 0, s2: S2 => T2 . 1]
}

define_combine_latest! {
    arity: 3,
    combine: combine_latest3,
    combine_with_defaults: combine_latest3_with_defaults,
    scan: scan_combine_latest3,
    scan_with_defaults: scan_combine_latest3_with_defaults,
    join: join3,
    inputs: [s1: S1 => T1 . 0, s2: S2 => T2 . 1, s3: S3 => T3 . 2]
}

define_combine_latest! {
    arity: 4,
    combine: combine_latest4,
    combine_with_defaults: combine_latest4_with_defaults,
    scan: scan_combine_latest4,
    scan_with_defaults: scan_combine_latest4_with_defaults,
    join: join4,
    inputs: [s1: S1 => T1 . 0, s2: S2 => T2 . 1, s3: S3 => T3 . 2, s4: S4 => T4 . 3]
}

define_combine_latest! {
    arity: 5,
    combine: combine_latest5,
    combine_with_defaults: combine_latest5_with_defaults,
    scan: scan_combine_latest5,
    scan_with_defaults: scan_combine_latest5_with_defaults,
    join: join5,
    inputs: [s1: S1 => T1 . 0, s2: S2 => T2 . 1, s3: S3 => T3 . 2, s4: S4 => T4 . 3, s5: S5 => T5 . 4]
}
