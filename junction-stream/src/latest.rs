// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Callback shapes accepted by the join operators.
//!
//! Combinators take the latest values as separate reference arguments in positional order
//! (`|a: &A, b: &B| ...`). These traits bridge such closures to a [`SlotSet`] of any supported
//! arity, so one operator body serves every arity.

use junction_core::{Slot, SlotSet};

/// A combinator over the latest values of `Slots`.
pub trait LatestFn<Slots: SlotSet, R> {
    fn call_latest<'a>(&mut self, latest: Slots::Latest<'a>) -> R;
}

/// An accumulator over the latest values of `Slots` and the previous result.
pub trait ScanLatestFn<Slots: SlotSet, R> {
    fn call_scan<'a>(&mut self, latest: Slots::Latest<'a>, previous: R) -> R;
}

macro_rules! impl_latest_fn {
    ($($T:ident => $idx:tt),+) => {
        impl<F, R, $($T),+> LatestFn<($(Slot<$T>,)+), R> for F
        where
            F: FnMut($(&$T),+) -> R,
        {
            fn call_latest<'a>(&mut self, latest: <($(Slot<$T>,)+) as SlotSet>::Latest<'a>) -> R {
                self($(latest.$idx),+)
            }
        }

        impl<F, R, $($T),+> ScanLatestFn<($(Slot<$T>,)+), R> for F
        where
            F: FnMut($(&$T,)+ R) -> R,
        {
            fn call_scan<'a>(
                &mut self,
                latest: <($(Slot<$T>,)+) as SlotSet>::Latest<'a>,
                previous: R,
            ) -> R {
                self($(latest.$idx,)+ previous)
            }
        }
    };
}

impl_latest_fn!(T1 => 0);
impl_latest_fn!(T1 => 0, T2 => 1);
impl_latest_fn!(T1 => 0, T2 => 1, T3 => 2);
impl_latest_fn!(T1 => 0, T2 => 1, T3 => 2, T4 => 3);
impl_latest_fn!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4);
