// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! State shared by the join operators: a slot set, what to do once it is complete, and how
//! many inputs are still open.

use crate::latest::{LatestFn, ScanLatestFn};
use junction_core::{Accumulator, Emitter, Ending, SlotSet, Teardown};

/// What a join does with the latest values once its slot set is complete.
pub trait Reaction<Slots: SlotSet, R> {
    fn react<'a>(&mut self, latest: Slots::Latest<'a>, emitter: &Emitter<R>);
}

/// Publish `combinator(latest...)`.
pub struct Combine<F>(pub F);

impl<Slots, R, F> Reaction<Slots, R> for Combine<F>
where
    Slots: SlotSet,
    F: LatestFn<Slots, R>,
{
    fn react<'a>(&mut self, latest: Slots::Latest<'a>, emitter: &Emitter<R>) {
        emitter.next(self.0.call_latest(latest));
    }
}

/// Fold the latest values into an accumulator and publish every new accumulated value.
pub struct Scan<F, R> {
    accumulator: F,
    state: Accumulator<R>,
}

impl<F, R> Scan<F, R> {
    pub fn new(initial: R, accumulator: F) -> Self {
        Self {
            accumulator,
            state: Accumulator::new(initial),
        }
    }
}

impl<Slots, R, F> Reaction<Slots, R> for Scan<F, R>
where
    Slots: SlotSet,
    R: Clone,
    F: ScanLatestFn<Slots, R>,
{
    fn react<'a>(&mut self, latest: Slots::Latest<'a>, emitter: &Emitter<R>) {
        let accumulator = &mut self.accumulator;
        if let Some(next) = self
            .state
            .step(|previous| accumulator.call_scan(latest, previous))
        {
            emitter.next(next.clone());
        }
    }
}

pub struct JoinState<Slots, P> {
    pub slots: Slots,
    open_inputs: usize,
    reaction: P,
}

impl<Slots: SlotSet, P> JoinState<Slots, P> {
    pub fn new(slots: Slots, inputs: usize, reaction: P) -> Self {
        Self {
            slots,
            open_inputs: inputs,
            reaction,
        }
    }

    /// A join whose completion follows its driving input instead of counting inputs.
    pub fn driven(slots: Slots, reaction: P) -> Self {
        Self::new(slots, 0, reaction)
    }

    /// Run the reaction if every slot is defined.
    pub fn react<R>(&mut self, emitter: &Emitter<R>)
    where
        P: Reaction<Slots, R>,
    {
        if let Some(latest) = self.slots.latest() {
            self.reaction.react(latest, emitter);
        }
    }

    /// Bookkeeping for a finished input whose slot is `defined` or not.
    ///
    /// The join completes once every input ended, or as soon as an input ends without ever
    /// having produced a value: its slot can no longer become defined.
    pub fn input_ended(&mut self, defined: bool) -> Ending {
        self.open_inputs = self.open_inputs.saturating_sub(1);
        if self.open_inputs == 0 || !defined {
            Ending::Complete
        } else {
            Ending::Continue
        }
    }
}

impl<Slots, P> Teardown for JoinState<Slots, P> {}
