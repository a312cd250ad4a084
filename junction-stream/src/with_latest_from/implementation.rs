// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Generates the input wiring of a withLatestFrom join with one driving and N latest-from inputs.
///
/// The driving stream sits in slot 0. Only its arrivals run the reaction; latest-from arrivals
/// just overwrite their slot.
macro_rules! define_with_latest_from {
    ($name:ident, [$($s:ident: $S:ident => $T:ident . $idx:tt),+]) => {
        pub(crate) fn $name<D, T, $($S, $T,)+ R, P>(
            name: &'static str,
            driving: D,
            $($s: $S,)+
            defaults: (Option<T>, $(Option<$T>,)+),
            reaction: P,
        ) -> Joined<R>
        where
            D: Stream<Item = StreamItem<T>> + Send + 'static,
            T: Send + 'static,
            $($S: Stream<Item = StreamItem<$T>> + Send + 'static,
            $T: Send + 'static,)+
            R: Send + 'static,
            P: Reaction<(Slot<T>, $(Slot<$T>,)+), R> + Send + 'static,
        {
            let slots = <(Slot<T>, $(Slot<$T>,)+) as SlotSet>::from_defaults(defaults);
            let (core, receiver) =
                OperatorCore::<_, R>::new(name, JoinState::driven(slots, reaction));
            trace!(operator = name, "joining");

            let mut inputs = Vec::new();
            $(
                inputs.push(core.input(
                    $s,
                    |state, _, value| state.slots.$idx.set(value),
                    |state| {
                        if state.slots.$idx.is_defined() {
                            Ending::Continue
                        } else {
                            Ending::Complete
                        }
                    },
                ));
            )+
            // Listed last so context already waiting is applied before a driving value.
            inputs.push(core.input(
                driving,
                |state, emitter, value| {
                    state.slots.0.set(value);
                    state.react(emitter);
                },
                |_| Ending::Complete,
            ));

            core.into_joined(receiver, inputs)
        }
    };
}
