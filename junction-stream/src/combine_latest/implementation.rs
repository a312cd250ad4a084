// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Generates the four combine_latest entry points for one arity.
///
/// Every arity shares the same body: one input per stream, each storing into its own slot and
/// running the reaction under the instance lock.
macro_rules! define_combine_latest {
    (
        arity: $n:literal,
        combine: $combine:ident,
        combine_with_defaults: $combine_with_defaults:ident,
        scan: $scan:ident,
        scan_with_defaults: $scan_with_defaults:ident,
        join: $join:ident,
        inputs: [$($s:ident: $S:ident => $T:ident . $idx:tt),+]
    ) => {
        #[doc = concat!("Join ", stringify!($n), " streams, publishing `combinator` over their latest values.")]
        ///
        /// Nothing is published until every input has produced a value; after that every
        /// arrival on any input publishes once. See the [module documentation](self).
        pub fn $combine<$($S, $T,)+ R, F>($($s: $S,)+ combinator: F) -> Joined<R>
        where
            $($S: Stream<Item = StreamItem<$T>> + Send + 'static,
            $T: Send + 'static,)+
            R: Send + 'static,
            F: FnMut($(&$T),+) -> R + Send + 'static,
        {
            $combine_with_defaults($($s,)+ Default::default(), combinator)
        }

        #[doc = concat!("[`", stringify!($combine), "`] with optional initial values, one per input.")]
        ///
        /// An input with a `Some` default counts as having produced that value already.
        pub fn $combine_with_defaults<$($S, $T,)+ R, F>(
            $($s: $S,)+
            defaults: ($(Option<$T>,)+),
            combinator: F,
        ) -> Joined<R>
        where
            $($S: Stream<Item = StreamItem<$T>> + Send + 'static,
            $T: Send + 'static,)+
            R: Send + 'static,
            F: FnMut($(&$T),+) -> R + Send + 'static,
        {
            let slots = <($(Slot<$T>,)+) as SlotSet>::from_defaults(defaults);
            $join(
                "combine_latest",
                JoinState::new(slots, $n, Combine(combinator)),
                $($s,)+
            )
        }

        #[doc = concat!("Join ", stringify!($n), " streams, folding their latest values into an accumulator.")]
        ///
        /// `accumulator` receives the latest values followed by the previous result (starting
        /// with `initial`) and every new result is published. It only runs once every input has
        /// produced a value.
        pub fn $scan<$($S, $T,)+ R, F>(initial: R, $($s: $S,)+ accumulator: F) -> Joined<R>
        where
            $($S: Stream<Item = StreamItem<$T>> + Send + 'static,
            $T: Send + 'static,)+
            R: Clone + Send + 'static,
            F: FnMut($(&$T,)+ R) -> R + Send + 'static,
        {
            $scan_with_defaults(initial, $($s,)+ Default::default(), accumulator)
        }

        #[doc = concat!("[`", stringify!($scan), "`] with optional initial values, one per input.")]
        pub fn $scan_with_defaults<$($S, $T,)+ R, F>(
            initial: R,
            $($s: $S,)+
            defaults: ($(Option<$T>,)+),
            accumulator: F,
        ) -> Joined<R>
        where
            $($S: Stream<Item = StreamItem<$T>> + Send + 'static,
            $T: Send + 'static,)+
            R: Clone + Send + 'static,
            F: FnMut($(&$T,)+ R) -> R + Send + 'static,
        {
            let slots = <($(Slot<$T>,)+) as SlotSet>::from_defaults(defaults);
            $join(
                "scan_combine_latest",
                JoinState::new(slots, $n, Scan::new(initial, accumulator)),
                $($s,)+
            )
        }
    };
}

/// Generates the input wiring for one arity: every input sets its slot and reacts.
macro_rules! define_join_all {
    ($name:ident, [$($s:ident: $S:ident => $T:ident . $idx:tt),+]) => {
        fn $name<$($S, $T,)+ R, P>(
            name: &'static str,
            state: JoinState<($(Slot<$T>,)+), P>,
            $($s: $S,)+
        ) -> Joined<R>
        where
            $($S: Stream<Item = StreamItem<$T>> + Send + 'static,
            $T: Send + 'static,)+
            R: Send + 'static,
            P: Reaction<($(Slot<$T>,)+), R> + Send + 'static,
        {
            let (core, receiver) = OperatorCore::<_, R>::new(name, state);
            trace!(operator = name, "joining");

            let inputs = vec![$(
                core.input(
                    $s,
                    |state, emitter, value| {
                        state.slots.$idx.set(value);
                        state.react(emitter);
                    },
                    |state| {
                        let defined = state.slots.$idx.is_defined();
                        state.input_ended(defined)
                    },
                ),
            )+];

            core.into_joined(receiver, inputs)
        }
    };
}
