// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-value cells and the completeness predicate over a group of them.
//!
//! A [`Slot`] remembers the most recent value of one input stream. It starts either undefined or
//! defined with a default, and once defined it never goes back to undefined. A tuple of slots is
//! a [`SlotSet`]: it is *complete* when every slot is defined, and only then hands out the
//! latest values.
//!
//! Slots carry no locking of their own; the operator owning them reads and writes a whole set
//! inside its critical section.
//!
//! ```
//! use junction_core::{Slot, SlotSet};
//!
//! let mut slots = (Slot::<i32>::empty(), Slot::with_default("ctx"));
//! assert!(!slots.is_complete());
//! assert!(slots.latest().is_none());
//!
//! slots.0.set(7);
//! assert_eq!(slots.latest(), Some((&7, &"ctx")));
//! ```

/// Mutable cell holding the latest value seen from one input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    value: Option<T>,
}

impl<T> Slot<T> {
    /// An undefined slot.
    pub const fn empty() -> Self {
        Self { value: None }
    }

    /// A slot that is defined from the start.
    pub const fn with_default(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// Defined iff `initial` is `Some`.
    pub const fn new(initial: Option<T>) -> Self {
        Self { value: initial }
    }

    /// Store `value`, marking the slot defined.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub const fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A fixed group of slots evaluated together.
pub trait SlotSet {
    /// Tuple of optional initial values, one per slot.
    type Defaults;

    /// Tuple of references to the latest values, one per slot.
    type Latest<'a>
    where
        Self: 'a;

    /// Build the set, each slot defined iff its default is `Some`.
    fn from_defaults(defaults: Self::Defaults) -> Self;

    /// `true` iff every slot is defined.
    fn is_complete(&self) -> bool;

    /// The latest values in positional order, or `None` while incomplete.
    fn latest(&self) -> Option<Self::Latest<'_>>;
}

macro_rules! impl_slot_set {
    ($($T:ident => $idx:tt),+) => {
        impl<$($T),+> SlotSet for ($(Slot<$T>,)+) {
            type Defaults = ($(Option<$T>,)+);

            type Latest<'a> = ($(&'a $T,)+)
            where
                Self: 'a;

            fn from_defaults(defaults: Self::Defaults) -> Self {
                ($(Slot::new(defaults.$idx),)+)
            }

            fn is_complete(&self) -> bool {
                $(self.$idx.is_defined())&&+
            }

            fn latest(&self) -> Option<Self::Latest<'_>> {
                Some(($(self.$idx.get()?,)+))
            }
        }
    };
}

impl_slot_set!(T1 => 0);
impl_slot_set!(T1 => 0, T2 => 1);
impl_slot_set!(T1 => 0, T2 => 1, T3 => 2);
impl_slot_set!(T1 => 0, T2 => 1, T3 => 2, T4 => 3);
impl_slot_set!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4);
