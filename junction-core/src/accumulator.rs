// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// State threaded through successive emissions of a scan-style operator.
///
/// Each step consumes the current value and stores what the step function returns, so the next
/// step always starts from the previous result. The value is parked in an `Option` only while
/// a step runs; if the step panics the accumulator stays empty and further steps are no-ops,
/// which is fine because the owning operator terminates on a panicking callback anyway.
///
/// ```
/// use junction_core::Accumulator;
///
/// let mut acc = Accumulator::new(0);
/// assert_eq!(acc.step(|sum| sum + 2), Some(&2));
/// assert_eq!(acc.step(|sum| sum + 3), Some(&5));
///
/// // `step_with` also yields an output derived from the same step
/// let out = acc.step_with(|sum| (sum * 2, format!("was {sum}")));
/// assert_eq!(out.as_deref(), Some("was 5"));
/// assert_eq!(acc.get(), Some(&10));
/// ```
#[derive(Debug, Clone)]
pub struct Accumulator<A> {
    value: Option<A>,
}

impl<A> Accumulator<A> {
    pub const fn new(initial: A) -> Self {
        Self {
            value: Some(initial),
        }
    }

    /// The current value; `None` only after a step panicked.
    pub fn get(&self) -> Option<&A> {
        self.value.as_ref()
    }

    /// Replace the value with `f(value)` and return the new one.
    pub fn step<F>(&mut self, f: F) -> Option<&A>
    where
        F: FnOnce(A) -> A,
    {
        let current = self.value.take()?;
        self.value = Some(f(current));
        self.value.as_ref()
    }

    /// Replace the value with the first half of `f(value)` and return the second half.
    pub fn step_with<F, O>(&mut self, f: F) -> Option<O>
    where
        F: FnOnce(A) -> (A, O),
    {
        let current = self.value.take()?;
        let (next, output) = f(current);
        self.value = Some(next);
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn steps_chain_from_previous_result() {
        let mut acc = Accumulator::new(String::new());
        acc.step(|s| s + "a");
        acc.step(|s| s + "b");
        assert_eq!(acc.get().map(String::as_str), Some("ab"));
    }

    #[test]
    fn panicking_step_leaves_accumulator_empty() {
        let mut acc = Accumulator::new(1);
        let result = catch_unwind(AssertUnwindSafe(|| {
            acc.step(|_| panic!("boom"));
        }));

        assert!(result.is_err());
        assert_eq!(acc.get(), None);
        assert_eq!(acc.step(|v| v + 1), None);
    }
}
