// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-instance critical section every operator is built on.
//!
//! An [`OperatorCore`] owns one mutex guarding the operator's state (slots, accumulator,
//! timer deadline), its [`Emitter`] and a terminated flag. The input pump, timer callbacks and
//! disposal all go through it, so slot writes, the completeness check, the user callback and
//! the publish happen atomically with respect to each other.
//!
//! Termination is final. It happens when an input fails, when a user callback panics, when
//! the operator decides its inputs can no longer produce output, or on disposal. In every case
//! the state's [`Teardown`] runs under the lock and the output channel is closed.

use crate::emitter::{Dispose, Emitter, Joined};
use crate::input::{Input, PriorityMerge};
use crate::{JunctionError, JunctionTask, StreamItem};
use futures::channel::mpsc::UnboundedReceiver;
use futures::future::{select, Either};
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::pin;
use std::sync::Arc;

/// Releases whatever an operator state holds outside the lock, typically armed timers.
pub trait Teardown {
    fn teardown(&mut self) {}
}

/// What an operator wants to happen after one of its inputs ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Keep running on the remaining inputs.
    Continue,
    /// Complete the output.
    Complete,
}

struct Inner<St, R> {
    state: St,
    emitter: Emitter<R>,
    terminated: bool,
}

impl<St: Teardown, R> Inner<St, R> {
    fn terminate(&mut self) {
        self.terminated = true;
        self.state.teardown();
        self.emitter.complete();
    }
}

/// Shared handle to one operator instance.
///
/// Clones refer to the same instance. `name` identifies the operator in errors and logs.
pub struct OperatorCore<St, R> {
    inner: Arc<Mutex<Inner<St, R>>>,
    name: &'static str,
}

impl<St, R> Clone for OperatorCore<St, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: self.name,
        }
    }
}

impl<St, R> OperatorCore<St, R>
where
    St: Teardown + Send + 'static,
    R: Send + 'static,
{
    /// Create an instance and the receiver its output will be read from.
    pub fn new(name: &'static str, state: St) -> (Self, UnboundedReceiver<StreamItem<R>>) {
        let (emitter, receiver) = Emitter::channel();
        let core = Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                emitter,
                terminated: false,
            })),
            name,
        };
        (core, receiver)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_terminated(&self) -> bool {
        self.inner.lock().terminated
    }

    /// Run `f` inside the critical section.
    ///
    /// Returns `None` without calling `f` if the instance already terminated. A panic inside
    /// `f` is caught, published as [`JunctionError::CallbackPanicked`] and terminates the
    /// instance; `None` is returned in that case too.
    pub fn update<F, O>(&self, f: F) -> Option<O>
    where
        F: FnOnce(&mut St, &Emitter<R>) -> O,
    {
        let mut guard = self.inner.lock();
        if guard.terminated {
            return None;
        }

        let inner = &mut *guard;
        let (state, emitter) = (&mut inner.state, &inner.emitter);
        match catch_unwind(AssertUnwindSafe(|| f(state, emitter))) {
            Ok(output) => Some(output),
            Err(payload) => {
                error!(operator = self.name, "callback panicked, terminating");
                let err = JunctionError::callback_panicked(self.name, &*payload);
                guard.emitter.error(err);
                guard.terminate();
                None
            }
        }
    }

    /// Forward an upstream error and terminate. No-op once terminated.
    pub fn fail(&self, err: JunctionError) {
        let mut inner = self.inner.lock();
        if inner.terminated {
            return;
        }
        debug!(operator = self.name, "input failed, terminating");
        inner.emitter.error(err);
        inner.terminate();
    }

    /// Record the end of an input and complete if `on_end` says so.
    pub fn end<E>(&self, on_end: E)
    where
        E: FnOnce(&mut St) -> Ending,
    {
        let mut inner = self.inner.lock();
        if inner.terminated {
            return;
        }
        if on_end(&mut inner.state) == Ending::Complete {
            debug!(operator = self.name, "completed");
            inner.terminate();
        }
    }

    /// Complete the output from inside the instance. No-op once terminated.
    pub fn complete(&self) {
        self.end(|_| Ending::Complete);
    }

    /// Wrap `stream` as an input of this instance.
    ///
    /// Each value is handed to `on_value` inside the critical section. An error item fails the
    /// instance; the end of the stream is reported through `on_end`. Nothing is read until the
    /// input is handed to [`into_joined`](Self::into_joined).
    pub fn input<S, T, V, E>(&self, stream: S, on_value: V, on_end: E) -> Input
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Send + 'static,
        V: FnMut(&mut St, &Emitter<R>, T) + Send + 'static,
        E: FnOnce(&mut St) -> Ending + Send + 'static,
    {
        Input::new(stream, self.clone(), on_value, on_end)
    }

    /// Hand the output to the caller and start the pump draining `inputs`.
    ///
    /// One task drains every input of the instance, preferring inputs listed first when several
    /// have an item ready. It stops when cancelled or when the instance terminates, and once
    /// every input ended.
    pub fn into_joined(
        self,
        receiver: UnboundedReceiver<StreamItem<R>>,
        inputs: Vec<Input>,
    ) -> Joined<R> {
        let core = self.clone();
        let pump = JunctionTask::spawn(move |cancel| async move {
            let mut merged = PriorityMerge::new(inputs);
            let mut cancelled = pin!(cancel.cancelled());

            loop {
                match select(cancelled.as_mut(), merged.next()).await {
                    Either::Left(_) => {
                        trace!(operator = core.name, "pump cancelled");
                        break;
                    }
                    Either::Right((Some(()), _)) => {
                        if core.is_terminated() {
                            break;
                        }
                    }
                    Either::Right((None, _)) => break,
                }
            }
        });
        Joined::new(receiver, pump, Arc::new(self))
    }
}

impl<St, R> Dispose for OperatorCore<St, R>
where
    St: Teardown + Send,
    R: Send,
{
    fn dispose(&self) {
        let mut inner = self.inner.lock();
        if inner.terminated {
            return;
        }
        debug!(operator = self.name, "disposed");
        inner.terminate();
    }
}
