// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The two ends of an operator's output.
//!
//! Operators publish through an [`Emitter`] while holding their own lock; callers read the
//! other end as a [`Joined`] stream. Emission never waits: the channel between the two is
//! unbounded, so publishing from inside a critical section cannot deadlock against a slow
//! consumer.

use crate::{JunctionTask, StreamItem};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use pin_project::{pin_project, pinned_drop};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Synchronous shutdown of an operator instance.
///
/// After `dispose` returns the instance emits nothing more, its timers are cancelled and it
/// ignores further input. Calling it again is a no-op.
pub trait Dispose: Send + Sync {
    fn dispose(&self);
}

/// Publishing side of an operator's output.
pub struct Emitter<R> {
    tx: UnboundedSender<StreamItem<R>>,
}

impl<R> Emitter<R> {
    /// Create an emitter together with the receiver that observes it.
    pub fn channel() -> (Self, UnboundedReceiver<StreamItem<R>>) {
        let (tx, rx) = mpsc::unbounded();
        (Self { tx }, rx)
    }

    /// Publish a value. Dropped silently once the output is closed or its reader is gone.
    pub fn next(&self, value: R) {
        let _ = self.tx.unbounded_send(StreamItem::Value(value));
    }

    /// Publish a terminal error.
    pub fn error(&self, error: crate::JunctionError) {
        let _ = self.tx.unbounded_send(StreamItem::Error(error));
    }

    /// Close the output. Items already published are still delivered.
    pub fn complete(&self) {
        self.tx.close_channel();
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Output of a joining operator.
///
/// Yields the operator's emissions as [`StreamItem`]s and ends when the operator completes or
/// terminates on an error. Owns the input pump: [`dispose`](Self::dispose) (or dropping the
/// stream) stops the operator, cancels its timers and pump, and discards whatever was
/// published but not yet read.
#[pin_project(PinnedDrop)]
pub struct Joined<R> {
    #[pin]
    receiver: UnboundedReceiver<StreamItem<R>>,
    subscription: Subscription,
}

struct Subscription {
    pump: JunctionTask,
    disposer: Arc<dyn Dispose>,
    disposed: bool,
}

impl Subscription {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.disposer.dispose();
        self.pump.cancel();
    }
}

impl<R> Joined<R> {
    /// Wire an output stream to the operator instance behind `disposer`.
    pub fn new(
        receiver: UnboundedReceiver<StreamItem<R>>,
        pump: JunctionTask,
        disposer: Arc<dyn Dispose>,
    ) -> Self {
        Self {
            receiver,
            subscription: Subscription {
                pump,
                disposer,
                disposed: false,
            },
        }
    }

    /// Stop the operator instance. Idempotent.
    ///
    /// Once this returns no further item is produced, even if a timer was already due or an
    /// input delivers another value.
    pub fn dispose(&mut self) {
        self.subscription.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.disposed
    }
}

impl<R> Stream for Joined<R> {
    type Item = StreamItem<R>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if this.subscription.disposed {
            return Poll::Ready(None);
        }
        this.receiver.poll_next(cx)
    }
}

#[pinned_drop]
impl<R> PinnedDrop for Joined<R> {
    fn drop(self: Pin<&mut Self>) {
        self.project().subscription.dispose();
    }
}
