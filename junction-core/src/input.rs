// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Input streams of an operator instance and the merge that drains them.
//!
//! Every input is wrapped into an [`Input`] that applies its items to the instance as it is
//! polled. All inputs of one instance are then drained by a single pump through a priority
//! merge, one item at a time. Consequences for ordering:
//!
//! - items of one input are applied in the order that input produced them
//! - when several inputs have an item ready at the same poll, the input listed first wins
//! - items pushed into different inputs back to back, before the pump got to run, are not
//!   interleaved in push order; yield between such pushes when their relative order matters

use crate::operator::{Ending, OperatorCore, Teardown};
use crate::{Emitter, StreamItem};
use futures::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// One input of an operator instance, ready to be handed to
/// [`OperatorCore::into_joined`].
///
/// Yields `()` for every item it applied and ends after the end of its stream was recorded.
pub struct Input {
    feed: Pin<Box<dyn Stream<Item = ()> + Send>>,
}

impl Input {
    pub(crate) fn new<S, T, St, R, V, E>(
        stream: S,
        core: OperatorCore<St, R>,
        on_value: V,
        on_end: E,
    ) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
        T: Send + 'static,
        St: Teardown + Send + 'static,
        R: Send + 'static,
        V: FnMut(&mut St, &Emitter<R>, T) + Send + 'static,
        E: FnOnce(&mut St) -> Ending + Send + 'static,
    {
        Self {
            feed: Box::pin(Feed {
                stream,
                core,
                on_value,
                on_end: Some(on_end),
            }),
        }
    }
}

#[pin_project]
struct Feed<S, St, R, V, E> {
    #[pin]
    stream: S,
    core: OperatorCore<St, R>,
    on_value: V,
    on_end: Option<E>,
}

impl<S, T, St, R, V, E> Stream for Feed<S, St, R, V, E>
where
    S: Stream<Item = StreamItem<T>>,
    St: Teardown + Send + 'static,
    R: Send + 'static,
    V: FnMut(&mut St, &Emitter<R>, T),
    E: FnOnce(&mut St) -> Ending,
{
    type Item = ();

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<()>> {
        let this = self.project();
        if this.on_end.is_none() {
            return Poll::Ready(None);
        }

        match ready!(this.stream.poll_next(cx)) {
            Some(StreamItem::Value(value)) => {
                let on_value = this.on_value;
                this.core.update(|state, emitter| on_value(state, emitter, value));
                Poll::Ready(Some(()))
            }
            Some(StreamItem::Error(err)) => {
                this.core.fail(err);
                Poll::Ready(Some(()))
            }
            None => {
                if let Some(on_end) = this.on_end.take() {
                    this.core.end(on_end);
                }
                Poll::Ready(None)
            }
        }
    }
}

/// Merge of an instance's inputs that prefers earlier inputs.
///
/// Every poll walks the inputs in list order and returns as soon as one of them applied an
/// item. Inputs that ended are dropped; the merge ends once all of them did.
pub(crate) struct PriorityMerge {
    inputs: Vec<Input>,
}

impl PriorityMerge {
    pub(crate) fn new(inputs: Vec<Input>) -> Self {
        Self { inputs }
    }
}

impl Stream for PriorityMerge {
    type Item = ();

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<()>> {
        let this = Pin::into_inner(self);

        let mut index = 0;
        while index < this.inputs.len() {
            match this.inputs[index].feed.as_mut().poll_next(cx) {
                Poll::Ready(Some(())) => return Poll::Ready(Some(())),
                Poll::Ready(None) => {
                    this.inputs.remove(index);
                }
                Poll::Pending => index += 1,
            }
        }

        if this.inputs.is_empty() {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
