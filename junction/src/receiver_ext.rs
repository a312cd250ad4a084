// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turning Tokio channel receivers into operator inputs.

use futures::stream::Map;
use futures::StreamExt;
use junction_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Stream of [`StreamItem::Value`]s read from an unbounded receiver.
pub type ReceiverStream<T> = Map<UnboundedReceiverStream<T>, fn(T) -> StreamItem<T>>;

/// Extension trait for `UnboundedReceiver` to feed operators.
pub trait UnboundedReceiverExt<T> {
    /// Wrap every received value in [`StreamItem::Value`].
    ///
    /// The stream completes once every sender is dropped.
    fn into_junction_stream(self) -> ReceiverStream<T>;

    /// Like [`into_junction_stream`](Self::into_junction_stream), mapping each value first.
    ///
    /// Useful for bringing receivers of different types to the same item type.
    fn into_junction_stream_with<U, F>(self, mapper: F) -> Map<UnboundedReceiverStream<T>, F>
    where
        F: FnMut(T) -> StreamItem<U>;
}

impl<T> UnboundedReceiverExt<T> for mpsc::UnboundedReceiver<T> {
    fn into_junction_stream(self) -> ReceiverStream<T> {
        UnboundedReceiverStream::new(self).map(StreamItem::Value as fn(T) -> StreamItem<T>)
    }

    fn into_junction_stream_with<U, F>(self, mapper: F) -> Map<UnboundedReceiverStream<T>, F>
    where
        F: FnMut(T) -> StreamItem<U>,
    {
        UnboundedReceiverStream::new(self).map(mapper)
    }
}
