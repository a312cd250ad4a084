// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the junction workspace.
//!
//! Operators consume streams, tests want to push values imperatively: [`test_channel`] and
//! [`test_channel_with_errors`] bridge the two with an unbounded Tokio channel. The
//! [`helpers`] module holds assertions over operator outputs.
//!
//! ```rust
//! use junction_test_utils::{assert_no_element_emitted, test_channel};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, mut stream) = test_channel::<i32>();
//! assert_no_element_emitted(&mut stream, 10).await;
//!
//! tx.send(1).unwrap();
//! assert_eq!(stream.next().await.map(|item| item.unwrap()), Some(1));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;

use futures::{Stream, StreamExt};
use junction_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{
    assert_no_element_emitted, collect_values, ready_item, settle, unwrap_stream,
};

/// Creates a test channel that wraps every sent value in `StreamItem::Value`.
///
/// Dropping the sender completes the stream.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>`, for testing error propagation.
///
/// ```rust
/// use junction_test_utils::test_channel_with_errors;
/// use junction_core::{JunctionError, StreamItem};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, mut stream) = test_channel_with_errors::<i32>();
///
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(JunctionError::stream_error("test error"))).unwrap();
///
/// assert!(stream.next().await.unwrap().is_value());
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
