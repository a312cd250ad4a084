// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::{FutureExt, Stream};
use junction_core::{JunctionError, StreamItem};
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Wait at most `timeout_ms` for the next item and unwrap it.
///
/// # Errors
///
/// Returns the item's error if the stream yielded one, or a stream error if the stream ended
/// or nothing arrived in time.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Result<T, JunctionError>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(StreamItem::Value(value))) => Ok(value),
        Ok(Some(StreamItem::Error(e))) => Err(e),
        Ok(None) => Err(JunctionError::stream_error("Stream ended")),
        Err(_) => Err(JunctionError::stream_error(format!(
            "No item within {timeout_ms}ms"
        ))),
    }
}

/// Fail the test if `stream` yields anything within `timeout_ms`.
///
/// Under a paused Tokio clock the wait auto-advances time, so pending timers inside the window
/// do fire.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected element emitted, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Drain `stream` to its end, keeping values and panicking on an error item.
pub async fn collect_values<S, T>(stream: S) -> Vec<T>
where
    S: Stream<Item = StreamItem<T>>,
{
    stream
        .map(|item| match item {
            StreamItem::Value(value) => value,
            StreamItem::Error(e) => panic!("Unexpected error item: {e}"),
        })
        .collect()
        .await
}

/// Assert that the stream has ended (yields `None` within `timeout_ms`).
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("Expected stream end, got an element"),
        Err(_) => panic!("Expected stream end within {timeout_ms}ms"),
    }
}

/// Let spawned tasks (pumps, timers) run until they have nothing left to do.
///
/// Never advances a paused clock, so tests can step time explicitly with
/// `tokio::time::advance` and then settle.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Whatever `stream` has ready right now, without waiting.
///
/// `None` means nothing is ready, `Some(None)` means the stream ended.
pub fn ready_item<S>(stream: &mut S) -> Option<Option<S::Item>>
where
    S: Stream + Unpin,
{
    stream.next().now_or_never()
}
