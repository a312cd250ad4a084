// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation token used by pumps and timers.

use event_listener::Event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag with async notification.
///
/// Clones share the same state: calling [`cancel`](Self::cancel) on any clone wakes every
/// future awaiting [`cancelled`](Self::cancelled) on any other clone.
///
/// ```
/// use junction_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
/// assert!(!observer.is_cancelled());
///
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a token that is not cancelled yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token and wake all waiters. Idempotent.
    pub fn cancel(&self) {
        // Publish the flag before notifying so woken waiters observe it
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Non-blocking check.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once the token is cancelled; immediately if it already is.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }

            let listener = self.inner.event.listen();

            // cancel() may have run between the check above and listen()
            if self.is_cancelled() {
                return;
            }

            listener.await;
        }
    }
}
