// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task spawning with cooperative cancellation.

use crate::CancellationToken;
use std::future::Future;

/// Handle to a spawned background task that is cancelled when dropped.
///
/// The spawned future receives a [`CancellationToken`] it is expected to watch. Operators use
/// one task per instance to drain their inputs (the pump) and one per armed timer.
///
/// Must be called from within a Tokio runtime.
///
/// ```rust
/// use junction_core::JunctionTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = JunctionTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task); // signals the token, the task above returns
/// # }
/// ```
#[derive(Debug)]
pub struct JunctionTask {
    cancel: CancellationToken,
}

impl JunctionTask {
    /// Spawn `f(token)` on the current Tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signal the task to stop. Does not wait for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once `cancel()` was called or the handle was dropped.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for JunctionTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
