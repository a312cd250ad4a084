// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Lifecycle errors returned to whoever pushes into a [`Subject`](crate::Subject).
///
/// Unlike [`JunctionError`](crate::JunctionError) these never travel through a stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject was closed or errored; it accepts neither items nor subscribers.
    #[error("Subject is closed")]
    Closed,
}
