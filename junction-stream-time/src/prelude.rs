// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting every operator of this crate.
//!
//! ```rust
//! use junction_stream_time::prelude::*;
//! ```

pub use crate::default_timeout::DefaultTimeoutExt;
pub use crate::periodic::PeriodicExt;
pub use crate::scan_with_latest_from_timeout::ScanWithLatestFromTimeoutExt;
pub use crate::with_latest_from_timeout::WithLatestFromTimeoutExt;
#[cfg(feature = "runtime-tokio")]
pub use junction_runtime::TokioScheduler;
pub use junction_runtime::{Scheduler, TimerHandle};
