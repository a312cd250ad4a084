// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting every operator of this crate.
//!
//! ```rust
//! use junction_stream::prelude::*;
//! ```

pub use crate::combine_latest::*;
pub use crate::with_latest_from::WithLatestFromExt;
pub use crate::with_previous::WithPreviousExt;
pub use junction_core::{Joined, JunctionError, StreamItem};
