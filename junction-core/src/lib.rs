// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core building blocks for joining independently-updating streams.
//!
//! Every operator in the workspace is assembled from the same handful of pieces:
//!
//! - [`StreamItem`] - a value or a terminal [`JunctionError`] travelling through a stream
//! - [`Slot`] / [`SlotSet`] - the latest value seen from each input and the completeness check
//! - [`Accumulator`] - state threaded through successive emissions by scan-style operators
//! - [`OperatorCore`] - the single critical section owned by one operator instance
//! - [`Input`] - an input stream of an instance, drained together with its siblings by one pump
//! - [`Emitter`] / [`Joined`] - the sink an operator publishes into and the stream its caller reads
//! - [`Subject`] - a hot, multicast source for feeding the same values to several operators
//! - [`JunctionTask`] / [`CancellationToken`] - cooperative background tasks

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod accumulator;
pub mod cancellation_token;
pub mod emitter;
pub mod error;
pub mod input;
pub mod junction_task;
pub mod operator;
pub mod slot;
pub mod stream_item;
pub mod subject;
pub mod subject_error;

pub use self::accumulator::Accumulator;
pub use self::cancellation_token::CancellationToken;
pub use self::emitter::{Dispose, Emitter, Joined};
pub use self::error::{JunctionError, Result};
pub use self::input::Input;
pub use self::junction_task::JunctionTask;
pub use self::operator::{Ending, OperatorCore, Teardown};
pub use self::slot::{Slot, SlotSet};
pub use self::stream_item::StreamItem;
pub use self::subject::Subject;
pub use self::subject_error::SubjectError;
