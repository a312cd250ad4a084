// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for Junction operators
//!
//! Every failure that can end a joined stream is represented by [`JunctionError`]. Errors travel
//! in-band as [`StreamItem::Error`](crate::StreamItem::Error) and are always terminal: an operator
//! forwards the first error it sees and then stops.
//!
//! # Examples
//!
//! ```
//! use junction_core::{JunctionError, Result};
//!
//! fn process_data() -> Result<()> {
//!     Err(JunctionError::stream_error("Stream not ready"))
//! }
//!
//! assert!(process_data().is_err());
//! ```

use std::any::Any;

/// Root error type for all Junction operations
#[derive(Debug, thiserror::Error)]
pub enum JunctionError {
    /// Stream processing encountered an error
    ///
    /// This is the general error upstream producers use to fail a stream.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps an arbitrary error so producers can fail a stream with their own error type.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A user-supplied combinator, accumulator or handler panicked
    ///
    /// The panic is caught at the operator boundary and turned into a terminal error
    /// instead of tearing down the task that happened to deliver the value.
    #[error("Callback panicked in {operator}: {message}")]
    CallbackPanicked {
        /// Name of the operator whose callback panicked
        operator: &'static str,
        /// Panic payload rendered as text
        message: String,
    },
}

impl JunctionError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Build a [`JunctionError::CallbackPanicked`] from a caught panic payload.
    ///
    /// `&str` and `String` payloads (everything `panic!` produces) are kept verbatim.
    pub fn callback_panicked(operator: &'static str, payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };

        Self::CallbackPanicked { operator, message }
    }
}

/// Specialized Result type for Junction operations
pub type Result<T> = std::result::Result<T, JunctionError>;

impl Clone for JunctionError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // For UserError, we can't clone the boxed error, so convert to string
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {}", e),
            },
            Self::CallbackPanicked { operator, message } => Self::CallbackPanicked {
                operator,
                message: message.clone(),
            },
        }
    }
}
