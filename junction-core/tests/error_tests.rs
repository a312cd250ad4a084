// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use junction_core::{JunctionError, Result, SubjectError};
use std::error::Error;
use std::io;

#[test]
fn test_error_display() {
    let err = JunctionError::stream_error("processing failed");
    assert_eq!(err.to_string(), "Stream processing error: processing failed");

    let err = JunctionError::user_error(io::Error::other("disk gone"));
    assert_eq!(err.to_string(), "User error: disk gone");
}

#[test]
fn test_user_error_keeps_source() {
    let err = JunctionError::user_error(io::Error::other("disk gone"));
    assert!(err.source().is_some());
}

#[test]
fn test_clone_downgrades_user_error_to_text() {
    let err = JunctionError::user_error(io::Error::other("disk gone"));
    let cloned = err.clone();
    assert!(matches!(
        cloned,
        JunctionError::StreamProcessingError { ref context } if context == "User error: disk gone"
    ));
}

#[test]
fn test_callback_panicked_from_str_payload() {
    let payload: Box<dyn std::any::Any + Send> = Box::new("bad input");
    let err = JunctionError::callback_panicked("combine_latest", &*payload);
    assert_eq!(err.to_string(), "Callback panicked in combine_latest: bad input");
}

#[test]
fn test_callback_panicked_from_string_payload() {
    let payload: Box<dyn std::any::Any + Send> = Box::new(format!("index {}", 3));
    let err = JunctionError::callback_panicked("periodic", &*payload);
    assert!(matches!(
        err,
        JunctionError::CallbackPanicked { operator: "periodic", ref message } if message == "index 3"
    ));
}

#[test]
fn test_callback_panicked_from_opaque_payload() {
    let payload: Box<dyn std::any::Any + Send> = Box::new(17_u32);
    let err = JunctionError::callback_panicked("accumulate", &*payload);
    assert!(err.to_string().ends_with("non-string panic payload"));
}

#[test]
fn test_result_alias_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(JunctionError::stream_error("inner"))
    }
    fn outer() -> Result<i32> {
        let value = inner()?;
        Ok(value + 1)
    }
    assert!(outer().is_err());
}

#[test]
fn test_subject_error_closed_display() {
    let error = SubjectError::Closed;
    assert_eq!(error.to_string(), "Subject is closed");
    assert_eq!(error.clone(), SubjectError::Closed);
}
