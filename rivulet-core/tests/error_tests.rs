// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{IntoRivuletError, Notification, Result, ResultExt, RivuletError, StreamItem};
use std::io;

#[test]
fn test_result_context_adds_information() {
    let result: Result<()> = Err(RivuletError::user_error(io::Error::other("original error")));
    let err = result.context("while parsing body").unwrap_err();

    let message = err.to_string();
    assert!(message.contains("while parsing body"));
    assert!(message.contains("original error"));
}

#[test]
fn test_context_keeps_typed_errors() {
    let result: Result<()> = Err(RivuletError::status_error(404, "http://example.test/a"));
    let err = result.with_context(|| "ignored".to_string()).unwrap_err();

    assert!(matches!(err, RivuletError::Status { status: 404, .. }));
}

#[test]
fn test_classification() {
    assert!(RivuletError::transport_error("reset").is_transport());
    assert!(RivuletError::status_error(500, "u").is_transport());
    assert!(RivuletError::parse_error("bad").is_parse());
    assert!(!RivuletError::parse_error("bad").is_transport());
    assert!(!RivuletError::stream_error("x").is_parse());
}

#[test]
fn test_clone_flattens_user_errors() {
    let err = io::Error::other("disk on fire").into_rivulet();
    let cloned = err.clone();

    assert!(matches!(cloned, RivuletError::StreamProcessingError { .. }));
    assert!(cloned.to_string().contains("disk on fire"));
}

#[test]
fn test_status_error_display() {
    let err = RivuletError::status_error(503, "http://example.test/");
    assert_eq!(
        err.to_string(),
        "Request to http://example.test/ failed with status 503"
    );
}

#[test]
fn test_notification_terminality() {
    assert!(!Notification::Next(1).is_terminal());
    assert!(Notification::Complete(1).is_terminal());
    assert!(Notification::<i32>::Error(RivuletError::stream_error("x")).is_terminal());
    assert!(Notification::<i32>::Cancelled.is_terminal());
}

#[test]
fn test_notification_into_stream_item() {
    assert_eq!(
        Notification::Complete(3).into_stream_item(),
        Some(StreamItem::Value(3))
    );
    assert!(Notification::<i32>::Cancelled.into_stream_item().is_none());
    assert!(Notification::<i32>::Error(RivuletError::stream_error("x"))
        .into_stream_item()
        .is_some_and(|item| item.is_error()));
}

#[test]
fn test_stream_item_result_round_trip() {
    let item: StreamItem<i32> = Ok(5).into();
    let result: Result<i32> = item.into();
    assert_eq!(result.unwrap(), 5);
}
