// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet::prelude::*;
use rivulet_test_utils::{next_item, MockTransport};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_deadline_through_external_signal() -> anyhow::Result<()> {
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.clone());

    // A deadline is just an external signal the caller fires later
    let deadline = CancellationToken::new();
    let slow = fetcher.fetch(
        "https://example.com/slow",
        FetchOptions::new().signal(Arc::new(deadline.clone())),
    );
    let mut stream = slow.stream();

    let timer = deadline.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        timer.cancel();
    });

    // The window ends without a value or an error
    assert!(next_item(&mut stream).await.is_none());
    assert_eq!(transport.aborts(), 1);
    assert!(!transport.respond(Response::ok("too late")));

    Ok(())
}

#[tokio::test]
async fn test_failure_reaches_every_listener_once() -> anyhow::Result<()> {
    let transport = MockTransport::new();
    let fetcher = Fetcher::new(transport.clone());
    let page = fetcher.fetch(
        "https://example.com/gone",
        FetchOptions::new().error_for_status(true),
    );

    let mut first = page.stream();
    let mut second = page.stream();
    transport.respond(Response::new(410, "gone"));

    for stream in [&mut first, &mut second] {
        let item = next_item(&mut *stream).await.expect("terminal error");
        assert!(item.is_error());
        assert!(next_item(&mut *stream).await.is_none());
    }
    assert_eq!(transport.calls(), 1);

    Ok(())
}
