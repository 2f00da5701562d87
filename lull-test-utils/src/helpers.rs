// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::{FutureExt, Stream};

/// Polls `stream` once and panics if it yields anything.
///
/// Virtual time never moves while polling, so a single poll is conclusive.
pub fn assert_no_element_emitted<S, T>(stream: &mut S)
where
    S: Stream<Item = T> + Unpin,
    T: core::fmt::Debug,
{
    if let Some(item) = stream.next().now_or_never() {
        panic!("Unexpected element emitted, expected no output: {item:?}");
    }
}

/// Polls `stream` once and returns the element it yields.
///
/// # Panics
///
/// Panics if the stream is not ready or has ended.
pub fn unwrap_stream<S, T>(stream: &mut S) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match stream.next().now_or_never() {
        Some(Some(item)) => item,
        Some(None) => panic!("stream ended, expected an element"),
        None => panic!("stream not ready, expected an element"),
    }
}

/// Polls `stream` once and asserts that it has ended.
pub fn assert_stream_ended<S, T>(stream: &mut S)
where
    S: Stream<Item = T> + Unpin,
    T: core::fmt::Debug,
{
    match stream.next().now_or_never() {
        Some(None) => {}
        Some(Some(item)) => panic!("expected end of stream, got {item:?}"),
        None => panic!("expected end of stream, stream still pending"),
    }
}
