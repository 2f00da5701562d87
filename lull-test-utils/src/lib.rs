// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the lull workspace.
//!
//! This crate provides helpers shared by the integration tests of the other
//! crates. It is designed for use in development and testing only.
//!
//! # Key Types
//!
//! - `CallRecorder<T>` - captures the payloads a debouncer or reaction hands
//!   to its target
//! - `burst` - reference request bursts and a driver that interleaves them
//!   with virtual clock advances
//! - `helpers` - single-poll stream assertions for virtual-time tests
//! - `test_channel` - push side for stream operator tests
//!
//! # Example
//!
//! ```rust
//! use lull_runtime::VirtualClock;
//! use lull_test_utils::burst::{call_payload, drive_burst};
//! use lull_test_utils::CallRecorder;
//!
//! let clock = VirtualClock::new();
//! let recorder = CallRecorder::new();
//! let mut target = recorder.target();
//!
//! drive_burst(&clock, &[100, 200], |index| target(call_payload(index)));
//!
//! assert_eq!(recorder.calls(), vec!["Call: 0".to_string(), "Call: 1".to_string()]);
//! assert_eq!(clock.now().as_millis(), 300);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod burst;
pub mod helpers;
pub mod recorder;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream};
pub use recorder::CallRecorder;

/// Creates an unbounded test channel whose receiving side is a `Stream`.
///
/// ```rust
/// use lull_test_utils::{test_channel, unwrap_stream};
///
/// let (tx, mut stream) = test_channel();
/// tx.send(42).unwrap();
/// assert_eq!(unwrap_stream(&mut stream), 42);
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
