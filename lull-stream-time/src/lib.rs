// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounce operators for streams with a pluggable timer.
//!
//! The operators are written against the [`Timer`] trait, so the same code
//! runs on a [`VirtualClock`](lull_runtime::VirtualClock) in tests and on any
//! other time source that implements the trait.
//!
//! - **`DebounceExt::debounce_with_timer`** - trailing debounce; the latest
//!   value is emitted once the stream has been quiet for the whole duration
//! - **`DebounceExt::debounce_leading_with_timer`** - leading debounce; the
//!   first value of each window is emitted and the rest of the window dropped
//!
//! # Example
//!
//! ```rust
//! use futures::{FutureExt, StreamExt};
//! use lull_runtime::VirtualClock;
//! use lull_stream_time::DebounceExt;
//! use std::time::Duration;
//!
//! let clock = VirtualClock::new();
//! let mut debounced = futures::stream::iter(["Call: 0", "Call: 1"])
//!     .chain(futures::stream::pending())
//!     .debounce_with_timer(Duration::from_millis(500), clock.clone());
//!
//! assert_eq!(debounced.next().now_or_never(), None);
//! clock.advance(Duration::from_millis(500));
//! assert_eq!(debounced.next().now_or_never(), Some(Some("Call: 1")));
//! ```

mod debounce;
pub mod prelude;

pub use debounce::DebounceExt;
pub use lull_runtime::Timer;
