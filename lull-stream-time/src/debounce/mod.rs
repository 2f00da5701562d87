// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the debounce operators for streams.
//!
//! Trailing semantics:
//! - When a value arrives, start/restart the timer
//! - If no new value arrives before the timer expires, emit the latest value
//! - When the stream ends, emit any pending value immediately
//!
//! Leading semantics:
//! - When a value arrives outside a window, emit it and open a window
//! - Values arriving while the window is open are dropped
//! - The window closes when its timer expires; it is never extended

mod leading;
mod trailing;

use core::time::Duration;
use futures::Stream;
use lull_runtime::Timer;

use leading::LeadingDebounceStream;
use trailing::TrailingDebounceStream;

/// Extension trait providing the debounce operators for any `Stream`.
pub trait DebounceExt<T>: Stream<Item = T> + Sized {
    /// Emits the latest value once `duration` has passed on `timer` without
    /// a newer one arriving.
    fn debounce_with_timer<TM: Timer>(
        self,
        duration: Duration,
        timer: TM,
    ) -> impl Stream<Item = T> + Send + Unpin;

    /// Emits the first value of every window of length `duration` and drops
    /// the values that arrive while the window is open.
    fn debounce_leading_with_timer<TM: Timer>(
        self,
        duration: Duration,
        timer: TM,
    ) -> impl Stream<Item = T> + Send + Unpin;
}

impl<S, T> DebounceExt<T> for S
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    fn debounce_with_timer<TM: Timer>(
        self,
        duration: Duration,
        timer: TM,
    ) -> impl Stream<Item = T> + Send + Unpin {
        Box::pin(TrailingDebounceStream::new(self, duration, timer))
    }

    fn debounce_leading_with_timer<TM: Timer>(
        self,
        duration: Duration,
        timer: TM,
    ) -> impl Stream<Item = T> + Send + Unpin {
        Box::pin(LeadingDebounceStream::new(self, duration, timer))
    }
}
