// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic debouncing on virtual time.
//!
//! `lull` decides which of a sequence of call requests reach a target
//! operation, and when, without ever waiting on a wall clock:
//!
//! - [`Debouncer`] in [`DebounceMode::Trailing`] collapses a burst into one
//!   call with the last payload, `delay` after the last request
//! - [`Debouncer`] in [`DebounceMode::Leading`] calls immediately with the
//!   first payload and ignores the rest of a fixed window
//! - [`Reaction`] re-runs an effect after a delay when a selection over an
//!   [`Observable`] changes; it absorbs changes during the delay instead of
//!   rescheduling, so it does not collapse long bursts
//! - [`VirtualClock`] is the only source of time; it moves when a test calls
//!   [`advance`](VirtualClock::advance) and fires due timers synchronously
//!
//! # Example
//!
//! ```rust
//! use lull::prelude::*;
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! let clock = VirtualClock::new();
//! let calls = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&calls);
//! let debouncer = Debouncer::new(
//!     &clock,
//!     DebounceConfig::leading(Duration::from_millis(500)),
//!     move |payload: &'static str| sink.lock().unwrap().push(payload),
//! )?;
//!
//! debouncer.request("Call: 0");
//! clock.advance(Duration::from_millis(100));
//! debouncer.request("Call: 1");
//! clock.advance(Duration::from_millis(500));
//!
//! assert_eq!(*calls.lock().unwrap(), vec!["Call: 0"]);
//! # Ok::<(), LullError>(())
//! ```

pub use lull_core::{
    DebounceConfig, DebounceMode, Debouncer, Observable, ObserverId, Reaction, ReactionOptions,
    ValidatedDebounce,
};
pub use lull_error::{LullError, Result};
pub use lull_runtime::{Timer, TimerHandle, VirtualClock, VirtualInstant, VirtualSleep};
pub use lull_stream_time::DebounceExt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use lull_core::{
        DebounceConfig, DebounceMode, Debouncer, Observable, Reaction, ReactionOptions,
    };
    pub use lull_error::LullError;
    pub use lull_runtime::{Timer, VirtualClock, VirtualInstant};
    pub use lull_stream_time::DebounceExt;
}
