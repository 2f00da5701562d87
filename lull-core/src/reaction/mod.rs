// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observable values and reactions to their changes.
//!
//! A [`Reaction`] watches a selection over an [`Observable`] and runs an
//! effect when the selection changes, optionally after a delay measured on a
//! [`VirtualClock`](lull_runtime::VirtualClock).
//!
//! The delayed reaction is a separate contract from the debouncer. It
//! schedules one run on the first change and ignores later changes until
//! that run happens, so it rate-limits instead of waiting for quiet.
//!
//! # Example
//!
//! ```
//! use lull_core::{Observable, Reaction, ReactionOptions};
//! use lull_runtime::VirtualClock;
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! let clock = VirtualClock::new();
//! let calls = Observable::new(Vec::<u32>::new());
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let _reaction = Reaction::new(
//!     &clock,
//!     &calls,
//!     |calls: &Vec<u32>| calls.len(),
//!     move |len, _previous| sink.lock().unwrap().push(len),
//!     ReactionOptions::default().with_delay(Duration::from_millis(500)),
//! )?;
//!
//! calls.update(|calls| calls.push(0));
//! clock.advance(Duration::from_millis(100));
//! calls.update(|calls| calls.push(1));
//! clock.advance(Duration::from_millis(400));
//!
//! assert_eq!(*seen.lock().unwrap(), vec![2]);
//! # Ok::<(), lull_error::LullError>(())
//! ```

mod implementation;
mod observable;
mod options;

pub use implementation::Reaction;
pub use observable::{Observable, ObserverId};
pub use options::ReactionOptions;
