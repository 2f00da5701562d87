// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deferred invocation driven by a virtual clock.
//!
//! # Overview
//!
//! - **`Debouncer`** - leading or trailing debounce of a target operation
//! - **`DebounceConfig`** - validated, serde-friendly debouncer settings
//! - **`Observable`** - value cell with synchronous change notification
//! - **`Reaction`** - effect run on selection changes, optionally delayed
//!
//! All decisions happen synchronously inside `request`, `update` or the
//! clock's `advance`. Nothing runs in the background.

mod callback;
pub mod debounce;
mod logging;
pub mod reaction;

pub use debounce::{DebounceConfig, DebounceMode, Debouncer, ValidatedDebounce};
pub use reaction::{Observable, ObserverId, Reaction, ReactionOptions};
