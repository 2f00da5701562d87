// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deferred invocation of a target operation.
//!
//! Two mutually exclusive modes are supported:
//!
//! - **Trailing**: each request cancels the pending invocation and schedules
//!   a new one `delay` later, carrying the latest payload. The target runs
//!   once the requests have been quiet for the whole delay.
//! - **Leading**: a request while idle invokes the target immediately and
//!   opens a window of `delay`; requests inside the window are ignored and
//!   do not extend it.
//!
//! When a request lands on the exact instant its pending timer is due, the
//! timer fires first and the request starts a fresh cycle. The same holds
//! for a leading window whose close instant equals the request instant.
//!
//! Trailing mode optionally accepts a max wait, bounding how long a
//! continuous burst can postpone the invocation.

mod config;
mod debouncer;

pub use config::{DebounceConfig, DebounceMode, ValidatedDebounce};
pub(crate) use config::{duration_to_millis, non_negative_millis};
pub use debouncer::Debouncer;
