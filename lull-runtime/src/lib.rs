// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Virtual time for deterministic tests of deferral logic.
//!
//! - **`VirtualClock`** - explicitly passed clock with an ordered timer queue
//! - **`VirtualInstant`** - a point on the virtual timeline
//! - **`VirtualSleep`** - future that resolves when the clock reaches a deadline
//! - **`Timer`** - abstraction over time sources used by the stream operators

mod instant;
mod logging;
mod sleep;
pub mod timer;
pub mod virtual_clock;

pub use instant::VirtualInstant;
pub use sleep::VirtualSleep;
pub use timer::Timer;
pub use virtual_clock::{TimerHandle, VirtualClock};

/// Default iteration limit for [`VirtualClock::run_until_idle`].
pub const DEFAULT_DRAIN_LIMIT: usize = 1_000;
