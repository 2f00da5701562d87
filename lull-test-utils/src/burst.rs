// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Request bursts interleaved with virtual clock advances.

use lull_runtime::VirtualClock;
use std::time::Duration;

/// Gaps in milliseconds between consecutive requests of the reference bursts.
///
/// Every gap is shorter than the reference delay of [`REFERENCE_DELAY_MS`].
pub const BURST_INTERVALS: [&[u64]; 3] = [
    &[100, 200, 300, 400],
    &[100, 300, 200],
    &[100, 100, 100],
];

/// Delay used by the reference bursts.
pub const REFERENCE_DELAY_MS: u64 = 500;

#[must_use]
pub const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Payload carried by the `index`-th request of a burst.
#[must_use]
pub fn call_payload(index: usize) -> String {
    format!("Call: {index}")
}

/// Issues one request per interval and advances the clock by that interval
/// after each request.
///
/// `request` receives the zero-based index of the request.
pub fn drive_burst(clock: &VirtualClock, intervals: &[u64], mut request: impl FnMut(usize)) {
    for (index, interval) in intervals.iter().enumerate() {
        request(index);
        clock.advance(ms(*interval));
    }
}
