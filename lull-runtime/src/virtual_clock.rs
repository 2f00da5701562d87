// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deterministic virtual clock with an ordered timer queue.
//!
//! The clock never moves on its own. Time only advances through
//! [`VirtualClock::advance`], [`VirtualClock::advance_to`] or
//! [`VirtualClock::run_until_idle`], and every scheduled task whose due
//! instant falls inside the advanced window runs synchronously on the
//! calling thread, ordered by due instant and then by scheduling order.
//!
//! A clock is an ordinary value: clones share the same timeline, and two
//! independently created clocks never observe each other's timers. Tests
//! create one per case instead of installing a process-wide fake.
//!
//! # Example
//!
//! ```
//! use lull_runtime::VirtualClock;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = VirtualClock::new();
//! let fired = Arc::new(AtomicUsize::new(0));
//!
//! let counter = Arc::clone(&fired);
//! clock.schedule_after(Duration::from_millis(500), move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! clock.advance(Duration::from_millis(499));
//! assert_eq!(fired.load(Ordering::SeqCst), 0);
//!
//! clock.advance(Duration::from_millis(1));
//! assert_eq!(fired.load(Ordering::SeqCst), 1);
//! ```

use crate::instant::VirtualInstant;
use crate::logging::{debug, trace};
use crate::sleep::VirtualSleep;
use crate::timer::Timer;
use core::fmt;
use core::time::Duration;
use lull_error::{LullError, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Minimum delay of a task scheduled at or before `now` while another task fires.
const NESTED_MIN_DELAY: Duration = Duration::from_millis(1);

/// Identifies one scheduled task on a [`VirtualClock`].
///
/// Handles order by due instant first, then by scheduling sequence, which is
/// exactly the order in which the clock fires them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle {
    due: VirtualInstant,
    seq: u64,
}

impl TimerHandle {
    /// Instant at which the task fires.
    #[must_use]
    pub const fn due(&self) -> VirtualInstant {
        self.due
    }
}

struct ClockState {
    origin: VirtualInstant,
    now: VirtualInstant,
    next_seq: u64,
    /// Number of tasks currently running on this clock.
    firing: usize,
    queue: BTreeMap<TimerHandle, Task>,
}

/// Shared handle to a virtual timeline and its timer queue.
#[derive(Clone)]
pub struct VirtualClock {
    state: Arc<Mutex<ClockState>>,
}

impl VirtualClock {
    /// Creates a clock at virtual time zero with no scheduled timers.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(VirtualInstant::ZERO)
    }

    /// Creates a clock whose timeline starts at `origin`.
    #[must_use]
    pub fn starting_at(origin: VirtualInstant) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState {
                origin,
                now: origin,
                next_seq: 0,
                firing: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn now(&self) -> VirtualInstant {
        self.state.lock().now
    }

    /// Virtual time elapsed since the clock's origin.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let state = self.state.lock();
        state.now - state.origin
    }

    /// Schedules `task` to run when the clock reaches `due`.
    ///
    /// A `due` instant in the past is clamped to the current instant, so the
    /// task fires on the next non-zero advance. While a task is firing, a
    /// `due` at or before the current instant is pushed 1ms into the future
    /// instead, so a task that keeps rescheduling itself with no delay cannot
    /// stall an advance.
    pub fn schedule_at<F>(&self, due: VirtualInstant, task: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.state.lock();
        let due = if state.firing > 0 && due <= state.now {
            state.now + NESTED_MIN_DELAY
        } else {
            due.max(state.now)
        };
        let handle = TimerHandle {
            due,
            seq: state.next_seq,
        };
        state.next_seq += 1;
        state.queue.insert(handle, Box::new(task));
        trace!("scheduled timer #{} at {} (now {})", handle.seq, due, state.now);
        handle
    }

    /// Schedules `task` to run `delay` after the current instant.
    pub fn schedule_after<F>(&self, delay: Duration, task: F) -> TimerHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let due = self.now() + delay;
        self.schedule_at(due, task)
    }

    /// Removes a scheduled task. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&self, handle: TimerHandle) -> bool {
        let removed = self.state.lock().queue.remove(&handle);
        if removed.is_some() {
            trace!("cancelled timer #{} due at {}", handle.seq, handle.due);
        }
        // The task is dropped here, outside the lock.
        removed.is_some()
    }

    #[must_use]
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.state.lock().queue.contains_key(&handle)
    }

    /// Number of tasks waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Due instant of the next task to fire, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<VirtualInstant> {
        self.state.lock().queue.keys().next().map(TimerHandle::due)
    }

    /// Moves time forward by `duration`, firing every task due within
    /// `[now, now + duration]`.
    ///
    /// Tasks scheduled by a firing task run in the same call when they fall
    /// due inside the window. Advancing by zero never fires anything.
    /// Returns the number of tasks fired.
    pub fn advance(&self, duration: Duration) -> usize {
        if duration.is_zero() {
            return 0;
        }
        let target = self.now() + duration;
        self.run_until(target)
    }

    /// Moves time forward to `target`. A target at or before the current
    /// instant leaves the clock untouched.
    pub fn advance_to(&self, target: VirtualInstant) -> usize {
        let now = self.now();
        if target <= now {
            debug!("ignoring advance_to({}) at {}", target, now);
            return 0;
        }
        self.run_until(target)
    }

    /// Fires tasks in due order, jumping the clock to each due instant, until
    /// the queue is empty.
    ///
    /// # Errors
    ///
    /// Returns [`LullError::ResourceLimitExceeded`] if more than `limit`
    /// tasks fire and the queue is still not empty, which means tasks keep
    /// rescheduling themselves.
    pub fn run_until_idle(&self, limit: usize) -> Result<usize> {
        let mut fired = 0;
        loop {
            if fired == limit && self.pending_timers() > 0 {
                return Err(LullError::resource_limit("virtual clock timers", limit));
            }
            match self.pop_due(VirtualInstant::MAX) {
                Some(task) => {
                    self.fire(task);
                    fired += 1;
                }
                None => return Ok(fired),
            }
        }
    }

    /// Drops every scheduled task and rewinds the clock to its origin.
    ///
    /// Handles to the dropped tasks stay valid but report `false` from
    /// [`is_scheduled`](Self::is_scheduled); their owners use that to fall
    /// back to idle.
    pub fn reset(&self) {
        let dropped = {
            let mut state = self.state.lock();
            state.now = state.origin;
            core::mem::take(&mut state.queue)
        };
        debug!("reset virtual clock, dropped {} timers", dropped.len());
    }

    fn run_until(&self, target: VirtualInstant) -> usize {
        debug!("advancing virtual clock to {}", target);
        let mut fired = 0;
        while let Some(task) = self.pop_due(target) {
            self.fire(task);
            fired += 1;
        }

        let mut state = self.state.lock();
        if state.now < target {
            state.now = target;
        }
        fired
    }

    fn fire(&self, task: Task) {
        self.state.lock().firing += 1;
        let _guard = FiringGuard { clock: self };
        task();
    }

    fn pop_due(&self, limit: VirtualInstant) -> Option<Task> {
        let mut state = self.state.lock();
        let entry = state.queue.first_entry()?;
        if entry.key().due > limit {
            return None;
        }
        let (handle, task) = entry.remove_entry();
        if state.now < handle.due {
            state.now = handle.due;
        }
        trace!("firing timer #{} at {}", handle.seq, handle.due);
        Some(task)
    }
}

struct FiringGuard<'a> {
    clock: &'a VirtualClock,
}

impl Drop for FiringGuard<'_> {
    fn drop(&mut self) {
        self.clock.state.lock().firing -= 1;
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("VirtualClock")
            .field("now", &state.now)
            .field("pending_timers", &state.queue.len())
            .finish()
    }
}

impl Timer for VirtualClock {
    type Sleep = VirtualSleep;
    type Instant = VirtualInstant;

    fn sleep_future(&self, duration: Duration) -> VirtualSleep {
        VirtualSleep::new(self.clone(), self.now() + duration)
    }

    fn now(&self) -> VirtualInstant {
        VirtualClock::now(self)
    }
}
