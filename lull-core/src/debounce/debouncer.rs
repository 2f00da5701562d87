// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::callback::Callback;
use crate::debounce::config::{DebounceConfig, DebounceMode, ValidatedDebounce};
use crate::logging::{debug, trace};
use core::fmt;
use core::mem;
use core::time::Duration;
use lull_error::Result;
use lull_runtime::{TimerHandle, VirtualClock, VirtualInstant};
use parking_lot::Mutex;
use std::sync::Arc;

enum Phase<T> {
    Idle,
    /// Trailing mode: an invocation with `payload` is scheduled at `due`.
    Pending {
        payload: T,
        due: VirtualInstant,
        first_requested_at: VirtualInstant,
        timer: TimerHandle,
    },
    /// Leading mode: the target ran at the start of a window ending at `closes_at`.
    ActiveWindow {
        closes_at: VirtualInstant,
        timer: TimerHandle,
    },
}

impl<T> Phase<T> {
    fn timer(&self) -> Option<TimerHandle> {
        match self {
            Phase::Idle => None,
            Phase::Pending { timer, .. } | Phase::ActiveWindow { timer, .. } => Some(*timer),
        }
    }
}

struct Shared<T> {
    phase: Mutex<Phase<T>>,
    target: Callback<T>,
}

impl<T: Send + 'static> Shared<T> {
    fn fire_task(shared: &Arc<Self>) -> impl FnOnce() + Send + 'static {
        let shared = Arc::clone(shared);
        move || shared.fire()
    }

    /// Runs when the phase timer is due: invokes a pending payload or closes
    /// the leading window.
    fn fire(&self) {
        let payload = match mem::replace(&mut *self.phase.lock(), Phase::Idle) {
            Phase::Pending { payload, due, .. } => {
                debug!("{}: trailing timer fired at {}", self.target.label(), due);
                Some(payload)
            }
            Phase::ActiveWindow { closes_at, .. } => {
                trace!("{}: window closed at {}", self.target.label(), closes_at);
                None
            }
            Phase::Idle => None,
        };

        if let Some(payload) = payload {
            self.target.invoke(payload);
        }
    }
}

/// Decides which of a sequence of requests reach the target operation, and when.
///
/// A debouncer binds one target, one [`DebounceConfig`] and one
/// [`VirtualClock`]. Every decision happens synchronously, either inside
/// [`request`](Self::request) or inside the clock's `advance`. At most one
/// timer is scheduled per debouncer at any moment. Dropping the debouncer
/// cancels it.
///
/// # Example
///
/// ```
/// use lull_core::{DebounceConfig, Debouncer};
/// use lull_runtime::VirtualClock;
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// let clock = VirtualClock::new();
/// let calls = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&calls);
/// let debouncer = Debouncer::new(
///     &clock,
///     DebounceConfig::trailing(Duration::from_millis(500)),
///     move |payload: &'static str| sink.lock().unwrap().push(payload),
/// )?;
///
/// debouncer.request("Call: 0");
/// clock.advance(Duration::from_millis(100));
/// debouncer.request("Call: 1");
/// clock.advance(Duration::from_millis(500));
///
/// assert_eq!(*calls.lock().unwrap(), vec!["Call: 1"]);
/// # Ok::<(), lull_error::LullError>(())
/// ```
pub struct Debouncer<T: Send + 'static> {
    clock: VirtualClock,
    settings: ValidatedDebounce,
    shared: Arc<Shared<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Validates `config` and binds `target` to `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`LullError::InvalidConfig`](lull_error::LullError::InvalidConfig)
    /// if the configuration is rejected by [`DebounceConfig::validate`].
    pub fn new<F>(clock: &VirtualClock, config: DebounceConfig, target: F) -> Result<Self>
    where
        F: FnMut(T) + Send + 'static,
    {
        let settings = config.validate()?;
        let label = format!("debouncer({:?}, {:?})", settings.mode(), settings.delay());
        debug!("created {}", label);

        Ok(Self {
            clock: clock.clone(),
            settings,
            shared: Arc::new(Shared {
                phase: Mutex::new(Phase::Idle),
                target: Callback::new(label, target),
            }),
        })
    }

    /// Records a call attempt at the clock's current instant.
    pub fn request(&self, payload: T) {
        match self.settings.mode() {
            DebounceMode::Trailing => self.request_trailing(payload),
            DebounceMode::Leading => self.request_leading(payload),
        }
    }

    fn request_trailing(&self, payload: T) {
        // A timer due at this very instant fires before the new request is accepted.
        if let Some(overdue) = self.take_overdue() {
            self.shared.target.invoke(overdue);
        }

        let now = self.clock.now();
        let mut phase = self.shared.phase.lock();
        self.settle_stale(&mut phase);
        let first_requested_at = match &*phase {
            Phase::Pending {
                first_requested_at,
                timer,
                ..
            } => {
                self.clock.cancel(*timer);
                *first_requested_at
            }
            Phase::ActiveWindow { timer, .. } => {
                self.clock.cancel(*timer);
                now
            }
            Phase::Idle => now,
        };

        let mut due = now + self.settings.delay();
        if let Some(max_wait) = self.settings.max_wait() {
            due = due.min(first_requested_at + max_wait);
        }

        let timer = self.clock.schedule_at(due, Shared::fire_task(&self.shared));
        let due = timer.due();
        trace!("{}: request at {} rescheduled to {}", self.shared.target.label(), now, due);
        *phase = Phase::Pending {
            payload,
            due,
            first_requested_at,
            timer,
        };
    }

    fn take_overdue(&self) -> Option<T> {
        let now = self.clock.now();
        let mut phase = self.shared.phase.lock();
        self.settle_stale(&mut phase);
        match &*phase {
            Phase::Pending { due, .. } if *due <= now => {}
            _ => return None,
        }

        match mem::replace(&mut *phase, Phase::Idle) {
            Phase::Pending { payload, timer, .. } => {
                self.clock.cancel(timer);
                debug!("{}: firing overdue timer at {}", self.shared.target.label(), now);
                Some(payload)
            }
            _ => None,
        }
    }

    fn request_leading(&self, payload: T) {
        let now = self.clock.now();
        {
            let mut phase = self.shared.phase.lock();
            self.settle_stale(&mut phase);
            match &*phase {
                Phase::ActiveWindow { closes_at, .. } if *closes_at > now => {
                    trace!("{}: request at {} ignored", self.shared.target.label(), now);
                    return;
                }
                Phase::ActiveWindow { timer, .. } | Phase::Pending { timer, .. } => {
                    self.clock.cancel(*timer);
                }
                Phase::Idle => {}
            }

            let timer = self
                .clock
                .schedule_at(now + self.settings.delay(), Shared::fire_task(&self.shared));
            let closes_at = timer.due();
            debug!("{}: window open until {}", self.shared.target.label(), closes_at);
            *phase = Phase::ActiveWindow { closes_at, timer };
        }

        self.shared.target.invoke(payload);
    }

    /// Drops a phase whose timer the clock no longer holds, which happens
    /// after [`VirtualClock::reset`]. The payload of such a phase is discarded.
    fn settle_stale(&self, phase: &mut Phase<T>) {
        if let Some(timer) = phase.timer() {
            if !self.clock.is_scheduled(timer) {
                debug!(
                    "{}: timer dropped by the clock, back to idle",
                    self.shared.target.label()
                );
                *phase = Phase::Idle;
            }
        }
    }

    /// Drops a pending invocation or closes an open window without invoking.
    /// Returns `false` if the debouncer was idle.
    pub fn cancel(&self) -> bool {
        let previous = {
            let mut phase = self.shared.phase.lock();
            self.settle_stale(&mut phase);
            mem::replace(&mut *phase, Phase::Idle)
        };
        match previous.timer() {
            Some(timer) => {
                self.clock.cancel(timer);
                debug!("{}: cancelled", self.shared.target.label());
                true
            }
            None => false,
        }
    }

    /// Invokes a pending trailing payload right away. Returns `false` if
    /// nothing was pending.
    pub fn flush(&self) -> bool {
        let payload = {
            let mut phase = self.shared.phase.lock();
            self.settle_stale(&mut phase);
            if !matches!(&*phase, Phase::Pending { .. }) {
                return false;
            }
            match mem::replace(&mut *phase, Phase::Idle) {
                Phase::Pending { payload, timer, .. } => {
                    self.clock.cancel(timer);
                    payload
                }
                _ => return false,
            }
        };

        debug!("{}: flushed", self.shared.target.label());
        self.shared.target.invoke(payload);
        true
    }

    /// `true` while a trailing invocation is scheduled or a leading window is open.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        let mut phase = self.shared.phase.lock();
        self.settle_stale(&mut phase);
        !matches!(&*phase, Phase::Idle)
    }

    /// Instant at which the current timer fires, if any.
    #[must_use]
    pub fn next_fire_at(&self) -> Option<VirtualInstant> {
        let mut phase = self.shared.phase.lock();
        self.settle_stale(&mut phase);
        match &*phase {
            Phase::Idle => None,
            Phase::Pending { due, .. } => Some(*due),
            Phase::ActiveWindow { closes_at, .. } => Some(*closes_at),
        }
    }

    #[must_use]
    pub fn mode(&self) -> DebounceMode {
        self.settings.mode()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.settings.delay()
    }

    #[must_use]
    pub fn max_wait(&self) -> Option<Duration> {
        self.settings.max_wait()
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T: Send + 'static> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("mode", &self.settings.mode())
            .field("delay", &self.settings.delay())
            .field("max_wait", &self.settings.max_wait())
            .field("next_fire_at", &self.next_fire_at())
            .finish()
    }
}
