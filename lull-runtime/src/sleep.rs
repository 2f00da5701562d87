// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::instant::VirtualInstant;
use crate::virtual_clock::{TimerHandle, VirtualClock};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct SleepState {
    fired: bool,
    waker: Option<Waker>,
}

/// Future returned by [`Timer::sleep_future`](crate::Timer::sleep_future) on a
/// [`VirtualClock`].
///
/// Resolves once the clock has been advanced to the deadline. The first
/// pending poll registers a wake-up task on the clock; dropping the sleep
/// cancels it.
#[derive(Debug)]
pub struct VirtualSleep {
    clock: VirtualClock,
    deadline: VirtualInstant,
    state: Arc<Mutex<SleepState>>,
    handle: Option<TimerHandle>,
}

impl VirtualSleep {
    pub(crate) fn new(clock: VirtualClock, deadline: VirtualInstant) -> Self {
        Self {
            clock,
            deadline,
            state: Arc::new(Mutex::new(SleepState::default())),
            handle: None,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> VirtualInstant {
        self.deadline
    }

    #[must_use]
    pub fn is_elapsed(&self) -> bool {
        self.state.lock().fired || self.clock.now() >= self.deadline
    }
}

impl Future for VirtualSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();

        if this.is_elapsed() {
            if let Some(handle) = this.handle.take() {
                this.clock.cancel(handle);
            }
            return Poll::Ready(());
        }

        this.state.lock().waker = Some(cx.waker().clone());

        // Re-register when the wake task was dropped by a clock reset
        if !this
            .handle
            .is_some_and(|handle| this.clock.is_scheduled(handle))
        {
            let state = Arc::clone(&this.state);
            let handle = this.clock.schedule_at(this.deadline, move || {
                let waker = {
                    let mut state = state.lock();
                    state.fired = true;
                    state.waker.take()
                };
                if let Some(waker) = waker {
                    waker.wake();
                }
            });
            this.handle = Some(handle);
        }

        Poll::Pending
    }
}

impl Drop for VirtualSleep {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.clock.cancel(handle);
        }
    }
}
