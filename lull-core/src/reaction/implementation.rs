// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::callback::Callback;
use crate::logging::{debug, trace};
use crate::reaction::observable::{Observable, ObserverId};
use crate::reaction::options::ReactionOptions;
use core::fmt;
use core::mem;
use core::time::Duration;
use lull_error::Result;
use lull_runtime::{TimerHandle, VirtualClock};
use parking_lot::Mutex;
use std::sync::Arc;

struct ReactionState<V> {
    last: V,
    scheduled: Option<TimerHandle>,
    disposed: bool,
}

struct ReactionShared<T, V> {
    name: String,
    clock: VirtualClock,
    source: Observable<T>,
    selector: Box<dyn Fn(&T) -> V + Send + Sync>,
    effect: Callback<(V, Option<V>)>,
    delay: Option<Duration>,
    state: Mutex<ReactionState<V>>,
}

impl<T, V> ReactionShared<T, V>
where
    T: Send + 'static,
    V: Clone + PartialEq + Send + 'static,
{
    fn on_change(self: &Arc<Self>) {
        let Some(delay) = self.delay else {
            self.run();
            return;
        };

        let mut state = self.state.lock();
        if state.disposed {
            return;
        }
        if let Some(handle) = state.scheduled {
            if self.clock.is_scheduled(handle) {
                trace!("reaction '{}': change absorbed by scheduled run", self.name);
                return;
            }
            debug!("reaction '{}': scheduled run dropped by the clock", self.name);
        }

        let shared = Arc::clone(self);
        let handle = self.clock.schedule_after(delay, move || shared.run());
        debug!("reaction '{}': run scheduled at {}", self.name, handle.due());
        state.scheduled = Some(handle);
    }

    fn run(&self) {
        {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.scheduled = None;
        }

        let next = self.source.with(|value| (self.selector)(value));
        let previous = {
            let mut state = self.state.lock();
            if state.last == next {
                return;
            }
            mem::replace(&mut state.last, next.clone())
        };

        debug!("reaction '{}': selection changed, running effect", self.name);
        self.effect.invoke((next, Some(previous)));
    }
}

/// Runs an effect when a selection over an [`Observable`] changes.
///
/// The effect receives the new selection and the previous one. On creation
/// the selector is evaluated once; the effect only runs then, with no
/// previous selection, if [`ReactionOptions::fire_immediately`] is set.
/// Afterwards:
///
/// - without a delay, every change re-evaluates the selector synchronously;
/// - with a delay, the first change schedules a single run `delay` later and
///   further changes are absorbed until that run happens. The run evaluates
///   the selector once and calls the effect if the selection differs from
///   the last one observed.
///
/// The delayed form therefore does not behave like a trailing debouncer: a
/// burst of changes spanning several delays produces one effect call per
/// elapsed delay window, and the effect receives the selection rather than
/// anything passed along with the change.
///
/// Dropping the reaction disposes it.
pub struct Reaction<T, V>
where
    T: Send + 'static,
    V: Clone + PartialEq + Send + 'static,
{
    shared: Arc<ReactionShared<T, V>>,
    observer: ObserverId,
}

impl<T, V> Reaction<T, V>
where
    T: Send + 'static,
    V: Clone + PartialEq + Send + 'static,
{
    /// Starts observing `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LullError::InvalidConfig`](lull_error::LullError::InvalidConfig)
    /// if `options.delay_ms` is negative.
    pub fn new<S, E>(
        clock: &VirtualClock,
        source: &Observable<T>,
        selector: S,
        mut effect: E,
        options: ReactionOptions,
    ) -> Result<Self>
    where
        S: Fn(&T) -> V + Send + Sync + 'static,
        E: FnMut(V, Option<V>) + Send + 'static,
    {
        let delay = options.scheduling_delay()?;
        let name = options.name.unwrap_or_else(|| "reaction".to_string());
        let initial = source.with(|value| selector(value));

        let shared = Arc::new(ReactionShared {
            effect: Callback::new(
                format!("reaction '{name}'"),
                move |(next, previous): (V, Option<V>)| effect(next, previous),
            ),
            name,
            clock: clock.clone(),
            source: source.clone(),
            selector: Box::new(selector),
            delay,
            state: Mutex::new(ReactionState {
                last: initial.clone(),
                scheduled: None,
                disposed: false,
            }),
        });

        let weak = Arc::downgrade(&shared);
        let observer = source.observe(move || {
            if let Some(shared) = weak.upgrade() {
                shared.on_change();
            }
        });
        debug!("reaction '{}' created with delay {:?}", shared.name, delay);

        if options.fire_immediately {
            shared.effect.invoke((initial, None));
        }

        Ok(Self { shared, observer })
    }

    /// Stops observing and cancels a scheduled run. Idempotent.
    pub fn dispose(&self) {
        let scheduled = {
            let mut state = self.shared.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.scheduled.take()
        };

        if let Some(handle) = scheduled {
            self.shared.clock.cancel(handle);
        }
        self.shared.source.unobserve(self.observer);
        debug!("reaction '{}' disposed", self.shared.name);
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.state.lock().disposed
    }

    /// `true` while a delayed run is waiting on the clock.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.shared
            .state
            .lock()
            .scheduled
            .is_some_and(|handle| self.shared.clock.is_scheduled(handle))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    #[must_use]
    pub fn delay(&self) -> Option<Duration> {
        self.shared.delay
    }

    /// The selection the effect last ran with, or the initial one.
    #[must_use]
    pub fn last_value(&self) -> V {
        self.shared.state.lock().last.clone()
    }
}

impl<T, V> Drop for Reaction<T, V>
where
    T: Send + 'static,
    V: Clone + PartialEq + Send + 'static,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T, V> fmt::Debug for Reaction<T, V>
where
    T: Send + 'static,
    V: Clone + PartialEq + Send + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Reaction")
            .field("name", &self.shared.name)
            .field("delay", &self.shared.delay)
            .field("last", &state.last)
            .field("scheduled", &state.scheduled.is_some())
            .field("disposed", &state.disposed)
            .finish()
    }
}
