// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

type Observer = Arc<dyn Fn() + Send + Sync>;

/// Identifies a change observer registered on an [`Observable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct ObservableState<T> {
    value: T,
    version: u64,
    next_observer: u64,
    observers: Vec<(ObserverId, Observer)>,
}

/// A value cell that notifies its observers synchronously after every change.
///
/// Clones share the same value. Observers run after the internal lock is
/// released, so they may read the observable (but a selector passed to
/// [`with`](Self::with) must not mutate it).
pub struct Observable<T> {
    state: Arc<Mutex<ObservableState<T>>>,
}

impl<T: Send + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(ObservableState {
                value,
                version: 0,
                next_observer: 0,
                observers: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.state.lock().value.clone()
    }

    /// Reads the current value through `read`.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.state.lock().value)
    }

    /// Replaces the value and notifies observers.
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Mutates the value in place and notifies observers.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let (result, observers) = {
            let mut state = self.state.lock();
            let result = mutate(&mut state.value);
            state.version += 1;
            let observers: Vec<Observer> = state
                .observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect();
            (result, observers)
        };

        for observer in observers {
            observer();
        }
        result
    }

    /// Number of changes applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.lock().version
    }

    /// Registers `observer` to run after every change.
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut state = self.state.lock();
        let id = ObserverId(state.next_observer);
        state.next_observer += 1;
        state.observers.push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut state = self.state.lock();
        let before = state.observers.len();
        state.observers.retain(|(observer_id, _)| *observer_id != id);
        state.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Default + Send + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Observable")
            .field("value", &state.value)
            .field("version", &state.version)
            .field("observers", &state.observers.len())
            .finish()
    }
}
