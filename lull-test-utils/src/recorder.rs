// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every invocation of a target operation, in call order.
///
/// ```rust
/// use lull_test_utils::CallRecorder;
///
/// let recorder = CallRecorder::new();
/// let mut target = recorder.target();
/// target("Call: 0");
///
/// recorder.assert_called_once_with(&"Call: 0");
/// ```
#[derive(Debug)]
pub struct CallRecorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T: Send + 'static> CallRecorder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A closure that appends its argument to this recorder.
    pub fn target(&self) -> impl FnMut(T) + Send + 'static {
        let calls = Arc::clone(&self.calls);
        move |payload| calls.lock().push(payload)
    }

    /// A closure for change callbacks taking `(next, previous)` that records
    /// only `next`.
    pub fn change_target<P>(&self) -> impl FnMut(T, P) + Send + 'static {
        let calls = Arc::clone(&self.calls);
        move |next, _previous| calls.lock().push(next)
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.calls.lock().clone()
    }

    #[must_use]
    pub fn last_call(&self) -> Option<T>
    where
        T: Clone,
    {
        self.calls.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn assert_not_called(&self)
    where
        T: Debug,
    {
        let calls = self.calls.lock();
        assert!(calls.is_empty(), "expected no calls, got {:?}", *calls);
    }

    pub fn assert_called_once_with(&self, expected: &T)
    where
        T: Debug + PartialEq,
    {
        let calls = self.calls.lock();
        assert_eq!(
            calls.len(),
            1,
            "expected exactly one call with {expected:?}, got {:?}",
            *calls
        );
        assert_eq!(&calls[0], expected);
    }

    pub fn assert_calls(&self, expected: &[T])
    where
        T: Debug + PartialEq,
    {
        assert_eq!(self.calls.lock().as_slice(), expected);
    }
}

impl<T: Send + 'static> Default for CallRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CallRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}
