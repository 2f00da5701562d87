// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::warning;
use parking_lot::Mutex;

/// User-supplied operation invoked by a debouncer or a reaction.
///
/// Invocations are serialized through a mutex. When the operation re-enters
/// its own owner and that owner tries to invoke it again, the nested call
/// is skipped instead of deadlocking.
pub(crate) struct Callback<A> {
    label: String,
    operation: Mutex<Box<dyn FnMut(A) + Send>>,
}

impl<A> Callback<A> {
    pub(crate) fn new<F>(label: impl Into<String>, operation: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        Self {
            label: label.into(),
            operation: Mutex::new(Box::new(operation)),
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Runs the operation with `arg`. Returns `false` if the call was
    /// skipped because the operation is already running.
    pub(crate) fn invoke(&self, arg: A) -> bool {
        match self.operation.try_lock() {
            Some(mut operation) => {
                (operation)(arg);
                true
            }
            None => {
                warning!("skipping reentrant invocation of {}", self.label);
                false
            }
        }
    }
}
