// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::debounce::{duration_to_millis, non_negative_millis};
use core::time::Duration;
use lull_error::Result;
use serde::{Deserialize, Serialize};

/// Settings for a [`Reaction`](crate::Reaction).
///
/// A missing or zero `delay_ms` makes the reaction run synchronously on
/// every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<i64>,
    /// Run the effect once with the initial selection at creation.
    pub fire_immediately: bool,
}

impl ReactionOptions {
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_ms = Some(duration_to_millis(delay));
        self
    }

    #[must_use]
    pub fn fire_immediately(mut self) -> Self {
        self.fire_immediately = true;
        self
    }

    pub(crate) fn scheduling_delay(&self) -> Result<Option<Duration>> {
        match self.delay_ms {
            None => Ok(None),
            Some(delay_ms) => {
                let delay = non_negative_millis("delay_ms", delay_ms)?;
                Ok((!delay.is_zero()).then_some(delay))
            }
        }
    }
}
