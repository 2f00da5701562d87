// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use lull_error::{LullError, Result};
use serde::{Deserialize, Serialize};

/// Which request of a burst reaches the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebounceMode {
    /// Invoke on the first request, then ignore requests until the window closes.
    Leading,
    /// Invoke once the requests have been quiet for the whole delay, with the
    /// last payload.
    #[default]
    Trailing,
}

/// Unvalidated debouncer settings, as written by a caller or read from a
/// configuration file.
///
/// Delays are signed so that a negative value coming from outside can be
/// reported instead of silently wrapping.
///
/// ```
/// use lull_core::{DebounceConfig, DebounceMode};
///
/// let config: DebounceConfig =
///     serde_json::from_str(r#"{ "delay_ms": 500, "mode": "leading" }"#).unwrap();
/// assert_eq!(config.mode, DebounceMode::Leading);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebounceConfig {
    pub delay_ms: i64,
    #[serde(default)]
    pub mode: DebounceMode,
    /// Upper bound on how long a trailing invocation may be postponed by a
    /// continuous burst. Not valid in leading mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wait_ms: Option<i64>,
}

impl DebounceConfig {
    #[must_use]
    pub const fn new(delay_ms: i64, mode: DebounceMode) -> Self {
        Self {
            delay_ms,
            mode,
            max_wait_ms: None,
        }
    }

    #[must_use]
    pub fn trailing(delay: Duration) -> Self {
        Self::new(duration_to_millis(delay), DebounceMode::Trailing)
    }

    #[must_use]
    pub fn leading(delay: Duration) -> Self {
        Self::new(duration_to_millis(delay), DebounceMode::Leading)
    }

    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait_ms = Some(duration_to_millis(max_wait));
        self
    }

    /// Checks the settings and converts them into durations.
    ///
    /// # Errors
    ///
    /// Returns [`LullError::InvalidConfig`] when a delay is negative or when
    /// a max wait is requested in leading mode.
    pub fn validate(&self) -> Result<ValidatedDebounce> {
        let delay = non_negative_millis("delay_ms", self.delay_ms)?;

        let max_wait = match (self.max_wait_ms, self.mode) {
            (None, _) => None,
            (Some(max_wait_ms), DebounceMode::Leading) => {
                return Err(LullError::invalid_config(
                    "max_wait_ms",
                    max_wait_ms,
                    "only applies to trailing mode",
                ));
            }
            (Some(max_wait_ms), DebounceMode::Trailing) => {
                Some(non_negative_millis("max_wait_ms", max_wait_ms)?.max(delay))
            }
        };

        Ok(ValidatedDebounce {
            delay,
            mode: self.mode,
            max_wait,
        })
    }
}

/// Settings accepted by [`DebounceConfig::validate`].
///
/// A max wait shorter than the delay is raised to the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedDebounce {
    delay: Duration,
    mode: DebounceMode,
    max_wait: Option<Duration>,
}

impl ValidatedDebounce {
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn mode(&self) -> DebounceMode {
        self.mode
    }

    #[must_use]
    pub const fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }
}

pub(crate) fn non_negative_millis(field: &'static str, value: i64) -> Result<Duration> {
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| LullError::invalid_config(field, value, "must not be negative"))
}

pub(crate) fn duration_to_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
