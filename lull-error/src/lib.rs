#![allow(clippy::multiple_crate_versions)]
//! Error types for the lull deferred-invocation library
//!
//! The debouncer and the delayed reaction have no runtime failure modes: once
//! constructed they always settle back to idle. The only errors are raised
//! synchronously at construction time (invalid configuration) or by the
//! virtual clock when a drain loop never quiesces.
//!
//! # Examples
//!
//! ```
//! use lull_error::{LullError, Result};
//!
//! fn parse_delay(delay_ms: i64) -> Result<u64> {
//!     u64::try_from(delay_ms)
//!         .map_err(|_| LullError::invalid_config("delay_ms", delay_ms, "must not be negative"))
//! }
//!
//! assert!(parse_delay(-1).unwrap_err().is_config_error());
//! ```

/// Root error type for all lull operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LullError {
    /// A configuration value was rejected at construction time
    ///
    /// Raised for negative delays, negative max waits, and options that
    /// do not apply to the selected mode.
    #[error("Invalid configuration: {field} = {value}: {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: i64,
        /// Why the value was rejected
        reason: String,
    },

    /// Resource limit exceeded
    ///
    /// Returned when draining the virtual clock keeps producing new timers
    /// past the caller's iteration limit.
    #[error("Resource limit exceeded: {resource} (limit: {limit})")]
    ResourceLimitExceeded {
        /// Name of the resource that hit its limit
        resource: String,
        /// The limit that was exceeded
        limit: usize,
    },
}

impl LullError {
    /// Create an invalid configuration error
    pub fn invalid_config(field: &'static str, value: i64, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            value,
            reason: reason.into(),
        }
    }

    /// Create a resource limit exceeded error
    pub fn resource_limit(resource: impl Into<String>, limit: usize) -> Self {
        Self::ResourceLimitExceeded {
            resource: resource.into(),
            limit,
        }
    }

    /// Check if this error was caused by a rejected configuration
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// Name of the rejected configuration field, if any
    #[must_use]
    pub const fn config_field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig { field, .. } => Some(*field),
            Self::ResourceLimitExceeded { .. } => None,
        }
    }
}

/// Specialized Result type for lull operations
///
/// ```
/// use lull_error::Result;
///
/// fn settle() -> Result<usize> {
///     Ok(0)
/// }
/// ```
pub type Result<T, E = LullError> = std::result::Result<T, E>;
