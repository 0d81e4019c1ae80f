//! Channel dispatch errors.
//!
//! Exactly one kind of failure can surface from an emission: a handler
//! returned an error while the snapshot was being dispatched. The error
//! resolves the [`Emission`](crate::Emission) that invoked the handler
//! and nothing else — the registry is untouched, other emissions keep
//! running, and the event name stays usable.
//!
//! # Error Code Convention
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`EventError::HandlerFailed`] | `EVENT_HANDLER_FAILED` | Yes |
//!
//! `HandlerFailed` is recoverable because nothing was corrupted:
//! re-emitting runs a fresh snapshot and may succeed.

use evented_types::{ErrorCode, HandlerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error resolving an [`Emission`](crate::Emission).
///
/// # Example
///
/// ```
/// use evented::EventError;
/// use evented_types::{ErrorCode, HandlerId};
///
/// let err = EventError::HandlerFailed {
///     event: "refresh".into(),
///     handler: HandlerId::new(),
///     message: "backend gone".into(),
/// };
///
/// assert_eq!(err.code(), "EVENT_HANDLER_FAILED");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EventError {
    /// A handler returned an error during dispatch.
    ///
    /// The emission that invoked the handler resolves with this error
    /// and its remaining snapshotted handlers are skipped. Handlers
    /// that already completed are not undone.
    #[error("handler {handler} failed for event '{event}': {message}")]
    HandlerFailed {
        /// Event name being emitted.
        event: String,
        /// Registration that failed.
        handler: HandlerId,
        /// Failure message the handler returned.
        message: String,
    },
}

impl EventError {
    /// Returns the event name the failure occurred on.
    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Self::HandlerFailed { event, .. } => event,
        }
    }

    /// Returns the id of the registration that failed.
    #[must_use]
    pub fn handler(&self) -> HandlerId {
        match self {
            Self::HandlerFailed { handler, .. } => *handler,
        }
    }
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::HandlerFailed { .. } => "EVENT_HANDLER_FAILED",
        }
    }

    /// The registry survives a handler failure, so retrying the
    /// emission is meaningful.
    fn is_recoverable(&self) -> bool {
        match self {
            Self::HandlerFailed { .. } => true,
        }
    }
}
