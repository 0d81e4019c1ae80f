//! Handler types: what listeners look like to the channel.
//!
//! A handler is an async closure from the channel's payload type to
//! `Result<(), HandlerError>`. The channel stores handlers type-erased
//! behind an `Arc` so an emission can snapshot them cheaply and invoke
//! them after the registry lock is released.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use evented_types::HandlerId;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error a handler returns to fail the emission that invoked it.
///
/// Failing aborts the remaining handlers of that one emission; it does
/// not touch the registry and does not affect other emissions.
///
/// # Example
///
/// ```
/// use evented::HandlerError;
///
/// let err = HandlerError::new("downstream unavailable");
/// assert_eq!(err.message(), "downstream unavailable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// The future a type-erased handler returns.
pub type HandlerFuture = BoxFuture<'static, Result<(), HandlerError>>;

/// A type-erased, shareable handler closure.
pub type Handler<P> = Arc<dyn Fn(P) -> HandlerFuture + Send + Sync>;

/// One entry in an event's ordered handler sequence.
///
/// The `fired` latch backs `once` registrations: overlapping emissions
/// may all have snapshotted the registration before any of them ran it,
/// so at-most-once is enforced at invocation time, not snapshot time.
pub(crate) struct Registration<P> {
    pub(crate) id: HandlerId,
    pub(crate) handler: Handler<P>,
    pub(crate) once: bool,
    pub(crate) fired: Arc<AtomicBool>,
}

impl<P> Registration<P> {
    pub(crate) fn new(handler: Handler<P>, once: bool) -> Self {
        Self {
            id: HandlerId::new(),
            handler,
            once,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }
}

// Manual Clone: the payload type itself is never cloned here, only the
// Arc'd pieces, so no `P: Clone` bound belongs on this impl.
impl<P> Clone for Registration<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
            once: self.once,
            fired: Arc::clone(&self.fired),
        }
    }
}
