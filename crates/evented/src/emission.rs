//! The completion handle returned by `emit`.
//!
//! An [`Emission`] is a future that resolves once every handler in its
//! snapshot has completed, or resolves to the error of the first
//! handler that failed. Emissions compose with the usual combinators:
//! `futures::future::join_all` / `try_join_all` await a batch of them.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use evented_types::EmissionId;
use futures::future::BoxFuture;

use crate::error::EventError;

/// Completion handle for a single `emit` call.
///
/// The snapshot of handlers was taken when `emit` was called; polling
/// this future drives their sequential invocation. Dropping an
/// `Emission` without polling it runs no handlers.
///
/// # Example
///
/// ```
/// use evented::EventChannel;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let channel: EventChannel<String> = EventChannel::new();
/// let emission = channel.emit("ready", "go".to_string());
///
/// assert_eq!(emission.handler_count(), 0);
/// emission.await.expect("empty snapshot resolves immediately");
/// # }
/// ```
pub struct Emission {
    id: EmissionId,
    handler_count: usize,
    future: BoxFuture<'static, Result<(), EventError>>,
}

impl Emission {
    pub(crate) fn new(
        id: EmissionId,
        handler_count: usize,
        future: BoxFuture<'static, Result<(), EventError>>,
    ) -> Self {
        Self {
            id,
            handler_count,
            future,
        }
    }

    /// Returns this emission's id.
    #[must_use]
    pub fn id(&self) -> EmissionId {
        self.id
    }

    /// Returns the size of the handler snapshot taken at `emit` time.
    ///
    /// Registrations added or removed after the `emit` call do not
    /// change this number.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handler_count
    }
}

impl std::fmt::Debug for Emission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emission")
            .field("id", &self.id)
            .field("handler_count", &self.handler_count)
            .finish_non_exhaustive()
    }
}

impl Future for Emission {
    type Output = Result<(), EventError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().future.as_mut().poll(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_inner_future() {
        let emission = Emission::new(EmissionId::new(), 0, Box::pin(async { Ok(()) }));
        assert_eq!(emission.handler_count(), 0);
        assert!(emission.await.is_ok());
    }

    #[test]
    fn debug_shows_id_and_count() {
        let id = EmissionId::new();
        let emission = Emission::new(id, 3, Box::pin(async { Ok(()) }));
        let debug = format!("{emission:?}");
        assert!(debug.contains("Emission"));
        assert!(debug.contains("handler_count: 3"));
    }
}
