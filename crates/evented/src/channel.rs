//! EventChannel - per-instance publish/subscribe registry.
//!
//! Producers and consumers communicate by event name without holding
//! references to each other; emitters get a future that resolves when
//! every handler of that emission has finished.
//!
//! ```text
//! ┌──────────┐  emit("saved", p)   ┌──────────────┐
//! │ Producer │ ──────────────────► │ EventChannel │
//! └──────────┘    (snapshot now)   │  listeners   │
//!      │                           └──────────────┘
//!      │ Emission (future)             │ invoke in registration
//!      ▼                               ▼ order, awaited one by one
//!   .await ◄──────────────── handler₁ → handler₂ → handler₃
//! ```
//!
//! # Snapshot policy
//!
//! `emit` captures the handler sequence synchronously, inside the call.
//! Handlers registered or removed afterwards — even before the returned
//! [`Emission`] is first polled, even from within a running handler —
//! never change what that emission runs. This is the one non-obvious
//! invariant of the channel and the test suite pins it explicitly.
//!
//! # Sharing
//!
//! Cloning an `EventChannel` yields another handle to the same registry
//! (the way host objects gain event capability: embed a channel or a
//! clone of one). Channels created by separate `new` calls never share
//! state.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use evented_types::{EmissionId, HandlerId};
use parking_lot::Mutex;
use tracing::trace;

use crate::emission::Emission;
use crate::error::EventError;
use crate::handler::{Handler, HandlerError, HandlerFuture, Registration};

/// An order-preserving async event channel.
///
/// - `on` / `once` / `off*` are synchronous and never fail; removing
///   something absent is a no-op.
/// - `emit` snapshots the current handlers for the event and returns an
///   [`Emission`] that invokes them sequentially in registration order,
///   awaiting each handler's completion before starting the next.
/// - A handler error resolves that emission with
///   [`EventError::HandlerFailed`] and skips the rest of its snapshot;
///   the registry and all other emissions are unaffected.
///
/// # Example
///
/// ```
/// use evented::EventChannel;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let channel: EventChannel<String> = EventChannel::new();
///
/// channel.on("greet", |name: String| async move {
///     assert_eq!(name, "world");
///     Ok(())
/// });
///
/// channel.emit("greet", "world".to_string()).await.unwrap();
/// # }
/// ```
pub struct EventChannel<P> {
    inner: Arc<Inner<P>>,
}

struct Inner<P> {
    listeners: Mutex<HashMap<String, Vec<Registration<P>>>>,
}

impl<P> Clone for EventChannel<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> EventChannel<P>
where
    P: Clone + Send + 'static,
{
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                listeners: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Registers an async handler as the last entry for `event`.
    ///
    /// Returns the [`HandlerId`] that [`off_handler`](Self::off_handler)
    /// takes to remove this registration. Registering the same closure
    /// twice yields two registrations and two invocations per emission.
    pub fn on<F, Fut>(&self, event: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let handler: Handler<P> =
            Arc::new(move |payload: P| -> HandlerFuture { Box::pin(handler(payload)) });
        self.register(event.into(), handler, false)
    }

    /// Registers a synchronous handler.
    ///
    /// Convenience over [`on`](Self::on) for handlers with no await
    /// points; the emission still treats it as a completed step before
    /// moving to the next handler.
    pub fn on_sync<F>(&self, event: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(P) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler: Handler<P> = Arc::new(move |payload: P| -> HandlerFuture {
            let result = handler(payload);
            Box::pin(async move { result })
        });
        self.register(event.into(), handler, false)
    }

    /// Registers a handler that is consumed by its first invocation.
    ///
    /// The registration is removed once the handler has run. If several
    /// overlapping emissions snapshotted it before any of them reached
    /// it, only the first to reach it invokes it; the others skip it.
    pub fn once<F, Fut>(&self, event: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let handler: Handler<P> =
            Arc::new(move |payload: P| -> HandlerFuture { Box::pin(handler(payload)) });
        self.register(event.into(), handler, true)
    }

    fn register(&self, event: String, handler: Handler<P>, once: bool) -> HandlerId {
        let registration = Registration::new(handler, once);
        let id = registration.id;

        let mut listeners = self.inner.listeners.lock();
        listeners.entry(event.clone()).or_default().push(registration);
        trace!(event = %event, handler = %id, once, "handler registered");
        id
    }

    /// Removes every handler registered for `event`.
    ///
    /// The event name no longer appears in the registry afterwards.
    /// No-op if the event has no handlers.
    pub fn off(&self, event: &str) {
        let mut listeners = self.inner.listeners.lock();
        if listeners.remove(event).is_some() {
            trace!(event = %event, "all handlers removed");
        }
    }

    /// Removes the registration identified by `id` from `event`.
    ///
    /// If it was the last registration for the event, the event name is
    /// removed from the registry entirely. No-op if the event or the id
    /// is not found.
    pub fn off_handler(&self, event: &str, id: HandlerId) {
        let mut listeners = self.inner.listeners.lock();
        if let Some(registrations) = listeners.get_mut(event) {
            let before = registrations.len();
            registrations.retain(|r| r.id != id);
            if registrations.len() != before {
                trace!(event = %event, handler = %id, "handler removed");
            }
            if registrations.is_empty() {
                listeners.remove(event);
            }
        }
    }

    /// Clears the entire registry: every event name, every handler.
    pub fn off_all(&self) {
        let mut listeners = self.inner.listeners.lock();
        if !listeners.is_empty() {
            trace!(events = listeners.len(), "registry cleared");
            listeners.clear();
        }
    }

    /// Emits `payload` to the handlers registered for `event`.
    ///
    /// The handler snapshot is taken here, synchronously. The returned
    /// [`Emission`] — when polled — invokes each snapshotted handler in
    /// registration order with its own clone of `payload`, awaiting each
    /// completion before starting the next, and resolves once the whole
    /// snapshot is done. With no handlers registered it resolves
    /// immediately.
    ///
    /// Emissions are independent of each other: a handler may call
    /// `emit` again (for the same event or another) and the nested
    /// emission gets its own fresh snapshot and its own future, with no
    /// blocking either way.
    ///
    /// # Errors
    ///
    /// The emission resolves to [`EventError::HandlerFailed`] if a
    /// handler returns an error; later handlers in the snapshot do not
    /// run. An emission whose handler never completes stays pending —
    /// there is no timeout here.
    pub fn emit(&self, event: impl Into<String>, payload: P) -> Emission {
        let event = event.into();
        let id = EmissionId::new();

        // Snapshot at call time: this emission is now immune to on/off.
        let snapshot: Vec<Registration<P>> = {
            let listeners = self.inner.listeners.lock();
            listeners.get(&event).cloned().unwrap_or_default()
        };

        trace!(emission = %id, event = %event, handlers = snapshot.len(), "emit");

        let handler_count = snapshot.len();
        let channel = self.clone();
        let future = Box::pin(async move {
            for registration in snapshot {
                if registration.once && registration.fired.swap(true, Ordering::SeqCst) {
                    // Consumed by an overlapping emission that got here first.
                    continue;
                }

                let result = (registration.handler)(payload.clone()).await;

                if registration.once {
                    channel.off_handler(&event, registration.id);
                }

                if let Err(err) = result {
                    return Err(EventError::HandlerFailed {
                        event: event.clone(),
                        handler: registration.id,
                        message: err.message().to_string(),
                    });
                }
            }
            Ok(())
        });

        Emission::new(id, handler_count, future)
    }

    /// Returns the number of handlers currently registered for `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.inner
            .listeners
            .lock()
            .get(event)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Returns `true` if at least one handler is registered for `event`.
    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.inner.listeners.lock().contains_key(event)
    }

    /// Returns the event names that currently have handlers.
    ///
    /// Order is unspecified.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.inner.listeners.lock().keys().cloned().collect()
    }

    /// Returns `true` if no handler is registered for any event.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.listeners.lock().is_empty()
    }
}

impl<P> Default for EventChannel<P>
where
    P: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> std::fmt::Debug for EventChannel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.inner.listeners.lock();
        f.debug_struct("EventChannel")
            .field("events", &listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_channel_is_empty() {
        let channel: EventChannel<u32> = EventChannel::new();
        assert!(channel.is_empty());
        assert_eq!(channel.listener_count("anything"), 0);
        assert!(!channel.has_listeners("anything"));
    }

    #[test]
    fn on_creates_entry() {
        let channel: EventChannel<u32> = EventChannel::new();
        channel.on("test", |_| async { Ok(()) });

        assert!(channel.has_listeners("test"));
        assert_eq!(channel.listener_count("test"), 1);
        assert_eq!(channel.event_names(), vec!["test".to_string()]);
    }

    #[test]
    fn duplicate_registration_gets_distinct_ids() {
        let channel: EventChannel<u32> = EventChannel::new();
        let id1 = channel.on("test", |_| async { Ok(()) });
        let id2 = channel.on("test", |_| async { Ok(()) });

        assert_ne!(id1, id2);
        assert_eq!(channel.listener_count("test"), 2);
    }

    #[test]
    fn off_removes_event_key() {
        let channel: EventChannel<u32> = EventChannel::new();
        channel.on("test", |_| async { Ok(()) });
        channel.on("test", |_| async { Ok(()) });

        channel.off("test");
        assert!(!channel.has_listeners("test"));
        assert!(channel.is_empty());
    }

    #[test]
    fn off_handler_keeps_peers() {
        let channel: EventChannel<u32> = EventChannel::new();
        let id1 = channel.on("test", |_| async { Ok(()) });
        let _id2 = channel.on("test", |_| async { Ok(()) });

        channel.off_handler("test", id1);
        assert_eq!(channel.listener_count("test"), 1);
        assert!(channel.has_listeners("test"));
    }

    #[test]
    fn off_handler_removes_empty_key() {
        let channel: EventChannel<u32> = EventChannel::new();
        let id = channel.on("test", |_| async { Ok(()) });

        channel.off_handler("test", id);
        assert!(!channel.has_listeners("test"));
        assert!(channel.is_empty());
    }

    #[test]
    fn removal_of_absent_targets_is_noop() {
        let channel: EventChannel<u32> = EventChannel::new();
        channel.off("missing");
        channel.off_handler("missing", HandlerId::new());

        channel.on("test", |_| async { Ok(()) });
        channel.off_handler("test", HandlerId::new());
        assert_eq!(channel.listener_count("test"), 1);
    }

    #[test]
    fn off_all_clears_everything() {
        let channel: EventChannel<u32> = EventChannel::new();
        channel.on("a", |_| async { Ok(()) });
        channel.on("b", |_| async { Ok(()) });

        channel.off_all();
        assert!(channel.is_empty());
        assert!(channel.event_names().is_empty());
    }

    #[test]
    fn clones_share_registry() {
        let channel: EventChannel<u32> = EventChannel::new();
        let clone = channel.clone();

        channel.on("test", |_| async { Ok(()) });
        assert!(clone.has_listeners("test"));

        clone.off("test");
        assert!(channel.is_empty());
    }

    #[test]
    fn separate_channels_are_independent() {
        let a: EventChannel<u32> = EventChannel::new();
        let b: EventChannel<u32> = EventChannel::new();

        a.on("test", |_| async { Ok(()) });
        assert!(b.is_empty());
    }

    #[tokio::test]
    async fn sync_handler_is_dispatched_like_any_other() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let channel: EventChannel<u32> = EventChannel::new();
        let total = Arc::new(AtomicUsize::new(0));

        let total_in = Arc::clone(&total);
        channel.on_sync("test", move |payload| {
            total_in.fetch_add(payload as usize, Ordering::SeqCst);
            Ok(())
        });

        channel.emit("test", 5).await.expect("emission resolves");
        channel.emit("test", 2).await.expect("emission resolves");
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn sync_handler_failure_rejects_the_emission() {
        let channel: EventChannel<u32> = EventChannel::new();
        channel.on_sync("test", |_| Err(HandlerError::new("no")));

        let err = channel.emit("test", 1).await.expect_err("emission rejects");
        assert_eq!(err.event(), "test");
    }

    #[tokio::test]
    async fn emit_with_no_handlers_resolves_immediately() {
        let channel: EventChannel<u32> = EventChannel::new();
        let emission = channel.emit("test", 1);

        assert_eq!(emission.handler_count(), 0);
        assert!(emission.await.is_ok());
    }

    #[tokio::test]
    async fn emission_reports_snapshot_size() {
        let channel: EventChannel<u32> = EventChannel::new();
        channel.on("test", |_| async { Ok(()) });
        channel.on("test", |_| async { Ok(()) });

        let emission = channel.emit("test", 1);
        // Registered after the call: not part of this snapshot.
        channel.on("test", |_| async { Ok(()) });

        assert_eq!(emission.handler_count(), 2);
        assert!(emission.await.is_ok());
    }
}
