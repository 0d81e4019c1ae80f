//! Capability trait for host types that carry an event channel.
//!
//! There is no inheritance here: a host either embeds an
//! [`EventChannel`] and exposes it directly, or implements [`Evented`]
//! with one accessor and gains the whole `on`/`off`/`emit` surface by
//! delegation.
//!
//! # Usage
//!
//! ```
//! use evented::{Evented, EventChannel};
//!
//! struct Courier {
//!     name: String,
//!     events: EventChannel<String>,
//! }
//!
//! impl Evented for Courier {
//!     type Payload = String;
//!
//!     fn events(&self) -> &EventChannel<String> {
//!         &self.events
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let courier = Courier { name: "c1".into(), events: EventChannel::new() };
//! courier.on("delivered", |addr: String| async move {
//!     assert_eq!(addr, "pier 4");
//!     Ok(())
//! });
//! courier.emit("delivered", "pier 4".to_string()).await.unwrap();
//! assert_eq!(courier.name, "c1");
//! # }
//! ```

use std::future::Future;

use evented_types::HandlerId;

use crate::channel::EventChannel;
use crate::emission::Emission;
use crate::handler::HandlerError;

/// Grants a host type the event-channel surface by delegation.
///
/// Implementors provide [`events`](Self::events); everything else is a
/// provided method forwarding to the embedded channel. The host keeps
/// its own identity and fields; instances never share registry state
/// unless their channels are clones of one another.
pub trait Evented {
    /// Payload type carried by this host's events.
    type Payload: Clone + Send + 'static;

    /// Returns the host's event channel.
    fn events(&self) -> &EventChannel<Self::Payload>;

    /// Registers an async handler. See [`EventChannel::on`].
    fn on<F, Fut>(&self, event: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(Self::Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        self.events().on(event, handler)
    }

    /// Registers a one-shot handler. See [`EventChannel::once`].
    fn once<F, Fut>(&self, event: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(Self::Payload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        self.events().once(event, handler)
    }

    /// Removes every handler for `event`. See [`EventChannel::off`].
    fn off(&self, event: &str) {
        self.events().off(event);
    }

    /// Removes one registration. See [`EventChannel::off_handler`].
    fn off_handler(&self, event: &str, id: HandlerId) {
        self.events().off_handler(event, id);
    }

    /// Clears the registry. See [`EventChannel::off_all`].
    fn off_all(&self) {
        self.events().off_all();
    }

    /// Emits to the handlers snapshotted now. See [`EventChannel::emit`].
    fn emit(&self, event: impl Into<String>, payload: Self::Payload) -> Emission {
        self.events().emit(event, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Host {
        events: EventChannel<u32>,
    }

    impl Evented for Host {
        type Payload = u32;

        fn events(&self) -> &EventChannel<u32> {
            &self.events
        }
    }

    #[tokio::test]
    async fn delegated_surface_reaches_embedded_channel() {
        let host = Host {
            events: EventChannel::new(),
        };

        let id = host.on("test", |_| async { Ok(()) });
        assert_eq!(host.events().listener_count("test"), 1);

        host.emit("test", 7).await.expect("emission resolves");

        host.off_handler("test", id);
        assert!(host.events().is_empty());
    }

    #[test]
    fn hosts_do_not_share_state() {
        let a = Host {
            events: EventChannel::new(),
        };
        let b = Host {
            events: EventChannel::new(),
        };

        a.on("test", |_| async { Ok(()) });
        assert!(b.events().is_empty());

        a.off_all();
        assert!(a.events().is_empty());
    }
}
