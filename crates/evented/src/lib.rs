//! Order-preserving async event channel.
//!
//! This crate provides [`EventChannel`]: a per-instance
//! publish/subscribe registry with synchronous registration and
//! asynchronous, order-preserving dispatch whose completion the emitter
//! can await.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  evented-types : HandlerId, EmissionId, ErrorCode   │
//! ├─────────────────────────────────────────────────────┤
//! │  evented       : EventChannel, Emission, Evented    │ ◄── HERE
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Contract
//!
//! | Operation | Sync? | Failure |
//! |-----------|-------|---------|
//! | [`EventChannel::on`] / [`once`](EventChannel::once) | Yes | Never |
//! | [`EventChannel::off`] / [`off_handler`](EventChannel::off_handler) / [`off_all`](EventChannel::off_all) | Yes | Never (absent target is a no-op) |
//! | [`EventChannel::emit`] | Snapshot sync, dispatch async | [`EventError::HandlerFailed`] on the returned [`Emission`] only |
//!
//! Dispatch within one emission is sequential: handler *n*'s completion
//! is awaited before handler *n+1* starts. Separate emissions — of the
//! same event or different ones, nested or not — are independent
//! futures with independent snapshots.
//!
//! # Typed payloads
//!
//! The channel is generic over one payload type, checked at
//! registration and emission. Heterogeneous event families use an enum
//! or `serde_json::Value` as the payload:
//!
//! ```
//! use evented::EventChannel;
//!
//! #[derive(Clone)]
//! enum UiEvent {
//!     Refreshed { took_ms: u64 },
//!     SelectionCleared,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let channel: EventChannel<UiEvent> = EventChannel::new();
//! channel.on("ui", |event| async move {
//!     match event {
//!         UiEvent::Refreshed { took_ms } => assert!(took_ms < 1_000),
//!         UiEvent::SelectionCleared => {}
//!     }
//!     Ok(())
//! });
//! channel.emit("ui", UiEvent::Refreshed { took_ms: 12 }).await.unwrap();
//! # }
//! ```
//!
//! # Awaiting several emissions
//!
//! [`Emission`] is a plain future; batches compose with
//! `futures::future::join_all` / `try_join_all`:
//!
//! ```
//! use evented::EventChannel;
//! use futures::future::try_join_all;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let channel: EventChannel<u32> = EventChannel::new();
//! let emissions = vec![channel.emit("tick", 1), channel.emit("tick", 2)];
//! try_join_all(emissions).await.unwrap();
//! # }
//! ```
//!
//! # Related crates
//!
//! - [`evented_types`] — identifier types and the [`ErrorCode`] trait

mod channel;
mod emission;
mod error;
mod evented;
mod handler;

pub use channel::EventChannel;
pub use emission::Emission;
pub use error::EventError;
pub use evented::Evented;
pub use handler::{Handler, HandlerError, HandlerFuture};

// Re-export from evented_types for convenience
pub use evented_types::{EmissionId, ErrorCode, HandlerId};
