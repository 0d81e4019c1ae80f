//! Foundational types for the evented channel workspace.
//!
//! This crate carries the pieces the channel's public contract is built
//! from, kept separate so embedders can depend on stable identifiers
//! and error conventions without pulling in the channel itself.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  evented-types : HandlerId, EmissionId, ErrorCode   │ ◄── HERE
//! ├─────────────────────────────────────────────────────┤
//! │  evented       : EventChannel, Emission, Evented    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier design
//!
//! All identifiers are UUID-based:
//!
//! - **No coordination**: unique without a registry
//! - **Serialization**: first-class serde support
//! - **Traceability**: prefixed `Display` forms (`hnd:`, `emit:`) that
//!   read well in logs
//!
//! # Example
//!
//! ```
//! use evented_types::{EmissionId, HandlerId};
//!
//! // A registration token, as returned by EventChannel::on
//! let handler = HandlerId::new();
//!
//! // One emit call
//! let emission = EmissionId::new();
//!
//! assert_ne!(handler.uuid(), emission.uuid());
//! ```

mod error;
mod id;

pub use error::{ErrorCode, assert_error_code, assert_error_codes};
pub use id::{EmissionId, HandlerId};
