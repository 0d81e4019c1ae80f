//! Identifier types for the evented channel.
//!
//! All identifiers are UUID-based so they are unique without
//! coordination and safe to log, serialize, or carry across tasks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a single handler registration.
///
/// Returned by `EventChannel::on` and consumed by
/// `EventChannel::off_handler`. Closures have no usable identity in
/// Rust, so the id — not the closure — is the removal token.
///
/// Registering the same closure twice yields two distinct ids and two
/// independent invocations per emission.
///
/// # Example
///
/// ```
/// use evented_types::HandlerId;
///
/// let a = HandlerId::new();
/// let b = HandlerId::new();
/// assert_ne!(a, b);
/// assert!(format!("{a}").starts_with("hnd:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub Uuid);

impl HandlerId {
    /// Creates a new random handler id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: HandlerId does not implement Default intentionally.
// A defaulted id is a registration token that matches nothing; callers
// must obtain ids from `on`, never conjure them.

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hnd:{}", self.0)
    }
}

/// Identifier for one emission (one `emit` call).
///
/// Every `emit` call gets its own id, including nested and concurrent
/// emissions of the same event name. Used for tracing and for telling
/// overlapping emissions apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmissionId(pub Uuid);

impl EmissionId {
    /// Creates a new random emission id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "emit:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_id_uniqueness() {
        let id1 = HandlerId::new();
        let id2 = HandlerId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn handler_id_display() {
        let id = HandlerId::new();
        let display = format!("{id}");
        assert!(display.starts_with("hnd:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn handler_id_uuid() {
        let id = HandlerId::new();
        assert_eq!(id.uuid(), id.0);
    }

    #[test]
    fn handler_id_serde_roundtrip() {
        let id = HandlerId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        let back: HandlerId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }

    #[test]
    fn emission_id_uniqueness() {
        let id1 = EmissionId::new();
        let id2 = EmissionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn emission_id_default_is_random() {
        let id1 = EmissionId::default();
        let id2 = EmissionId::default();
        assert_ne!(id1, id2);
    }

    #[test]
    fn emission_id_display() {
        let id = EmissionId::new();
        let display = format!("{id}");
        assert!(display.starts_with("emit:"));
        assert!(display.contains(&id.uuid().to_string()));
    }
}
