//! Canonical event serialization.
//!
//! The bytes that are hashed and signed are the compact JSON array
//! `[0, pubkey, created_at, kind, tags, content]`. serde_json emits no
//! whitespace and keeps field and tag order, so the output is deterministic
//! for a given event.
//!
//! The event id is the Keccak-256 of the personal-message prefix, the
//! message length in UTF-16 code units and the UTF-8 message bytes. For
//! ASCII events this equals the EIP-191 hash; for other text only the
//! declared length differs. The signature is a regular EIP-191 signature
//! over the canonical string, not over the id.

use crate::crypto::hash_prefixed_message;
use crate::error::CryptoError;
use crate::types::EventId;
use crate::wire::WireEvent;

/// Leading element of the canonical array.
pub const CANONICAL_VERSION: u8 = 0;

/// Serialize an event to its canonical string.
///
/// `id` and `sig` are not part of the canonical form. `pubkey` is, so it must
/// be set.
pub fn serialize_event(event: &WireEvent) -> Result<String, CryptoError> {
    let pubkey = event
        .pubkey
        .as_deref()
        .ok_or_else(|| CryptoError::MalformedEvent("missing pubkey".into()))?;

    serde_json::to_string(&(
        CANONICAL_VERSION,
        pubkey,
        event.created_at,
        event.kind,
        &event.tags,
        &event.content,
    ))
    .map_err(|e| CryptoError::MalformedEvent(e.to_string()))
}

/// Compute the event id of a canonical string.
pub fn canonical_hash(canonical: &str) -> EventId {
    let length = canonical.encode_utf16().count();
    EventId::from_bytes(hash_prefixed_message(canonical.as_bytes(), length))
}

/// Compute the event id of an event.
pub fn event_hash(event: &WireEvent) -> Result<EventId, CryptoError> {
    Ok(canonical_hash(&serialize_event(event)?))
}
