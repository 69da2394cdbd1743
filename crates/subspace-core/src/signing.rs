//! Event signing and verification.
//!
//! Signing fills `pubkey` with the signer's address, computes the event id
//! over the canonical form and signs the canonical string itself as an
//! EIP-191 personal message. Verification recomputes the id, recovers the
//! signer from the signature over the canonical string and compares it with
//! `pubkey`.

use std::ops::Deref;

use tracing::debug;

use crate::canonical::{canonical_hash, serialize_event};
use crate::crypto::{hash_personal_message, Address, Keypair, RecoverableSignature};
use crate::error::CryptoError;
use crate::wire::WireEvent;

/// Sign an event, returning the signed envelope.
///
/// Any existing `pubkey`, `id` and `sig` are replaced.
pub fn sign_event(mut event: WireEvent, keypair: &Keypair) -> Result<WireEvent, CryptoError> {
    event.pubkey = Some(keypair.address().to_checksum());

    let canonical = serialize_event(&event)?;
    let id = canonical_hash(&canonical);
    let signature = keypair.sign_message(canonical.as_bytes())?;

    debug!(id = %id, kind = %event.kind, "signed event");

    event.id = Some(id.to_hex());
    event.sig = Some(signature.to_hex());
    Ok(event)
}

/// Verify a signed event.
///
/// Checks, in order: the id matches the recomputed hash, the signature
/// decodes, and the recovered signer equals `pubkey` ignoring case. The
/// recovery byte may be 0/1 or 27/28.
pub fn verify_event(event: &WireEvent) -> Result<(), CryptoError> {
    // 1. Id
    let canonical = serialize_event(event)?;
    let computed = canonical_hash(&canonical);
    let claimed = event
        .id
        .as_deref()
        .ok_or_else(|| CryptoError::MalformedEvent("missing id".into()))?;
    if !claimed.eq_ignore_ascii_case(&computed.to_hex()) {
        return Err(CryptoError::HashMismatch {
            expected: computed.to_hex(),
            actual: claimed.to_string(),
        });
    }

    // 2. Signature encoding
    let sig = event.sig.as_deref().ok_or(CryptoError::MissingSignature)?;
    let signature = RecoverableSignature::from_hex(sig)?;

    // 3. Signer
    let pubkey = event.pubkey.as_deref().unwrap_or_default();
    let expected = Address::from_hex(pubkey)
        .map_err(|_| CryptoError::MalformedEvent(format!("invalid pubkey {}", pubkey)))?;
    let recovered = signature.recover(&hash_personal_message(canonical.as_bytes()))?;
    if recovered != expected {
        return Err(CryptoError::AddressMismatch {
            expected: pubkey.to_string(),
            recovered: recovered.to_checksum(),
        });
    }

    Ok(())
}

/// Boolean form of [`verify_event`].
pub fn is_verified(event: &WireEvent) -> bool {
    verify_event(event).is_ok()
}

/// An event whose signature has been checked.
///
/// Only constructible through [`VerifiedEvent::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEvent(WireEvent);

impl VerifiedEvent {
    /// Verify `event` and wrap it.
    pub fn verify(event: WireEvent) -> Result<Self, CryptoError> {
        verify_event(&event)?;
        Ok(Self(event))
    }

    /// The signer's address.
    pub fn signer(&self) -> &str {
        self.0.pubkey.as_deref().unwrap_or_default()
    }

    /// Unwrap the envelope.
    pub fn into_inner(self) -> WireEvent {
        self.0
    }
}

impl Deref for VerifiedEvent {
    type Target = WireEvent;

    fn deref(&self) -> &WireEvent {
        &self.0
    }
}

impl AsRef<WireEvent> for VerifiedEvent {
    fn as_ref(&self) -> &WireEvent {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::event_hash;
    use crate::crypto::hash_prefixed_message;
    use crate::tags::Tags;
    use crate::types::Kind;

    fn keypair() -> Keypair {
        Keypair::from_secret(&[0x42; 32]).unwrap()
    }

    fn unsigned() -> WireEvent {
        let mut tags = Tags::new();
        tags.push("d", "subspace_op");
        tags.push("sid", format!("0x{}", "ab".repeat(32)));
        tags.push("ops", "post");
        WireEvent::unsigned(Kind(30300), 1700000000, tags, "hello".into())
    }

    #[test]
    fn test_sign_then_verify() {
        let signed = sign_event(unsigned(), &keypair()).unwrap();

        assert_eq!(signed.pubkey.as_deref(), Some(keypair().address().to_checksum().as_str()));
        assert_eq!(signed.id.as_ref().map(String::len), Some(64));
        assert_eq!(signed.sig.as_ref().map(String::len), Some(130));
        assert!(verify_event(&signed).is_ok());
        assert!(is_verified(&signed));
    }

    #[test]
    fn test_mutations_fail_verification() {
        let signed = sign_event(unsigned(), &keypair()).unwrap();

        let mut content = signed.clone();
        content.content.push('!');
        assert!(matches!(
            verify_event(&content),
            Err(CryptoError::HashMismatch { .. })
        ));

        let mut tag = signed.clone();
        tag.tags.as_mut_vec()[2][1] = "vote".into();
        assert!(!is_verified(&tag));

        let mut created_at = signed.clone();
        created_at.created_at += 1;
        assert!(!is_verified(&created_at));
    }

    #[test]
    fn test_recomputed_id_with_foreign_signer_fails() {
        let signed = sign_event(unsigned(), &keypair()).unwrap();
        let other = Keypair::from_secret(&[0x07; 32]).unwrap();

        // Claim a different signer and fix up the id so only the signer check fails.
        let mut forged = signed.clone();
        forged.pubkey = Some(other.address().to_checksum());
        forged.id = Some(event_hash(&forged).unwrap().to_hex());
        assert!(matches!(
            verify_event(&forged),
            Err(CryptoError::AddressMismatch { .. })
        ));
    }

    #[test]
    fn test_recovery_byte_encodings() {
        let signed = sign_event(unsigned(), &keypair()).unwrap();
        let sig = RecoverableSignature::from_hex(signed.sig.as_deref().unwrap()).unwrap();

        let mut raw = sig;
        raw.0[64] -= 27;
        let mut event = signed.clone();
        event.sig = Some(raw.to_hex());
        assert!(is_verified(&event));

        let mut bad = sig;
        bad.0[64] = 29;
        event.sig = Some(bad.to_hex());
        assert!(!is_verified(&event));
    }

    #[test]
    fn test_pubkey_compare_ignores_case() {
        let mut signed = sign_event(unsigned(), &keypair()).unwrap();
        let lower = signed.pubkey.as_deref().unwrap().to_lowercase();
        signed.pubkey = Some(lower);
        // Case is part of the canonical bytes.
        let canonical = serialize_event(&signed).unwrap();
        signed.id = Some(canonical_hash(&canonical).to_hex());
        signed.sig = Some(keypair().sign_message(canonical.as_bytes()).unwrap().to_hex());
        assert!(is_verified(&signed));
    }

    #[test]
    fn test_signature_covers_canonical_string() {
        let mut event = unsigned();
        event.content = "héllo 你好 🌍".into();
        let signed = sign_event(event, &keypair()).unwrap();
        let canonical = serialize_event(&signed).unwrap();
        let sig = RecoverableSignature::from_hex(signed.sig.as_deref().unwrap()).unwrap();

        assert_eq!(
            sig.recover(&hash_personal_message(canonical.as_bytes())).unwrap(),
            keypair().address()
        );
        assert_ne!(
            signed.id.as_deref(),
            Some(hex::encode(hash_personal_message(canonical.as_bytes())).as_str())
        );
    }

    #[test]
    fn test_externally_finalized_non_ascii_event_verifies() {
        // Id over the UTF-16 length, signature over the UTF-8 message.
        let mut event = unsigned();
        event.content = "héllo 你好".into();
        event.pubkey = Some(keypair().address().to_checksum());
        let canonical = serialize_event(&event).unwrap();

        let id = hash_prefixed_message(canonical.as_bytes(), canonical.encode_utf16().count());
        event.id = Some(hex::encode(id));
        event.sig = Some(keypair().sign_message(canonical.as_bytes()).unwrap().to_hex());
        assert_eq!(verify_event(&event), Ok(()));

        // A byte-length id is not the event id.
        event.id = Some(hex::encode(hash_personal_message(canonical.as_bytes())));
        assert!(matches!(
            verify_event(&event),
            Err(CryptoError::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_signature_over_id_is_rejected() {
        let mut event = unsigned();
        event.content = "✓".into();
        let mut signed = sign_event(event, &keypair()).unwrap();
        let id = event_hash(&signed).unwrap();
        signed.sig = Some(keypair().sign_prehash(id.as_bytes()).unwrap().to_hex());
        assert!(!is_verified(&signed));
    }

    #[test]
    fn test_unsigned_is_rejected() {
        assert!(matches!(
            verify_event(&unsigned()),
            Err(CryptoError::MalformedEvent(_))
        ));

        let mut no_sig = sign_event(unsigned(), &keypair()).unwrap();
        no_sig.sig = None;
        assert_eq!(verify_event(&no_sig), Err(CryptoError::MissingSignature));
    }

    #[test]
    fn test_garbage_signature_is_rejected() {
        let mut signed = sign_event(unsigned(), &keypair()).unwrap();
        signed.sig = Some("zz".into());
        assert!(matches!(
            verify_event(&signed),
            Err(CryptoError::InvalidSignature(_))
        ));

        signed.sig = Some("00".repeat(65));
        assert!(!is_verified(&signed));
    }

    #[test]
    fn test_verified_event_wrapper() {
        let signed = sign_event(unsigned(), &keypair()).unwrap();
        let verified = VerifiedEvent::verify(signed.clone()).unwrap();
        assert_eq!(verified.signer(), keypair().address().to_checksum());
        assert_eq!(verified.kind, Kind(30300));
        assert_eq!(verified.into_inner(), signed);

        let mut tampered = sign_event(unsigned(), &keypair()).unwrap();
        tampered.content = "x".into();
        assert!(VerifiedEvent::verify(tampered).is_err());
    }
}
