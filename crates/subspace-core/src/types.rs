//! Strong type definitions for the Subspace protocol.
//!
//! Kinds and identifiers are newtypes so they cannot be mixed up with plain
//! integers and byte arrays.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Prefix of a rendered subspace id.
pub const SUBSPACE_ID_PREFIX: &str = "0x";

/// Length of a rendered subspace id, prefix included.
pub const SUBSPACE_ID_LEN: usize = 66;

/// Reserved kind of a subspace creation event.
pub const KIND_SUBSPACE_CREATE: Kind = Kind(30100);

/// Reserved kind of a subspace join event.
pub const KIND_SUBSPACE_JOIN: Kind = Kind(30200);

/// Operation name bound to [`KIND_SUBSPACE_CREATE`].
pub const OP_SUBSPACE_CREATE: &str = "subspace_create";

/// Operation name bound to [`KIND_SUBSPACE_JOIN`].
pub const OP_SUBSPACE_JOIN: &str = "subspace_join";

/// Numeric event kind, as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(pub u32);

impl Kind {
    /// Get the raw value.
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Kind {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A 32-byte subspace identifier, computed as SHA-256(name ++ ops ++ rules).
///
/// Two creations with the same name, ops and rules derive the same id, so
/// independent creators of an identical subspace converge on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubspaceId(pub [u8; 32]);

impl SubspaceId {
    /// Derive the id of a subspace from its defining fields.
    pub fn derive(name: &str, ops: &str, rules: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        hasher.update(ops.as_bytes());
        hasher.update(rules.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check the structural shape of a rendered id: `0x` prefix, 66 characters.
    ///
    /// This does not check that the remaining characters are hex.
    pub fn has_valid_shape(s: &str) -> bool {
        s.starts_with(SUBSPACE_ID_PREFIX) && s.len() == SUBSPACE_ID_LEN
    }
}

impl fmt::Display for SubspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SUBSPACE_ID_PREFIX, self.to_hex())
    }
}

impl fmt::Debug for SubspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubspaceId({})", &self.to_hex()[..16])
    }
}

impl FromStr for SubspaceId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(SUBSPACE_ID_PREFIX)
            .ok_or(hex::FromHexError::InvalidStringLength)?;
        let mut arr = [0u8; 32];
        hex::decode_to_slice(digits, &mut arr)?;
        Ok(Self(arr))
    }
}

impl From<[u8; 32]> for SubspaceId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 32-byte event identifier: the Keccak-256 of the canonical event
/// serialization behind the personal-message prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(pub [u8; 32]);

impl EventId {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (64 lowercase characters, no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for EventId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for EventId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
