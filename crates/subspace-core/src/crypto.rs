//! Cryptographic primitives: Keccak-256 hashing, Ethereum addresses and
//! recoverable secp256k1 signatures.
//!
//! Signers are identified by address, not public key. A signature carries a
//! recovery byte so the verifier can recover the signing key and compare its
//! address with the claimed one.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

use crate::error::CryptoError;

/// Prefix of an EIP-191 personal message.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Offset added to the recovery id in the trailing signature byte.
pub const RECOVERY_OFFSET: u8 = 27;

/// Length of an encoded signature: `r || s || v`.
pub const SIGNATURE_LEN: usize = 65;

/// Compute the Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hash a message as an EIP-191 personal message.
///
/// The digest covers the prefix, the decimal byte length of the message and
/// the message itself.
pub fn hash_personal_message(message: &[u8]) -> [u8; 32] {
    hash_prefixed_message(message, message.len())
}

/// Hash `message` behind the personal-message prefix with an explicit
/// declared length.
pub fn hash_prefixed_message(message: &[u8], length: usize) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(length.to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// A 20-byte Ethereum address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Derive the address of a public key: the last 20 bytes of the Keccak-256
    /// of the uncompressed point without its `0x04` tag.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let digest = keccak256(&point.as_bytes()[1..]);
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&digest[12..]);
        Self(arr)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// EIP-55 mixed-case hex, no prefix.
    pub fn to_checksum(&self) -> String {
        let lower = self.to_hex();
        let digest = keccak256(lower.as_bytes());

        lower
            .char_indices()
            .map(|(i, c)| {
                let byte = digest[i / 2];
                let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
                if c.is_ascii_alphabetic() && nibble >= 8 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    }

    /// Parse from hex in any case, with or without `0x`.
    ///
    /// The checksum is not enforced.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut arr = [0u8; 20];
        hex::decode_to_slice(digits, &mut arr)?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// A 65-byte recoverable signature, `r || s || v`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature(pub [u8; SIGNATURE_LEN]);

impl RecoverableSignature {
    /// Create from a byte slice of exactly 65 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Parse from hex, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Lowercase hex, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The trailing recovery byte as carried.
    pub fn v(&self) -> u8 {
        self.0[SIGNATURE_LEN - 1]
    }

    /// The recovery id, accepting both the raw (0/1) and the offset (27/28)
    /// encodings of the trailing byte.
    pub fn recovery_id(&self) -> Result<RecoveryId, CryptoError> {
        let v = match self.v() {
            v @ (0 | 1) => v,
            v @ (27 | 28) => v - RECOVERY_OFFSET,
            other => {
                return Err(CryptoError::InvalidSignature(format!(
                    "invalid recovery byte {}",
                    other
                )))
            }
        };
        RecoveryId::from_byte(v)
            .ok_or_else(|| CryptoError::InvalidSignature(format!("invalid recovery byte {}", v)))
    }

    /// Recover the signer address from a 32-byte prehash.
    ///
    /// High-s signatures are normalized to low-s first, flipping the parity
    /// bit of the recovery id to match.
    pub fn recover(&self, prehash: &[u8; 32]) -> Result<Address, CryptoError> {
        let mut signature = Signature::from_slice(&self.0[..64])
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        let mut recovery_id = self.recovery_id()?;

        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
            recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
        }

        let key = VerifyingKey::recover_from_prehash(prehash, &signature, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(Address::from_verifying_key(&key))
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSig({}...)", &self.to_hex()[..16])
    }
}

impl From<[u8; SIGNATURE_LEN]> for RecoverableSignature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

/// A secp256k1 signing key.
///
/// Key material is owned by the caller; `Debug` shows only the address.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::random(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte secret scalar.
    pub fn from_secret(secret: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(secret).map_err(|_| CryptoError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Create from a hex secret, with or without `0x`.
    pub fn from_secret_hex(s: &str) -> Result<Self, CryptoError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut secret = [0u8; 32];
        hex::decode_to_slice(digits, &mut secret).map_err(|_| CryptoError::InvalidSecretKey)?;
        Self::from_secret(&secret)
    }

    /// The signer's address.
    pub fn address(&self) -> Address {
        Address::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash.
    pub fn sign_prehash(&self, prehash: &[u8; 32]) -> Result<RecoverableSignature, CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte() + RECOVERY_OFFSET;
        Ok(RecoverableSignature(out))
    }

    /// Sign `message` as an EIP-191 personal message.
    pub fn sign_message(&self, message: &[u8]) -> Result<RecoverableSignature, CryptoError> {
        self.sign_prehash(&hash_personal_message(message))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.address())
    }
}
