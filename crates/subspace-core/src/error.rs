//! Error types for the Subspace core.
//!
//! Four families, one per failure class:
//!
//! - [`ParseError`]: malformed input (auth tag, content JSON, unknown kind).
//! - [`ValidationError`]: a well-formed event violating a protocol invariant.
//! - [`RegistrationError`]: a kind/operation collision while building the registry.
//! - [`CryptoError`]: hashing or signature verification failed.

use subspace_perms::PermsError;
use thiserror::Error;

use crate::types::Kind;

/// Malformed input that cannot be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to parse auth tag: {0}")]
    AuthTag(#[from] PermsError),

    #[error("invalid content: {0}")]
    InvalidContent(String),

    #[error("unknown kind value: {0}")]
    UnknownKind(Kind),

    #[error("unknown operation type: {0}")]
    UnknownOperation(String),
}

/// A structurally well-formed event that breaks a protocol invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid event kind: expected {expected}, got {got}")]
    WrongKind { expected: Kind, got: Kind },

    #[error("missing required tag: {0}")]
    MissingTag(&'static str),

    #[error("invalid subspace ID: expected {expected}, got {got}")]
    SubspaceIdMismatch { expected: String, got: String },

    #[error("invalid content: {0}")]
    InvalidContent(String),

    #[error("missing description in content")]
    MissingDescription,

    #[error("invalid ops format: {0}. Each part must be in the format key=value")]
    InvalidOps(String),

    #[error("invalid subspace ID format or length: {0}")]
    InvalidSubspaceId(String),
}

/// Failure while assembling the operation registry.
///
/// These are configuration errors and should abort startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("kind {kind} is already registered to {existing:?}, cannot register {attempted:?}")]
    KindCollision {
        kind: Kind,
        existing: String,
        attempted: String,
    },

    #[error("operation {operation:?} is already registered to kind {existing}, cannot register kind {attempted}")]
    OperationCollision {
        operation: String,
        existing: Kind,
        attempted: Kind,
    },

    #[error("empty operation name for kind {0}")]
    EmptyOperation(Kind),
}

/// Hashing, signing or verification failure.
///
/// Verification always fails closed: any of these means "not verified".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("can't serialize event with wrong or missing properties: {0}")]
    MalformedEvent(String),

    #[error("invalid secret key")]
    InvalidSecretKey,

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("event id mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },

    #[error("missing signature")]
    MissingSignature,

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signer address could not be recovered")]
    RecoveryFailed,

    #[error("signer mismatch: event pubkey {expected}, recovered {recovered}")]
    AddressMismatch { expected: String, recovered: String },
}

/// Any core error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl From<PermsError> for CoreError {
    fn from(e: PermsError) -> Self {
        CoreError::Parse(ParseError::AuthTag(e))
    }
}
