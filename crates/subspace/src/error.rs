//! Error types for the protocol facade.

use subspace_core::{CoreError, CryptoError, ParseError, RegistrationError, ValidationError};
use subspace_perms::PermsError;
use thiserror::Error;

/// Errors that can occur while publishing or receiving events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Parsing, validation or signature failure.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The auth tag does not authorize the event.
    #[error("permission error: {0}")]
    Permission(PermsError),

    /// The operation registry could not be built.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),
}

/// Malformed tags are parse failures; everything else is a denial.
impl From<PermsError> for ProtocolError {
    fn from(e: PermsError) -> Self {
        if e.is_parse_error() {
            ProtocolError::Core(e.into())
        } else {
            ProtocolError::Permission(e)
        }
    }
}

impl From<ParseError> for ProtocolError {
    fn from(e: ParseError) -> Self {
        ProtocolError::Core(e.into())
    }
}

impl From<ValidationError> for ProtocolError {
    fn from(e: ValidationError) -> Self {
        ProtocolError::Core(e.into())
    }
}

impl From<CryptoError> for ProtocolError {
    fn from(e: CryptoError) -> Self {
        ProtocolError::Core(e.into())
    }
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
