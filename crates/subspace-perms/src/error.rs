//! Error types for the permissions module.

use thiserror::Error;

/// Errors that can occur while parsing or enforcing an auth tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermsError {
    /// The tag did not split into exactly three `name=value` parts.
    #[error("invalid auth tag format: {0}")]
    InvalidFormat(String),

    /// A part of the tag was not a single `name=value` pair.
    #[error("invalid auth tag part: {0}")]
    InvalidPart(String),

    /// The action value was not an integer in `0..=7`.
    #[error("invalid action value: {0}")]
    InvalidAction(String),

    /// The causality key was not an integer.
    #[error("invalid key value: {0}")]
    InvalidKey(String),

    /// The expiration clock was not an integer.
    #[error("invalid exp value: {0}")]
    InvalidExp(String),

    /// The tag named a field other than `action`, `key` or `exp`.
    #[error("unknown auth tag field: {0}")]
    UnknownField(String),

    /// The tag does not carry the required action bit.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The tag expired at or before the supplied clock.
    #[error("auth tag has expired: exp {exp} <= clock {clock}")]
    GrantExpired { exp: i64, clock: i64 },

    /// An operation required an auth tag and none was attached.
    #[error("missing auth tag")]
    MissingAuthTag,
}

impl PermsError {
    /// True for errors raised while parsing a tag string.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            PermsError::InvalidFormat(_)
                | PermsError::InvalidPart(_)
                | PermsError::InvalidAction(_)
                | PermsError::InvalidKey(_)
                | PermsError::InvalidExp(_)
                | PermsError::UnknownField(_)
        )
    }
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
