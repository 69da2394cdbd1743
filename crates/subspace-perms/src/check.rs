//! Enforcement of auth tags against a required action and a clock.

use crate::auth::{Action, AuthTag};
use crate::error::{PermsError, Result};

/// Check that `tag` grants `required` and has not expired at `clock`.
///
/// Expiry is checked first: an expired tag is rejected even if it carries
/// the required bit.
pub fn authorize(tag: &AuthTag, required: Action, clock: i64) -> Result<()> {
    if tag.is_expired(clock) {
        return Err(PermsError::GrantExpired {
            exp: tag.exp,
            clock,
        });
    }

    if !tag.has_permission(required) {
        return Err(PermsError::PermissionDenied(format!(
            "{:?} not granted by {}",
            required, tag
        )));
    }

    Ok(())
}

/// Like [`authorize`], but for an optional tag.
///
/// When `required_present` is false a missing tag is accepted; when true it
/// is rejected with [`PermsError::MissingAuthTag`].
pub fn authorize_optional(
    tag: Option<&AuthTag>,
    required: Action,
    clock: i64,
    required_present: bool,
) -> Result<()> {
    match tag {
        Some(tag) => authorize(tag, required, clock),
        None if required_present => Err(PermsError::MissingAuthTag),
        None => Ok(()),
    }
}
