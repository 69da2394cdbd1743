//! Structural validation of subspace creation and join events.

use crate::error::ValidationError;
use crate::event::{SpaceCreate, SpaceJoin, SubspaceEvent};
use crate::tags::{names, Tags};
use crate::types::{SubspaceId, KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN};

const CREATE_REQUIRED_TAGS: [&str; 4] = [names::D, names::SID, names::SUBSPACE_NAME, names::OPS];
const JOIN_REQUIRED_TAGS: [&str; 2] = [names::D, names::SID];

/// Parse an ops string: comma-separated `name=integer` pairs.
///
/// Every pair needs a non-empty name and an integer value; surrounding
/// whitespace around the value is ignored. Values are returned as announced,
/// without checking that they fit a [`Kind`](crate::types::Kind). The error
/// carries the whole ops string.
pub fn parse_ops(ops: &str) -> Result<Vec<(String, i64)>, ValidationError> {
    ops.split(',')
        .map(|part| {
            part.split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .and_then(|(name, value)| {
                    value.trim().parse::<i64>().ok().map(|kind| (name.to_string(), kind))
                })
                .ok_or_else(|| ValidationError::InvalidOps(ops.to_string()))
        })
        .collect()
}

/// Check that every required tag name is present.
pub fn check_required_tags(tags: &Tags, required: &[&'static str]) -> Result<(), ValidationError> {
    for name in required {
        if !tags.contains(name) {
            return Err(ValidationError::MissingTag(*name));
        }
    }
    Ok(())
}

/// Validate a subspace creation event.
///
/// Checks, in order:
/// - kind is the reserved creation kind
/// - the `d`, `sid`, `subspace_name` and `ops` tags are present
/// - the id matches the one derived from name, ops and rules
/// - the content is JSON with a non-empty `desc`
/// - the ops string is well formed
pub fn validate_create(event: &SpaceCreate) -> Result<(), ValidationError> {
    // 1. Kind
    if event.kind() != KIND_SUBSPACE_CREATE {
        return Err(ValidationError::WrongKind {
            expected: KIND_SUBSPACE_CREATE,
            got: event.kind(),
        });
    }

    // 2. Required tags
    check_required_tags(event.tags(), &CREATE_REQUIRED_TAGS)?;

    // 3. Derived id
    let expected =
        SubspaceId::derive(event.subspace_name(), event.ops(), event.rules()).to_string();
    if event.subspace_id() != expected {
        return Err(ValidationError::SubspaceIdMismatch {
            expected,
            got: event.subspace_id().to_string(),
        });
    }

    // 4. Description
    let content: serde_json::Value = serde_json::from_str(event.content())
        .map_err(|e| ValidationError::InvalidContent(e.to_string()))?;
    let has_description = content
        .get("desc")
        .and_then(serde_json::Value::as_str)
        .map_or(false, |desc| !desc.is_empty());
    if !has_description {
        return Err(ValidationError::MissingDescription);
    }

    // 5. Ops
    parse_ops(event.ops())?;

    Ok(())
}

/// Validate a subspace join event.
pub fn validate_join(event: &SpaceJoin) -> Result<(), ValidationError> {
    if event.kind() != KIND_SUBSPACE_JOIN {
        return Err(ValidationError::WrongKind {
            expected: KIND_SUBSPACE_JOIN,
            got: event.kind(),
        });
    }

    check_required_tags(event.tags(), &JOIN_REQUIRED_TAGS)?;

    if !SubspaceId::has_valid_shape(event.subspace_id()) {
        return Err(ValidationError::InvalidSubspaceId(
            event.subspace_id().to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ops() {
        let ops = parse_ops("post=30300,propose=30301").unwrap();
        assert_eq!(
            ops,
            vec![("post".to_string(), 30300), ("propose".to_string(), 30301)]
        );
    }

    #[test]
    fn test_parse_ops_accepts_any_integer() {
        assert_eq!(parse_ops("post=-1").unwrap(), vec![("post".to_string(), -1)]);
        assert_eq!(
            parse_ops("post= 30300,vote=30302 ").unwrap(),
            vec![("post".to_string(), 30300), ("vote".to_string(), 30302)]
        );
    }

    #[test]
    fn test_parse_ops_rejects_malformed_parts() {
        for bad in ["invalid_ops", "post=", "post= ", "=1", "post=abc", "post=1.5", "post=1,", ""] {
            assert_eq!(
                parse_ops(bad),
                Err(ValidationError::InvalidOps(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_create_scenario_validates() {
        let event = SpaceCreate::new("TestSubspace", "post=1,propose=2", "rule1", "desc", "");
        assert!(validate_create(&event).is_ok());
    }

    #[test]
    fn test_create_accepts_negative_and_padded_kinds() {
        let event = SpaceCreate::new("TestSubspace", "post=-1,vote= 30302", "", "desc", "");
        assert!(validate_create(&event).is_ok());
        assert!(SpaceCreate::from_wire(&event.to_wire()).is_ok());
    }

    #[test]
    fn test_create_invalid_ops_names_ops_string() {
        let event = SpaceCreate::new("TestSubspace", "invalid_ops", "", "desc", "");
        let err = validate_create(&event).unwrap_err();
        assert_eq!(err, ValidationError::InvalidOps("invalid_ops".into()));
        assert!(err.to_string().contains("invalid_ops"));
    }

    #[test]
    fn test_create_missing_description() {
        let event = SpaceCreate::new("TestSubspace", "post=1", "", "", "img");
        assert_eq!(validate_create(&event), Err(ValidationError::MissingDescription));
    }

    #[test]
    fn test_join_invalid_sid() {
        let event = SpaceJoin::new("invalid_sid", "");
        let err = validate_join(&event).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSubspaceId(_)));
        assert!(err.to_string().contains("invalid subspace ID format or length"));
    }

    #[test]
    fn test_join_valid_sid() {
        let sid = SubspaceId::derive("x", "post=1", "").to_string();
        assert!(validate_join(&SpaceJoin::new(sid, "hello")).is_ok());
    }

    #[test]
    fn test_required_tags() {
        let mut tags = Tags::new();
        tags.push(names::D, "subspace_join");
        assert_eq!(
            check_required_tags(&tags, &JOIN_REQUIRED_TAGS),
            Err(ValidationError::MissingTag(names::SID))
        );
    }
}
