//! Receive-side decoding: from a wire envelope to a typed operation.
//!
//! The registry maps the kind to an operation name; a table maps the
//! operation name to the decoder of the domain that owns it. Operations with
//! a registered kind but no typed domain decode to the base
//! [`SpaceOperation`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use subspace_core::{OperationRegistry, ParseError, SpaceOperation, WireEvent};

use crate::community::CommunityOp;
use crate::governance::GovernanceOp;
use crate::vocabularies;

/// A decoded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOperation {
    Governance(GovernanceOp),
    Community(CommunityOp),
    /// A registered operation without a typed decoder.
    Generic(SpaceOperation),
}

impl DomainOperation {
    /// The underlying base operation.
    pub fn base(&self) -> &SpaceOperation {
        match self {
            Self::Governance(op) => op.base(),
            Self::Community(op) => op.base(),
            Self::Generic(op) => op,
        }
    }

    /// The operation name.
    pub fn operation(&self) -> &str {
        self.base().operation()
    }
}

/// Decoder for one domain.
pub type Decoder = fn(SpaceOperation) -> Result<DomainOperation, ParseError>;

fn decode_governance(base: SpaceOperation) -> Result<DomainOperation, ParseError> {
    GovernanceOp::decode(base).map(DomainOperation::Governance)
}

fn decode_community(base: SpaceOperation) -> Result<DomainOperation, ParseError> {
    CommunityOp::decode(base).map(DomainOperation::Community)
}

static DECODERS: Lazy<HashMap<&'static str, Decoder>> = Lazy::new(|| {
    let domains: [(&[(u32, &'static str)], Decoder); 2] = [
        (vocabularies::GOVERNANCE.entries, decode_governance),
        (vocabularies::COMMUNITY.entries, decode_community),
    ];

    let mut table = HashMap::new();
    for (entries, decoder) in domains {
        for (_, operation) in entries {
            table.insert(*operation, decoder);
        }
    }
    table
});

/// The decoder registered for `operation`, if any.
pub fn decoder_for(operation: &str) -> Option<Decoder> {
    DECODERS.get(operation).copied()
}

/// Decode a received operation envelope.
///
/// Fails with [`ParseError::UnknownKind`] if the kind is not registered, and
/// with [`ParseError::AuthTag`] if an `auth` tag does not parse.
pub fn decode(
    registry: &OperationRegistry,
    event: &WireEvent,
) -> Result<DomainOperation, ParseError> {
    let base = SpaceOperation::from_wire(registry, event)?;
    match decoder_for(base.operation()) {
        Some(decoder) => decoder(base),
        None => Ok(DomainOperation::Generic(base)),
    }
}
