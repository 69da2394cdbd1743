//! Operation registry: the bidirectional map between event kinds and
//! operation names.
//!
//! A registry is assembled once from explicit `(kind, operation)` tables with
//! a [`RegistryBuilder`] and is immutable afterwards. Every binding must be
//! unique in both directions: binding a kind to a second operation, or an
//! operation to a second kind, is a [`RegistrationError`]. Re-registering an
//! identical pair is a no-op, so overlapping tables can be aggregated.

use std::collections::HashMap;

use crate::error::RegistrationError;
use crate::types::{
    Kind, KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN, OP_SUBSPACE_CREATE, OP_SUBSPACE_JOIN,
};

/// A named table of `(kind, operation)` bindings, e.g. one CIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    /// Human-readable name of the vocabulary.
    pub name: &'static str,
    /// The bindings, in declaration order.
    pub entries: &'static [(u32, &'static str)],
}

impl Vocabulary {
    /// Render the ops string announced in a subspace creation event:
    /// `op=kind` pairs joined by commas, in declaration order.
    pub fn ops_string(&self) -> String {
        self.entries
            .iter()
            .map(|(kind, op)| format!("{}={}", op, kind))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Iterate over the kinds of this vocabulary.
    pub fn kinds(&self) -> impl Iterator<Item = Kind> + '_ {
        self.entries.iter().map(|(kind, _)| Kind(*kind))
    }

    /// Check whether this vocabulary binds `kind`.
    pub fn contains_kind(&self, kind: Kind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind.0)
    }
}

/// The reserved create/join kinds shared by every subspace.
pub const BASE_VOCABULARY: Vocabulary = Vocabulary {
    name: "subspace",
    entries: &[
        (KIND_SUBSPACE_CREATE.0, OP_SUBSPACE_CREATE),
        (KIND_SUBSPACE_JOIN.0, OP_SUBSPACE_JOIN),
    ],
};

/// Immutable bidirectional kind/operation map.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    by_kind: HashMap<Kind, String>,
    by_operation: HashMap<String, Kind>,
}

impl OperationRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Build a registry from a list of vocabularies.
    pub fn from_vocabularies(vocabularies: &[Vocabulary]) -> Result<Self, RegistrationError> {
        let mut builder = RegistryBuilder::new();
        for vocabulary in vocabularies {
            builder.register_vocabulary(vocabulary)?;
        }
        Ok(builder.build())
    }

    /// Resolve a kind to its operation name.
    pub fn operation(&self, kind: Kind) -> Option<&str> {
        self.by_kind.get(&kind).map(String::as_str)
    }

    /// Resolve an operation name to its kind.
    pub fn kind(&self, operation: &str) -> Option<Kind> {
        self.by_operation.get(operation).copied()
    }

    /// Check whether a kind is registered.
    pub fn contains_kind(&self, kind: Kind) -> bool {
        self.by_kind.contains_key(&kind)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    /// Check whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    /// Iterate over all bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Kind, &str)> {
        self.by_kind.iter().map(|(k, op)| (*k, op.as_str()))
    }
}

/// Builder that validates uniqueness as bindings are added.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: OperationRegistry,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `kind` to `operation`.
    pub fn register(
        &mut self,
        kind: impl Into<Kind>,
        operation: &str,
    ) -> Result<&mut Self, RegistrationError> {
        let kind = kind.into();
        if operation.is_empty() {
            return Err(RegistrationError::EmptyOperation(kind));
        }

        if let Some(existing) = self.registry.by_kind.get(&kind) {
            if existing == operation {
                return Ok(self);
            }
            return Err(RegistrationError::KindCollision {
                kind,
                existing: existing.clone(),
                attempted: operation.to_string(),
            });
        }

        if let Some(existing) = self.registry.by_operation.get(operation) {
            return Err(RegistrationError::OperationCollision {
                operation: operation.to_string(),
                existing: *existing,
                attempted: kind,
            });
        }

        self.registry.by_kind.insert(kind, operation.to_string());
        self.registry.by_operation.insert(operation.to_string(), kind);
        Ok(self)
    }

    /// Bind every entry of a vocabulary.
    pub fn register_vocabulary(
        &mut self,
        vocabulary: &Vocabulary,
    ) -> Result<&mut Self, RegistrationError> {
        for (kind, operation) in vocabulary.entries {
            self.register(*kind, operation)?;
        }
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> OperationRegistry {
        self.registry
    }
}
