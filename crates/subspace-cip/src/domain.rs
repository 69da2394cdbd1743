//! Typed operations layered on [`SpaceOperation`].
//!
//! A domain operation owns a base [`SpaceOperation`] and mirrors the domain
//! tags it carries as typed fields. Setters update both.

use subspace_core::{Kind, OperationRegistry, SpaceOperation};

/// A typed operation of one registered kind.
pub trait DomainEvent: Sized {
    /// Operation name, as registered.
    const OPERATION: &'static str;

    /// Registered kind.
    const KIND: Kind;

    /// Wrap a base operation, reading domain fields from its tags.
    fn from_base(base: SpaceOperation) -> Self;

    fn base(&self) -> &SpaceOperation;

    fn base_mut(&mut self) -> &mut SpaceOperation;

    fn into_base(self) -> SpaceOperation;

    /// Start a new operation with no domain tags.
    fn new(
        registry: &OperationRegistry,
        subspace_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::from_base(SpaceOperation::new(
            registry,
            subspace_id,
            Self::KIND,
            content,
        ))
    }
}

/// First value of a tag on `base`, or empty.
pub(crate) fn tag_or_empty(base: &SpaceOperation, name: &str) -> String {
    base.tag_value(name).unwrap_or_default().to_string()
}

/// Implement [`DomainEvent`] plumbing and [`SubspaceEvent`] for a struct with
/// a `base: SpaceOperation` field.
///
/// [`SubspaceEvent`]: subspace_core::SubspaceEvent
macro_rules! domain_event {
    ($ty:ident, $op:expr, $kind:expr, |$base:ident| $from_base:expr) => {
        impl $crate::domain::DomainEvent for $ty {
            const OPERATION: &'static str = $op;
            const KIND: subspace_core::Kind = $kind;

            fn from_base($base: subspace_core::SpaceOperation) -> Self {
                $from_base
            }

            fn base(&self) -> &subspace_core::SpaceOperation {
                &self.base
            }

            fn base_mut(&mut self) -> &mut subspace_core::SpaceOperation {
                &mut self.base
            }

            fn into_base(self) -> subspace_core::SpaceOperation {
                self.base
            }
        }

        impl subspace_core::SubspaceEvent for $ty {
            fn kind(&self) -> subspace_core::Kind {
                subspace_core::SubspaceEvent::kind(&self.base)
            }

            fn created_at(&self) -> i64 {
                subspace_core::SubspaceEvent::created_at(&self.base)
            }

            fn tags(&self) -> &subspace_core::Tags {
                subspace_core::SubspaceEvent::tags(&self.base)
            }

            fn content(&self) -> &str {
                subspace_core::SubspaceEvent::content(&self.base)
            }
        }
    };
}

pub(crate) use domain_event;
