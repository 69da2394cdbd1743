//! The process-wide operation registry.
//!
//! Built once, on first use, from the base table and every CIP table. There
//! is no way to add bindings afterwards.

use once_cell::sync::OnceCell;
use subspace_core::{OperationRegistry, RegistrationError, BASE_VOCABULARY};
use tracing::debug;

use crate::vocabularies;

static REGISTRY: OnceCell<OperationRegistry> = OnceCell::new();

/// The shared registry.
///
/// The first call builds it; a collision between tables is returned as an
/// error, and a later call retries the build.
pub fn registry() -> Result<&'static OperationRegistry, RegistrationError> {
    REGISTRY.get_or_try_init(build_registry)
}

/// Build a fresh registry from the base table and every CIP table.
pub fn build_registry() -> Result<OperationRegistry, RegistrationError> {
    let mut builder = OperationRegistry::builder();
    for vocabulary in std::iter::once(BASE_VOCABULARY).chain(vocabularies::ALL) {
        builder.register_vocabulary(&vocabulary)?;
        debug!(
            vocabulary = vocabulary.name,
            operations = vocabulary.entries.len(),
            "registered vocabulary"
        );
    }
    Ok(builder.build())
}
