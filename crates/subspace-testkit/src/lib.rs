//! # Subspace Testkit
//!
//! Testing utilities for the Subspace protocol.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed events with expected signer addresses and ids
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ready participant with a subspace to work in
//!
//! ## Golden Vectors
//!
//! ```rust
//! use subspace_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, id) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, id);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use subspace_testkit::generators::{operation_from_params, OperationParams};
//!
//! proptest! {
//!     #[test]
//!     fn operations_decode(params: OperationParams) {
//!         let wire = operation_from_params(&params).to_wire();
//!         prop_assert!(subspace_cip::decode(subspace_cip::registry().unwrap(), &wire).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use subspace_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let create = fixture.make_create();
//! assert!(fixture.protocol.receive(create, 0).is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{operation_from_params, OperationParams};
pub use vectors::{all_vectors, event_from_vector, verify_all_vectors, GoldenVector};
