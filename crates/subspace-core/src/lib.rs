//! # Subspace Core
//!
//! Pure primitives for the Subspace protocol: the operation registry, the
//! canonical event archetypes, causal parent links and Ethereum-style event
//! signing.
//!
//! This crate contains no I/O and no global state. The process-wide registry
//! lives in `subspace-cip`.
//!
//! ## Key Types
//!
//! - [`OperationRegistry`] - Bidirectional map between kinds and operation names
//! - [`SpaceCreate`], [`SpaceJoin`], [`SpaceOperation`] - The event archetypes
//! - [`WireEvent`] - The envelope exchanged with the transport
//! - [`Keypair`] - secp256k1 signer identified by its Ethereum address
//! - [`VerifiedEvent`] - An envelope whose signature has been checked
//!
//! ## Canonicalization
//!
//! Events are hashed and signed over a compact JSON array. See [`canonical`].

pub mod canonical;
pub mod causal;
pub mod crypto;
pub mod error;
pub mod event;
pub mod registry;
pub mod signing;
pub mod tags;
pub mod types;
pub mod validation;
pub mod wire;

pub use canonical::{canonical_hash, event_hash, serialize_event};
pub use causal::{normalize_parents, PARENT_HASH_LEN};
pub use crypto::{
    hash_personal_message, hash_prefixed_message, keccak256, Address, Keypair,
    RecoverableSignature,
};
pub use error::{CoreError, CryptoError, ParseError, RegistrationError, ValidationError};
pub use event::{SpaceCreate, SpaceJoin, SpaceOperation, SubspaceEvent};
pub use registry::{OperationRegistry, RegistryBuilder, Vocabulary, BASE_VOCABULARY};
pub use signing::{is_verified, sign_event, verify_event, VerifiedEvent};
pub use tags::{Tag, Tags};
pub use types::{
    EventId, Kind, SubspaceId, KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN, OP_SUBSPACE_CREATE,
    OP_SUBSPACE_JOIN,
};
pub use validation::{parse_ops, validate_create, validate_join};
pub use wire::{now_secs, WireEvent};
