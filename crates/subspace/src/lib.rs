//! # Subspace
//!
//! The unified API for the Subspace protocol - permissioned, causally linked
//! events exchanged over an untrusted relay network.
//!
//! ## Overview
//!
//! A subspace is a shared space declared by a creation event. Members join
//! it and then publish operations inside it:
//!
//! - **Creation**: Declares the subspace name, the operations it speaks and
//!   its rules. The subspace id is derived from them.
//! - **Join**: Membership announcement for an existing subspace.
//! - **Operation**: An event whose kind is resolved to an operation name
//!   through the registry. It may carry an auth tag and parent references.
//!
//! Every event is signed with a secp256k1 key using the personal-message
//! scheme. The signer is identified by its Ethereum address.
//!
//! ## Usage
//!
//! ```rust
//! use subspace::{Keypair, Protocol, ProtocolConfig, ReceivedEvent};
//! use subspace::cip::{governance::Vote, DomainEvent};
//!
//! let protocol = Protocol::new(Keypair::generate(), ProtocolConfig::default()).unwrap();
//! let sid = format!("0x{}", "00".repeat(32));
//!
//! let mut vote = Vote::new(protocol.registry(), sid, "");
//! vote.set_vote("proposal-1", "yes");
//! vote.base_mut().set_auth("action=2,key=1,exp=1000").unwrap();
//!
//! let wire = protocol.publish(&vote).unwrap();
//! let received = protocol.receive(wire, 10).unwrap();
//! assert!(matches!(received, ReceivedEvent::Operation(_)));
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `subspace::core` - Events, registry, canonical form and signing
//! - `subspace::perms` - Auth tags and authorization
//! - `subspace::cip` - Vocabularies, the shared registry and domain decoders

pub mod error;
pub mod protocol;

// Re-export component crates
pub use subspace_cip as cip;
pub use subspace_core as core;
pub use subspace_perms as perms;

// Re-export main types for convenience
pub use error::{ProtocolError, Result};
pub use protocol::{Protocol, ProtocolConfig, ReceivedEvent};

// Re-export commonly used types
pub use subspace_cip::DomainOperation;
pub use subspace_core::{
    Address, Keypair, Kind, SpaceCreate, SpaceJoin, SpaceOperation, SubspaceEvent, SubspaceId,
    WireEvent,
};
pub use subspace_perms::{Action, AuthTag};
