//! # Subspace CIPs
//!
//! The vocabularies of the Subspace improvement proposals, the process-wide
//! [`registry`] built from them, and typed decoders for the governance
//! (CIP-01) and community (CIP-07) domains.
//!
//! ## Usage
//!
//! ```rust
//! use subspace_cip::{governance::Vote, registry, DomainEvent};
//! use subspace_core::SubspaceEvent;
//!
//! let registry = registry().unwrap();
//! let sid = format!("0x{}", "00".repeat(32));
//!
//! let mut vote = Vote::new(registry, sid, "");
//! vote.set_vote("proposal-1", "yes");
//!
//! let decoded = subspace_cip::decode(registry, &vote.to_wire()).unwrap();
//! assert_eq!(decoded.operation(), "vote");
//! ```

pub mod community;
pub mod dispatch;
pub mod domain;
pub mod governance;
pub mod registry;
pub mod vocabularies;

pub use community::CommunityOp;
pub use dispatch::{decode, decoder_for, Decoder, DomainOperation};
pub use domain::DomainEvent;
pub use governance::GovernanceOp;
pub use registry::{build_registry, registry};
