//! # Subspace Permissions
//!
//! Capability tags attached to subspace operations.
//!
//! ## Overview
//!
//! An [`AuthTag`] states which actions an event's author may perform
//! ([`Action::Read`], [`Action::Write`], [`Action::Execute`]), the causality
//! key the capability belongs to, and the clock value at which it expires.
//! Tags are plain data: they are parsed from and rendered to the
//! `action=<int>,key=<int>,exp=<int>` form, and enforced with [`authorize`]
//! independently of whatever transport delivered the event.
//!
//! ## Usage
//!
//! ```rust
//! use subspace_perms::{authorize, Action, AuthTag};
//!
//! let tag: AuthTag = "action=7,key=5,exp=1000".parse().unwrap();
//! assert!(tag.has_permission(Action::Write));
//! assert!(authorize(&tag, Action::Write, 999).is_ok());
//! assert!(authorize(&tag, Action::Write, 1000).is_err());
//! ```

pub mod auth;
pub mod check;
pub mod error;

pub use auth::{Action, AuthTag, MAX_ACTION};
pub use check::{authorize, authorize_optional};
pub use error::{PermsError, Result};
