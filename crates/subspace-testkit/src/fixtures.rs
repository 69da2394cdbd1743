//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use subspace::{Protocol, ProtocolConfig};
use subspace_core::{Address, Keypair, Kind, SpaceCreate, SpaceJoin, WireEvent};

/// A test fixture: one participant and the subspace it works in.
pub struct TestFixture {
    pub protocol: Protocol<'static>,
    pub subspace_id: String,
}

/// Name of the fixture's subspace.
pub const FIXTURE_SUBSPACE: &str = "fixture";

/// Ops string of the fixture's subspace.
pub const FIXTURE_OPS: &str = "post=30300,vote=30302,like=30600";

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self::with_keypair(Keypair::generate())
    }

    /// Create with a deterministic keypair from a secret.
    ///
    /// Panics if `seed` is not a valid secp256k1 secret.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::with_keypair(Keypair::from_secret(&seed).expect("invalid fixture secret"))
    }

    fn with_keypair(keypair: Keypair) -> Self {
        let protocol =
            Protocol::new(keypair, ProtocolConfig::default()).expect("registry must build");
        let subspace_id = SpaceCreate::new(FIXTURE_SUBSPACE, FIXTURE_OPS, "", "fixture", "")
            .subspace_id()
            .to_string();
        Self {
            protocol,
            subspace_id,
        }
    }

    pub fn address(&self) -> Address {
        self.protocol.address()
    }

    /// Signed creation event of the fixture's subspace.
    pub fn make_create(&self) -> WireEvent {
        let create = SpaceCreate::new(FIXTURE_SUBSPACE, FIXTURE_OPS, "", "fixture", "");
        self.protocol.publish(&create).expect("signing failed")
    }

    /// Signed join event for the fixture's subspace.
    pub fn make_join(&self) -> WireEvent {
        let join = SpaceJoin::new(self.subspace_id.as_str(), "");
        self.protocol.publish(&join).expect("signing failed")
    }

    /// Signed operation of `kind` with optional auth and parent references.
    pub fn make_operation(
        &self,
        kind: Kind,
        content: &str,
        auth: Option<&str>,
        parents: &[&str],
    ) -> WireEvent {
        let mut op = self
            .protocol
            .operation(self.subspace_id.as_str(), kind, content);
        if let Some(auth) = auth {
            op.set_auth(auth).expect("invalid fixture auth tag");
        }
        if !parents.is_empty() {
            op.set_parents(parents);
        }
        self.protocol.publish(&op).expect("signing failed")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[31] = 1;
            TestFixture::with_seed(seed)
        })
        .collect()
}
