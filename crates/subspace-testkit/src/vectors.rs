//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the signer address and event id of fixed events, so
//! that canonical serialization and the event id hash produce
//! identical results across implementations.

use subspace_core::{event_hash, sign_event, CryptoError, Keypair, Kind, Tags, WireEvent};

/// Subspace id of `governance` with the CIP-01 ops string and no rules.
pub const GOVERNANCE_SID: &str =
    "0x0bb6c3337167ca617bb1d596071585c674b3dd38cfbef2cfcb0f2c786c5b39d6";

/// Subspace id of `council` / `propose=30301,vote=30302` / `quorum=2`.
pub const COUNCIL_SID: &str = "0x805777a6a6cead5f4d48254e64227bb8010684c5ab96edee5a9835b924b3eb70";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Secret key bytes.
    pub seed: [u8; 32],
    pub kind: Kind,
    pub created_at: i64,
    pub tags: &'static [&'static [&'static str]],
    pub content: &'static str,
    /// Expected checksummed signer address.
    pub expected_pubkey: &'static str,
    /// Expected event id (hex).
    pub expected_id: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "join with empty content",
            seed: [0x42; 32],
            kind: Kind(30200),
            created_at: 1700000000,
            tags: &[&["d", "subspace_join"], &["sid", GOVERNANCE_SID]],
            content: "",
            expected_pubkey: "17c5185167401eD00cF5F5b2fc97D9BBfDb7D025",
            expected_id: "a6b6f4f9ff53e054f47b7e992d07e17c06a2bf3f482c90f6a47aa92b2c93f10a",
        },
        GoldenVector {
            name: "post with non-ascii content",
            seed: [0x01; 32],
            kind: Kind(30300),
            created_at: 1700000001,
            tags: &[
                &["d", "subspace_op"],
                &["sid", GOVERNANCE_SID],
                &["ops", "post"],
                &["content_type", "text"],
            ],
            content: "héllo wörld ✓",
            expected_pubkey: "1a642f0E3c3aF545E7AcBD38b07251B3990914F1",
            expected_id: "7330822cc6d70a0d542b6eea1d62b3df67efea0266ee7be8debb253b3028741e",
        },
        GoldenVector {
            name: "vote with auth and two parents",
            seed: [0x02; 32],
            kind: Kind(30302),
            created_at: 1700000002,
            tags: &[
                &["d", "subspace_op"],
                &["sid", GOVERNANCE_SID],
                &["ops", "vote"],
                &["proposal_id", "p-1"],
                &["vote", "yes"],
                &["auth", "action=2,key=1,exp=1700003600"],
                &[
                    "parent",
                    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                    "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                ],
            ],
            content: "",
            expected_pubkey: "5050A4F4b3f9338C3472dcC01A87C76A144b3c9c",
            expected_id: "f4cdf67292022e191c6c65ab823a3b46bacd3da2260ff573f6e218dc03a8ac08",
        },
        GoldenVector {
            name: "create with rules",
            seed: [0x03; 32],
            kind: Kind(30100),
            created_at: 1700000003,
            tags: &[
                &["d", "subspace_create"],
                &["sid", COUNCIL_SID],
                &["subspace_name", "council"],
                &["ops", "propose=30301,vote=30302"],
                &["rules", "quorum=2"],
            ],
            content: r#"{"desc":"decisions of the council","img_url":""}"#,
            expected_pubkey: "3325a78425F17a7E487Eb5666b2bFd93aBb06c70",
            expected_id: "ebd4dd76b95ca38c169cf73bcf09f1989025064d0a4972d545ef7832f08ddc39",
        },
    ]
}

/// Build the unsigned envelope of a vector.
pub fn event_from_vector(vector: &GoldenVector) -> WireEvent {
    let mut tags = Tags::new();
    for tag in vector.tags {
        tags.push_raw(tag.iter().map(|s| s.to_string()).collect());
    }
    WireEvent::unsigned(
        vector.kind,
        vector.created_at,
        tags,
        vector.content.to_string(),
    )
}

/// Build and sign the envelope of a vector.
pub fn signed_event_from_vector(vector: &GoldenVector) -> Result<WireEvent, CryptoError> {
    let keypair = Keypair::from_secret(&vector.seed)?;
    sign_event(event_from_vector(vector), &keypair)
}

/// Check every vector against its expected id.
///
/// Returns `(name, matches, computed_id)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let mut event = event_from_vector(v);
            event.pubkey = Some(v.expected_pubkey.to_string());
            let hex = event_hash(&event)
                .map(|id| id.to_hex())
                .unwrap_or_default();
            (v.name.to_string(), hex == v.expected_id, hex)
        })
        .collect()
}
