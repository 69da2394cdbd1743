//! Proptest generators for property-based testing.

use proptest::prelude::*;

use subspace_cip::registry;
use subspace_core::{
    Keypair, Kind, SpaceOperation, SubspaceId, KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN,
};
use subspace_perms::{Action, AuthTag};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_filter_map("invalid secret", |secret| {
        Keypair::from_secret(&secret).ok()
    })
}

/// Generate a random SubspaceId.
pub fn subspace_id() -> impl Strategy<Value = SubspaceId> {
    any::<[u8; 32]>().prop_map(SubspaceId::from_bytes)
}

/// Generate a registered operation kind.
pub fn operation_kind() -> impl Strategy<Value = Kind> {
    let kinds: Vec<Kind> = registry()
        .map(|r| {
            r.iter()
                .map(|(kind, _)| kind)
                .filter(|k| *k != KIND_SUBSPACE_CREATE && *k != KIND_SUBSPACE_JOIN)
                .collect()
        })
        .unwrap_or_default();
    prop::sample::select(kinds)
}

/// Generate a single action.
pub fn action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Read), Just(Action::Write), Just(Action::Execute)]
}

/// Generate an auth tag with a non-empty action mask.
pub fn auth_tag() -> impl Strategy<Value = AuthTag> {
    (prop::collection::vec(action(), 1..=3), any::<i64>(), any::<i64>())
        .prop_map(|(actions, key, exp)| AuthTag::with_actions(&actions, key, exp))
}

/// Generate a well-formed parent reference.
pub fn parent_hash() -> impl Strategy<Value = String> {
    "[0-9a-f]{64}".prop_map(String::from)
}

/// Generate parent candidates, some of which are malformed.
pub fn parent_candidates() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![parent_hash(), "[0-9a-f]{0,63}", "[0-9a-f]{65,80}"],
        0..6,
    )
}

/// Generate a reasonable timestamp in seconds.
pub fn created_at() -> impl Strategy<Value = i64> {
    0i64..=4_000_000_000i64
}

/// Generate event content, including non-ASCII text.
pub fn content() -> impl Strategy<Value = String> {
    "\\PC{0,64}".prop_map(String::from)
}

/// Parameters for generating an operation.
#[derive(Debug, Clone)]
pub struct OperationParams {
    pub keypair: Keypair,
    pub subspace_id: SubspaceId,
    pub kind: Kind,
    pub created_at: i64,
    pub content: String,
    pub auth: Option<AuthTag>,
    pub parents: Option<Vec<String>>,
}

impl Arbitrary for OperationParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            keypair(),
            subspace_id(),
            operation_kind(),
            created_at(),
            content(),
            prop::option::of(auth_tag()),
            prop::option::of(parent_candidates()),
        )
            .prop_map(
                |(keypair, subspace_id, kind, created_at, content, auth, parents)| {
                    OperationParams {
                        keypair,
                        subspace_id,
                        kind,
                        created_at,
                        content,
                        auth,
                        parents,
                    }
                },
            )
            .boxed()
    }
}

/// Build an unsigned operation from parameters.
pub fn operation_from_params(params: &OperationParams) -> SpaceOperation {
    let registry = registry().expect("registry must build");
    let mut op = SpaceOperation::new(
        registry,
        params.subspace_id.to_string(),
        params.kind,
        params.content.as_str(),
    )
    .with_created_at(params.created_at);

    if let Some(auth) = params.auth {
        op.set_auth_tag(auth);
    }
    if let Some(parents) = &params.parents {
        op.set_parents(parents);
    }
    op
}
