//! Golden vectors for cross-implementation verification.
//!
//! Every implementation of the Subspace protocol must produce identical:
//! - subspace ids
//! - signer addresses
//! - canonical event strings
//! - event ids
//!
//! Event ids declare the canonical string's length in UTF-16 code units.
//! Signatures are not fixed here: any valid recoverable personal-message
//! signature over the canonical string is accepted.

use subspace::cip::governance::Vote;
use subspace::cip::{vocabularies, DomainEvent};
use subspace::core::{event_hash, hash_personal_message, serialize_event, sign_event, verify_event};
use subspace::{Keypair, Kind, SpaceJoin, SpaceOperation, SubspaceEvent, SubspaceId};

const GOVERNANCE_SID: &str = "0x0bb6c3337167ca617bb1d596071585c674b3dd38cfbef2cfcb0f2c786c5b39d6";
const CREATED_AT: i64 = 1700000000;

fn secret_one() -> Keypair {
    let mut secret = [0u8; 32];
    secret[31] = 1;
    Keypair::from_secret(&secret).unwrap()
}

fn golden_vote() -> Vote {
    let registry = subspace::cip::registry().unwrap();
    let base = SpaceOperation::new(registry, GOVERNANCE_SID, Vote::KIND, "")
        .with_created_at(CREATED_AT);
    let mut vote = Vote::from_base(base);
    vote.set_vote("p-1", "yes");
    vote.base_mut()
        .set_auth("action=2,key=1,exp=1700003600")
        .unwrap();
    vote
}

#[test]
fn golden_personal_message_hash() {
    assert_eq!(
        hex::encode(hash_personal_message(b"hello")),
        "50b2c43fd39106bafbba0da34fc430e1f91e3c96ea2acee2bc34119f92b37750"
    );
}

#[test]
fn golden_addresses() {
    assert_eq!(
        secret_one().address().to_checksum(),
        "7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
    );
    assert_eq!(
        Keypair::from_secret(&[0x42; 32]).unwrap().address().to_checksum(),
        "17c5185167401eD00cF5F5b2fc97D9BBfDb7D025"
    );
}

#[test]
fn golden_subspace_ids() {
    let ops = vocabularies::GOVERNANCE.ops_string();
    assert_eq!(
        ops,
        "post=30300,propose=30301,vote=30302,invite=30303,mint=30304"
    );
    assert_eq!(
        SubspaceId::derive("governance", &ops, "").to_string(),
        GOVERNANCE_SID
    );
    assert_eq!(
        SubspaceId::derive("research", "paper=30501", "open").to_string(),
        "0x566a5427d9b8e6dbbc07e0bb8c76455f7747d2536b100806bf44b52e370ec387"
    );
}

#[test]
fn golden_operation_event() {
    let signed = sign_event(golden_vote().to_wire(), &secret_one()).unwrap();

    assert_eq!(
        serialize_event(&signed).unwrap(),
        concat!(
            r#"[0,"7E5F4552091A69125d5DfCb7b8C2659029395Bdf",1700000000,30302,"#,
            r#"[["d","subspace_op"],"#,
            r#"["sid","0x0bb6c3337167ca617bb1d596071585c674b3dd38cfbef2cfcb0f2c786c5b39d6"],"#,
            r#"["ops","vote"],["proposal_id","p-1"],["vote","yes"],"#,
            r#"["auth","action=2,key=1,exp=1700003600"]],""]"#
        )
    );
    assert_eq!(
        signed.id.as_deref(),
        Some("15aac9a3588a4194ce80bcbeb3f48b78a575362a92bef6d9c1d56f1fdb6de625")
    );
    assert!(verify_event(&signed).is_ok());
}

#[test]
fn golden_join_event() {
    let join = SpaceJoin::new(GOVERNANCE_SID, "").with_created_at(CREATED_AT);
    let mut wire = join.to_wire();
    wire.pubkey = Some(secret_one().address().to_checksum());

    assert_eq!(
        event_hash(&wire).unwrap().to_hex(),
        "be201a57824939651642063f33a212dcca72ba693a4575696d78f95f7eb2dc52"
    );
}

#[test]
fn golden_non_ascii_operation_event() {
    let registry = subspace::cip::registry().unwrap();
    let post = SpaceOperation::new(registry, GOVERNANCE_SID, Kind(30300), "héllo 你好")
        .with_created_at(CREATED_AT);
    let signed = sign_event(post.to_wire(), &secret_one()).unwrap();

    let canonical = serialize_event(&signed).unwrap();
    assert_eq!(canonical.encode_utf16().count(), 188);
    assert_eq!(canonical.len(), 193);
    assert_eq!(
        signed.id.as_deref(),
        Some("16301c02760d21d5a39abe4582ff421ada469f262b3fe97d6a7655c073cca8b6")
    );
    assert!(verify_event(&signed).is_ok());
}
