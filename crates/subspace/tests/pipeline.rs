//! End-to-end publish/receive flows across two participants.

use anyhow::Result;
use subspace::cip::community::{ChannelMessage, CommunityOp};
use subspace::cip::governance::{GovernanceOp, Propose, Vote};
use subspace::cip::{DomainEvent, DomainOperation};
use subspace::core::{CoreError, CryptoError, ParseError};
use subspace::perms::PermsError;
use subspace::{
    Keypair, Kind, Protocol, ProtocolConfig, ProtocolError, ReceivedEvent, SpaceCreate, SpaceJoin,
    WireEvent,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn participant(seed: u8) -> Result<Protocol<'static>> {
    Ok(Protocol::new(
        Keypair::from_secret(&[seed; 32])?,
        ProtocolConfig::default(),
    )?)
}

/// Serialize to JSON and back, as a relay would.
fn relay(event: &WireEvent) -> Result<WireEvent> {
    Ok(WireEvent::from_json(&event.to_json()?)?)
}

#[test]
fn test_create_join_and_govern() -> Result<()> {
    init_tracing();
    let alice = participant(0x01)?;
    let bob = participant(0x02)?;

    // Alice creates the subspace.
    let create = SpaceCreate::new(
        "council",
        "propose=30301,vote=30302",
        "quorum=2",
        "decisions of the council",
        "",
    );
    let sid = create.subspace_id().to_string();
    let received = bob.receive(relay(&alice.publish(&create)?)?, 0)?;
    match received {
        ReceivedEvent::Create(c) => {
            assert_eq!(c.subspace_name(), "council");
            assert_eq!(c.rules(), "quorum=2");
            assert_eq!(c.description(), "decisions of the council");
        }
        other => panic!("expected create, got {:?}", other),
    }

    // Bob joins.
    let join = SpaceJoin::new(sid.as_str(), "");
    let received = alice.receive(relay(&bob.publish(&join)?)?, 0)?;
    assert_eq!(received.subspace_id(), sid);

    // Alice proposes, Bob votes with the proposal as parent.
    let mut propose = Propose::new(alice.registry(), sid.as_str(), "raise the quorum");
    propose.set_proposal("p-1", "quorum=3");
    propose.base_mut().set_auth("action=3,key=1,exp=1000")?;
    let proposal = alice.publish(&propose)?;
    let proposal_id = proposal.id.clone().unwrap_or_default();
    bob.receive(relay(&proposal)?, 10)?;

    let mut vote = Vote::new(bob.registry(), sid.as_str(), "");
    vote.set_vote("p-1", "yes");
    vote.base_mut().set_auth("action=2,key=2,exp=1000")?;
    vote.base_mut().set_parents([proposal_id.as_str()]);

    match alice.receive(relay(&bob.publish(&vote)?)?, 20)? {
        ReceivedEvent::Operation(DomainOperation::Governance(GovernanceOp::Vote(v))) => {
            assert_eq!(v.vote, "yes");
            assert_eq!(v.base().parents(), Some(&[proposal_id][..]));
            assert_eq!(v.base().auth_tag().map(|a| a.key), Some(2));
        }
        other => panic!("expected vote, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_channel_message_reply() -> Result<()> {
    init_tracing();
    let alice = participant(0x03)?;
    let sid = format!("0x{}", "cd".repeat(32));

    let mut first = ChannelMessage::new(alice.registry(), sid.as_str(), "");
    first.set_message_info("general", "alice", "gm", None);
    let first = alice.publish(&first)?;
    let first_id = first.id.clone().unwrap_or_default();

    let mut reply = ChannelMessage::new(alice.registry(), sid.as_str(), "");
    reply.set_message_info("general", "alice", "gm again", Some(first_id.as_str()));

    match alice.receive(alice.publish(&reply)?, 0)? {
        ReceivedEvent::Operation(DomainOperation::Community(CommunityOp::ChannelMessage(m))) => {
            assert_eq!(m.reply_to.as_deref(), Some(first_id.as_str()));
            assert_eq!(m.channel_id, "general");
        }
        other => panic!("expected channel message, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_generic_operation() -> Result<()> {
    let alice = participant(0x04)?;
    let sid = format!("0x{}", "ef".repeat(32));

    let mut like = alice.operation(sid.as_str(), Kind(30600), "");
    like.set_auth("action=7,key=9,exp=50")?;

    match alice.receive(alice.publish(&like)?, 49)? {
        ReceivedEvent::Operation(DomainOperation::Generic(op)) => {
            assert_eq!(op.operation(), "like");
            assert_eq!(op.subspace_id(), sid);
        }
        other => panic!("expected generic operation, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_rejections() -> Result<()> {
    init_tracing();
    let alice = participant(0x05)?;
    let mallory = participant(0x06)?;
    let sid = format!("0x{}", "12".repeat(32));

    // Expired grant.
    let mut vote = Vote::new(alice.registry(), sid.as_str(), "");
    vote.set_vote("p-1", "no");
    vote.base_mut().set_auth("action=2,key=1,exp=100")?;
    let signed = alice.publish(&vote)?;
    assert_eq!(
        alice.receive(signed.clone(), 150).unwrap_err(),
        ProtocolError::Permission(PermsError::GrantExpired { exp: 100, clock: 150 })
    );

    // Claiming someone else's address.
    let mut forged = mallory.publish(&vote)?;
    forged.pubkey = signed.pubkey.clone();
    assert!(matches!(
        alice.receive(forged, 0),
        Err(ProtocolError::Core(CoreError::Crypto(_)))
    ));

    // Unregistered kind.
    let mut unknown = signed.clone();
    unknown.kind = Kind(1);
    let resigned = mallory.publish(&subspace::SpaceOperation::new(
        alice.registry(),
        sid.as_str(),
        Kind(1),
        "",
    ))?;
    assert_eq!(
        alice.receive(resigned, 0).unwrap_err(),
        ProtocolError::Core(CoreError::Parse(ParseError::UnknownKind(Kind(1))))
    );
    assert!(matches!(
        alice.receive(unknown, 0),
        Err(ProtocolError::Core(CoreError::Crypto(
            CryptoError::HashMismatch { .. }
        )))
    ));

    // Creation without a description.
    let bare = SpaceCreate::new("empty", "post=30300", "", "", "");
    assert!(matches!(
        alice.receive(alice.publish(&bare)?, 0),
        Err(ProtocolError::Core(CoreError::Validation(_)))
    ));
    Ok(())
}
