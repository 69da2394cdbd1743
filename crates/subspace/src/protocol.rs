//! The Protocol: unified API for publishing and receiving subspace events.
//!
//! Publishing projects a built event onto the wire and signs it. Receiving
//! verifies the signature, decodes the event through the registry and
//! enforces the auth tag of operations.

use subspace_cip::{decode, registry, DomainOperation};
use subspace_core::{
    sign_event, verify_event, Address, Keypair, Kind, OperationRegistry, SpaceCreate, SpaceJoin,
    SpaceOperation, SubspaceEvent, WireEvent, KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN,
};
use subspace_perms::{authorize_optional, Action};
use tracing::{debug, warn};

use crate::error::{ProtocolError, Result};

/// Configuration for the Protocol.
#[derive(Debug, Clone)]
pub struct ProtocolConfig {
    /// Reject operations that carry no auth tag.
    pub require_auth: bool,
    /// Action an auth tag must grant for an operation to be accepted.
    pub required_action: Action,
    /// Whether to verify signatures on receive.
    pub verify_on_receive: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            required_action: Action::Write,
            verify_on_receive: true,
        }
    }
}

/// A received event that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedEvent {
    /// A subspace was created.
    Create(SpaceCreate),
    /// Someone joined a subspace.
    Join(SpaceJoin),
    /// An operation inside a subspace.
    Operation(DomainOperation),
}

impl ReceivedEvent {
    /// The subspace the event belongs to.
    pub fn subspace_id(&self) -> &str {
        match self {
            Self::Create(e) => e.subspace_id(),
            Self::Join(e) => e.subspace_id(),
            Self::Operation(op) => op.base().subspace_id(),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Create(e) => e.kind(),
            Self::Join(e) => e.kind(),
            Self::Operation(op) => op.base().kind(),
        }
    }
}

/// The main Protocol handle.
///
/// Holds the local signing identity and a borrowed operation registry, the
/// process-wide one for [`Protocol::new`]. It has no interior mutability and
/// can be shared across threads.
pub struct Protocol<'r> {
    /// The identity keypair used for publishing.
    keypair: Keypair,
    /// The operation registry.
    registry: &'r OperationRegistry,
    /// Configuration.
    config: ProtocolConfig,
}

impl Protocol<'static> {
    /// Create a protocol handle backed by the process-wide registry.
    ///
    /// Fails if the registry cannot be built.
    pub fn new(keypair: Keypair, config: ProtocolConfig) -> Result<Self> {
        let registry = registry()?;
        Ok(Self::with_registry(keypair, registry, config))
    }
}

impl<'r> Protocol<'r> {
    /// Create a protocol handle backed by a caller-provided registry.
    pub fn with_registry(
        keypair: Keypair,
        registry: &'r OperationRegistry,
        config: ProtocolConfig,
    ) -> Self {
        Self {
            keypair,
            registry,
            config,
        }
    }

    /// The local signer's address.
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    pub fn registry(&self) -> &'r OperationRegistry {
        self.registry
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Building
    // ─────────────────────────────────────────────────────────────────────────

    /// Start an operation of `kind` in `subspace_id`.
    pub fn operation(
        &self,
        subspace_id: impl Into<String>,
        kind: Kind,
        content: impl Into<String>,
    ) -> SpaceOperation {
        SpaceOperation::new(self.registry, subspace_id, kind, content)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Publishing
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign an event with the local identity.
    ///
    /// The returned envelope is ready for the transport.
    pub fn publish(&self, event: &impl SubspaceEvent) -> Result<WireEvent> {
        let signed = sign_event(event.to_wire(), &self.keypair)?;
        debug!(
            id = signed.id.as_deref().unwrap_or_default(),
            kind = %signed.kind,
            "published event"
        );
        Ok(signed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Receiving
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify, decode and authorize a received event.
    ///
    /// `clock` is the application clock auth tag expiry is measured against.
    pub fn receive(&self, event: WireEvent, clock: i64) -> Result<ReceivedEvent> {
        // 1. Signature
        if self.config.verify_on_receive {
            if let Err(e) = verify_event(&event) {
                warn!(id = event.id.as_deref().unwrap_or_default(), error = %e, "rejected event");
                return Err(e.into());
            }
        }

        // 2. Decode
        let received = match event.kind {
            KIND_SUBSPACE_CREATE => ReceivedEvent::Create(SpaceCreate::from_wire(&event)?),
            KIND_SUBSPACE_JOIN => ReceivedEvent::Join(SpaceJoin::from_wire(&event)?),
            _ => {
                let op = decode(self.registry, &event)?;
                // 3. Authorization
                self.authorize(&op, clock)?;
                ReceivedEvent::Operation(op)
            }
        };

        debug!(
            kind = %received.kind(),
            subspace = received.subspace_id(),
            "received event"
        );
        Ok(received)
    }

    /// Check an operation's auth tag against the configured action.
    fn authorize(&self, op: &DomainOperation, clock: i64) -> Result<()> {
        let base = op.base();
        authorize_optional(
            base.auth_tag(),
            self.config.required_action,
            clock,
            self.config.require_auth,
        )
        .map_err(|e| {
            warn!(operation = base.operation(), error = %e, "unauthorized operation");
            ProtocolError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subspace_cip::governance::{Post, KIND_POST};
    use subspace_cip::{DomainEvent, GovernanceOp};
    use subspace_core::{CoreError, CryptoError, SubspaceId, Vocabulary};
    use subspace_perms::PermsError;

    fn protocol(config: ProtocolConfig) -> Protocol<'static> {
        let keypair = Keypair::from_secret(&[0x11; 32]).unwrap();
        Protocol::new(keypair, config).unwrap()
    }

    fn sid() -> String {
        SubspaceId::derive("test", "post=30300", "").to_string()
    }

    fn signed_post(protocol: &Protocol<'_>, auth: Option<&str>) -> WireEvent {
        let mut post = Post::new(protocol.registry(), sid(), "hello");
        post.set_content_type("text");
        if let Some(auth) = auth {
            post.base_mut().set_auth(auth).unwrap();
        }
        protocol.publish(&post).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ProtocolConfig::default();
        assert!(!config.require_auth);
        assert_eq!(config.required_action, Action::Write);
        assert!(config.verify_on_receive);
    }

    #[test]
    fn test_publish_then_receive_post() {
        let protocol = protocol(ProtocolConfig::default());
        let wire = signed_post(&protocol, Some("action=2,key=1,exp=100"));
        assert_eq!(wire.pubkey.as_deref(), Some(protocol.address().to_checksum().as_str()));

        match protocol.receive(wire, 50).unwrap() {
            ReceivedEvent::Operation(DomainOperation::Governance(GovernanceOp::Post(post))) => {
                assert_eq!(post.content_type, "text");
                assert_eq!(post.kind(), KIND_POST);
            }
            other => panic!("expected post, got {:?}", other),
        }
    }

    #[test]
    fn test_receive_create_and_join() {
        let protocol = protocol(ProtocolConfig::default());

        let create = SpaceCreate::new("test", "post=30300", "", "a test space", "");
        let received = protocol.receive(protocol.publish(&create).unwrap(), 0).unwrap();
        assert_eq!(received, ReceivedEvent::Create(create.clone()));

        let join = SpaceJoin::new(create.subspace_id(), "");
        let received = protocol.receive(protocol.publish(&join).unwrap(), 0).unwrap();
        assert_eq!(received.subspace_id(), create.subspace_id());
    }

    #[test]
    fn test_expired_auth_is_rejected() {
        let protocol = protocol(ProtocolConfig::default());
        let wire = signed_post(&protocol, Some("action=2,key=1,exp=100"));
        assert_eq!(
            protocol.receive(wire, 100),
            Err(ProtocolError::Permission(PermsError::GrantExpired {
                exp: 100,
                clock: 100
            }))
        );
    }

    #[test]
    fn test_insufficient_action_is_rejected() {
        let protocol = protocol(ProtocolConfig::default());
        let wire = signed_post(&protocol, Some("action=1,key=1,exp=100"));
        assert!(matches!(
            protocol.receive(wire, 0),
            Err(ProtocolError::Permission(PermsError::PermissionDenied(_)))
        ));
    }

    #[test]
    fn test_missing_auth_depends_on_config() {
        let lenient = protocol(ProtocolConfig::default());
        assert!(lenient.receive(signed_post(&lenient, None), 0).is_ok());

        let strict = protocol(ProtocolConfig {
            require_auth: true,
            ..ProtocolConfig::default()
        });
        assert_eq!(
            strict.receive(signed_post(&strict, None), 0),
            Err(ProtocolError::Permission(PermsError::MissingAuthTag))
        );
    }

    #[test]
    fn test_tampered_event_is_rejected() {
        let protocol = protocol(ProtocolConfig::default());
        let mut wire = signed_post(&protocol, None);
        wire.content = "tampered".into();
        assert!(matches!(
            protocol.receive(wire, 0),
            Err(ProtocolError::Core(CoreError::Crypto(CryptoError::HashMismatch { .. })))
        ));
    }

    #[test]
    fn test_local_registry_is_borrowed() {
        let local = OperationRegistry::from_vocabularies(&[Vocabulary {
            name: "notes",
            entries: &[(30900, "note")],
        }])
        .unwrap();
        let keypair = Keypair::from_secret(&[0x11; 32]).unwrap();
        let protocol = Protocol::with_registry(keypair, &local, ProtocolConfig::default());

        let note = protocol.operation(sid(), Kind(30900), "hi");
        assert_eq!(note.operation(), "note");
        match protocol.receive(protocol.publish(&note).unwrap(), 0).unwrap() {
            ReceivedEvent::Operation(DomainOperation::Generic(op)) => {
                assert_eq!(op.operation(), "note")
            }
            other => panic!("expected generic note, got {:?}", other),
        }
    }

    #[test]
    fn test_verification_can_be_disabled() {
        let protocol = protocol(ProtocolConfig {
            verify_on_receive: false,
            ..ProtocolConfig::default()
        });
        let post = Post::new(protocol.registry(), sid(), "unsigned");
        assert!(protocol.receive(post.to_wire(), 0).is_ok());
    }

    #[test]
    fn test_protocol_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Protocol<'static>>();
    }
}
