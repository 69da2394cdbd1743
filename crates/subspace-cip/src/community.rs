//! CIP-07 community: communities, invitations, channels and channel messages.

use subspace_core::{Kind, ParseError, SpaceOperation};

use crate::domain::{domain_event, tag_or_empty, DomainEvent};

pub const KIND_COMMUNITY_CREATE: Kind = Kind(30700);
pub const KIND_COMMUNITY_INVITE: Kind = Kind(30701);
pub const KIND_CHANNEL_CREATE: Kind = Kind(30702);
pub const KIND_CHANNEL_MESSAGE: Kind = Kind(30703);

/// Community tag names.
pub mod tags {
    pub const COMMUNITY_ID: &str = "community_id";
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const INVITER_ID: &str = "inviter_id";
    pub const INVITEE_ID: &str = "invitee_id";
    pub const METHOD: &str = "method";
    pub const CHANNEL_ID: &str = "channel_id";
    pub const USER_ID: &str = "user_id";
    pub const REPLY_TO: &str = "reply_to";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityCreate {
    base: SpaceOperation,
    pub community_id: String,
    pub name: String,
    pub community_type: String,
}

impl CommunityCreate {
    pub fn set_community_info(
        &mut self,
        community_id: impl Into<String>,
        name: impl Into<String>,
        community_type: impl Into<String>,
    ) {
        self.community_id = community_id.into();
        self.name = name.into();
        self.community_type = community_type.into();
        self.base.push_tag(tags::COMMUNITY_ID, self.community_id.as_str());
        self.base.push_tag(tags::NAME, self.name.as_str());
        self.base.push_tag(tags::TYPE, self.community_type.as_str());
    }
}

domain_event!(
    CommunityCreate,
    "community_create",
    KIND_COMMUNITY_CREATE,
    |base| CommunityCreate {
        community_id: tag_or_empty(&base, tags::COMMUNITY_ID),
        name: tag_or_empty(&base, tags::NAME),
        community_type: tag_or_empty(&base, tags::TYPE),
        base,
    }
);

/// An invitation into a community. `method` names how the invitee is
/// reached, e.g. by address or by link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityInvite {
    base: SpaceOperation,
    pub community_id: String,
    pub inviter_id: String,
    pub invitee_id: String,
    pub method: String,
}

impl CommunityInvite {
    pub fn set_invite_info(
        &mut self,
        community_id: impl Into<String>,
        inviter_id: impl Into<String>,
        invitee_id: impl Into<String>,
        method: impl Into<String>,
    ) {
        self.community_id = community_id.into();
        self.inviter_id = inviter_id.into();
        self.invitee_id = invitee_id.into();
        self.method = method.into();
        self.base.push_tag(tags::COMMUNITY_ID, self.community_id.as_str());
        self.base.push_tag(tags::INVITER_ID, self.inviter_id.as_str());
        self.base.push_tag(tags::INVITEE_ID, self.invitee_id.as_str());
        self.base.push_tag(tags::METHOD, self.method.as_str());
    }
}

domain_event!(
    CommunityInvite,
    "community_invite",
    KIND_COMMUNITY_INVITE,
    |base| CommunityInvite {
        community_id: tag_or_empty(&base, tags::COMMUNITY_ID),
        inviter_id: tag_or_empty(&base, tags::INVITER_ID),
        invitee_id: tag_or_empty(&base, tags::INVITEE_ID),
        method: tag_or_empty(&base, tags::METHOD),
        base,
    }
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCreate {
    base: SpaceOperation,
    pub community_id: String,
    pub channel_id: String,
    pub name: String,
    pub channel_type: String,
}

impl ChannelCreate {
    pub fn set_channel_info(
        &mut self,
        community_id: impl Into<String>,
        channel_id: impl Into<String>,
        name: impl Into<String>,
        channel_type: impl Into<String>,
    ) {
        self.community_id = community_id.into();
        self.channel_id = channel_id.into();
        self.name = name.into();
        self.channel_type = channel_type.into();
        self.base.push_tag(tags::COMMUNITY_ID, self.community_id.as_str());
        self.base.push_tag(tags::CHANNEL_ID, self.channel_id.as_str());
        self.base.push_tag(tags::NAME, self.name.as_str());
        self.base.push_tag(tags::TYPE, self.channel_type.as_str());
    }
}

domain_event!(
    ChannelCreate,
    "channel_create",
    KIND_CHANNEL_CREATE,
    |base| ChannelCreate {
        community_id: tag_or_empty(&base, tags::COMMUNITY_ID),
        channel_id: tag_or_empty(&base, tags::CHANNEL_ID),
        name: tag_or_empty(&base, tags::NAME),
        channel_type: tag_or_empty(&base, tags::TYPE),
        base,
    }
);

/// A message posted to a channel, optionally replying to an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    base: SpaceOperation,
    pub channel_id: String,
    pub user_id: String,
    pub reply_to: Option<String>,
}

impl ChannelMessage {
    /// Set the routing tags and replace the message body.
    pub fn set_message_info(
        &mut self,
        channel_id: impl Into<String>,
        user_id: impl Into<String>,
        content: impl Into<String>,
        reply_to: Option<&str>,
    ) {
        self.channel_id = channel_id.into();
        self.user_id = user_id.into();
        self.reply_to = reply_to.filter(|r| !r.is_empty()).map(str::to_string);
        self.base.push_tag(tags::CHANNEL_ID, self.channel_id.as_str());
        self.base.push_tag(tags::USER_ID, self.user_id.as_str());
        if let Some(reply_to) = &self.reply_to {
            self.base.push_tag(tags::REPLY_TO, reply_to.as_str());
        }
        self.base.set_content(content);
    }
}

domain_event!(
    ChannelMessage,
    "channel_message",
    KIND_CHANNEL_MESSAGE,
    |base| ChannelMessage {
        channel_id: tag_or_empty(&base, tags::CHANNEL_ID),
        user_id: tag_or_empty(&base, tags::USER_ID),
        reply_to: base.tag_value(tags::REPLY_TO).map(str::to_string),
        base,
    }
);

/// Any community operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityOp {
    CommunityCreate(CommunityCreate),
    CommunityInvite(CommunityInvite),
    ChannelCreate(ChannelCreate),
    ChannelMessage(ChannelMessage),
}

impl CommunityOp {
    /// Decode a base operation into its community form.
    pub fn decode(base: SpaceOperation) -> Result<Self, ParseError> {
        let operation = base.operation().to_string();
        let op = match operation.as_str() {
            CommunityCreate::OPERATION => Self::CommunityCreate(CommunityCreate::from_base(base)),
            CommunityInvite::OPERATION => Self::CommunityInvite(CommunityInvite::from_base(base)),
            ChannelCreate::OPERATION => Self::ChannelCreate(ChannelCreate::from_base(base)),
            ChannelMessage::OPERATION => Self::ChannelMessage(ChannelMessage::from_base(base)),
            other => return Err(ParseError::UnknownOperation(other.to_string())),
        };
        Ok(op)
    }

    pub fn base(&self) -> &SpaceOperation {
        match self {
            Self::CommunityCreate(e) => e.base(),
            Self::CommunityInvite(e) => e.base(),
            Self::ChannelCreate(e) => e.base(),
            Self::ChannelMessage(e) => e.base(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;
    use subspace_core::{SubspaceEvent, SubspaceId};

    fn sid() -> String {
        SubspaceId::derive("community", &crate::vocabularies::COMMUNITY.ops_string(), "")
            .to_string()
    }

    fn decode(event: &impl SubspaceEvent) -> CommunityOp {
        let base = SpaceOperation::from_wire(registry().unwrap(), &event.to_wire()).unwrap();
        CommunityOp::decode(base).unwrap()
    }

    #[test]
    fn test_community_create_tags() {
        let mut create = CommunityCreate::new(registry().unwrap(), sid(), "");
        create.set_community_info("c-1", "Rustaceans", "public");

        let names: Vec<&str> = create.tags().iter().map(|t| t[0].as_str()).collect();
        assert_eq!(names, ["d", "sid", "ops", "community_id", "name", "type"]);

        match decode(&create) {
            CommunityOp::CommunityCreate(decoded) => {
                assert_eq!(decoded.name, "Rustaceans");
                assert_eq!(decoded.community_type, "public");
            }
            other => panic!("expected community_create, got {:?}", other),
        }
    }

    #[test]
    fn test_invite_roundtrip() {
        let mut invite = CommunityInvite::new(registry().unwrap(), sid(), "");
        invite.set_invite_info("c-1", "alice", "bob", "address");
        match decode(&invite) {
            CommunityOp::CommunityInvite(decoded) => {
                assert_eq!(decoded.inviter_id, "alice");
                assert_eq!(decoded.invitee_id, "bob");
                assert_eq!(decoded.method, "address");
            }
            other => panic!("expected community_invite, got {:?}", other),
        }
    }

    #[test]
    fn test_channel_create_roundtrip() {
        let mut channel = ChannelCreate::new(registry().unwrap(), sid(), "");
        channel.set_channel_info("c-1", "ch-1", "general", "text");
        assert!(matches!(
            decode(&channel),
            CommunityOp::ChannelCreate(c) if c.channel_id == "ch-1" && c.channel_type == "text"
        ));
    }

    #[test]
    fn test_channel_message_sets_content_and_optional_reply() {
        let mut message = ChannelMessage::new(registry().unwrap(), sid(), "");
        message.set_message_info("ch-1", "alice", "hi there", None);
        assert_eq!(message.content(), "hi there");
        assert!(!message.tags().contains(tags::REPLY_TO));

        let mut reply = ChannelMessage::new(registry().unwrap(), sid(), "");
        reply.set_message_info("ch-1", "bob", "hello", Some("f".repeat(64).as_str()));
        match decode(&reply) {
            CommunityOp::ChannelMessage(decoded) => {
                assert_eq!(decoded.user_id, "bob");
                assert_eq!(decoded.reply_to, Some("f".repeat(64)));
                assert_eq!(decoded.content(), "hello");
            }
            other => panic!("expected channel_message, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_operation_is_rejected() {
        let base = SpaceOperation::new(registry().unwrap(), sid(), Kind(30300), "");
        assert_eq!(
            CommunityOp::decode(base),
            Err(ParseError::UnknownOperation("post".into()))
        );
    }
}
