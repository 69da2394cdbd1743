//! CIP-01 governance: posts, proposals, votes, invites and token mints.

use subspace_core::{Kind, ParseError, SpaceOperation};

use crate::domain::{domain_event, tag_or_empty, DomainEvent};

pub const KIND_POST: Kind = Kind(30300);
pub const KIND_PROPOSE: Kind = Kind(30301);
pub const KIND_VOTE: Kind = Kind(30302);
pub const KIND_INVITE: Kind = Kind(30303);
pub const KIND_MINT: Kind = Kind(30304);

/// Governance tag names.
pub mod tags {
    pub const CONTENT_TYPE: &str = "content_type";
    pub const PROPOSAL_ID: &str = "proposal_id";
    pub const RULES: &str = "rules";
    pub const VOTE: &str = "vote";
    pub const INVITER_ADDR: &str = "inviter_addr";
    pub const TOKEN_NAME: &str = "token_name";
    pub const TOKEN_SYMBOL: &str = "token_symbol";
    pub const TOKEN_DECIMALS: &str = "token_decimals";
    pub const INITIAL_SUPPLY: &str = "initial_supply";
    pub const DROP_RATIO: &str = "drop_ratio";
}

/// A post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    base: SpaceOperation,
    pub content_type: String,
}

impl Post {
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = content_type.into();
        self.base.push_tag(tags::CONTENT_TYPE, self.content_type.as_str());
    }
}

domain_event!(Post, "post", KIND_POST, |base| Post {
    content_type: tag_or_empty(&base, tags::CONTENT_TYPE),
    base,
});

/// A proposal, optionally carrying the rules it would enact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propose {
    base: SpaceOperation,
    pub proposal_id: String,
    pub rules: String,
}

impl Propose {
    /// Set the proposal id. A `rules` tag is only added when rules are
    /// non-empty.
    pub fn set_proposal(&mut self, proposal_id: impl Into<String>, rules: impl Into<String>) {
        self.proposal_id = proposal_id.into();
        self.rules = rules.into();
        self.base.push_tag(tags::PROPOSAL_ID, self.proposal_id.as_str());
        if !self.rules.is_empty() {
            self.base.push_tag(tags::RULES, self.rules.as_str());
        }
    }
}

domain_event!(Propose, "propose", KIND_PROPOSE, |base| Propose {
    proposal_id: tag_or_empty(&base, tags::PROPOSAL_ID),
    rules: tag_or_empty(&base, tags::RULES),
    base,
});

/// A vote on a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    base: SpaceOperation,
    pub proposal_id: String,
    pub vote: String,
}

impl Vote {
    pub fn set_vote(&mut self, proposal_id: impl Into<String>, vote: impl Into<String>) {
        self.proposal_id = proposal_id.into();
        self.vote = vote.into();
        self.base.push_tag(tags::PROPOSAL_ID, self.proposal_id.as_str());
        self.base.push_tag(tags::VOTE, self.vote.as_str());
    }
}

domain_event!(Vote, "vote", KIND_VOTE, |base| Vote {
    proposal_id: tag_or_empty(&base, tags::PROPOSAL_ID),
    vote: tag_or_empty(&base, tags::VOTE),
    base,
});

/// An invitation issued by an existing member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    base: SpaceOperation,
    pub inviter_addr: String,
    pub rules: String,
}

impl Invite {
    pub fn set_invite(&mut self, inviter_addr: impl Into<String>, rules: impl Into<String>) {
        self.inviter_addr = inviter_addr.into();
        self.rules = rules.into();
        self.base.push_tag(tags::INVITER_ADDR, self.inviter_addr.as_str());
        if !self.rules.is_empty() {
            self.base.push_tag(tags::RULES, self.rules.as_str());
        }
    }
}

domain_event!(Invite, "invite", KIND_INVITE, |base| Invite {
    inviter_addr: tag_or_empty(&base, tags::INVITER_ADDR),
    rules: tag_or_empty(&base, tags::RULES),
    base,
});

/// A token mint. Numeric fields are kept as their decimal strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mint {
    base: SpaceOperation,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimals: String,
    pub initial_supply: String,
    pub drop_ratio: String,
}

impl Mint {
    pub fn set_token_info(
        &mut self,
        token_name: impl Into<String>,
        token_symbol: impl Into<String>,
        token_decimals: impl Into<String>,
    ) {
        self.token_name = token_name.into();
        self.token_symbol = token_symbol.into();
        self.token_decimals = token_decimals.into();
        self.base.push_tag(tags::TOKEN_NAME, self.token_name.as_str());
        self.base.push_tag(tags::TOKEN_SYMBOL, self.token_symbol.as_str());
        self.base.push_tag(tags::TOKEN_DECIMALS, self.token_decimals.as_str());
    }

    pub fn set_mint_details(
        &mut self,
        initial_supply: impl Into<String>,
        drop_ratio: impl Into<String>,
    ) {
        self.initial_supply = initial_supply.into();
        self.drop_ratio = drop_ratio.into();
        self.base.push_tag(tags::INITIAL_SUPPLY, self.initial_supply.as_str());
        self.base.push_tag(tags::DROP_RATIO, self.drop_ratio.as_str());
    }
}

domain_event!(Mint, "mint", KIND_MINT, |base| Mint {
    token_name: tag_or_empty(&base, tags::TOKEN_NAME),
    token_symbol: tag_or_empty(&base, tags::TOKEN_SYMBOL),
    token_decimals: tag_or_empty(&base, tags::TOKEN_DECIMALS),
    initial_supply: tag_or_empty(&base, tags::INITIAL_SUPPLY),
    drop_ratio: tag_or_empty(&base, tags::DROP_RATIO),
    base,
});

/// Any governance operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernanceOp {
    Post(Post),
    Propose(Propose),
    Vote(Vote),
    Invite(Invite),
    Mint(Mint),
}

impl GovernanceOp {
    /// Decode a base operation into its governance form.
    pub fn decode(base: SpaceOperation) -> Result<Self, ParseError> {
        let operation = base.operation().to_string();
        let op = match operation.as_str() {
            Post::OPERATION => Self::Post(Post::from_base(base)),
            Propose::OPERATION => Self::Propose(Propose::from_base(base)),
            Vote::OPERATION => Self::Vote(Vote::from_base(base)),
            Invite::OPERATION => Self::Invite(Invite::from_base(base)),
            Mint::OPERATION => Self::Mint(Mint::from_base(base)),
            other => return Err(ParseError::UnknownOperation(other.to_string())),
        };
        Ok(op)
    }

    pub fn base(&self) -> &SpaceOperation {
        match self {
            Self::Post(e) => e.base(),
            Self::Propose(e) => e.base(),
            Self::Vote(e) => e.base(),
            Self::Invite(e) => e.base(),
            Self::Mint(e) => e.base(),
        }
    }
}
