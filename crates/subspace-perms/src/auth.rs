//! Auth tags: the capability descriptor carried on subspace operations.
//!
//! An auth tag travels as the second element of an `["auth", ...]` event tag
//! and has the textual form `action=<int>,key=<int>,exp=<int>`. Parsing
//! accepts the three fields in any order; serialization always emits them in
//! that fixed order, so `parse(tag.to_string()) == tag` for every valid tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PermsError, Result};

/// Largest valid action bitmask (`Read | Write | Execute`).
pub const MAX_ACTION: u8 = 0b111;

/// A single permission bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Read = 1 << 0,
    Write = 1 << 1,
    Execute = 1 << 2,
}

impl Action {
    /// All actions, lowest bit first.
    pub const ALL: [Action; 3] = [Action::Read, Action::Write, Action::Execute];

    /// The bit this action occupies in a mask.
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Combine actions into a mask.
    pub fn mask(actions: &[Action]) -> u8 {
        actions.iter().fold(0, |acc, a| acc | a.bit())
    }
}

/// Capability descriptor: which actions are allowed, under which causality
/// key, until which clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthTag {
    /// Permission mask (1 = read, 2 = write, 4 = execute).
    action: u8,
    /// Causality key id the capability was issued under.
    pub key: i64,
    /// Expiration clock value. The tag is expired once the clock reaches it.
    pub exp: i64,
}

impl AuthTag {
    /// Create a tag from a raw mask.
    ///
    /// Fails with [`PermsError::InvalidAction`] if the mask has bits outside
    /// [`MAX_ACTION`].
    pub fn new(action: u8, key: i64, exp: i64) -> Result<Self> {
        if action > MAX_ACTION {
            return Err(PermsError::InvalidAction(action.to_string()));
        }
        Ok(Self { action, key, exp })
    }

    /// Create a tag from a set of actions.
    pub fn with_actions(actions: &[Action], key: i64, exp: i64) -> Self {
        Self {
            action: Action::mask(actions),
            key,
            exp,
        }
    }

    /// Parse the textual form `action=<int>,key=<int>,exp=<int>`.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(PermsError::InvalidFormat(s.to_string()));
        }

        let mut action = None;
        let mut key = None;
        let mut exp = None;

        for part in parts {
            let kv: Vec<&str> = part.split('=').collect();
            if kv.len() != 2 {
                return Err(PermsError::InvalidPart(part.to_string()));
            }
            let value = kv[1].trim();

            match kv[0].trim() {
                "action" => {
                    let a = value
                        .parse::<u8>()
                        .ok()
                        .filter(|a| *a <= MAX_ACTION)
                        .ok_or_else(|| PermsError::InvalidAction(kv[1].to_string()))?;
                    action = Some(a);
                }
                "key" => {
                    let k = value
                        .parse::<i64>()
                        .map_err(|_| PermsError::InvalidKey(kv[1].to_string()))?;
                    key = Some(k);
                }
                "exp" => {
                    let e = value
                        .parse::<i64>()
                        .map_err(|_| PermsError::InvalidExp(kv[1].to_string()))?;
                    exp = Some(e);
                }
                other => return Err(PermsError::UnknownField(other.to_string())),
            }
        }

        // A repeated field leaves another one unset.
        match (action, key, exp) {
            (Some(action), Some(key), Some(exp)) => Ok(Self { action, key, exp }),
            _ => Err(PermsError::InvalidFormat(s.to_string())),
        }
    }

    /// The raw action mask.
    pub fn action(&self) -> u8 {
        self.action
    }

    /// Check whether the mask contains the given action.
    pub fn has_permission(&self, action: Action) -> bool {
        (self.action & action.bit()) != 0
    }

    /// Check whether the tag has expired at `clock`.
    ///
    /// Expiry is inclusive: a tag with `exp = 1000` is expired at clock 1000.
    pub fn is_expired(&self, clock: i64) -> bool {
        self.exp <= clock
    }
}

impl fmt::Display for AuthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action={},key={},exp={}", self.action, self.key, self.exp)
    }
}

impl FromStr for AuthTag {
    type Err = PermsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AuthTag {
    type Error = PermsError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<AuthTag> for String {
    fn from(tag: AuthTag) -> Self {
        tag.to_string()
    }
}
