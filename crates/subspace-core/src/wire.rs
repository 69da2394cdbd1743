//! The signed event envelope exchanged with the transport.

use serde::{Deserialize, Serialize};

use crate::tags::Tags;
use crate::types::Kind;

/// Wire form of an event.
///
/// `id`, `pubkey` and `sig` are absent until the event is signed and are
/// omitted from the JSON form while absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Signer address, 40 hex characters without `0x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,

    /// Seconds since the Unix epoch.
    pub created_at: i64,

    pub kind: Kind,

    pub tags: Tags,

    pub content: String,

    /// `r || s || v` as 130 hex characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

impl WireEvent {
    /// Create an unsigned envelope.
    pub fn unsigned(kind: Kind, created_at: i64, tags: Tags, content: String) -> Self {
        Self {
            id: None,
            pubkey: None,
            created_at,
            kind,
            tags,
            content,
            sig: None,
        }
    }

    /// Check whether the envelope carries a signature.
    pub fn is_signed(&self) -> bool {
        self.sig.is_some()
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Current time in seconds since the Unix epoch.
pub fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
