//! The three event archetypes: subspace creation, subspace join and
//! subspace operation.
//!
//! Builders assemble the tag list as they go, so the tags always reflect the
//! fields that were set. Events decoded from the wire keep the received tag
//! list untouched; re-serializing them yields the bytes that were signed.

use serde_json::json;
use subspace_perms::AuthTag;

use crate::causal::normalize_parents;
use crate::error::{CoreError, ParseError, ValidationError};
use crate::registry::OperationRegistry;
use crate::tags::{discriminators, names, Tags};
use crate::types::{Kind, SubspaceId, KIND_SUBSPACE_CREATE, KIND_SUBSPACE_JOIN};
use crate::validation::{validate_create, validate_join};
use crate::wire::{now_secs, WireEvent};

/// The envelope shared by every subspace event.
pub trait SubspaceEvent {
    fn kind(&self) -> Kind;

    fn created_at(&self) -> i64;

    fn tags(&self) -> &Tags;

    fn content(&self) -> &str;

    /// Project onto an unsigned wire envelope.
    fn to_wire(&self) -> WireEvent {
        WireEvent::unsigned(
            self.kind(),
            self.created_at(),
            self.tags().clone(),
            self.content().to_string(),
        )
    }
}

macro_rules! impl_subspace_event {
    ($ty:ty) => {
        impl SubspaceEvent for $ty {
            fn kind(&self) -> Kind {
                self.kind
            }

            fn created_at(&self) -> i64 {
                self.created_at
            }

            fn tags(&self) -> &Tags {
                &self.tags
            }

            fn content(&self) -> &str {
                &self.content
            }
        }
    };
}

/// Announces a new subspace and the operations it speaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceCreate {
    kind: Kind,
    created_at: i64,
    tags: Tags,
    content: String,
    subspace_id: String,
    subspace_name: String,
    ops: String,
    rules: String,
    description: String,
    image_url: String,
}

impl SpaceCreate {
    /// Build a creation event. The subspace id is derived from name, ops and
    /// rules; a `rules` tag is only added when rules are non-empty.
    pub fn new(
        subspace_name: impl Into<String>,
        ops: impl Into<String>,
        rules: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        let subspace_name = subspace_name.into();
        let ops = ops.into();
        let rules = rules.into();
        let description = description.into();
        let image_url = image_url.into();

        let subspace_id = SubspaceId::derive(&subspace_name, &ops, &rules).to_string();

        let mut tags = Tags::new();
        tags.push(names::D, discriminators::SUBSPACE_CREATE);
        tags.push(names::SID, subspace_id.as_str());
        tags.push(names::SUBSPACE_NAME, subspace_name.as_str());
        tags.push(names::OPS, ops.as_str());
        if !rules.is_empty() {
            tags.push(names::RULES, rules.as_str());
        }

        let content = json!({ "desc": description, "img_url": image_url }).to_string();

        Self {
            kind: KIND_SUBSPACE_CREATE,
            created_at: now_secs(),
            tags,
            content,
            subspace_id,
            subspace_name,
            ops,
            rules,
            description,
            image_url,
        }
    }

    /// Override the creation timestamp.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Decode and validate a received creation event.
    pub fn from_wire(event: &WireEvent) -> Result<Self, CoreError> {
        let mut subspace_id = String::new();
        let mut subspace_name = String::new();
        let mut ops = String::new();
        let mut rules = String::new();

        for (name, values) in event.tags.valued() {
            let value = values[0].clone();
            match name {
                names::SID => subspace_id = value,
                names::SUBSPACE_NAME => subspace_name = value,
                names::OPS => ops = value,
                names::RULES => rules = value,
                _ => {}
            }
        }

        let content: serde_json::Value = serde_json::from_str(&event.content)
            .map_err(|e| ParseError::InvalidContent(e.to_string()))?;
        let field = |key: &str| {
            content
                .get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let decoded = Self {
            kind: event.kind,
            created_at: event.created_at,
            tags: event.tags.clone(),
            content: event.content.clone(),
            subspace_id,
            subspace_name,
            ops,
            rules,
            description: field("desc"),
            image_url: field("img_url"),
        };
        decoded.validate()?;
        Ok(decoded)
    }

    /// Check the creation invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_create(self)
    }

    pub fn subspace_id(&self) -> &str {
        &self.subspace_id
    }

    pub fn subspace_name(&self) -> &str {
        &self.subspace_name
    }

    pub fn ops(&self) -> &str {
        &self.ops
    }

    pub fn rules(&self) -> &str {
        &self.rules
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

impl_subspace_event!(SpaceCreate);

/// Joins an existing subspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceJoin {
    kind: Kind,
    created_at: i64,
    tags: Tags,
    content: String,
    subspace_id: String,
}

impl SpaceJoin {
    /// Build a join event for `subspace_id`.
    pub fn new(subspace_id: impl Into<String>, content: impl Into<String>) -> Self {
        let subspace_id = subspace_id.into();

        let mut tags = Tags::new();
        tags.push(names::D, discriminators::SUBSPACE_JOIN);
        tags.push(names::SID, subspace_id.as_str());

        Self {
            kind: KIND_SUBSPACE_JOIN,
            created_at: now_secs(),
            tags,
            content: content.into(),
            subspace_id,
        }
    }

    /// Override the creation timestamp.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Decode and validate a received join event.
    pub fn from_wire(event: &WireEvent) -> Result<Self, CoreError> {
        let subspace_id = event
            .tags
            .first_value(names::SID)
            .unwrap_or_default()
            .to_string();

        let decoded = Self {
            kind: event.kind,
            created_at: event.created_at,
            tags: event.tags.clone(),
            content: event.content.clone(),
            subspace_id,
        };
        decoded.validate()?;
        Ok(decoded)
    }

    /// Check the join invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_join(self)
    }

    pub fn subspace_id(&self) -> &str {
        &self.subspace_id
    }
}

impl_subspace_event!(SpaceJoin);

/// An operation inside a subspace, identified by its registered kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceOperation {
    kind: Kind,
    created_at: i64,
    tags: Tags,
    content: String,
    subspace_id: String,
    operation: String,
    auth_tag: Option<AuthTag>,
    parents: Option<Vec<String>>,
}

impl SpaceOperation {
    /// Build an operation of `kind`.
    ///
    /// The operation name is resolved through `registry`. An unregistered
    /// kind yields an empty operation name rather than an error; receive-side
    /// decoding is where unknown kinds are rejected.
    pub fn new(
        registry: &OperationRegistry,
        subspace_id: impl Into<String>,
        kind: Kind,
        content: impl Into<String>,
    ) -> Self {
        let subspace_id = subspace_id.into();
        let operation = registry.operation(kind).unwrap_or_default().to_string();

        let mut tags = Tags::new();
        tags.push(names::D, discriminators::SUBSPACE_OP);
        tags.push(names::SID, subspace_id.as_str());
        tags.push(names::OPS, operation.as_str());

        Self {
            kind,
            created_at: now_secs(),
            tags,
            content: content.into(),
            subspace_id,
            operation,
            auth_tag: None,
            parents: None,
        }
    }

    /// Override the creation timestamp.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Parse `auth` as an auth tag, attach it and append the `auth` tag.
    ///
    /// On a parse error the event is left unchanged.
    pub fn set_auth(&mut self, auth: &str) -> Result<(), ParseError> {
        let tag = AuthTag::parse(auth)?;
        self.set_auth_tag(tag);
        Ok(())
    }

    /// Attach an already-built auth tag and append the `auth` tag.
    pub fn set_auth_tag(&mut self, tag: AuthTag) {
        self.tags.push(names::AUTH, tag.to_string());
        self.auth_tag = Some(tag);
    }

    /// Attach parent references.
    ///
    /// Candidates that are not 64 characters long are dropped. A single
    /// `parent` tag listing the kept references is appended, even when none
    /// survive.
    pub fn set_parents<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parents = normalize_parents(candidates);
        self.tags.push_values(names::PARENT, parents.iter().cloned());
        self.parents = Some(parents);
    }

    /// Append a domain tag.
    pub fn push_tag(&mut self, name: &str, value: impl Into<String>) {
        self.tags.push(name, value);
    }

    /// Replace the content body.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Decode a received operation.
    ///
    /// The kind must be registered. `sid`, `auth` and `parent` are extracted
    /// from the tags; any other tags are left for domain decoders.
    pub fn from_wire(registry: &OperationRegistry, event: &WireEvent) -> Result<Self, ParseError> {
        let operation = registry
            .operation(event.kind)
            .ok_or(ParseError::UnknownKind(event.kind))?
            .to_string();

        let mut subspace_id = String::new();
        let mut auth_tag = None;
        let mut parents = None;

        for (name, values) in event.tags.valued() {
            match name {
                names::SID => subspace_id = values[0].clone(),
                names::AUTH => auth_tag = Some(AuthTag::parse(&values[0])?),
                names::PARENT => parents = Some(normalize_parents(values)),
                _ => {}
            }
        }

        Ok(Self {
            kind: event.kind,
            created_at: event.created_at,
            tags: event.tags.clone(),
            content: event.content.clone(),
            subspace_id,
            operation,
            auth_tag,
            parents,
        })
    }

    pub fn subspace_id(&self) -> &str {
        &self.subspace_id
    }

    /// The operation name, empty if the kind was not registered.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn auth_tag(&self) -> Option<&AuthTag> {
        self.auth_tag.as_ref()
    }

    /// Parent references, if a `parent` tag was set or received.
    pub fn parents(&self) -> Option<&[String]> {
        self.parents.as_deref()
    }

    /// The first value of a domain tag.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tags.first_value(name)
    }
}

impl_subspace_event!(SpaceOperation);
