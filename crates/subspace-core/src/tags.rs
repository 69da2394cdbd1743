//! Event tags: ordered lists of strings whose first element is the tag name.

use serde::{Deserialize, Serialize};

/// Reserved tag names.
pub mod names {
    /// Discriminator: `subspace_create`, `subspace_join` or `subspace_op`.
    pub const D: &str = "d";
    pub const SID: &str = "sid";
    pub const OPS: &str = "ops";
    pub const SUBSPACE_NAME: &str = "subspace_name";
    pub const RULES: &str = "rules";
    pub const AUTH: &str = "auth";
    pub const PARENT: &str = "parent";
}

/// Values of the `d` discriminator tag.
pub mod discriminators {
    pub const SUBSPACE_CREATE: &str = "subspace_create";
    pub const SUBSPACE_JOIN: &str = "subspace_join";
    pub const SUBSPACE_OP: &str = "subspace_op";
}

/// A single tag.
pub type Tag = Vec<String>;

/// An ordered tag list.
///
/// Order is significant: it is part of the canonical serialization, so tags
/// are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a `[name, value]` tag.
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.0.push(vec![name.to_string(), value.into()]);
    }

    /// Append a `[name, v1, v2, ...]` tag. With no values the tag is `[name]`.
    pub fn push_values<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tag = vec![name.to_string()];
        tag.extend(values.into_iter().map(Into::into));
        self.0.push(tag);
    }

    /// Append a raw tag.
    pub fn push_raw(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    /// Check whether any tag has the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|t| t.first().map(String::as_str) == Some(name))
    }

    /// The value of the first tag with the given name that has one.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .filter(|t| t.len() >= 2 && t[0] == name)
            .map(|t| t[1].as_str())
            .next()
    }

    /// Tags with at least a name and one value.
    ///
    /// Shorter tags are foreign or malformed and are skipped by all
    /// field extraction.
    pub fn valued(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .filter(|t| t.len() >= 2)
            .map(|t| (t[0].as_str(), &t[1..]))
    }

    /// Iterate over all tags.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying list.
    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    /// Mutable access to the underlying list.
    pub fn as_mut_vec(&mut self) -> &mut Vec<Tag> {
        &mut self.0
    }
}

impl From<Vec<Tag>> for Tags {
    fn from(tags: Vec<Tag>) -> Self {
        Self(tags)
    }
}

impl From<Tags> for Vec<Tag> {
    fn from(tags: Tags) -> Self {
        tags.0
    }
}
