//! Reference namespace codec.
//!
//! A relationship target is serialized as a single prefixed string:
//! `urn:uuid:<uuid>`, `uid:<uid>` or `name:<display name>`. Parsing is
//! total: a string without a recognized prefix is treated as a bare `uid`.

use serde::{Deserialize, Serialize};

use crate::relationship::Relationship;

/// The encoding scheme of a relationship target reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// RFC 4122 URN form, `urn:uuid:<uuid>`.
    UrnUuid,

    /// Plain unique identifier, `uid:<uid>`. The default.
    Uid,

    /// Forward reference by display name, `name:<name>`, pending
    /// resolution to an identifier by the caller.
    Name,
}

impl Namespace {
    /// The serialized prefix for this namespace.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::UrnUuid => "urn:uuid:",
            Self::Uid => "uid:",
            Self::Name => "name:",
        }
    }
}

/// A parsed relationship target reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference<'a> {
    /// The recognized namespace.
    pub namespace: Namespace,

    /// The identifier (or display name, for `Namespace::Name`) with the
    /// prefix stripped.
    pub value: &'a str,
}

/// Parse a serialized reference string.
///
/// Prefixes are checked in the order `urn:uuid:`, `uid:`, `name:`; a
/// string with no recognized prefix falls back to `Namespace::Uid` with
/// the whole input as the identifier. This function never fails.
///
/// Note the deliberate asymmetry: a `name:` reference parses into the
/// same identifier slot as the other namespaces, not into a display-name
/// slot. Downstream forward-reference resolution depends on this.
pub fn parse_reference(raw: &str) -> ParsedReference<'_> {
    if let Some(rest) = raw.strip_prefix("urn:uuid:") {
        ParsedReference {
            namespace: Namespace::UrnUuid,
            value: rest,
        }
    } else if let Some(rest) = raw.strip_prefix("uid:") {
        ParsedReference {
            namespace: Namespace::Uid,
            value: rest,
        }
    } else if let Some(rest) = raw.strip_prefix("name:") {
        ParsedReference {
            namespace: Namespace::Name,
            value: rest,
        }
    } else {
        ParsedReference {
            namespace: Namespace::Uid,
            value: raw,
        }
    }
}

/// Serialize a relationship's target as a prefixed reference string.
///
/// `Namespace::Name` prefers the display name and falls back to the
/// identifier slot, so references that already round-tripped through
/// [`parse_reference`] keep their value.
pub fn format_reference(relationship: &Relationship) -> String {
    match relationship.namespace {
        Namespace::UrnUuid => format!("urn:uuid:{}", relationship.target_uid),
        Namespace::Uid => format!("uid:{}", relationship.target_uid),
        Namespace::Name => {
            let name = relationship
                .target_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(&relationship.target_uid);
            format!("name:{name}")
        }
    }
}
