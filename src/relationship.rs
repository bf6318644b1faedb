//! The relationship record and caller-side name resolution.

use serde::{Deserialize, Serialize};

use crate::error::{CuratorError, Result};
use crate::namespace::Namespace;

/// A single directed relationship from a contact to a target.
///
/// The `kind` is always lowercase and may be either a canonical genderless
/// type (`parent`, `sibling`, ...) or a gendered display term (`mother`,
/// `brother`, ...) depending on which representation it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Lowercase relationship type.
    pub kind: String,

    /// Target identifier. For `Namespace::Name` entries parsed from a
    /// text list this is empty until the caller resolves the display
    /// name to an identifier.
    pub target_uid: String,

    /// Target display name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,

    /// How the target reference is serialized.
    pub namespace: Namespace,
}

impl Relationship {
    /// Create a relationship referenced by plain uid.
    pub fn uid(kind: impl Into<String>, target_uid: impl Into<String>) -> Self {
        Self {
            kind: kind.into().to_lowercase(),
            target_uid: target_uid.into(),
            target_name: None,
            namespace: Namespace::Uid,
        }
    }

    /// Create a relationship referenced by uuid URN.
    pub fn urn_uuid(kind: impl Into<String>, target_uid: impl Into<String>) -> Self {
        Self {
            kind: kind.into().to_lowercase(),
            target_uid: target_uid.into(),
            target_name: None,
            namespace: Namespace::UrnUuid,
        }
    }

    /// Create an unresolved relationship referenced by display name.
    ///
    /// A name-namespaced relationship with an empty display name cannot
    /// be serialized and is rejected here.
    pub fn display_name(kind: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CuratorError::InvalidRelationship(
                "name-namespaced relationship requires a display name".to_string(),
            ));
        }
        Ok(Self {
            kind: kind.into().to_lowercase(),
            target_uid: String::new(),
            target_name: Some(name),
            namespace: Namespace::Name,
        })
    }

    /// The text shown for the target in a rendered list: the display
    /// name when present, otherwise the identifier.
    pub fn display_target(&self) -> &str {
        self.target_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.target_uid)
    }
}

/// Resolves display names to contact identifiers across a collection.
///
/// The codecs never resolve names themselves; callers run parsed text
/// lists through [`resolve_display_names`] with their own resolver.
pub trait UidResolver {
    /// Look up the identifier for a display name, if one exists.
    fn uid_for_name(&self, name: &str) -> Option<String>;
}

/// Fill in `target_uid` for name-namespaced relationships.
///
/// Relationships whose name cannot be resolved are left as forward
/// references; entries in other namespaces are untouched.
pub fn resolve_display_names(relationships: &mut [Relationship], resolver: &dyn UidResolver) {
    for rel in relationships {
        if rel.namespace != Namespace::Name || !rel.target_uid.is_empty() {
            continue;
        }
        if let Some(name) = rel.target_name.as_deref() {
            if let Some(uid) = resolver.uid_for_name(name) {
                rel.target_uid = uid;
            }
        }
    }
}
