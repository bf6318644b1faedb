//! The contact record: the unit of work for the curator pipeline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::gender::Gender;

/// Field name holding the contact's unique identifier.
pub const UID_FIELD: &str = "UID";

/// Field name holding the contact's gender.
pub const GENDER_FIELD: &str = "GENDER";

/// Key prefix under which relationships are stored in the field map.
pub const RELATED_PREFIX: &str = "RELATED";

/// A contact record being curated.
///
/// A contact is an opaque path, a mutable structured-field map (parsed from
/// whatever serialization the host uses, insertion order preserved) and the
/// raw text content of the contact document. The pipeline mutates a contact
/// in place for the duration of one pass and never retains it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Opaque path or identifier for this contact.
    pub path: String,

    /// Structured fields, string key to scalar value.
    pub fields: IndexMap<String, String>,

    /// Raw text content of the contact document.
    pub content: String,
}

impl Contact {
    /// Create a contact record.
    pub fn new(
        path: impl Into<String>,
        fields: IndexMap<String, String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            fields,
            content: content.into(),
        }
    }

    /// Create a contact with no fields.
    pub fn with_content(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, IndexMap::new(), content)
    }

    /// Get a field value.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Set a field value.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Remove a field, returning its previous value.
    pub fn remove_field(&mut self, key: &str) -> Option<String> {
        self.fields.shift_remove(key)
    }

    /// The contact's unique identifier, if a non-blank one is set.
    pub fn uid(&self) -> Option<&str> {
        self.field(UID_FIELD)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// The contact's gender, if the gender field holds a parseable value.
    pub fn gender(&self) -> Option<Gender> {
        self.field(GENDER_FIELD).and_then(Gender::from_field)
    }
}
