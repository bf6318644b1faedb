//! Gendered relationship vocabulary.
//!
//! Fixed tables mapping gendered relationship terms to their canonical
//! genderless types and back, and inferring a gender from a gendered term.
//! All functions are pure, total and case-insensitive on input.

use serde::{Deserialize, Serialize};

/// An inferred or recorded gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Female, stored as `F`.
    Female,

    /// Male, stored as `M`.
    Male,
}

impl Gender {
    /// The single-letter field representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "F",
            Self::Male => "M",
        }
    }

    /// Parse a gender field value. Accepts the single letters and the
    /// full words, case-insensitively.
    pub fn from_field(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "f" | "female" => Some(Self::Female),
            "m" | "male" => Some(Self::Male),
            _ => None,
        }
    }
}

/// Map a relationship term to its canonical genderless type.
///
/// Terms outside the fixed table pass through unchanged, case-folded.
pub fn normalize(kind: &str) -> String {
    let lowered = kind.trim().to_lowercase();
    match lowered.as_str() {
        "mother" | "mom" | "father" | "dad" => "parent".to_string(),
        "sister" | "brother" => "sibling".to_string(),
        "daughter" | "son" => "child".to_string(),
        "wife" | "husband" => "spouse".to_string(),
        "girlfriend" | "boyfriend" => "partner".to_string(),
        _ => lowered,
    }
}

/// Infer a gender from a gendered relationship term.
///
/// Genderless and unknown terms yield no inference.
pub fn infer(kind: &str) -> Option<Gender> {
    match kind.trim().to_lowercase().as_str() {
        "mother" | "sister" | "daughter" | "wife" | "girlfriend" => Some(Gender::Female),
        "father" | "brother" | "son" | "husband" | "boyfriend" => Some(Gender::Male),
        _ => None,
    }
}

/// Render a genderless type as a gendered display term.
///
/// Covers `{parent, sibling, child, spouse, partner}`; any other (type,
/// gender) pair, including no gender at all, returns the input type
/// unchanged, case-folded.
pub fn gendered_form(kind: &str, gender: Option<Gender>) -> String {
    let lowered = kind.trim().to_lowercase();
    let Some(gender) = gender else {
        return lowered;
    };
    match (lowered.as_str(), gender) {
        ("parent", Gender::Female) => "mother".to_string(),
        ("parent", Gender::Male) => "father".to_string(),
        ("sibling", Gender::Female) => "sister".to_string(),
        ("sibling", Gender::Male) => "brother".to_string(),
        ("child", Gender::Female) => "daughter".to_string(),
        ("child", Gender::Male) => "son".to_string(),
        ("spouse", Gender::Female) => "wife".to_string(),
        ("spouse", Gender::Male) => "husband".to_string(),
        ("partner", Gender::Female) => "girlfriend".to_string(),
        ("partner", Gender::Male) => "boyfriend".to_string(),
        _ => lowered,
    }
}
