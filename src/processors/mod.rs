//! The standard processors.
//!
//! Five concrete processors built on the codecs: identifier assignment,
//! the two relationship-sync directions, gender inference and gendered
//! rendering. [`standard_registry`] wires them all up in their default
//! configuration.

mod gender_inference;
mod gender_render;
mod identifier;
mod related_from_text;
mod related_to_text;

pub use gender_inference::GenderInferenceProcessor;
pub use gender_render::GenderRenderProcessor;
pub use identifier::IdentifierProcessor;
pub use related_from_text::RelatedFromTextProcessor;
pub use related_to_text::RelatedToTextProcessor;

use crate::registry::ProcessorRegistry;

/// Name of the identifier-assignment processor.
pub const IDENTIFIER: &str = "identifier";

/// Name of the text-to-fields relationship sync processor.
pub const RELATED_FROM_TEXT: &str = "related-from-text";

/// Name of the fields-to-text relationship sync processor.
pub const RELATED_TO_TEXT: &str = "related-to-text";

/// Name of the gender-inference processor.
pub const GENDER_INFERENCE: &str = "gender-inference";

/// Name of the gendered-rendering processor.
pub const GENDER_RENDER: &str = "gender-render";

/// A registry preloaded with the five standard processors.
///
/// Registration order matters beyond the declared dependencies: gender
/// inference reads the Related list as written, so it must run before the
/// fields-to-text sync replaces the list with genderless terms, and the
/// gendered rendering runs last to restore the display terms.
pub fn standard_registry() -> ProcessorRegistry {
    let mut registry = ProcessorRegistry::new();
    registry.register(IdentifierProcessor::new());
    registry.register(RelatedFromTextProcessor);
    registry.register(GenderInferenceProcessor);
    registry.register(RelatedToTextProcessor);
    registry.register(GenderRenderProcessor);
    registry
}
