//! Identifier assignment.

use uuid::Uuid;

use crate::contact::{Contact, UID_FIELD};
use crate::error::Result;
use crate::queue::RunType;
use crate::registry::Processor;

/// Assigns a unique identifier to contacts that have none.
///
/// Runs immediately and before everything else relies on the identifier
/// being present. The generator is injectable for tests; the default
/// produces `urn:uuid:<v4>`.
pub struct IdentifierProcessor {
    generate_id: Box<dyn Fn() -> String + Send + Sync>,
}

impl IdentifierProcessor {
    /// Create the processor with the default uuid generator.
    pub fn new() -> Self {
        Self::with_generator(|| format!("urn:uuid:{}", Uuid::new_v4()))
    }

    /// Create the processor with a custom identifier generator.
    pub fn with_generator(generate_id: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            generate_id: Box::new(generate_id),
        }
    }
}

impl Default for IdentifierProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for IdentifierProcessor {
    fn name(&self) -> &str {
        super::IDENTIFIER
    }

    fn run_type(&self) -> RunType {
        RunType::Immediate
    }

    fn gate(&self, contact: &Contact) -> bool {
        contact.uid().is_none()
    }

    fn mutate(&self, contact: &mut Contact) -> Result<()> {
        contact.set_field(UID_FIELD, (self.generate_id)());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gate_only_without_identifier() {
        let processor = IdentifierProcessor::new();

        let mut contact = Contact::with_content("c", "");
        assert!(processor.gate(&contact));

        contact.set_field(UID_FIELD, "urn:uuid:1234");
        assert!(!processor.gate(&contact));

        // A blank identifier counts as absent.
        contact.set_field(UID_FIELD, "  ");
        assert!(processor.gate(&contact));
    }

    #[test]
    fn test_mutate_assigns_generated_id() {
        let processor = IdentifierProcessor::with_generator(|| "urn:uuid:fixed".to_string());
        let mut contact = Contact::with_content("c", "");

        processor.mutate(&mut contact).unwrap();
        assert_eq!(contact.uid(), Some("urn:uuid:fixed"));
    }

    #[test]
    fn test_default_generator_is_uuid_urn() {
        let processor = IdentifierProcessor::new();
        let mut contact = Contact::with_content("c", "");

        processor.mutate(&mut contact).unwrap();
        let uid = contact.uid().unwrap();
        assert!(uid.starts_with("urn:uuid:"));
        assert!(Uuid::parse_str(uid.trim_start_matches("urn:uuid:")).is_ok());
    }
}
