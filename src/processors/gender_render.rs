//! Gendered rendering of the Related text list.

use crate::contact::Contact;
use crate::error::Result;
use crate::gender;
use crate::queue::RunType;
use crate::registry::Processor;
use crate::{frontmatter, markdown};

/// Re-renders the Related list using gendered display terms.
///
/// Maps every field-stored (genderless) relationship type through the
/// gendered vocabulary with the contact's own gender and replaces the
/// Related section with the result. Types outside the gendered table
/// render unchanged. Idempotent: rendering twice with the same gender
/// and relationships produces the same text.
pub struct GenderRenderProcessor;

impl Processor for GenderRenderProcessor {
    fn name(&self) -> &str {
        super::GENDER_RENDER
    }

    fn run_type(&self) -> RunType {
        RunType::Upcoming
    }

    fn dependencies(&self) -> &[&str] {
        &[super::GENDER_INFERENCE]
    }

    fn gate(&self, contact: &Contact) -> bool {
        contact.gender().is_some() && frontmatter::has_related(&contact.fields)
    }

    fn mutate(&self, contact: &mut Contact) -> Result<()> {
        let Some(current_gender) = contact.gender() else {
            return Ok(());
        };

        let mut relationships = frontmatter::parse(&contact.fields);
        for rel in &mut relationships {
            rel.kind = gender::gendered_form(&rel.kind, Some(current_gender));
        }

        let block = markdown::generate(&relationships);
        contact.content = markdown::upsert_section(&contact.content, markdown::RELATED_HEADING, &block);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::GENDER_FIELD;
    use pretty_assertions::assert_eq;

    fn contact_with_parent() -> Contact {
        let mut contact =
            Contact::with_content("c", "# Jane\n\n## Related\n- parent [[Maria]]\n");
        contact.set_field(GENDER_FIELD, "F");
        contact.set_field("RELATED.PARENT", "name:Maria");
        contact
    }

    #[test]
    fn test_gate_requires_gender_and_relationships() {
        let contact = contact_with_parent();
        assert!(GenderRenderProcessor.gate(&contact));

        let mut no_gender = contact.clone();
        no_gender.remove_field(GENDER_FIELD);
        assert!(!GenderRenderProcessor.gate(&no_gender));

        let mut no_rels = contact.clone();
        no_rels.remove_field("RELATED.PARENT");
        assert!(!GenderRenderProcessor.gate(&no_rels));
    }

    #[test]
    fn test_renders_gendered_terms() {
        let mut contact = contact_with_parent();
        GenderRenderProcessor.mutate(&mut contact).unwrap();

        assert!(contact.content.contains("- mother [[Maria]]"));
        assert!(!contact.content.contains("- parent"));
        // The stored field keeps the genderless type.
        assert_eq!(contact.field("RELATED.PARENT"), Some("name:Maria"));
    }

    #[test]
    fn test_ungendered_types_pass_through() {
        let mut contact = Contact::with_content("c", "# X\n");
        contact.set_field(GENDER_FIELD, "M");
        contact.set_field("RELATED.FRIEND", "name:Pat");

        GenderRenderProcessor.mutate(&mut contact).unwrap();
        assert!(contact.content.contains("- friend [[Pat]]"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let mut contact = contact_with_parent();
        GenderRenderProcessor.mutate(&mut contact).unwrap();
        let once = contact.content.clone();

        GenderRenderProcessor.mutate(&mut contact).unwrap();
        assert_eq!(contact.content, once);
    }
}
