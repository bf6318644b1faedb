//! Text-to-fields relationship sync.

use crate::contact::Contact;
use crate::error::Result;
use crate::gender;
use crate::queue::RunType;
use crate::registry::Processor;
use crate::{frontmatter, markdown};

/// Rebuilds the relationship fields from the Related text list.
///
/// The text list is the source of truth for the pass: every existing
/// relationship field is stripped and the set is regenerated from the
/// parsed list. Gendered terms in the list are normalized to their
/// genderless types before the fields are written, so the stored type
/// space stays canonical while the list keeps its display terms.
pub struct RelatedFromTextProcessor;

impl Processor for RelatedFromTextProcessor {
    fn name(&self) -> &str {
        super::RELATED_FROM_TEXT
    }

    fn run_type(&self) -> RunType {
        RunType::Upcoming
    }

    fn gate(&self, _contact: &Contact) -> bool {
        true
    }

    fn mutate(&self, contact: &mut Contact) -> Result<()> {
        let mut relationships = markdown::parse(&contact.content);
        for rel in &mut relationships {
            rel.kind = gender::normalize(&rel.kind);
        }

        frontmatter::strip(&mut contact.fields);
        contact.fields.extend(frontmatter::generate(&relationships));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_regenerates_fields_from_list() {
        let mut contact = Contact::with_content(
            "c",
            "# Jane\n\n## Related\n- friend [[Alice]]\n- mother [[Maria]]\n",
        );
        contact.set_field("RELATED.COLLEAGUE", "uid:stale");
        contact.set_field("FN", "Jane");

        RelatedFromTextProcessor.mutate(&mut contact).unwrap();

        // Stale field gone, gendered term stored genderless.
        assert_eq!(contact.field("RELATED.COLLEAGUE"), None);
        assert_eq!(contact.field("RELATED.FRIEND"), Some("name:Alice"));
        assert_eq!(contact.field("RELATED.PARENT"), Some("name:Maria"));
        // Unrelated fields survive.
        assert_eq!(contact.field("FN"), Some("Jane"));
    }

    #[test]
    fn test_empty_list_clears_fields() {
        let mut contact = Contact::with_content("c", "# Jane\n\nNo list.\n");
        contact.set_field("RELATED.FRIEND", "uid:a");

        RelatedFromTextProcessor.mutate(&mut contact).unwrap();
        assert_eq!(contact.field("RELATED.FRIEND"), None);
    }

    #[test]
    fn test_multiple_of_one_type_get_indices() {
        let mut contact = Contact::with_content(
            "c",
            "## Related\n- friend [[Alice]]\n- friend [[Bob]]\n",
        );

        RelatedFromTextProcessor.mutate(&mut contact).unwrap();

        assert_eq!(contact.field("RELATED.FRIEND.0"), Some("name:Alice"));
        assert_eq!(contact.field("RELATED.FRIEND.1"), Some("name:Bob"));
    }
}
