//! Fields-to-text relationship sync.

use crate::contact::Contact;
use crate::error::Result;
use crate::queue::RunType;
use crate::registry::Processor;
use crate::{frontmatter, markdown};

/// Renders the relationship fields into the Related text section.
///
/// Only the Related section is touched: it is replaced when present and
/// appended otherwise. Fields are never deleted by this direction; the
/// asymmetry with [`super::RelatedFromTextProcessor`] is intentional.
pub struct RelatedToTextProcessor;

impl Processor for RelatedToTextProcessor {
    fn name(&self) -> &str {
        super::RELATED_TO_TEXT
    }

    fn run_type(&self) -> RunType {
        RunType::Upcoming
    }

    fn gate(&self, contact: &Contact) -> bool {
        frontmatter::has_related(&contact.fields)
    }

    fn mutate(&self, contact: &mut Contact) -> Result<()> {
        let relationships = frontmatter::parse(&contact.fields);
        let block = markdown::generate(&relationships);
        contact.content = markdown::upsert_section(&contact.content, markdown::RELATED_HEADING, &block);
        Ok(())
    }
}
