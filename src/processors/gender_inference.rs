//! Gender inference from gendered relationship terms.

use crate::contact::{Contact, GENDER_FIELD};
use crate::error::Result;
use crate::gender;
use crate::markdown;
use crate::queue::RunType;
use crate::registry::Processor;

/// Infers the contact's gender from the Related text list.
///
/// Reads the list as written, with its gendered display terms, rather than
/// the already-normalized field types, which is why this depends on the
/// text-to-fields sync. The first term with an inferable gender wins;
/// scanning stops there. An already-set gender field is never touched.
pub struct GenderInferenceProcessor;

impl Processor for GenderInferenceProcessor {
    fn name(&self) -> &str {
        super::GENDER_INFERENCE
    }

    fn run_type(&self) -> RunType {
        RunType::Upcoming
    }

    fn dependencies(&self) -> &[&str] {
        &[super::RELATED_FROM_TEXT]
    }

    fn gate(&self, contact: &Contact) -> bool {
        let gender_unset = contact
            .field(GENDER_FIELD)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .is_none();
        gender_unset && !markdown::parse(&contact.content).is_empty()
    }

    fn mutate(&self, contact: &mut Contact) -> Result<()> {
        for rel in markdown::parse(&contact.content) {
            if let Some(inferred) = gender::infer(&rel.kind) {
                contact.set_field(GENDER_FIELD, inferred.as_str());
                break;
            }
        }
        Ok(())
    }
}
