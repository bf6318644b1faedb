//! # Contact Curator
//!
//! Keeps a contact's relationship graph consistent across two redundant
//! textual representations, a structured key/value field map
//! ("frontmatter") and a human-edited bullet list under a "Related"
//! heading, and orchestrates independent transformation steps
//! ("processors") over contact records in a stable, dependency-respecting,
//! priority-aware order.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     Relationship codecs                        │
//! ├────────────────────────────────────────────────────────────────┤
//! │  fields ◄─ frontmatter ─► Relationship ◄─ markdown ─► content  │
//! │                │                │                              │
//! │                ▼                ▼                              │
//! │           namespace           gender                           │
//! └────────────────────────────────────────────────────────────────┘
//!
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Curator pipeline                          │
//! ├────────────────────────────────────────────────────────────────┤
//! │  CuratorQueue ──► Curator ──► ProcessorRegistry::resolve_order │
//! │                      │                                         │
//! │                      ▼                                         │
//! │            gate / mutate per processor, in order               │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate does no file I/O and defines no global state: registries,
//! queues and the curator are plain values owned by the caller, and a
//! contact record is borrowed only for the duration of one pass.

pub mod contact;
pub mod error;
pub mod frontmatter;
pub mod gender;
pub mod markdown;
pub mod namespace;
pub mod pipeline;
pub mod processors;
pub mod queue;
pub mod registry;
pub mod relationship;

pub use contact::{Contact, GENDER_FIELD, RELATED_PREFIX, UID_FIELD};
pub use error::{CuratorError, Result};
pub use gender::Gender;
pub use namespace::{Namespace, ParsedReference, format_reference, parse_reference};
pub use pipeline::{Curator, FailurePolicy, ProcessorFailure, RunReport};
pub use processors::{
    GenderInferenceProcessor, GenderRenderProcessor, IdentifierProcessor,
    RelatedFromTextProcessor, RelatedToTextProcessor, standard_registry,
};
pub use queue::{CuratorQueue, QueueItem, QueueStatus, RunType};
pub use registry::{FnProcessor, Processor, ProcessorRegistry};
pub use relationship::{Relationship, UidResolver, resolve_display_names};
