//! Error types for the contact curator.

use thiserror::Error;

/// Result type alias for curator operations.
pub type Result<T> = std::result::Result<T, CuratorError>;

/// Errors that can occur while curating contacts.
///
/// Malformed relationship references and missing document structure are
/// deliberately *not* represented here: the codecs degrade to total
/// fallbacks and empty collections instead of failing.
#[derive(Error, Debug)]
pub enum CuratorError {
    /// The processor dependency graph contains a cycle.
    #[error("processor dependency cycle involving '{0}'")]
    DependencyCycle(String),

    /// A processor's mutation failed for a specific contact.
    #[error("processor '{processor}' failed for contact '{contact}': {message}")]
    Processor {
        /// The contact being processed when the failure occurred.
        contact: String,
        /// Name of the failing processor.
        processor: String,
        /// Why the mutation failed.
        message: String,
    },

    /// A queued contact could not be loaded when its turn came.
    #[error("contact not available: {0}")]
    ContactUnavailable(String),

    /// A relationship was constructed in an invalid state.
    #[error("invalid relationship: {0}")]
    InvalidRelationship(String),
}
