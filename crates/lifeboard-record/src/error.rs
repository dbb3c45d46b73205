//! Error types for the record model

use crate::category::Category;

/// Errors raised while parsing record model values
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Text did not name a category
    #[error("unknown category: '{0}'")]
    UnknownCategory(String),

    /// Category is the main view, not a life domain
    #[error("not a domain: {0}")]
    NotADomain(Category),

    /// Text did not name a record kind
    #[error("unknown record kind: '{0}'")]
    UnknownKind(String),
}
