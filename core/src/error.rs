//! Error types for index construction.

use thiserror::Error;

/// Errors that abort an index build. No partial index is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The corpus contained no documents.
    #[error("corpus contains no documents")]
    EmptyCorpus,

    /// A document sanitized to zero tokens, so tf has no denominator.
    #[error("document {0:?} contains no tokens")]
    EmptyDocument(String),

    /// The same document id appeared twice in the corpus.
    #[error("duplicate document id: {0:?}")]
    DuplicateDocument(String),
}

pub type Result<T> = std::result::Result<T, BuildError>;
