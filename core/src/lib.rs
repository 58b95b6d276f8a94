//! In-memory TF-IDF search over a fixed corpus: positional and inverted
//! indexes, vector space statistics, and one-word, free-text and phrase
//! queries ranked by a cosine-style dot product.

pub mod error;
pub mod index;
pub mod query;
pub mod tokenizer;
pub mod vsm;

pub use error::{BuildError, Result};
pub use index::{Document, Index, InvertedIndex, PositionList, PositionalIndex, TermStats};
pub use query::{query_free_text, query_one_word, query_phrase, Query, QueryEngine, SearchHit};

/// Internal document number, the position of the document in the corpus.
pub type DocId = u32;
/// Vocabulary slot of a term.
pub type TermId = u32;
/// Zero-based token offset within a document.
pub type Position = u32;

/// Build an index from `(document_id, raw_text)` pairs.
pub fn build<I, S, T>(corpus: I) -> Result<Index>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: AsRef<str>,
{
    Index::build(corpus)
}
