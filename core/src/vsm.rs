//! Vector space model over a built [`Index`]: idf, document magnitudes,
//! per-term scores and the dense vectors the ranker compares.

use crate::index::{Index, PositionalIndex};
use crate::tokenizer::sanitize;
use crate::DocId;
use std::collections::HashMap;

/// ln(N / df), or 0 when the term occurs nowhere.
pub fn idf(collection_size: usize, df: u32) -> f64 {
    if df == 0 || collection_size == 0 {
        return 0.0;
    }
    (collection_size as f64 / df as f64).ln()
}

/// idf for every term id, in vocabulary order.
pub fn compute_idf(collection_size: usize, df: &[u32]) -> Vec<f64> {
    df.iter().map(|&d| idf(collection_size, d)).collect()
}

/// Euclidean norm of a document's raw count vector. Order-independent, so no
/// vector is materialized.
pub fn magnitude(positions: &PositionalIndex) -> f64 {
    positions
        .raw_counts()
        .map(|c| (c * c) as f64)
        .sum::<f64>()
        .sqrt()
}

/// Plain dot product; vectors of different lengths score 0.
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl Index {
    /// idf(term); 0 for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> f64 {
        self.inverted.term_id(term).map_or(0.0, |id| self.idf[id as usize])
    }

    pub fn magnitude(&self, doc: DocId) -> f64 {
        self.magnitudes.get(doc as usize).copied().unwrap_or(0.0)
    }

    /// (tf / magnitude) * idf, or 0 when the term is absent from the document.
    pub fn score(&self, term: &str, doc: DocId) -> f64 {
        match self.inverted.term_id(term) {
            Some(id) => self.score_by_id(id as usize, doc),
            None => 0.0,
        }
    }

    fn score_by_id(&self, term: usize, doc: DocId) -> f64 {
        let tf = self.tf_by_id(doc, term as u32);
        let mag = self.magnitude(doc);
        if tf == 0.0 || mag == 0.0 {
            return 0.0;
        }
        tf / mag * self.idf[term]
    }

    /// Dense score vector of `doc` over the whole vocabulary.
    pub fn document_vector(&self, doc: DocId) -> Vec<f64> {
        (0..self.vocabulary_size()).map(|t| self.score_by_id(t, doc)).collect()
    }

    /// Dense query vector over the whole vocabulary.
    ///
    /// Each vocabulary term gets its occurrence count in the query, divided by
    /// the norm of the per-token count vector (one entry per query token,
    /// vocabulary or not), then weighted by idf.
    pub fn query_vector(&self, query: &str) -> Vec<f64> {
        let tokens: Vec<String> = sanitize(query).into_iter().filter(|t| !t.is_empty()).collect();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for t in &tokens {
            *counts.entry(t.as_str()).or_insert(0) += 1;
        }
        let norm = tokens
            .iter()
            .map(|t| {
                let c = counts[t.as_str()] as f64;
                c * c
            })
            .sum::<f64>()
            .sqrt();

        self.vocabulary()
            .zip(&self.idf)
            .map(|(term, &idf)| match counts.get(term) {
                Some(&c) if norm > 0.0 => c as f64 / norm * idf,
                _ => 0.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-12 }

    #[test]
    fn idf_handles_zero_df() {
        assert_eq!(idf(10, 0), 0.0);
        assert_eq!(idf(3, 3), 0.0);
        assert!(close(idf(4, 1), 4f64.ln()));
    }

    #[test]
    fn magnitude_is_norm_of_counts() {
        let index = Index::build(vec![("d", "a a b c c c c")]).unwrap();
        // counts 2, 1, 4
        assert!(close(index.magnitude(0), 21f64.sqrt()));
    }

    #[test]
    fn score_matches_formula() {
        let index = Index::build(vec![("d1", "a a b"), ("d2", "b c")]).unwrap();
        // tf(d1, a) = 2/2, magnitude(d1) = sqrt(5), idf(a) = ln 2
        let expected = 1.0 / 5f64.sqrt() * 2f64.ln();
        assert!(close(index.score("a", 0), expected));
        assert_eq!(index.score("a", 1), 0.0);
        assert_eq!(index.score("b", 0), 0.0); // idf(b) = ln(2/2)
        assert_eq!(index.score("zzz", 0), 0.0);
    }

    #[test]
    fn query_vector_norm_counts_every_token() {
        let index = Index::build(vec![("d1", "cat"), ("d2", "dog")]).unwrap();
        // tokens [cat, cat, bird] -> entries [2, 2, 1], norm 3
        let v = index.query_vector("cat cat bird");
        let ln2 = 2f64.ln();
        assert!(close(v[0], 2.0 / 3.0 * ln2));
        assert_eq!(v[1], 0.0);
    }

    #[test]
    fn blank_query_vector_is_zero() {
        let index = Index::build(vec![("d1", "cat"), ("d2", "dog")]).unwrap();
        assert_eq!(index.query_vector("?!"), vec![0.0, 0.0]);
    }

    #[test]
    fn dot_product_length_mismatch() {
        assert_eq!(dot_product(&[1.0, 2.0], &[3.0]), 0.0);
        assert_eq!(dot_product(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
    }
}
