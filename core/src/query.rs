use crate::index::Index;
use crate::tokenizer::sanitize;
use crate::vsm::dot_product;
use crate::DocId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A query as handed over by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Query {
    OneWord(String),
    FreeText(String),
    Phrase(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
}

/// Stateless query executor over a built [`Index`].
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    index: &'a Index,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a Index) -> Self { Self { index } }

    pub fn search(&self, query: &Query) -> Vec<String> {
        self.to_ids(self.search_scored(query))
    }

    pub fn search_scored(&self, query: &Query) -> Vec<SearchHit> {
        let (kind, text, docs) = match query {
            Query::OneWord(w) => ("one_word", w, self.one_word_candidates(w)),
            Query::FreeText(t) => ("free_text", t, self.free_text_candidates(t)),
            Query::Phrase(t) => {
                if sanitize(t).len() == 1 {
                    return self.search_scored(&Query::OneWord(t.clone()));
                }
                ("phrase", t, self.phrase_candidates(t))
            }
        };
        let hits = self.rank_scored(&docs, text);
        tracing::debug!(kind, query = %text, candidates = docs.len(), hits = hits.len(), "query executed");
        hits
    }

    pub fn one_word_query(&self, word: &str) -> Vec<String> {
        self.search(&Query::OneWord(word.to_string()))
    }

    pub fn free_text_query(&self, text: &str) -> Vec<String> {
        self.search(&Query::FreeText(text.to_string()))
    }

    pub fn phrase_query(&self, text: &str) -> Vec<String> {
        self.search(&Query::Phrase(text.to_string()))
    }

    /// Every document keyed under the sanitized word, in corpus order.
    fn one_word_candidates(&self, word: &str) -> Vec<DocId> {
        let term = sanitize(word).join(" ");
        match self.index.inverted.get(&term) {
            Some(docs) => docs.keys().copied().collect(),
            None => Vec::new(),
        }
    }

    /// Union of the per-token candidates, first-seen order, no duplicates.
    fn free_text_candidates(&self, text: &str) -> Vec<DocId> {
        let mut seen: HashSet<DocId> = HashSet::new();
        let mut union = Vec::new();
        for token in sanitize(text) {
            for doc in self.one_word_candidates(&token) {
                if seen.insert(doc) {
                    union.push(doc);
                }
            }
        }
        union
    }

    /// Documents holding every phrase word, consecutively and in order.
    fn phrase_candidates(&self, text: &str) -> Vec<DocId> {
        let words: Vec<String> = sanitize(text).into_iter().filter(|w| !w.is_empty()).collect();
        let Some(first) = words.first() else { return Vec::new() };

        let mut shared = self.one_word_candidates(first);
        for word in &words[1..] {
            let docs: HashSet<DocId> = self.one_word_candidates(word).into_iter().collect();
            shared.retain(|d| docs.contains(d));
        }

        shared.retain(|&doc| self.is_adjacent(&words, doc));
        shared
    }

    /// Shift the i-th word's positions left by i; a value common to every
    /// shifted list is a start position of the whole phrase.
    fn is_adjacent(&self, words: &[String], doc: DocId) -> bool {
        let inverted = &self.index.inverted;
        let mut starts: HashSet<u32> = match inverted.positions(&words[0], doc) {
            Some(p) => p.iter().collect(),
            None => return false,
        };
        for (i, word) in words.iter().enumerate().skip(1) {
            let Some(positions) = inverted.positions(word, doc) else { return false };
            let shifted: HashSet<u32> = positions.shifted(i).collect();
            starts.retain(|s| shifted.contains(s));
            if starts.is_empty() {
                return false;
            }
        }
        !starts.is_empty()
    }

    /// Order candidates by their dot product with the query vector.
    pub fn rank_results(&self, candidates: &[DocId], query: &str) -> Vec<String> {
        self.to_ids(self.rank_scored(candidates, query))
    }

    /// Like [`rank_results`](Self::rank_results) but keeps the scores.
    /// Ties keep their input order.
    pub fn rank_scored(&self, candidates: &[DocId], query: &str) -> Vec<SearchHit> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let query_vec = self.index.query_vector(query);
        let mut scored: Vec<(DocId, f64)> = candidates
            .iter()
            .map(|&doc| (doc, dot_product(&self.index.document_vector(doc), &query_vec)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .filter_map(|(doc, score)| {
                self.index.document(doc).map(|d| SearchHit { doc_id: d.id.clone(), score })
            })
            .collect()
    }

    fn to_ids(&self, hits: Vec<SearchHit>) -> Vec<String> {
        hits.into_iter().map(|h| h.doc_id).collect()
    }
}

pub fn query_one_word(index: &Index, word: &str) -> Vec<String> {
    QueryEngine::new(index).one_word_query(word)
}

pub fn query_free_text(index: &Index, text: &str) -> Vec<String> {
    QueryEngine::new(index).free_text_query(text)
}

pub fn query_phrase(index: &Index, text: &str) -> Vec<String> {
    QueryEngine::new(index).phrase_query(text)
}
