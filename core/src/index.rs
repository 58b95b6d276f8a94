use crate::error::{BuildError, Result};
use crate::tokenizer::{is_blank, sanitize};
use crate::vsm;
use crate::{DocId, Position, TermId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Ascending token positions of one term within one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionList(Vec<Position>);

impl PositionList {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, pos: Position) { self.0.push(pos); }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_slice(&self) -> &[Position] { &self.0 }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ { self.0.iter().copied() }

    /// Positions moved left by `offset`; positions below `offset` are dropped
    /// since they cannot line up with an earlier phrase word.
    pub fn shifted(&self, offset: usize) -> impl Iterator<Item = Position> + '_ {
        self.0.iter().filter_map(move |&p| p.checked_sub(offset as Position))
    }
}

impl From<Vec<Position>> for PositionList {
    fn from(v: Vec<Position>) -> Self { Self(v) }
}

/// Per-document map term -> positions, enumerated in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct PositionalIndex {
    entries: Vec<(String, PositionList)>,
    lookup: HashMap<String, usize>,
}

impl PositionalIndex {
    pub fn get(&self, term: &str) -> Option<&PositionList> {
        self.lookup.get(term).map(|&i| &self.entries[i].1)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PositionList)> + '_ {
        self.entries.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Raw count vector: one occurrence count per distinct term.
    pub fn raw_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(_, p)| p.len())
    }

    /// Total number of tokens the index was built from.
    pub fn token_count(&self) -> usize { self.raw_counts().sum() }
}

/// Corpus-wide map term -> document -> positions.
///
/// Term ids are handed out in order of first appearance across the corpus and
/// double as the fixed vocabulary enumeration order.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    postings: Vec<BTreeMap<DocId, PositionList>>,
}

impl InvertedIndex {
    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    /// Documents containing `term`, keyed in ascending `DocId` order.
    pub fn get(&self, term: &str) -> Option<&BTreeMap<DocId, PositionList>> {
        self.term_id(term).map(|id| &self.postings[id as usize])
    }

    pub fn positions(&self, term: &str, doc: DocId) -> Option<&PositionList> {
        self.get(term).and_then(|docs| docs.get(&doc))
    }

    pub fn contains(&self, term: &str) -> bool { self.dictionary.contains_key(term) }

    /// Vocabulary in enumeration order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ { self.terms.iter().map(String::as_str) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    fn intern(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.dictionary.get(term) {
            return id;
        }
        let id = self.terms.len() as TermId;
        self.dictionary.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        self.postings.push(BTreeMap::new());
        id
    }
}

/// Raw frequency tables accumulated while the inverted index is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermStats {
    /// Per document: term id -> occurrences / distinct terms in that document.
    pub tf: Vec<HashMap<TermId, f64>>,
    /// Per term id: number of documents containing the term.
    pub df: Vec<u32>,
}

/// A corpus document after sanitization.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub positions: PositionalIndex,
}

/// Build the positional index of one document's token sequence.
pub fn build_positional_index(tokens: &[String]) -> PositionalIndex {
    let mut index = PositionalIndex::default();
    for (pos, token) in tokens.iter().enumerate() {
        match index.lookup.get(token) {
            Some(&i) => index.entries[i].1.push(pos as Position),
            None => {
                index.lookup.insert(token.clone(), index.entries.len());
                index.entries.push((token.clone(), PositionList::from(vec![pos as Position])));
            }
        }
    }
    index
}

/// Merge per-document positional indexes into the inverted index, accumulating
/// tf and df along the way. `DocId`s are the slice indices.
pub fn build_inverted_index(docs: &[Document]) -> Result<(InvertedIndex, TermStats)> {
    let mut inverted = InvertedIndex::default();
    let mut stats = TermStats { tf: Vec::with_capacity(docs.len()), df: Vec::new() };

    for (doc_id, doc) in docs.iter().enumerate() {
        let distinct = doc.positions.len();
        if distinct == 0 {
            return Err(BuildError::EmptyDocument(doc.id.clone()));
        }
        let mut tf_doc: HashMap<TermId, f64> = HashMap::with_capacity(distinct);
        for (term, positions) in doc.positions.iter() {
            let tid = inverted.intern(term);
            if stats.df.len() <= tid as usize { stats.df.resize(tid as usize + 1, 0); }
            tf_doc.insert(tid, positions.len() as f64 / distinct as f64);
            // Each term appears once per positional index, so this counts documents.
            stats.df[tid as usize] += 1;
            inverted.postings[tid as usize].insert(doc_id as DocId, positions.clone());
        }
        stats.tf.push(tf_doc);
    }
    Ok((inverted, stats))
}

/// Immutable index over a fixed corpus, with every statistic the ranker needs.
#[derive(Debug, Clone)]
pub struct Index {
    pub(crate) documents: Vec<Document>,
    pub(crate) doc_ids: HashMap<String, DocId>,
    pub(crate) inverted: InvertedIndex,
    pub(crate) stats: TermStats,
    pub(crate) idf: Vec<f64>,
    pub(crate) magnitudes: Vec<f64>,
}

impl Index {
    /// Build an index from `(document_id, raw_text)` pairs.
    pub fn build<I, S, T>(corpus: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let mut documents: Vec<Document> = Vec::new();
        let mut doc_ids: HashMap<String, DocId> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (id, text) in corpus {
            let id: String = id.into();
            if !seen.insert(id.clone()) {
                tracing::warn!(doc = %id, "rejecting corpus with duplicate document id");
                return Err(BuildError::DuplicateDocument(id));
            }
            let tokens = sanitize(text.as_ref());
            if is_blank(&tokens) {
                tracing::warn!(doc = %id, "rejecting corpus with empty document");
                return Err(BuildError::EmptyDocument(id));
            }
            doc_ids.insert(id.clone(), documents.len() as DocId);
            documents.push(Document { id, positions: build_positional_index(&tokens) });
        }

        if documents.is_empty() {
            tracing::warn!("rejecting empty corpus");
            return Err(BuildError::EmptyCorpus);
        }

        let (inverted, stats) = build_inverted_index(&documents)?;
        let idf = vsm::compute_idf(documents.len(), &stats.df);
        let magnitudes = documents.iter().map(|d| vsm::magnitude(&d.positions)).collect();

        tracing::info!(num_docs = documents.len(), num_terms = inverted.len(), "index build complete");
        Ok(Self { documents, doc_ids, inverted, stats, idf, magnitudes })
    }

    /// Corpus size N.
    pub fn collection_size(&self) -> usize { self.documents.len() }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ { self.inverted.terms() }

    pub fn vocabulary_size(&self) -> usize { self.inverted.len() }

    pub fn inverted_index(&self) -> &InvertedIndex { &self.inverted }

    pub fn stats(&self) -> &TermStats { &self.stats }

    pub fn doc_id(&self, external_id: &str) -> Option<DocId> { self.doc_ids.get(external_id).copied() }

    pub fn document(&self, doc: DocId) -> Option<&Document> { self.documents.get(doc as usize) }

    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ { self.documents.iter() }

    /// Per-document positional ("regular") index.
    pub fn positional_index(&self, doc: DocId) -> Option<&PositionalIndex> {
        self.document(doc).map(|d| &d.positions)
    }

    pub fn token_count(&self, doc: DocId) -> usize {
        self.positional_index(doc).map_or(0, PositionalIndex::token_count)
    }

    pub fn raw_counts(&self, doc: DocId) -> Vec<usize> {
        self.positional_index(doc).map(|p| p.raw_counts().collect()).unwrap_or_default()
    }

    /// df(term); 0 for terms outside the vocabulary.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.inverted.term_id(term).map_or(0, |id| self.stats.df[id as usize])
    }

    /// tf(doc, term); 0 when the term does not occur in the document.
    pub fn term_frequency(&self, doc: DocId, term: &str) -> f64 {
        self.inverted.term_id(term).map_or(0.0, |id| self.tf_by_id(doc, id))
    }

    pub(crate) fn tf_by_id(&self, doc: DocId, term: TermId) -> f64 {
        self.stats
            .tf
            .get(doc as usize)
            .and_then(|m| m.get(&term))
            .copied()
            .unwrap_or(0.0)
    }
}
