use criterion::{criterion_group, criterion_main, Criterion};
use search_core::tokenizer::sanitize;
use search_core::{build, QueryEngine};

const WORDS: &[&str] = &[
    "index", "query", "phrase", "vector", "space", "model", "term", "document", "rank", "score",
    "cosine", "token", "corpus", "frequency", "inverse", "position",
];

fn synthetic_corpus(docs: usize, len: usize) -> Vec<(String, String)> {
    (0..docs)
        .map(|d| {
            let text = (0..len)
                .map(|i| WORDS[(d * 7 + i * 13 + i / 3) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ");
            (format!("doc{d}"), text)
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let corpus = synthetic_corpus(200, 300);
    let text = &corpus[0].1;
    c.bench_function("sanitize_doc", |b| b.iter(|| sanitize(text)));
    c.bench_function("build_200_docs", |b| b.iter(|| build(corpus.clone()).expect("non-empty corpus")));

    let index = build(corpus.clone()).expect("non-empty corpus");
    let engine = QueryEngine::new(&index);
    c.bench_function("free_text_query", |b| b.iter(|| engine.free_text_query("vector space model")));
    c.bench_function("phrase_query", |b| b.iter(|| engine.phrase_query("term document")));
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
