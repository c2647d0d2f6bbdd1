//! BM25 ranking over the per-query corpus.
//!
//! ```text
//! score(D,Q) = Σ IDF(q) * tf(q,D) * (k1 + 1) / (tf(q,D) + k1 * (1 - b + b * |D| / avgdl))
//! IDF(q)     = ln((N - df(q) + 0.5) / (df(q) + 0.5) + 1)
//! ```
//!
//! Matching is by substring: a query term counts against every document token
//! that contains it, so `doc` hits `documents`. Repeated query terms are
//! scored once per occurrence.

use std::collections::HashMap;

use jdex_core::traits::HierarchySearch;
use jdex_core::types::{Hierarchy, ScoredResult};

use crate::corpus::{build_corpus_with, CorpusOptions, Document};
use crate::tokenize::tokenize;

pub const K1: f64 = 1.5;
pub const B: f64 = 0.75;

/// Search `hierarchy` with default corpus options.
pub fn search<'a>(hierarchy: &'a Hierarchy, query: &str) -> Vec<ScoredResult<'a>> {
    Bm25Search::default().search(hierarchy, query)
}

/// BM25 ranker with the corpus options it builds documents with.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bm25Search {
    options: CorpusOptions,
}

impl Bm25Search {
    pub fn new(options: CorpusOptions) -> Self {
        Self { options }
    }
}

impl HierarchySearch for Bm25Search {
    fn search<'a>(&self, hierarchy: &'a Hierarchy, query: &str) -> Vec<ScoredResult<'a>> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let corpus = build_corpus_with(hierarchy, &self.options);
        rank(corpus, query)
    }
}

/// Score `corpus` against `query`; positive scores only, best first.
/// Equal scores keep corpus order.
pub fn rank<'a>(corpus: Vec<Document<'a>>, query: &str) -> Vec<ScoredResult<'a>> {
    let query_terms = tokenize(query);
    if query_terms.is_empty() || corpus.is_empty() {
        return Vec::new();
    }

    let doc_tokens: Vec<Vec<String>> = corpus.iter().map(|d| tokenize(&d.text)).collect();
    let total_len: usize = doc_tokens.iter().map(Vec::len).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_doc_length = total_len as f64 / doc_tokens.len() as f64;

    let mut idf: HashMap<&str, f64> = HashMap::new();
    for term in &query_terms {
        idf.entry(term.as_str()).or_insert_with(|| inverse_document_frequency(term, &doc_tokens));
    }

    let mut results: Vec<ScoredResult<'a>> = corpus
        .into_iter()
        .zip(&doc_tokens)
        .filter_map(|(doc, tokens)| {
            let (score, matched_terms) = score_document(&query_terms, tokens, avg_doc_length, &idf);
            (score > 0.0).then(|| ScoredResult {
                kind: doc.kind,
                area: doc.area,
                category: doc.category,
                item: doc.item,
                score,
                matched_terms,
            })
        })
        .collect();

    // stable: ties stay in emission order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    tracing::debug!(
        terms = query_terms.len(),
        documents = doc_tokens.len(),
        avg_doc_length,
        hits = results.len(),
        "bm25 ranked"
    );
    results
}

/// Number of tokens that contain `term`.
fn partial_term_frequency(term: &str, tokens: &[String]) -> usize {
    tokens.iter().filter(|t| t.contains(term)).count()
}

#[allow(clippy::cast_precision_loss)]
fn inverse_document_frequency(term: &str, doc_tokens: &[Vec<String>]) -> f64 {
    let df = doc_tokens.iter().filter(|tokens| tokens.iter().any(|t| t.contains(term))).count();
    if df == 0 {
        return 0.0;
    }
    let n = doc_tokens.len() as f64;
    let df = df as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

#[allow(clippy::cast_precision_loss)]
fn score_document(
    query_terms: &[String],
    tokens: &[String],
    avg_doc_length: f64,
    idf: &HashMap<&str, f64>,
) -> (f64, Vec<String>) {
    let doc_length = tokens.len() as f64;
    let length_norm = if avg_doc_length > 0.0 { doc_length / avg_doc_length } else { 0.0 };
    let mut score = 0.0_f64;
    let mut matched_terms: Vec<String> = Vec::new();

    for term in query_terms {
        let tf = partial_term_frequency(term, tokens);
        if tf == 0 {
            continue;
        }
        if !matched_terms.contains(term) {
            matched_terms.push(term.clone());
        }
        let tf = tf as f64;
        let weight = idf.get(term.as_str()).copied().unwrap_or(0.0);
        score += weight * tf * (K1 + 1.0) / (tf + K1 * (1.0 - B + B * length_norm));
    }

    (score.max(0.0), matched_terms)
}
