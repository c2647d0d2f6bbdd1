//! jdex-search
//!
//! In-memory BM25 search over a filing hierarchy. The corpus is rebuilt from
//! the hierarchy on every call; see `bm25` for the scoring rules.

pub mod bm25;
pub mod corpus;
pub mod highlight;
pub mod tokenize;

pub use bm25::{search, Bm25Search};
pub use corpus::{build_corpus, build_corpus_with, CorpusOptions, Document};
pub use highlight::{highlight, Segment};
pub use tokenize::tokenize;
