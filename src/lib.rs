//! bm25s - BM25 ranking for short, mixed Russian/English texts.
//!
//! Documents are tokenized (lower-cased, punctuation-trimmed, stemmed by
//! each word's dominant script through Tantivy's Snowball stemmers) and
//! indexed once. Queries are scored with a BM25 variant tuned for short
//! texts: `k1` and `b` default to short-text values and switch to classic
//! values when the average document is long, and unusually long documents
//! get an extra length penalty.
//!
//! # Quick start
//!
//! ```
//! use bm25s::{Bm25Config, Bm25S};
//!
//! let docs = [
//!     "The quick brown fox jumps over the lazy dog",
//!     "A fox fled from danger",
//!     "Irrelevant document",
//! ];
//! let engine = Bm25S::new(docs, "en", Bm25Config::default()).unwrap();
//!
//! for hit in engine.search("fox", 2) {
//!     println!("{} (score: {:.3}) {}", hit.doc_index, hit.score, hit.document);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod format;
pub mod index;
pub mod prompt;
pub mod retrieval;
pub mod scorer;
pub mod stemmer;
pub mod text_util;
pub mod tokenizer;
pub mod tuning;
pub mod weighting;

pub use config::{Bm25Config, Param};
pub use engine::{Bm25S, CollectionStats, SearchResult};
pub use error::{Error, Result};
pub use retrieval::{DocMatch, ResponseEntry};
pub use stemmer::Language;
pub use tokenizer::{DefaultTokenizer, Tokenizer};
pub use weighting::Weighting;
