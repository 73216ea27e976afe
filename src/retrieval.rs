//! Matching a query against a database of prepared response entries.
//!
//! Entries are ranked with [`Bm25S`] over their contents. An optional fuzzy
//! pass compares the whole query against each entry by normalized
//! Levenshtein similarity, which catches near-verbatim questions that BM25
//! may under-rank.

use serde::{Deserialize, Serialize};

use crate::{
    config::Bm25Config,
    engine::Bm25S,
    error::{Error, Result},
    text_util,
};

/// Default minimum similarity for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.75;

/// A prepared response, or a prompt fragment when `is_prompt` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub is_prompt: bool,
}

/// Best BM25 hit for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    pub entry_index: usize,
    pub score: f64,
}

#[derive(Debug)]
pub struct DocMatch {
    entries: Vec<ResponseEntry>,
    engine: Bm25S,
    fuzzy_threshold: f64,
}

impl DocMatch {
    pub fn new(
        entries: Vec<ResponseEntry>,
        language_hint: &str,
        config: Bm25Config,
    ) -> Result<Self> {
        let engine = Bm25S::new(
            entries.iter().map(|e| e.content.clone()),
            language_hint,
            config,
        )?;
        Ok(Self {
            entries,
            engine,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
        })
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "fuzzy threshold must be within [0, 1], got {threshold}"
            )));
        }
        self.fuzzy_threshold = threshold;
        Ok(self)
    }

    pub fn entries(&self) -> &[ResponseEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&ResponseEntry> {
        self.entries.get(index)
    }

    pub fn engine(&self) -> &Bm25S {
        &self.engine
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    /// The single best entry, if any scores above zero.
    pub fn best_match(&self, query: &str) -> Option<BestMatch> {
        self.engine
            .search(query, 1)
            .into_iter()
            .find(|hit| hit.score > 0.0)
            .map(|hit| BestMatch {
                entry_index: hit.doc_index,
                score: hit.score,
            })
    }

    /// Entries whose whole content is similar enough to the query, in
    /// collection order.
    pub fn fuzzy_matches(&self, query: &str) -> Vec<&ResponseEntry> {
        self.entries
            .iter()
            .filter(|entry| {
                text_util::similarity(query, &entry.content)
                    >= self.fuzzy_threshold
            })
            .collect()
    }
}
