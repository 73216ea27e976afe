//! Per-term importance weights.

use crate::index::CollectionIndex;

/// Term weighting strategy, chosen once at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Weighting {
    /// Smoothed inverse document frequency: `ln((N + 1) / (df + 0.5)) + 1`.
    #[default]
    Idf,
    /// Inverse word frequency: `ln(total_terms / total_freq)`, 0 for unseen terms.
    Iwf,
}

impl Weighting {
    pub fn weight(&self, index: &CollectionIndex, term: &str) -> f64 {
        match self {
            Weighting::Idf => idf(index.len(), index.doc_freq(term)),
            Weighting::Iwf => iwf(index.total_terms(), index.total_freq(term)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weighting::Idf => "idf",
            Weighting::Iwf => "iwf",
        }
    }
}

pub fn idf(doc_count: usize, doc_freq: usize) -> f64 {
    ((doc_count as f64 + 1.0) / (doc_freq as f64 + 0.5)).ln() + 1.0
}

pub fn iwf(total_terms: usize, total_freq: usize) -> f64 {
    if total_freq == 0 {
        return 0.0;
    }
    (total_terms as f64 / total_freq as f64).ln()
}
