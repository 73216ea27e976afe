//! Per-document term tables and collection-wide statistics.
//!
//! Built in a single pass over the documents and never mutated afterwards.
//! Every per-document vector is index-aligned with the input documents.

use std::collections::HashMap;

use crate::tokenizer::Tokenizer;

/// Term → occurrence count within one document.
pub type TermFreqs = HashMap<String, usize>;

#[derive(Debug, Clone, Default)]
pub struct CollectionIndex {
    doc_term_freqs: Vec<TermFreqs>,
    doc_lengths: Vec<usize>,
    doc_freq: HashMap<String, usize>,
    total_freq: HashMap<String, usize>,
    total_terms: usize,
    avg_doc_length: f64,
}

impl CollectionIndex {
    pub fn build<S: AsRef<str>>(
        documents: &[S],
        tokenizer: &dyn Tokenizer,
    ) -> Self {
        let mut index = Self {
            doc_term_freqs: Vec::with_capacity(documents.len()),
            doc_lengths: Vec::with_capacity(documents.len()),
            ..Self::default()
        };

        for doc in documents {
            let terms = tokenizer.tokenize(doc.as_ref());
            index.doc_lengths.push(terms.len());
            index.total_terms += terms.len();

            let mut tf = TermFreqs::new();
            for term in terms {
                *index.total_freq.entry(term.clone()).or_insert(0) += 1;
                *tf.entry(term).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *index.doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            index.doc_term_freqs.push(tf);
        }

        if !documents.is_empty() {
            index.avg_doc_length =
                index.total_terms as f64 / documents.len() as f64;
        }

        index
    }

    pub fn len(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_lengths.is_empty()
    }

    /// Panics if `doc` is out of range.
    pub fn term_freqs(&self, doc: usize) -> &TermFreqs {
        &self.doc_term_freqs[doc]
    }

    /// Panics if `doc` is out of range.
    pub fn doc_length(&self, doc: usize) -> usize {
        self.doc_lengths[doc]
    }

    pub fn doc_lengths(&self) -> &[usize] {
        &self.doc_lengths
    }

    /// Number of documents containing `term` at least once.
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of `term` summed over the whole collection.
    pub fn total_freq(&self, term: &str) -> usize {
        self.total_freq.get(term).copied().unwrap_or(0)
    }

    pub fn total_terms(&self) -> usize {
        self.total_terms
    }

    pub fn avg_doc_length(&self) -> f64 {
        self.avg_doc_length
    }

    /// Number of distinct terms in the collection.
    pub fn vocabulary_size(&self) -> usize {
        self.doc_freq.len()
    }
}
