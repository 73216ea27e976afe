use std::sync::Arc;

use serde::Serialize;

use crate::{
    config::Bm25Config,
    error::{Error, Result},
    index::CollectionIndex,
    scorer::{self, DocContext},
    stemmer::Language,
    tokenizer::{DefaultTokenizer, Tokenizer},
    tuning::{self, Parameters},
    weighting::Weighting,
};

/// BM25 ranking over an immutable collection of short documents.
///
/// The index is built once in [`Bm25S::new`]; scoring and searching only read
/// it, so a shared `&Bm25S` can be queried from several threads.
///
/// ```
/// use bm25s::{Bm25Config, Bm25S};
///
/// let docs = ["The quick brown fox jumps over the lazy dog", "A fox fled from danger"];
/// let engine = Bm25S::new(docs, "en", Bm25Config::default()).unwrap();
///
/// let hits = engine.search("fox", 1);
/// assert_eq!(hits[0].doc_index, 1);
/// ```
pub struct Bm25S {
    documents: Vec<String>,
    index: CollectionIndex,
    params: Parameters,
    weighting: Weighting,
    tokenizer: Arc<dyn Tokenizer>,
    language: Language,
}

/// One ranked hit. Borrows the document text from the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<'a> {
    pub doc_index: usize,
    pub score: f64,
    pub document: &'a str,
}

/// Summary of the collection and the resolved parameters.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionStats {
    pub documents: usize,
    pub total_terms: usize,
    pub vocabulary: usize,
    pub avg_doc_length: f64,
    pub k1: f64,
    pub k1_source: &'static str,
    pub b: f64,
    pub b_source: &'static str,
    pub weighting: &'static str,
    pub language: &'static str,
}

impl Bm25S {
    /// Index `documents` with a free-form language hint (`"en"`, `"ru"`, ...).
    pub fn new<I, S>(
        documents: I,
        language_hint: &str,
        config: Bm25Config,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_language(
            documents,
            Language::from_hint(language_hint),
            config,
        )
    }

    pub fn with_language<I, S>(
        documents: I,
        language: Language,
        config: Bm25Config,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;

        let documents: Vec<String> =
            documents.into_iter().map(Into::into).collect();
        let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer {
            Some(custom) => custom,
            None => Arc::new(DefaultTokenizer::new(language)),
        };

        let index =
            CollectionIndex::build(documents.as_slice(), tokenizer.as_ref());
        let params =
            tuning::resolve(config.k1, config.b, index.avg_doc_length());

        tracing::debug!(
            documents = index.len(),
            total_terms = index.total_terms(),
            avg_doc_length = index.avg_doc_length(),
            k1 = params.k1.value,
            b = params.b.value,
            weighting = config.weighting.as_str(),
            "built BM25S index"
        );

        Ok(Self {
            documents,
            index,
            params,
            weighting: config.weighting,
            tokenizer,
            language,
        })
    }

    /// Relevance of document `doc_index` to `query`.
    ///
    /// Out-of-range indices are reported as [`Error::DocumentOutOfRange`]
    /// rather than producing a meaningless score.
    pub fn score(&self, doc_index: usize, query: &str) -> Result<f64> {
        if doc_index >= self.len() {
            return Err(Error::DocumentOutOfRange {
                index: doc_index,
                len: self.len(),
            });
        }
        let terms = self.tokenizer.tokenize(query);
        Ok(self.score_terms(doc_index, &terms))
    }

    fn score_terms(&self, doc_index: usize, query_terms: &[String]) -> f64 {
        let tf_table = self.index.term_freqs(doc_index);
        let ctx = DocContext {
            doc_length: self.index.doc_length(doc_index) as f64,
            avg_doc_length: self.index.avg_doc_length(),
            k1: self.params.k1.value,
            b: self.params.b.value,
        };

        query_terms
            .iter()
            .filter_map(|term| {
                let tf = tf_table.get(term).copied()?;
                Some(scorer::term_score(tf, self.term_weight(term), &ctx))
            })
            .sum()
    }

    /// Rank every document against `query`, best first.
    ///
    /// Only documents scoring above zero are returned. `top_n == 0` means
    /// no truncation.
    pub fn search(&self, query: &str, top_n: usize) -> Vec<SearchResult<'_>> {
        let terms = self.tokenizer.tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult<'_>> = (0..self.len())
            .filter_map(|i| {
                let score = self.score_terms(i, &terms);
                (score > 0.0).then(|| SearchResult {
                    doc_index: i,
                    score,
                    document: &self.documents[i],
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        if top_n > 0 {
            results.truncate(top_n);
        }

        tracing::trace!(
            query,
            terms = terms.len(),
            hits = results.len(),
            "search complete"
        );
        results
    }

    /// Weight of an already-normalized term under the active strategy.
    pub fn term_weight(&self, term: &str) -> f64 {
        self.weighting.weight(&self.index, term)
    }

    /// Run the engine's tokenizer over arbitrary text.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document(&self, doc_index: usize) -> Option<&str> {
        self.documents.get(doc_index).map(String::as_str)
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn index(&self) -> &CollectionIndex {
        &self.index
    }

    pub fn doc_lengths(&self) -> &[usize] {
        self.index.doc_lengths()
    }

    pub fn avg_doc_length(&self) -> f64 {
        self.index.avg_doc_length()
    }

    pub fn parameters(&self) -> Parameters {
        self.params
    }

    pub fn k1(&self) -> f64 {
        self.params.k1.value
    }

    pub fn b(&self) -> f64 {
        self.params.b.value
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            documents: self.len(),
            total_terms: self.index.total_terms(),
            vocabulary: self.index.vocabulary_size(),
            avg_doc_length: self.index.avg_doc_length(),
            k1: self.params.k1.value,
            k1_source: self.params.k1.source.as_str(),
            b: self.params.b.value,
            b_source: self.params.b.source.as_str(),
            weighting: self.weighting.as_str(),
            language: self.language.as_str(),
        }
    }
}

impl std::fmt::Debug for Bm25S {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bm25S")
            .field("documents", &self.documents.len())
            .field("params", &self.params)
            .field("weighting", &self.weighting)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{LONG_B, LONG_K1, SHORT_B, SHORT_K1, Tuning};

    fn engine(docs: &[&str]) -> Bm25S {
        Bm25S::new(docs.iter().copied(), "en", Bm25Config::default()).unwrap()
    }

    #[test]
    fn short_collection_uses_short_defaults() {
        let e = engine(&[
            "The quick brown fox jumps over the lazy dog",
            "A fox fled from danger",
        ]);
        assert_eq!(e.k1(), SHORT_K1);
        assert_eq!(e.b(), SHORT_B);
        assert_eq!(e.weighting(), Weighting::Idf);
        assert_eq!(e.language(), Language::English);
    }

    #[test]
    fn pinned_parameters_and_iwf() {
        let config = Bm25Config::default().with_k1(1.5).with_b(0.5).with_iwf();
        let e = Bm25S::new(
            ["Быстрая лисица перепрыгнула через ленивую собаку"],
            "ru",
            config,
        )
        .unwrap();
        assert_eq!(e.k1(), 1.5);
        assert_eq!(e.b(), 0.5);
        assert_eq!(e.parameters().k1.source, Tuning::Pinned);
        assert_eq!(e.weighting(), Weighting::Iwf);
    }

    #[test]
    fn long_collection_switches_auto_parameters() {
        let long_doc = "word ".repeat(150);
        let e = Bm25S::new([long_doc.clone(), long_doc], "", Bm25Config::default())
            .unwrap();
        assert!(e.avg_doc_length() > 100.0);
        assert_eq!(e.k1(), LONG_K1);
        assert_eq!(e.b(), LONG_B);

        let long_doc = "word ".repeat(150);
        let pinned = Bm25S::new(
            [long_doc],
            "",
            Bm25Config::default().with_b(0.2),
        )
        .unwrap();
        assert_eq!(pinned.k1(), LONG_K1);
        assert_eq!(pinned.b(), 0.2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Bm25S::new(["doc"], "en", Bm25Config::default().with_b(2.0))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn out_of_range_score_is_an_error() {
        let e = engine(&["fox"]);
        let err = e.score(1, "fox").unwrap_err();
        assert!(matches!(
            err,
            Error::DocumentOutOfRange { index: 1, len: 1 }
        ));
    }

    #[test]
    fn unmatched_query_scores_zero() {
        let e = engine(&["The quick brown fox"]);
        assert_eq!(e.score(0, "elephant").unwrap(), 0.0);
    }

    #[test]
    fn score_sums_over_query_terms() {
        let e = engine(&["quick fox", "slow dog"]);
        let both = e.score(0, "quick fox").unwrap();
        let one = e.score(0, "fox").unwrap();
        assert!(both > one);
        // a repeated query term counts twice
        let twice = e.score(0, "fox fox").unwrap();
        assert!((twice - 2.0 * one).abs() < 1e-12);
    }

    #[test]
    fn search_returns_borrowed_document_text() {
        let e = engine(&["alpha beta", "gamma delta"]);
        let hits = e.search("gamma", 0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_index, 1);
        assert_eq!(hits[0].document, "gamma delta");
    }

    #[test]
    fn search_zero_top_n_returns_everything() {
        let e = engine(&["fox one", "fox two", "fox three", "cat"]);
        assert_eq!(e.search("fox", 0).len(), 3);
        assert_eq!(e.search("fox", 2).len(), 2);
        assert_eq!(e.search("fox", 10).len(), 3);
    }

    #[test]
    fn custom_tokenizer_replaces_stemming() {
        let config = Bm25Config::default().with_tokenizer(|text: &str| {
            text.split(',').map(|t| t.trim().to_string()).collect::<Vec<_>>()
        });
        let e = Bm25S::new(["running, jumps", "walks"], "en", config).unwrap();
        assert_eq!(e.doc_lengths(), &[2, 1]);
        assert!(e.score(0, "running").unwrap() > 0.0);
        assert_eq!(e.score(0, "run").unwrap(), 0.0);
    }

    #[test]
    fn stats_reflect_the_collection() {
        let e = engine(&["fox fox", "dog"]);
        let stats = e.stats();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.total_terms, 3);
        assert_eq!(stats.vocabulary, 2);
        assert_eq!(stats.k1_source, "short");
        assert_eq!(stats.weighting, "idf");
    }
}
