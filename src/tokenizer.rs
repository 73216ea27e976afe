//! Text to index-term conversion.

use crate::stemmer::{Language, ScriptStemmer};

/// Characters trimmed from both ends of every word.
pub const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}',
];

/// Words shorter than this (in Unicode scalar values) are dropped.
pub const MIN_TERM_CHARS: usize = 2;

/// Turns raw text into the ordered sequence of index terms.
///
/// Any `Fn(&str) -> Vec<String>` closure that is `Send + Sync` is a tokenizer,
/// so callers can swap in their own pipeline without a wrapper type.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Lower-case, split on whitespace, trim punctuation, drop short words,
/// then stem each word by its dominant script.
#[derive(Debug, Clone, Default)]
pub struct DefaultTokenizer {
    stemmer: ScriptStemmer,
}

impl DefaultTokenizer {
    pub fn new(language: Language) -> Self {
        Self {
            stemmer: ScriptStemmer::new(language),
        }
    }

    pub fn language(&self) -> Language {
        self.stemmer.language()
    }
}

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut session = self.stemmer.session();

        lowered
            .split_whitespace()
            .map(|word| word.trim_matches(PUNCTUATION))
            .filter(|word| word.chars().count() >= MIN_TERM_CHARS)
            .map(|word| session.stem(word))
            .collect()
    }
}
