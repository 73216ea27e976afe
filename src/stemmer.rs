//! Script-aware stemming for mixed Russian/English text.
//!
//! Each word is classified on its own by counting Cyrillic letters, Latin
//! letters and ASCII digits, then routed to the matching Snowball stemmer
//! (provided by Tantivy's [`Stemmer`] filter). Words carrying digits are
//! never stemmed, so version numbers and identifiers survive intact, and
//! Snowball stop words are kept as written.

use std::fmt;

use tantivy::tokenizer::{
    Language as SnowballLanguage,
    RawTokenizer,
    Stemmer,
    StopWordFilter,
    TextAnalyzer,
    TokenStream,
};

/// Language hint given at construction time.
///
/// The hint never overrides the per-word script decision; it only picks
/// which stemmer gets the first attempt when a word has as many Cyrillic
/// letters as Latin ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Auto,
    English,
    Russian,
}

impl Language {
    /// Parse a free-form hint. Unknown values fall back to [`Language::Auto`].
    ///
    /// ```
    /// use bm25s::Language;
    ///
    /// assert_eq!(Language::from_hint("EN"), Language::English);
    /// assert_eq!(Language::from_hint("russian"), Language::Russian);
    /// assert_eq!(Language::from_hint("klingon"), Language::Auto);
    /// ```
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Language::English,
            "ru" | "rus" | "russian" => Language::Russian,
            "" | "auto" => Language::Auto,
            other => {
                tracing::debug!(
                    hint = other,
                    "unrecognized language hint, using script detection"
                );
                Language::Auto
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::English => "english",
            Language::Russian => "russian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter and digit counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptCounts {
    pub cyrillic: usize,
    pub latin: usize,
    pub digits: usize,
}

impl ScriptCounts {
    pub fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            match c {
                'а'..='я' | 'А'..='Я' | 'ё' | 'Ё' => counts.cyrillic += 1,
                'a'..='z' | 'A'..='Z' => counts.latin += 1,
                '0'..='9' => counts.digits += 1,
                _ => {}
            }
        }
        counts
    }

    /// The stemming route for a word with these counts.
    pub fn script(&self) -> Script {
        if self.digits > 0 {
            Script::Numeric
        } else if self.cyrillic > self.latin {
            Script::Cyrillic
        } else if self.latin > self.cyrillic {
            Script::Latin
        } else {
            Script::Undetermined
        }
    }
}

/// Outcome of per-word script classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Contains at least one digit; left untouched.
    Numeric,
    Cyrillic,
    Latin,
    /// Equal counts, including words with neither script.
    Undetermined,
}

/// Snowball's English stop-word list. Tantivy only ships Lucene's shorter
/// English list, which misses words such as `being` or `during`.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an",
    "and", "any", "are", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "did", "do",
    "does", "doing", "don", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
    "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no",
    "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
    "our", "ours", "ourselves", "out", "over", "own", "s", "same", "she",
    "should", "so", "some", "such", "t", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

/// One language's stemmer paired with its stop-word check.
#[derive(Clone)]
struct Snowball {
    stemmer: TextAnalyzer,
    stop_words: TextAnalyzer,
}

impl Snowball {
    fn english() -> Self {
        let stop_words = StopWordFilter::remove(
            ENGLISH_STOP_WORDS.iter().map(|word| word.to_string()),
        );
        Self::build(SnowballLanguage::English, stop_words)
    }

    fn russian() -> Self {
        let stop_words = StopWordFilter::new(SnowballLanguage::Russian)
            .unwrap_or_else(|| StopWordFilter::remove(Vec::new()));
        Self::build(SnowballLanguage::Russian, stop_words)
    }

    fn build(language: SnowballLanguage, stop_words: StopWordFilter) -> Self {
        Self {
            stemmer: TextAnalyzer::builder(RawTokenizer::default())
                .filter(Stemmer::new(language))
                .build(),
            stop_words: TextAnalyzer::builder(RawTokenizer::default())
                .filter(stop_words)
                .build(),
        }
    }

    fn is_stop_word(&mut self, word: &str) -> bool {
        self.stop_words.token_stream(word).next().is_none()
    }

    /// Stem `word`, leaving stop words unchanged.
    fn stem(&mut self, word: &str) -> String {
        if self.is_stop_word(word) {
            return word.to_string();
        }
        let mut stream = self.stemmer.token_stream(word);
        match stream.next() {
            Some(token) => token.text.clone(),
            None => word.to_string(),
        }
    }
}

/// Holds the Russian and English Snowball analyzers.
///
/// Tantivy analyzers need `&mut self` to produce a token stream, so stemming
/// goes through a [`StemSession`] that owns private clones. Create one session
/// per text and reuse it for every word in that text.
#[derive(Clone)]
pub struct ScriptStemmer {
    russian: Snowball,
    english: Snowball,
    language: Language,
}

impl ScriptStemmer {
    pub fn new(language: Language) -> Self {
        Self {
            russian: Snowball::russian(),
            english: Snowball::english(),
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn session(&self) -> StemSession {
        StemSession {
            russian: self.russian.clone(),
            english: self.english.clone(),
            english_first: self.language == Language::English,
        }
    }

    /// Stem a single word. Convenience wrapper that opens a one-off session.
    pub fn stem(&self, word: &str) -> String {
        self.session().stem(word)
    }
}

impl Default for ScriptStemmer {
    fn default() -> Self {
        Self::new(Language::Auto)
    }
}

impl fmt::Debug for ScriptStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptStemmer")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

pub struct StemSession {
    russian: Snowball,
    english: Snowball,
    english_first: bool,
}

impl StemSession {
    pub fn stem(&mut self, word: &str) -> String {
        match ScriptCounts::of(word).script() {
            Script::Numeric => word.to_string(),
            Script::Cyrillic => self.russian.stem(word),
            Script::Latin => self.english.stem(word),
            Script::Undetermined => self.stem_either(word),
        }
    }

    /// Try both stemmers and keep the first one that changes the word.
    fn stem_either(&mut self, word: &str) -> String {
        let (first, second) = if self.english_first {
            (&mut self.english, &mut self.russian)
        } else {
            (&mut self.russian, &mut self.english)
        };

        for snowball in [first, second] {
            let stemmed = snowball.stem(word);
            if !stemmed.is_empty() && stemmed != word {
                return stemmed;
            }
        }
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_HINTS: [Language; 3] =
        [Language::Auto, Language::Russian, Language::English];

    #[test]
    fn hint_parsing() {
        assert_eq!(Language::from_hint("en"), Language::English);
        assert_eq!(Language::from_hint(" Ru "), Language::Russian);
        assert_eq!(Language::from_hint(""), Language::Auto);
        assert_eq!(Language::from_hint("de"), Language::Auto);
    }

    #[test]
    fn script_classification() {
        assert_eq!(ScriptCounts::of("лисица").script(), Script::Cyrillic);
        assert_eq!(ScriptCounts::of("running").script(), Script::Latin);
        assert_eq!(ScriptCounts::of("v2").script(), Script::Numeric);
        assert_eq!(ScriptCounts::of("2024").script(), Script::Numeric);
        assert_eq!(ScriptCounts::of("日本").script(), Script::Undetermined);
        assert_eq!(ScriptCounts::of("abвг").script(), Script::Undetermined);
    }

    #[test]
    fn latin_words_use_english_stemmer() {
        let stemmer = ScriptStemmer::default();
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("jumps"), "jump");
        assert_eq!(stemmer.stem("fox"), "fox");
    }

    #[test]
    fn cyrillic_words_use_russian_stemmer() {
        let stemmer = ScriptStemmer::default();
        assert_eq!(stemmer.stem("лисица"), "лисиц");
        assert_eq!(stemmer.stem("лисицы"), "лисиц");
    }

    #[test]
    fn digits_are_never_stemmed() {
        let stemmer = ScriptStemmer::default();
        assert_eq!(stemmer.stem("runs2"), "runs2");
        assert_eq!(stemmer.stem("версии1"), "версии1");
    }

    #[test]
    fn undetermined_words_without_stem_are_unchanged() {
        let stemmer = ScriptStemmer::default();
        assert_eq!(stemmer.stem("日本語"), "日本語");
    }

    #[test]
    fn stop_words_are_not_stemmed() {
        let stemmer = ScriptStemmer::default();
        for word in ["being", "does", "during", "было", "только", "ее"] {
            assert_eq!(stemmer.stem(word), word);
        }
        assert_eq!(stemmer.stem("jumps"), "jump");
    }

    #[test]
    fn tie_prefers_russian_stem() {
        // four Cyrillic and four Latin letters
        let word = "abcdлиса";
        let russian = Snowball::russian().stem(word);
        assert_ne!(russian, word);

        for language in ALL_HINTS {
            assert_eq!(ScriptStemmer::new(language).stem(word), russian);
        }
    }

    #[test]
    fn tie_falls_back_to_english_stem() {
        let word = "бвгдings";
        assert_eq!(Snowball::russian().stem(word), word);
        let english = Snowball::english().stem(word);
        assert_ne!(english, word);

        for language in ALL_HINTS {
            assert_eq!(ScriptStemmer::new(language).stem(word), english);
        }
    }

    #[test]
    fn english_hint_tries_english_first() {
        assert!(ScriptStemmer::new(Language::English).session().english_first);
        assert!(!ScriptStemmer::new(Language::Russian).session().english_first);
        assert!(!ScriptStemmer::new(Language::Auto).session().english_first);
    }

    #[test]
    fn session_is_reusable() {
        let stemmer = ScriptStemmer::new(Language::Russian);
        let mut session = stemmer.session();
        assert_eq!(session.stem("jumps"), "jump");
        assert_eq!(session.stem("лисица"), "лисиц");
        assert_eq!(session.stem("jumps"), "jump");
    }
}
