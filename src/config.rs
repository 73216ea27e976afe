//! Construction-time configuration for [`crate::Bm25S`].
//!
//! # Examples
//!
//! ```
//! use bm25s::Bm25Config;
//!
//! let config = Bm25Config::default().with_k1(1.6).with_iwf();
//! assert!(config.validate().is_ok());
//! ```

use std::{fmt, sync::Arc};

use crate::{
    error::{Error, Result},
    tokenizer::Tokenizer,
    weighting::Weighting,
};

/// A tunable constant: either left to the tuner or pinned by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Param {
    #[default]
    Auto,
    Pinned(f64),
}

impl Param {
    pub fn pinned(&self) -> Option<f64> {
        match self {
            Param::Auto => None,
            Param::Pinned(value) => Some(*value),
        }
    }
}

#[derive(Clone, Default)]
pub struct Bm25Config {
    pub k1: Param,
    pub b: Param,
    pub weighting: Weighting,
    pub tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl Bm25Config {
    /// Pin the term-frequency saturation constant.
    pub fn with_k1(mut self, k1: f64) -> Self {
        self.k1 = Param::Pinned(k1);
        self
    }

    /// Pin the length-normalization constant.
    pub fn with_b(mut self, b: f64) -> Self {
        self.b = Param::Pinned(b);
        self
    }

    /// Weight terms by inverse word frequency instead of IDF.
    pub fn with_iwf(mut self) -> Self {
        self.weighting = Weighting::Iwf;
        self
    }

    /// Replace the default tokenization and stemming pipeline entirely.
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(k1) = self.k1.pinned()
            && !(k1.is_finite() && k1 >= 0.0)
        {
            return Err(Error::Config(format!(
                "k1 must be a finite, non-negative number, got {k1}"
            )));
        }
        if let Some(b) = self.b.pinned()
            && !(b.is_finite() && (0.0..=1.0).contains(&b))
        {
            return Err(Error::Config(format!(
                "b must be within [0, 1], got {b}"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for Bm25Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bm25Config")
            .field("k1", &self.k1)
            .field("b", &self.b)
            .field("weighting", &self.weighting)
            .field("custom_tokenizer", &self.tokenizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_auto_idf() {
        let config = Bm25Config::default();
        assert_eq!(config.k1, Param::Auto);
        assert_eq!(config.b, Param::Auto);
        assert_eq!(config.weighting, Weighting::Idf);
        assert!(config.tokenizer.is_none());
    }

    #[test]
    fn builder_pins_values() {
        let config = Bm25Config::default().with_k1(2.0).with_b(0.5).with_iwf();
        assert_eq!(config.k1, Param::Pinned(2.0));
        assert_eq!(config.b, Param::Pinned(0.5));
        assert_eq!(config.weighting, Weighting::Iwf);
    }

    #[test]
    fn rejects_bad_k1() {
        assert!(Bm25Config::default().with_k1(-1.0).validate().is_err());
        assert!(Bm25Config::default().with_k1(f64::NAN).validate().is_err());
        assert!(Bm25Config::default().with_k1(0.0).validate().is_ok());
    }

    #[test]
    fn rejects_bad_b() {
        assert!(Bm25Config::default().with_b(1.5).validate().is_err());
        assert!(Bm25Config::default().with_b(-0.1).validate().is_err());
        assert!(Bm25Config::default().with_b(1.0).validate().is_ok());
    }

    #[test]
    fn debug_hides_tokenizer() {
        let config = Bm25Config::default()
            .with_tokenizer(|t: &str| vec![t.to_string()]);
        let rendered = format!("{config:?}");
        assert!(rendered.contains("custom_tokenizer: true"));
    }
}
