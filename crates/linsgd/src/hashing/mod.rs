//! Text featurization for hashed linear models.
//!
//! - [`FeatureHasher`] / [`TableSize`]: string → index mapping (FNV-1a)
//! - [`expand_ngrams`] / [`tokenize`]: word n-gram expansion
//! - [`strip_diacritics`]: optional accent folding
//! - [`TextFeaturizer`]: the full sentence → indices pipeline
//!
//! A model trained on hashed text persists its [`TextFeaturizer`] settings,
//! so evaluation reproduces the exact indices seen during training.

mod hasher;
mod ngram;
mod normalize;

pub use hasher::{fnv1a_32, FeatureHasher, TableSize, TableSizeError, MAX_TABLE_BITS};
pub use ngram::{expand_ngrams, tokenize, NGRAM_SEPARATOR};
pub use normalize::strip_diacritics;

/// Sentence → hashed feature indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextFeaturizer {
    hasher: FeatureHasher,
    ngram_order: usize,
    strip_diacritics: bool,
}

impl TextFeaturizer {
    pub fn new(table_size: TableSize, ngram_order: usize, strip_diacritics: bool) -> Self {
        Self {
            hasher: FeatureHasher::new(table_size),
            ngram_order,
            strip_diacritics,
        }
    }

    #[inline]
    pub fn table_size(&self) -> TableSize {
        self.hasher.table_size()
    }

    #[inline]
    pub fn ngram_order(&self) -> usize {
        self.ngram_order
    }

    #[inline]
    pub fn strips_diacritics(&self) -> bool {
        self.strip_diacritics
    }

    /// Tokenize, expand and hash a sentence.
    pub fn featurize(&self, sentence: &str) -> Vec<u32> {
        let folded;
        let sentence = if self.strip_diacritics {
            folded = strip_diacritics(sentence);
            folded.as_str()
        } else {
            sentence
        };

        let words = tokenize(sentence);
        if self.ngram_order > 1 {
            self.hasher.hash_tokens(expand_ngrams(&words, self.ngram_order))
        } else {
            self.hasher.hash_tokens(words)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featurize_unigrams() {
        let featurizer = TextFeaturizer::new(TableSize::default(), 0, false);
        let hasher = FeatureHasher::default();
        assert_eq!(
            featurizer.featurize("good good movie"),
            vec![
                hasher.hash_token("good"),
                hasher.hash_token("good"),
                hasher.hash_token("movie"),
            ]
        );
    }

    #[test]
    fn featurize_bigrams() {
        let featurizer = TextFeaturizer::new(TableSize::default(), 2, false);
        let hasher = FeatureHasher::default();
        assert_eq!(
            featurizer.featurize("not good"),
            hasher.hash_tokens(["not", "not_good", "good"])
        );
    }

    #[test]
    fn featurize_with_diacritic_folding() {
        let folding = TextFeaturizer::new(TableSize::default(), 0, true);
        let plain = TextFeaturizer::new(TableSize::default(), 0, false);
        assert_eq!(folding.featurize("ótimo"), plain.featurize("otimo"));
        assert_ne!(fnv1a_32("ótimo"), fnv1a_32("otimo"));
    }
}
