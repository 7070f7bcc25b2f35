//! Word n-gram expansion.

/// Separator placed between words of an n-gram.
pub const NGRAM_SEPARATOR: &str = "_";

/// Split a sentence into words on Unicode whitespace.
pub fn tokenize(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}

/// Expand words into unigrams plus word n-grams up to `order`.
///
/// For each position the word itself is emitted first, followed by the
/// running concatenations with the next `order - 1` words. Grams that would
/// run past the end of the sentence are shortened, never dropped with an
/// error. An `order` of 0 or 1 returns the unigrams unchanged.
///
/// ```
/// use linsgd::hashing::expand_ngrams;
///
/// let grams = expand_ngrams(&["a", "b", "c"], 2);
/// assert_eq!(grams, ["a", "a_b", "b", "b_c", "c"]);
/// ```
pub fn expand_ngrams<S: AsRef<str>>(words: &[S], order: usize) -> Vec<String> {
    let extra = order.saturating_sub(1);
    let mut grams = Vec::with_capacity(words.len() * (extra.min(words.len()) + 1));

    for (i, word) in words.iter().enumerate() {
        let mut gram = word.as_ref().to_owned();
        grams.push(gram.clone());
        for next in words.iter().skip(i + 1).take(extra) {
            gram.push_str(NGRAM_SEPARATOR);
            gram.push_str(next.as_ref());
            grams.push(gram.clone());
        }
    }

    grams
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn low_orders_are_identity(#[case] order: usize) {
        let words = ["the", "quick", "fox"];
        assert_eq!(expand_ngrams(&words, order), words);
    }

    #[test]
    fn bigrams() {
        assert_eq!(
            expand_ngrams(&["a", "b", "c"], 2),
            ["a", "a_b", "b", "b_c", "c"]
        );
    }

    #[test]
    fn trigrams_shorten_near_the_end() {
        assert_eq!(
            expand_ngrams(&["a", "b", "c"], 3),
            ["a", "a_b", "a_b_c", "b", "b_c", "c"]
        );
    }

    #[test]
    fn order_longer_than_sentence() {
        assert_eq!(expand_ngrams(&["x", "y"], 5), ["x", "x_y", "y"]);
        assert!(expand_ngrams::<&str>(&[], 3).is_empty());
    }

    #[rstest]
    #[case(usize::MAX / 2)]
    #[case(usize::MAX)]
    fn huge_order_is_capped_by_sentence(#[case] order: usize) {
        assert_eq!(expand_ngrams(&["a", "b", "c"], order), expand_ngrams(&["a", "b", "c"], 3));
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  not\tso   good \n"), ["not", "so", "good"]);
        assert!(tokenize("   ").is_empty());
    }

    proptest! {
        #[test]
        fn gram_count_matches_formula(
            words in prop::collection::vec("[a-z]{1,5}", 0..12),
            order in 0usize..5,
        ) {
            let extra = order.saturating_sub(1);
            let n = words.len();
            let expected: usize = (0..n).map(|i| 1 + extra.min(n - i - 1)).sum();
            prop_assert_eq!(expand_ngrams(&words, order).len(), expected);
        }
    }
}
