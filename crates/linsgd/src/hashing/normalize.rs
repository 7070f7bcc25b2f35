//! Optional text preprocessing applied before tokenization.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove diacritics: decompose (NFD), drop combining marks, recompose (NFC).
///
/// ```
/// use linsgd::hashing::strip_diacritics;
///
/// assert_eq!(strip_diacritics("ação é ótima"), "acao e otima");
/// ```
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_unchanged() {
        assert_eq!(strip_diacritics("plain text 123"), "plain text 123");
    }

    #[test]
    fn strips_precomposed_and_combining_forms() {
        assert_eq!(strip_diacritics("café"), "cafe");
        assert_eq!(strip_diacritics("cafe\u{0301}"), "cafe");
        assert_eq!(strip_diacritics("Ñandú"), "Nandu");
    }
}
