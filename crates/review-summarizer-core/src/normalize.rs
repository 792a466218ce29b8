//! Text normalization for key point counting.
//!
//! Lowercases, strips everything that is neither a word character nor
//! whitespace, and drops stopwords.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::stopwords::ENGLISH_STOPWORDS;

/// Anything that is not a word character or whitespace.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Stopword-filtering normalizer.
///
/// Built once per run and shared by reference; it holds no mutable state.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl Normalizer {
    /// Create a normalizer over the English list plus `extra` words.
    ///
    /// Extra words are lowercased so they match normalized tokens.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stopwords: HashSet<String> =
            ENGLISH_STOPWORDS.iter().map(|w| (*w).to_string()).collect();
        stopwords.extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        Self { stopwords }
    }

    /// Whether `word` is filtered out.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Normalize `text` into stopword-free words joined by single spaces.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = PUNCTUATION.replace_all(&lowered, "");
        stripped
            .split_whitespace()
            .filter(|w| !self.is_stopword(w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Tokenize the normalized text.
    ///
    /// Runs after stopword filtering, so the pieces of a split word such as
    /// `cannot` are counted even when they are stopwords themselves.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .flat_map(split_word)
            .map(str::to_string)
            .collect()
    }
}

/// Words the Penn Treebank tokenizer splits even without an apostrophe.
const SPLIT_WORDS: &[(&str, &[&str])] = &[
    ("cannot", &["can", "not"]),
    ("gimme", &["gim", "me"]),
    ("gonna", &["gon", "na"]),
    ("gotta", &["got", "ta"]),
    ("lemme", &["lem", "me"]),
    ("wanna", &["wan", "na"]),
    ("whaddya", &["wha", "dd", "ya"]),
    ("whatcha", &["wha", "t", "cha"]),
];

fn split_word(word: &str) -> Vec<&str> {
    SPLIT_WORDS
        .iter()
        .find(|(whole, _)| *whole == word)
        .map_or_else(|| vec![word], |(_, parts)| parts.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_stopwords() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("Great product, loved it!"), "great product loved");
        assert_eq!(n.normalize("Terrible, broke in a day."), "terrible broke day");
    }

    #[test]
    fn collapses_whitespace() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("  fast\t\tshipping \n arrived  "), "fast shipping arrived");
    }

    #[test]
    fn apostrophes_are_removed_before_filtering() {
        // "don't" becomes "dont", which is not in the list
        let n = Normalizer::default();
        assert_eq!(n.normalize("I don't like it"), "dont like");
    }

    #[test]
    fn keeps_digits_and_underscores() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("Model_X lasted 3 years!"), "model_x lasted 3 years");
    }

    #[test]
    fn extra_stopwords_are_case_insensitive() {
        let n = Normalizer::new(["Product"]);
        assert_eq!(n.normalize("Great product"), "great");
    }

    #[test]
    fn tokens_split_fused_words_after_filtering() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("I cannot wait, gonna buy two!"), "cannot wait gonna buy two");
        assert_eq!(
            n.tokens("I cannot wait, gonna buy two!"),
            ["can", "not", "wait", "gon", "na", "buy", "two"]
        );
    }

    #[test]
    fn tokens_match_normalized_words_otherwise() {
        let n = Normalizer::default();
        assert_eq!(n.tokens("Great product, loved it!"), ["great", "product", "loved"]);
    }

    #[test]
    fn only_stopwords_yields_empty() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("It was the one that I had."), "one");
        assert!(n.normalize("and the of").is_empty());
    }
}
