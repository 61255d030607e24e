use std::collections::{HashMap, HashSet};

/// Text preprocessor for sentiment classification: lowercase, tokenize,
/// drop stop words, lemmatize, rejoin with single spaces.
pub struct Preprocessor {
    stop_words: HashSet<String>,
    lemmas: HashMap<String, String>,
}

impl Preprocessor {
    pub fn new(stop_words: HashSet<String>, lemmas: HashMap<String, String>) -> Self {
        Self { stop_words, lemmas }
    }

    /// Preprocess text for classification. Tokens are maximal alphanumeric
    /// runs of the lowercased input; stop words are dropped, the rest is
    /// mapped through the lemma dictionary (identity for unknown words).
    pub fn preprocess(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty() && !self.stop_words.contains(*token))
            .map(|token| self.lemmatize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lemmatize<'a>(&'a self, token: &'a str) -> &'a str {
        self.lemmas.get(token).map(String::as_str).unwrap_or(token)
    }
}
