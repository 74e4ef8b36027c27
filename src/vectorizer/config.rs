use serde::{Deserialize, Serialize};

use crate::utils::normalizer::normalize;
use crate::vectorizer::analyzer::Analyzer;
use crate::vectorizer::stop_words::StopWords;
use crate::vectorizer::token::TokenFrequency;

/// Text-to-counts pipeline settings shared by the counter and the matrix builder
///
/// Defaults to word unigrams over normalized text without stop words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub analyzer: Analyzer,
    pub normalize: bool,
    pub stop_words: Option<StopWords>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            analyzer: Analyzer::default(),
            normalize: true,
            stop_words: None,
        }
    }
}

impl VectorizerConfig {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            ..Self::default()
        }
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_stop_words<I, T>(mut self, stop_words: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.stop_words = Some(stop_words.into_iter().collect());
        self
    }

    /// Normalize (if enabled) then analyze one text
    /// Stop words are not applied here.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        if self.normalize {
            self.analyzer.analyze(&normalize(text))
        } else {
            self.analyzer.analyze(text)
        }
    }

    /// Full counting pipeline for one text: tokens, fold, drop stop words
    pub fn token_frequency(&self, text: &str) -> TokenFrequency {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(&self.tokens(text));
        if let Some(stop_words) = &self.stop_words {
            freq.remove_stop_words(stop_words);
        }
        freq
    }
}
