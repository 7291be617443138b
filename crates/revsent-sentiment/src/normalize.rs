//! Review text normalization: letters only, lowercase, stopwords removed,
//! Porter-stemmed.

use revsent_core::ReviewBatch;

use crate::stemmer::PorterStemmer;
use crate::stopwords::StopWords;

/// Normalized review texts, index-aligned with the source batch.
pub type NormalizedBatch = Vec<String>;

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    stopwords: StopWords,
    stemmer: PorterStemmer,
}

impl Normalizer {
    #[must_use]
    pub fn new(stopwords: StopWords) -> Self {
        Self {
            stopwords,
            stemmer: PorterStemmer::new(),
        }
    }

    #[must_use]
    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// Normalizes one text. Input with no ASCII letters yields `""`.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let letters: String = text
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() {
                    c.to_ascii_lowercase()
                } else {
                    ' '
                }
            })
            .collect();

        letters
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.stable_stem(token))
            .filter(|stem| !stem.is_empty() && !self.stopwords.contains(stem))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn normalize_batch(&self, batch: &ReviewBatch) -> NormalizedBatch {
        let normalized: NormalizedBatch = batch.iter().map(|r| self.normalize(r.text())).collect();
        tracing::debug!(
            reviews = normalized.len(),
            blank = normalized.iter().filter(|t| t.is_empty()).count(),
            "batch normalized"
        );
        normalized
    }

    /// Stems `token` until the stemmer leaves it unchanged. No rule lengthens
    /// a token or undoes a `y → i` or `i → e` rewrite, so the loop ends.
    fn stable_stem(&self, token: &str) -> String {
        let mut current = self.stemmer.stem(token);
        loop {
            let next = self.stemmer.stem(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }
}
