//! Stopword sets used by the normalizer.

use std::collections::HashSet;
use std::path::Path;

use crate::error::SentimentError;

/// The NLTK English stopword corpus.
pub(crate) const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWords {
    #[must_use]
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// Builds a set from arbitrary words; entries are trimmed and lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Reads one word per line. Blank lines and lines starting with `#` are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::StopwordsIo`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, SentimentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SentimentError::StopwordsIo {
            path: path.display().to_string(),
            source,
        })?;
        let set = Self::from_words(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        tracing::debug!(path = %path.display(), count = set.len(), "stopwords loaded");
        Ok(set)
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn english_set_has_nltk_entries() {
        let set = StopWords::english();
        assert_eq!(set.len(), 179);
        for w in ["the", "not", "don", "ve", "wouldn't"] {
            assert!(set.contains(w), "{w} should be a stopword");
        }
        assert!(!set.contains("great"));
    }

    #[test]
    fn from_words_normalizes_entries() {
        let set = StopWords::from_words(["  The ", "", "AND"]);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn load_skips_comments_and_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list\nwatch\n\n  Strap  \n#ignored").unwrap();

        let set = StopWords::load(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("watch"));
        assert!(set.contains("strap"));
        assert!(!set.contains("ignored"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = StopWords::load(Path::new("/nonexistent/stopwords.txt")).unwrap_err();
        assert!(matches!(err, SentimentError::StopwordsIo { .. }));
    }
}
