use std::borrow::Cow;
use std::collections::HashMap;

use ndarray::Array2;
use regex::Regex;
use serde::Deserialize;

use crate::error::ModelError;

const ARTIFACT: &str = "count_vectorizer";

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_lowercase() -> bool {
    true
}

/// On-disk form of a fitted bag-of-words vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CountVectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub binary: bool,
}

/// Maps texts to term-count rows over a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    lowercase: bool,
    binary: bool,
}

impl CountVectorizer {
    pub(crate) fn from_artifact(raw: CountVectorizerArtifact) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::Invalid {
            artifact: ARTIFACT,
            reason,
        };

        if raw.vocabulary.is_empty() {
            return Err(invalid("vocabulary is empty".to_string()));
        }
        let width = raw.vocabulary.len();
        let mut seen = vec![false; width];
        for (term, &col) in &raw.vocabulary {
            match seen.get_mut(col) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(invalid(format!("column {col} assigned twice ({term})"))),
                None => {
                    return Err(invalid(format!(
                        "column {col} for {term} is outside 0..{width}"
                    )))
                }
            }
        }

        let (min_n, max_n) = raw.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(invalid(format!("bad ngram_range ({min_n}, {max_n})")));
        }

        let token_pattern = Regex::new(&raw.token_pattern)
            .map_err(|e| invalid(format!("token_pattern: {e}")))?;

        Ok(Self {
            vocabulary: raw.vocabulary,
            token_pattern,
            ngram_range: raw.ngram_range,
            lowercase: raw.lowercase,
            binary: raw.binary,
        })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Builds a `(docs, n_features)` count matrix. Terms outside the
    /// vocabulary are ignored.
    #[must_use]
    pub fn transform(&self, docs: &[String]) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((docs.len(), self.n_features()));

        for (row, doc) in docs.iter().enumerate() {
            let text = if self.lowercase {
                Cow::Owned(doc.to_lowercase())
            } else {
                Cow::Borrowed(doc.as_str())
            };
            let tokens: Vec<&str> = self
                .token_pattern
                .find_iter(&text)
                .map(|m| m.as_str())
                .collect();

            for term in self.ngrams(&tokens) {
                if let Some(&col) = self.vocabulary.get(&*term) {
                    let cell = &mut matrix[[row, col]];
                    if self.binary {
                        *cell = 1.0;
                    } else {
                        *cell += 1.0;
                    }
                }
            }
        }
        matrix
    }

    fn ngrams<'a>(&self, tokens: &[&'a str]) -> Vec<Cow<'a, str>> {
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| Cow::Borrowed(*t)));
            } else {
                terms.extend(tokens.windows(n).map(|w| Cow::Owned(w.join(" "))));
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(json: &str) -> Result<CountVectorizer, ModelError> {
        CountVectorizer::from_artifact(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn counts_terms_with_default_pattern() {
        let v = vectorizer(r#"{"vocabulary": {"great": 0, "strap": 1, "bad": 2}}"#).unwrap();
        let x = v.transform(&["great great strap a".to_string(), String::new()]);
        assert_eq!(x.shape(), &[2, 3]);
        assert_eq!(x.row(0).to_vec(), vec![2.0, 1.0, 0.0]);
        assert_eq!(x.row(1).to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn single_letter_tokens_are_ignored_by_default_pattern() {
        let v = vectorizer(r#"{"vocabulary": {"a": 0, "ok": 1}}"#).unwrap();
        let x = v.transform(&["a ok".to_string()]);
        assert_eq!(x.row(0).to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn binary_and_bigrams() {
        let v = vectorizer(
            r#"{"vocabulary": {"good": 0, "good product": 1}, "ngram_range": [1, 2], "binary": true}"#,
        )
        .unwrap();
        let x = v.transform(&["good product good".to_string()]);
        assert_eq!(x.row(0).to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn rejects_sparse_vocabulary() {
        let err = vectorizer(r#"{"vocabulary": {"great": 0, "bad": 5}}"#).unwrap_err();
        assert!(matches!(err, ModelError::Invalid { .. }));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = vectorizer(r#"{"vocabulary": {"great": 0, "bad": 0}}"#).unwrap_err();
        assert!(matches!(err, ModelError::Invalid { .. }));
    }

    #[test]
    fn rejects_bad_ngram_range() {
        let err = vectorizer(r#"{"vocabulary": {"x": 0}, "ngram_range": [2, 1]}"#).unwrap_err();
        assert!(matches!(err, ModelError::Invalid { .. }));
    }
}
