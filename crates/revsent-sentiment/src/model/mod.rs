//! Pre-trained sentiment model: vectorizer, scaler and classifier loaded
//! from JSON artifacts and applied in sequence.

mod classifier;
mod scaler;
mod vectorizer;

use std::path::Path;

use revsent_core::SentimentLabel;
use serde::de::DeserializeOwned;

use crate::error::{ClassifyError, ModelError};

pub use classifier::Classifier;
pub use scaler::Scaler;
pub use vectorizer::CountVectorizer;

pub const VECTORIZER_FILE: &str = "count_vectorizer.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

fn read_artifact<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, ModelError> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct SentimentModel {
    vectorizer: CountVectorizer,
    scaler: Scaler,
    classifier: Classifier,
}

impl SentimentModel {
    /// Loads `count_vectorizer.json`, `scaler.json` and `classifier.json`
    /// from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if a file is missing or malformed, or if the
    /// three artifacts disagree on feature width.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let vectorizer = CountVectorizer::from_artifact(read_artifact(dir, VECTORIZER_FILE)?)?;
        let scaler: Scaler = read_artifact(dir, SCALER_FILE)?;
        let classifier = Classifier::from_artifact(read_artifact(dir, CLASSIFIER_FILE)?)?;

        let model = Self::from_parts(vectorizer, scaler, classifier)?;
        tracing::info!(
            dir = %dir.display(),
            n_features = model.n_features(),
            "sentiment model loaded"
        );
        Ok(model)
    }

    /// # Errors
    ///
    /// Returns [`ModelError::Incompatible`] when feature widths disagree.
    pub fn from_parts(
        vectorizer: CountVectorizer,
        scaler: Scaler,
        classifier: Classifier,
    ) -> Result<Self, ModelError> {
        scaler.validate()?;

        let width = vectorizer.n_features();
        if let Some(scaled) = scaler.n_features() {
            if scaled != width {
                return Err(ModelError::Incompatible(format!(
                    "vectorizer produces {width} features, scaler expects {scaled}"
                )));
            }
        }
        if classifier.n_features() != width {
            return Err(ModelError::Incompatible(format!(
                "vectorizer produces {width} features, classifier expects {}",
                classifier.n_features()
            )));
        }

        Ok(Self {
            vectorizer,
            scaler,
            classifier,
        })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// Labels each normalized text; output order matches input order.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::EmptyBatch`] for an empty slice, or a shape
    /// error if the artifacts disagree at predict time.
    pub fn classify(&self, texts: &[String]) -> Result<Vec<SentimentLabel>, ClassifyError> {
        if texts.is_empty() {
            return Err(ClassifyError::EmptyBatch);
        }

        let mut features = self.vectorizer.transform(texts);
        self.scaler.transform(&mut features)?;
        let labels = self.classifier.predict(&features)?;

        tracing::debug!(
            rows = labels.len(),
            positive = labels.iter().filter(|l| l.is_positive()).count(),
            "batch classified"
        );
        Ok(labels)
    }
}
