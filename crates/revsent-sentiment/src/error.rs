use thiserror::Error;

/// Failures loading or validating the pre-trained artifacts.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {artifact}: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },

    #[error("incompatible artifacts: {0}")]
    Incompatible(String),

    #[error("classifier classes must be exactly [0, 1], got {0:?}")]
    UnsupportedClasses(Vec<i64>),
}

/// Failures applying a loaded model to a batch.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("cannot classify an empty batch")]
    EmptyBatch,

    #[error("feature row has {actual} columns, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("tree references feature {feature} but rows have {width} columns")]
    FeatureOutOfRange { feature: usize, width: usize },
}

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("scraper error: {0}")]
    Scraper(#[from] revsent_scraper::ScraperError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("failed to read stopwords file {path}: {source}")]
    StopwordsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
