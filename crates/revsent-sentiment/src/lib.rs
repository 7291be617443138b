//! Review sentiment classification for revsent.
//!
//! Normalizes scraped review text (letters only, NLTK English stopwords
//! removed, Porter-stemmed), classifies it with a pre-trained bag-of-words
//! model loaded from JSON artifacts, and summarizes per-product results.

pub mod analysis;
pub mod error;
pub mod model;
pub mod normalize;
pub mod stemmer;
pub mod stopwords;

pub use analysis::{AnalysisOutcome, Analyzer, Comparison, LabeledReview, ProductAnalysis};
pub use error::{ClassifyError, ModelError, SentimentError};
pub use model::SentimentModel;
pub use normalize::{NormalizedBatch, Normalizer};
pub use stemmer::PorterStemmer;
pub use stopwords::StopWords;
