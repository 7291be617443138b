//! End-to-end product analysis: scrape, normalize, classify, summarize.

use std::path::PathBuf;

use revsent_core::{ProductMetrics, Review, ReviewBatch, SentimentLabel};
use revsent_scraper::{write_reviews_csv, ReviewScraper};
use serde::Serialize;

use crate::error::SentimentError;
use crate::model::SentimentModel;
use crate::normalize::Normalizer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledReview {
    pub text: String,
    pub label: SentimentLabel,
}

/// Sentiment breakdown for one product with at least one review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAnalysis {
    pub url: String,
    pub metrics: ProductMetrics,
    pub positive: usize,
    pub negative: usize,
    /// `positive / total * 100`.
    pub positive_percentage: f64,
    pub reviews: Vec<LabeledReview>,
}

impl ProductAnalysis {
    /// Pairs reviews with labels by position.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        metrics: ProductMetrics,
        reviews: Vec<Review>,
        labels: &[SentimentLabel],
    ) -> Self {
        let reviews: Vec<LabeledReview> = reviews
            .into_iter()
            .zip(labels)
            .map(|(review, &label)| LabeledReview {
                text: review.into_text(),
                label,
            })
            .collect();

        let positive = reviews.iter().filter(|r| r.label.is_positive()).count();
        let negative = reviews.len() - positive;
        #[allow(clippy::cast_precision_loss)]
        let positive_percentage = if reviews.is_empty() {
            0.0
        } else {
            positive as f64 / reviews.len() as f64 * 100.0
        };

        Self {
            url: url.into(),
            metrics,
            positive,
            negative,
            positive_percentage,
            reviews,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.reviews.len()
    }

    /// Review texts carrying `label`, in scrape order.
    pub fn texts_with(&self, label: SentimentLabel) -> impl Iterator<Item = &str> {
        self.reviews
            .iter()
            .filter(move |r| r.label == label)
            .map(|r| r.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Analyzed(ProductAnalysis),
    /// Scraping succeeded but produced no reviews.
    NoReviews {
        url: String,
        metrics: ProductMetrics,
    },
}

impl AnalysisOutcome {
    #[must_use]
    pub fn analysis(&self) -> Option<&ProductAnalysis> {
        match self {
            Self::Analyzed(analysis) => Some(analysis),
            Self::NoReviews { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: AnalysisOutcome,
    pub second: AnalysisOutcome,
}

impl Comparison {
    /// Both analyses, or `None` when either product had no reviews.
    #[must_use]
    pub fn both(&self) -> Option<(&ProductAnalysis, &ProductAnalysis)> {
        Some((self.first.analysis()?, self.second.analysis()?))
    }
}

/// Runs the scrape → normalize → classify pipeline with one set of
/// collaborators.
pub struct Analyzer {
    scraper: ReviewScraper,
    normalizer: Normalizer,
    model: SentimentModel,
    review_cap: usize,
    csv_output: Option<PathBuf>,
}

impl Analyzer {
    #[must_use]
    pub fn new(
        scraper: ReviewScraper,
        normalizer: Normalizer,
        model: SentimentModel,
        review_cap: usize,
    ) -> Self {
        Self {
            scraper,
            normalizer,
            model,
            review_cap,
            csv_output: None,
        }
    }

    /// Writes each single-product batch to `path` before classifying it.
    #[must_use]
    pub fn with_csv_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_output = Some(path.into());
        self
    }

    /// Fetches metrics and reviews for `url` and classifies them.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] on any scraping, CSV or model failure. A
    /// product with no reviews is [`AnalysisOutcome::NoReviews`], not an
    /// error.
    pub async fn analyze_product(&self, url: &str) -> Result<AnalysisOutcome, SentimentError> {
        let (metrics, batch) = self.scrape(url).await?;

        if !batch.is_empty() {
            if let Some(path) = &self.csv_output {
                write_reviews_csv(path, &batch)?;
            }
        }
        self.label(url, metrics, batch)
    }

    /// Scrapes both products, one after the other, then classifies each.
    ///
    /// # Errors
    ///
    /// Returns the first [`SentimentError`] from either product.
    pub async fn compare_products(
        &self,
        first_url: &str,
        second_url: &str,
    ) -> Result<Comparison, SentimentError> {
        let (first_metrics, first_batch) = self.scrape(first_url).await?;
        let (second_metrics, second_batch) = self.scrape(second_url).await?;

        let comparison = Comparison {
            first: self.label(first_url, first_metrics, first_batch)?,
            second: self.label(second_url, second_metrics, second_batch)?,
        };
        if comparison.both().is_none() {
            tracing::warn!(first_url, second_url, "one or both products have no reviews");
        }
        Ok(comparison)
    }

    async fn scrape(&self, url: &str) -> Result<(ProductMetrics, ReviewBatch), SentimentError> {
        let metrics = self.scraper.fetch_metrics(url).await?;
        let batch = self.scraper.collect_reviews(url, self.review_cap).await?;
        Ok((metrics, batch))
    }

    fn label(
        &self,
        url: &str,
        metrics: ProductMetrics,
        batch: ReviewBatch,
    ) -> Result<AnalysisOutcome, SentimentError> {
        if batch.is_empty() {
            tracing::warn!(url, "no reviews found for product");
            return Ok(AnalysisOutcome::NoReviews {
                url: url.to_string(),
                metrics,
            });
        }

        let normalized = self.normalizer.normalize_batch(&batch);
        let labels = self.model.classify(&normalized)?;
        let analysis = ProductAnalysis::new(url, metrics, batch.into_reviews(), &labels);

        tracing::info!(
            url,
            total = analysis.total(),
            positive = analysis.positive,
            negative = analysis.negative,
            "product analyzed"
        );
        Ok(AnalysisOutcome::Analyzed(analysis))
    }
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
