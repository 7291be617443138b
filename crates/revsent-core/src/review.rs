//! Value types that flow through the scrape → normalize → classify pipeline.

use serde::{Deserialize, Serialize};

/// Text of one review block as scraped from a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Review(String);

impl Review {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reviews in page-traversal order, never longer than `cap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewBatch {
    reviews: Vec<Review>,
    #[serde(skip)]
    cap: usize,
}

impl ReviewBatch {
    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        Self {
            reviews: Vec::with_capacity(cap.min(1024)),
            cap,
        }
    }

    /// Builds a batch from existing reviews, dropping any beyond `cap`.
    #[must_use]
    pub fn from_reviews(mut reviews: Vec<Review>, cap: usize) -> Self {
        reviews.truncate(cap);
        Self { reviews, cap }
    }

    /// Appends `review` unless the batch is already full.
    ///
    /// Returns `false` when the review was rejected.
    pub fn push(&mut self, review: Review) -> bool {
        if self.is_full() {
            return false;
        }
        self.reviews.push(review);
        true
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.reviews.len() >= self.cap
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.reviews.iter()
    }

    #[must_use]
    pub fn into_reviews(self) -> Vec<Review> {
        self.reviews
    }
}

impl<'a> IntoIterator for &'a ReviewBatch {
    type Item = &'a Review;
    type IntoIter = std::slice::Iter<'a, Review>;

    fn into_iter(self) -> Self::IntoIter {
        self.reviews.iter()
    }
}

/// Headline counts from a product page summary. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetrics {
    pub ratings_count: Option<u64>,
    pub reviews_count: Option<u64>,
    /// Ratings count as printed on the page, digit grouping intact (`"1,204"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_display: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Maps a binary classifier class (`1` positive, `0` negative).
    #[must_use]
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Self::Positive),
            0 => Some(Self::Negative),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_rejects_push_beyond_cap() {
        let mut batch = ReviewBatch::with_cap(2);
        assert!(batch.push(Review::new("one")));
        assert!(batch.push(Review::new("two")));
        assert!(!batch.push(Review::new("three")));
        assert_eq!(batch.len(), 2);
        assert!(batch.is_full());
    }

    #[test]
    fn zero_cap_batch_is_full_and_empty() {
        let mut batch = ReviewBatch::with_cap(0);
        assert!(batch.is_full());
        assert!(!batch.push(Review::new("x")));
        assert!(batch.is_empty());
    }

    #[test]
    fn from_reviews_truncates_to_cap() {
        let reviews = vec![Review::new("a"), Review::new("b"), Review::new("c")];
        let batch = ReviewBatch::from_reviews(reviews, 2);
        let texts: Vec<&str> = batch.iter().map(Review::text).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn label_from_class() {
        assert_eq!(SentimentLabel::from_class(1), Some(SentimentLabel::Positive));
        assert_eq!(SentimentLabel::from_class(0), Some(SentimentLabel::Negative));
        assert_eq!(SentimentLabel::from_class(2), None);
    }

    #[test]
    fn batch_serializes_as_review_list() {
        let batch = ReviewBatch::from_reviews(vec![Review::new("good")], 5);
        let json = serde_json::to_string(&batch).unwrap();
        assert_eq!(json, r#"{"reviews":["good"]}"#);
    }

    #[test]
    fn metrics_display_strings_round_trip_through_json() {
        let metrics = ProductMetrics {
            ratings_count: Some(1_204),
            reviews_count: None,
            ratings_display: Some("1,204".to_string()),
            reviews_display: None,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert_eq!(
            json,
            r#"{"ratings_count":1204,"reviews_count":null,"ratings_display":"1,204"}"#
        );
        let back: ProductMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metrics);
    }
}
