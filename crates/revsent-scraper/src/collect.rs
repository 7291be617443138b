//! Batch operations: product metrics and paginated review collection.
//!
//! Each operation opens exactly one page session and releases it before
//! returning, on success and on every error path.

use std::time::Duration;

use revsent_core::{AppConfig, EmptyPagePolicy, ProductMetrics, ReviewBatch, SiteProfile};

use crate::error::ScraperError;
use crate::extract::{MetricsExtractor, ReviewExtractor};
use crate::retry::{fetch_with_retry, RetryPolicy};
use crate::session::{release, PageSession, PageSource};
use crate::urls::{parse_product_url, reviews_page_url};

#[derive(Debug, Clone)]
pub struct CollectSettings {
    /// Upper bound on reviews pages visited per product.
    pub max_pages: u32,
    /// Pause between consecutive page loads.
    pub inter_page_delay: Duration,
    pub empty_page_policy: EmptyPagePolicy,
    pub retry: RetryPolicy,
}

impl Default for CollectSettings {
    fn default() -> Self {
        Self {
            max_pages: 10,
            inter_page_delay: Duration::from_secs(2),
            empty_page_policy: EmptyPagePolicy::Stop,
            retry: RetryPolicy {
                max_retries: 2,
                backoff_base_ms: 1_000,
            },
        }
    }
}

impl CollectSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            inter_page_delay: Duration::from_millis(config.inter_page_delay_ms),
            empty_page_policy: config.empty_page_policy,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff_base_ms: config.retry_backoff_base_ms,
            },
        }
    }
}

pub struct ReviewScraper {
    source: Box<dyn PageSource>,
    profile: SiteProfile,
    reviews: ReviewExtractor,
    metrics: MetricsExtractor,
    settings: CollectSettings,
}

impl ReviewScraper {
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] if any selector in `profile` is invalid.
    pub fn new(
        source: Box<dyn PageSource>,
        profile: SiteProfile,
        settings: CollectSettings,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            reviews: ReviewExtractor::new(&profile)?,
            metrics: MetricsExtractor::new(&profile)?,
            source,
            profile,
            settings,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &CollectSettings {
        &self.settings
    }

    /// Loads the product page and reads its ratings/reviews summary.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the URL is invalid, the session cannot be
    /// opened, or the page cannot be loaded.
    pub async fn fetch_metrics(&self, product_url: &str) -> Result<ProductMetrics, ScraperError> {
        let url = parse_product_url(product_url)?.to_string();

        let mut session = self.source.open().await?;
        let outcome = fetch_with_retry(session.as_mut(), &url, &self.settings.retry).await;
        release(session).await;

        let metrics = self.metrics.extract(&outcome?);
        tracing::info!(
            url = %url,
            ratings = ?metrics.ratings_count,
            reviews = ?metrics.reviews_count,
            "product metrics fetched"
        );
        Ok(metrics)
    }

    /// Collects up to `cap` reviews, walking reviews pages from page 1.
    ///
    /// Stops when `cap` is reached, `max_pages` pages have been visited, or
    /// (under [`EmptyPagePolicy::Stop`]) a page has no review containers.
    ///
    /// # Errors
    ///
    /// Any fetch failure that survives retrying aborts the whole batch; no
    /// partial result is returned.
    pub async fn collect_reviews(
        &self,
        product_url: &str,
        cap: usize,
    ) -> Result<ReviewBatch, ScraperError> {
        if cap == 0 {
            return Ok(ReviewBatch::with_cap(0));
        }
        // Validate before a browser is launched.
        reviews_page_url(product_url, &self.profile, 1)?;

        let mut session = self.source.open().await?;
        let outcome = self.collect_pages(session.as_mut(), product_url, cap).await;
        release(session).await;

        let batch = outcome?;
        tracing::info!(
            url = product_url,
            collected = batch.len(),
            cap,
            backend = self.source.name(),
            "review collection finished"
        );
        Ok(batch)
    }

    async fn collect_pages(
        &self,
        session: &mut dyn PageSession,
        product_url: &str,
        cap: usize,
    ) -> Result<ReviewBatch, ScraperError> {
        let mut batch = ReviewBatch::with_cap(cap);

        for page in 1..=self.settings.max_pages {
            if batch.is_full() {
                break;
            }
            if page > 1 && !self.settings.inter_page_delay.is_zero() {
                tokio::time::sleep(self.settings.inter_page_delay).await;
            }

            let page_url = reviews_page_url(product_url, &self.profile, page)?;
            let html = fetch_with_retry(session, &page_url, &self.settings.retry).await?;
            // Only a page without any review container counts as empty; a page
            // of placeholders still advances pagination.
            let Some(found) = self.reviews.extract(&html) else {
                match self.settings.empty_page_policy {
                    EmptyPagePolicy::Stop => {
                        tracing::info!(page, "no review containers on page; stopping");
                        break;
                    }
                    EmptyPagePolicy::Continue => {
                        tracing::debug!(page, "no review containers on page; continuing");
                        continue;
                    }
                }
            };

            let on_page = found.len();
            for review in found {
                if !batch.push(review) {
                    break;
                }
            }
            tracing::debug!(page, on_page, collected = batch.len(), "page scraped");
        }

        Ok(batch)
    }
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
