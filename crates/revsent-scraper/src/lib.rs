//! Review scraping for revsent.
//!
//! Opens a page session (headless Chromium or plain HTTP), walks a
//! product's reviews pages, and extracts review text and headline metrics
//! using the markers of a [`revsent_core::SiteProfile`].

pub mod collect;
pub mod error;
pub mod extract;
pub mod output;
pub mod retry;
pub mod session;
pub mod urls;

pub use collect::{CollectSettings, ReviewScraper};
pub use error::ScraperError;
pub use extract::{parse_metrics_text, MetricsExtractor, ReviewExtractor};
pub use output::write_reviews_csv;
pub use retry::RetryPolicy;
pub use session::{BrowserOptions, BrowserSource, HttpSource, PageSession, PageSource};
pub use urls::reviews_page_url;
