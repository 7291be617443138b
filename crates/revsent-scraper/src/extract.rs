//! Markup → reviews and product metrics.
//!
//! Review containers are found by trying the profile's container selectors
//! in order; the first selector with any match is the only one used for
//! that page, even if a later selector would also match elsewhere.

use std::sync::LazyLock;

use regex::Regex;
use revsent_core::{ProductMetrics, Review, SiteProfile};
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

static RATINGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s*ratings?\b").expect("valid ratings regex"));
static REVIEWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d[\d,]*)\s*reviews?\b").expect("valid reviews regex"));

fn compile(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

/// Visible text of `element`: trimmed text nodes joined by single spaces.
fn visible_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One entry of the container fallback chain.
struct ContainerStrategy {
    selector_text: String,
    selector: Selector,
}

pub struct ReviewExtractor {
    strategies: Vec<ContainerStrategy>,
    text_element: Selector,
    read_more: Option<Selector>,
    placeholder: String,
}

impl ReviewExtractor {
    /// Compiles the profile's selectors.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] for the first selector that is not valid CSS.
    pub fn new(profile: &SiteProfile) -> Result<Self, ScraperError> {
        let strategies = profile
            .review_containers
            .iter()
            .map(|s| {
                Ok(ContainerStrategy {
                    selector_text: s.clone(),
                    selector: compile(s)?,
                })
            })
            .collect::<Result<Vec<_>, ScraperError>>()?;

        Ok(Self {
            strategies,
            text_element: compile(&profile.text_element)?,
            read_more: profile.read_more.as_deref().map(compile).transpose()?,
            placeholder: profile.placeholder.clone(),
        })
    }

    /// Extracts every review on one page, in document order.
    ///
    /// Returns `None` when no container selector matches. A page whose
    /// containers hold only placeholders or blank text yields `Some` of an
    /// empty vec.
    #[must_use]
    pub fn extract(&self, html: &str) -> Option<Vec<Review>> {
        let document = Html::parse_document(html);

        let Some((strategy, containers)) = self.first_matching(&document) else {
            tracing::debug!("no review containers matched any selector");
            return None;
        };
        tracing::debug!(
            selector = %strategy.selector_text,
            containers = containers.len(),
            "review containers found"
        );

        let reviews = containers
            .into_iter()
            .filter_map(|container| self.review_text(container))
            .map(Review::new)
            .collect();
        Some(reviews)
    }

    fn first_matching<'a, 'd>(
        &'a self,
        document: &'d Html,
    ) -> Option<(&'a ContainerStrategy, Vec<ElementRef<'d>>)> {
        self.strategies.iter().find_map(|strategy| {
            let found: Vec<ElementRef<'d>> = document.select(&strategy.selector).collect();
            (!found.is_empty()).then_some((strategy, found))
        })
    }

    fn review_text(&self, container: ElementRef<'_>) -> Option<String> {
        // Primary text lives in the first unclassed text element.
        let mut text = container
            .select(&self.text_element)
            .find(|el| el.value().attr("class").is_none_or(|c| c.trim().is_empty()))
            .map(visible_text)
            .filter(|t| !t.is_empty());

        if let (Some(primary), Some(read_more)) = (text.as_mut(), self.read_more.as_ref()) {
            if let Some(expanded) = container.select(read_more).next() {
                let expanded = visible_text(expanded);
                if !expanded.is_empty() {
                    primary.push(' ');
                    primary.push_str(&expanded);
                }
            }
        }

        let text = text.unwrap_or_else(|| visible_text(container));
        (!text.is_empty() && text != self.placeholder).then_some(text)
    }
}

pub struct MetricsExtractor {
    summary: Selector,
}

impl MetricsExtractor {
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] if the profile's metrics selector is not valid CSS.
    pub fn new(profile: &SiteProfile) -> Result<Self, ScraperError> {
        Ok(Self {
            summary: compile(&profile.metrics)?,
        })
    }

    /// Reads ratings/reviews counts from the first summary element on the page.
    #[must_use]
    pub fn extract(&self, html: &str) -> ProductMetrics {
        let document = Html::parse_document(html);
        document
            .select(&self.summary)
            .next()
            .map(|el| parse_metrics_text(&visible_text(el)))
            .unwrap_or_default()
    }
}

/// Parses text such as `"1,23,456 Ratings & 12,345 Reviews"`.
#[must_use]
pub fn parse_metrics_text(text: &str) -> ProductMetrics {
    // (display, count); the display string is kept only when it parses.
    let matched = |re: &Regex| -> Option<(String, u64)> {
        let display = re.captures(text)?.get(1)?.as_str();
        let count = display.replace(',', "").parse::<u64>().ok()?;
        Some((display.to_owned(), count))
    };
    let (ratings_display, ratings_count) = matched(&RATINGS_RE).unzip();
    let (reviews_display, reviews_count) = matched(&REVIEWS_RE).unzip();

    ProductMetrics {
        ratings_count,
        reviews_count,
        ratings_display,
        reviews_display,
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
