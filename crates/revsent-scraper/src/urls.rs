//! Product URL → reviews-page URL derivation.

use reqwest::Url;
use revsent_core::SiteProfile;

use crate::error::ScraperError;

/// Parses and validates a product page URL.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `product_url` does not parse or
/// is not `http`/`https`.
pub fn parse_product_url(product_url: &str) -> Result<Url, ScraperError> {
    let url = Url::parse(product_url.trim()).map_err(|e| ScraperError::InvalidUrl {
        url: product_url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ScraperError::InvalidUrl {
            url: product_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }

    Ok(url)
}

/// Builds the URL of reviews page `page` (1-based) for a product URL.
///
/// The first occurrence of the profile's product path segment is replaced
/// by the reviews segment, and the page query parameter is set, replacing
/// any value already present. Other query parameters are preserved in order.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `product_url` is not a valid
/// `http`/`https` URL.
pub fn reviews_page_url(
    product_url: &str,
    profile: &SiteProfile,
    page: u32,
) -> Result<String, ScraperError> {
    let mut url = parse_product_url(product_url)?;

    if url.path().contains(&profile.product_path_segment) {
        let path = url.path().replacen(
            &profile.product_path_segment,
            &profile.reviews_path_segment,
            1,
        );
        url.set_path(&path);
    } else if !url.path().contains(&profile.reviews_path_segment) {
        tracing::debug!(
            url = %url,
            segment = %profile.product_path_segment,
            "product path segment not found; using URL path as-is"
        );
    }

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key.as_ref() != profile.page_param.as_str())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(&profile.page_param, &page.to_string());

    Ok(url.to_string())
}
