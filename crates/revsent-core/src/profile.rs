//! Site profile: the markup markers the scraper looks for.
//!
//! The built-in default targets Flipkart product and review pages. A YAML
//! file with the same shape can replace it when the site's class names
//! rotate; omitted keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    /// CSS selectors for review containers, in priority order. The first
    /// selector that matches anything on a page wins.
    pub review_containers: Vec<String>,
    /// Tag of the primary text node inside a container. The first
    /// descendant with this tag and no (or a blank) `class` is used.
    pub text_element: String,
    /// Selector for the expanded "read more" text inside a container.
    pub read_more: Option<String>,
    /// Text that is discarded when it is all a container yields.
    pub placeholder: String,
    /// Selector for the ratings/reviews summary on the product page.
    pub metrics: String,
    /// Path segment identifying a product detail URL.
    pub product_path_segment: String,
    /// Replacement segment that turns a product URL into its reviews URL.
    pub reviews_path_segment: String,
    /// Query parameter carrying the 1-based reviews page number.
    pub page_param: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            review_containers: vec![
                "div.ZmyHeo".to_string(),
                "div._11pzQk".to_string(),
                "div.t-ZTKy".to_string(),
            ],
            text_element: "div".to_string(),
            read_more: Some("span.wTYmpv".to_string()),
            placeholder: "READ MORE".to_string(),
            metrics: "span.Wphh3N".to_string(),
            product_path_segment: "/p/".to_string(),
            reviews_path_segment: "/product-reviews/".to_string(),
            page_param: "page".to_string(),
        }
    }
}

/// Load and validate a site profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_site_profile(path: &Path) -> Result<SiteProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: SiteProfile = serde_yaml::from_str(&content)?;
    validate_profile(&profile)?;

    Ok(profile)
}

fn validate_profile(profile: &SiteProfile) -> Result<(), ConfigError> {
    if profile.review_containers.is_empty() {
        return Err(ConfigError::Validation(
            "review_containers must list at least one selector".to_string(),
        ));
    }

    if let Some(blank) = profile
        .review_containers
        .iter()
        .position(|s| s.trim().is_empty())
    {
        return Err(ConfigError::Validation(format!(
            "review_containers[{blank}] is blank"
        )));
    }

    let required = [
        ("text_element", profile.text_element.as_str()),
        ("metrics", profile.metrics.as_str()),
        ("product_path_segment", profile.product_path_segment.as_str()),
        ("reviews_path_segment", profile.reviews_path_segment.as_str()),
        ("page_param", profile.page_param.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{field} must be non-empty")));
        }
    }

    if profile
        .read_more
        .as_deref()
        .is_some_and(|s| s.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "read_more must be omitted or non-empty".to_string(),
        ));
    }

    Ok(())
}
