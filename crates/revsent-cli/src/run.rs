//! Command handlers. Each builds its collaborators from [`AppConfig`] and
//! prints to stdout; diagnostics go through `tracing` on stderr.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use revsent_core::{load_site_profile, AppConfig, FetchBackend, SiteProfile};
use revsent_scraper::{
    write_reviews_csv, BrowserOptions, BrowserSource, CollectSettings, HttpSource, PageSource,
    ReviewScraper,
};
use revsent_sentiment::{Analyzer, Normalizer, SentimentModel, StopWords};

use crate::report;

/// Samples per label shown for each product in comparison mode.
const COMPARISON_SAMPLES: usize = 5;

fn build_source(config: &AppConfig) -> anyhow::Result<Box<dyn PageSource>> {
    let source: Box<dyn PageSource> = match config.fetch_backend {
        FetchBackend::Browser => Box::new(BrowserSource::new(BrowserOptions {
            timeout: Duration::from_secs(config.request_timeout_secs),
            user_agent: config.user_agent.clone(),
            executable: config.browser_executable.clone(),
            remote_url: config.browser_remote_url.clone(),
        })),
        FetchBackend::Http => Box::new(
            HttpSource::new(config.request_timeout_secs, &config.user_agent)
                .context("failed to build HTTP client")?,
        ),
    };
    tracing::debug!(backend = %config.fetch_backend, "page source configured");
    Ok(source)
}

fn build_scraper(config: &AppConfig) -> anyhow::Result<ReviewScraper> {
    let profile = match &config.site_profile_path {
        Some(path) => load_site_profile(path)
            .with_context(|| format!("failed to load site profile {}", path.display()))?,
        None => SiteProfile::default(),
    };
    let scraper = ReviewScraper::new(
        build_source(config)?,
        profile,
        CollectSettings::from_config(config),
    )?;
    Ok(scraper)
}

fn build_analyzer(config: &AppConfig) -> anyhow::Result<Analyzer> {
    let stopwords = match &config.stopwords_path {
        Some(path) => StopWords::load(path)?,
        None => StopWords::english(),
    };
    // Load the model before any scraping so a bad model directory fails fast.
    let model = SentimentModel::load(&config.model_dir).with_context(|| {
        format!(
            "failed to load sentiment model from {}",
            config.model_dir.display()
        )
    })?;

    Ok(Analyzer::new(
        build_scraper(config)?,
        Normalizer::new(stopwords),
        model,
        config.review_cap,
    ))
}

pub(crate) async fn run_metrics(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let scraper = build_scraper(config)?;
    let metrics = scraper.fetch_metrics(url).await?;
    print!("{}", report::render_metrics(url, &metrics));
    Ok(())
}

pub(crate) async fn run_reviews(
    config: &AppConfig,
    url: &str,
    cap: Option<usize>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let scraper = build_scraper(config)?;
    let cap = cap.unwrap_or(config.review_cap);
    let output = output.unwrap_or_else(|| config.output_path.clone());

    let batch = scraper.collect_reviews(url, cap).await?;
    if batch.is_empty() {
        println!("No reviews found for this product.");
        return Ok(());
    }

    write_reviews_csv(&output, &batch)?;
    println!("{} reviews written to {}", batch.len(), output.display());
    Ok(())
}

pub(crate) async fn run_analyze(config: &AppConfig, url: &str, json: bool) -> anyhow::Result<()> {
    let analyzer = build_analyzer(config)?.with_csv_output(config.output_path.clone());
    let outcome = analyzer.analyze_product(url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report::render_outcome(&outcome, None));
    }
    Ok(())
}

pub(crate) async fn run_compare(
    config: &AppConfig,
    first_url: &str,
    second_url: &str,
    json: bool,
) -> anyhow::Result<()> {
    let analyzer = build_analyzer(config)?;
    let comparison = analyzer.compare_products(first_url, second_url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!(
            "{}",
            report::render_comparison(&comparison, COMPARISON_SAMPLES)
        );
    }
    Ok(())
}
