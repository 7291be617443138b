mod report;
mod run;

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "revsent-cli")]
#[command(about = "Scrape product reviews and classify their sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show total ratings and reviews for a product
    Metrics {
        /// Product detail page URL
        url: String,
    },
    /// Scrape reviews and write them to CSV
    Reviews {
        /// Product detail page URL
        url: String,

        /// Maximum number of reviews to collect (defaults to `REVSENT_REVIEW_CAP`)
        #[arg(long)]
        cap: Option<usize>,

        /// CSV destination (defaults to `REVSENT_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Classify the sentiment of a product's reviews
    Analyze {
        /// Product detail page URL
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare review sentiment between two products
    Compare {
        /// First product detail page URL
        first_url: String,

        /// Second product detail page URL
        second_url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = revsent_core::load_app_config().context("failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Metrics { url }) => run::run_metrics(&config, &url).await,
        Some(Commands::Reviews { url, cap, output }) => {
            run::run_reviews(&config, &url, cap, output).await
        }
        Some(Commands::Analyze { url, json }) => run::run_analyze(&config, &url, json).await,
        Some(Commands::Compare {
            first_url,
            second_url,
            json,
        }) => run::run_compare(&config, &first_url, &second_url, json).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
