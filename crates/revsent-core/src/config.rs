use crate::app_config::{AppConfig, EmptyPagePolicy, FetchBackend};
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("REVSENT_LOG_LEVEL", "info");
    let fetch_backend = parse_backend(&or_default("REVSENT_FETCH_BACKEND", "browser"))?;
    let browser_executable = optional("REVSENT_BROWSER_EXECUTABLE").map(PathBuf::from);
    let browser_remote_url = optional("REVSENT_BROWSER_REMOTE_URL");

    let request_timeout_secs = parse_u64("REVSENT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("REVSENT_USER_AGENT", DEFAULT_USER_AGENT);

    let review_cap = parse_usize("REVSENT_REVIEW_CAP", "100")?;
    let max_pages = parse_u32("REVSENT_MAX_PAGES", "10")?;
    if max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVSENT_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let inter_page_delay_ms = parse_u64("REVSENT_INTER_PAGE_DELAY_MS", "2000")?;
    let empty_page_policy = parse_policy(&or_default("REVSENT_EMPTY_PAGE_POLICY", "stop"))?;

    let max_retries = parse_u32("REVSENT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("REVSENT_RETRY_BACKOFF_BASE_MS", "1000")?;

    let output_path = PathBuf::from(or_default("REVSENT_OUTPUT_PATH", "reviews.csv"));
    let model_dir = PathBuf::from(or_default("REVSENT_MODEL_DIR", "./model"));
    let stopwords_path = optional("REVSENT_STOPWORDS_PATH").map(PathBuf::from);
    let site_profile_path = optional("REVSENT_SITE_PROFILE_PATH").map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        fetch_backend,
        browser_executable,
        browser_remote_url,
        request_timeout_secs,
        user_agent,
        review_cap,
        max_pages,
        inter_page_delay_ms,
        empty_page_policy,
        max_retries,
        retry_backoff_base_ms,
        output_path,
        model_dir,
        stopwords_path,
        site_profile_path,
    })
}

fn parse_backend(s: &str) -> Result<FetchBackend, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "browser" | "chrome" | "chromium" => Ok(FetchBackend::Browser),
        "http" => Ok(FetchBackend::Http),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVSENT_FETCH_BACKEND".to_string(),
            reason: format!("unknown backend '{other}'; expected 'browser' or 'http'"),
        }),
    }
}

fn parse_policy(s: &str) -> Result<EmptyPagePolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "stop" => Ok(EmptyPagePolicy::Stop),
        "continue" => Ok(EmptyPagePolicy::Continue),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVSENT_EMPTY_PAGE_POLICY".to_string(),
            reason: format!("unknown policy '{other}'; expected 'stop' or 'continue'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
