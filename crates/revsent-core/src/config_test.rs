use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_backend_browser() {
    assert_eq!(parse_backend("browser").unwrap(), FetchBackend::Browser);
}

#[test]
fn parse_backend_chromium_alias() {
    assert_eq!(parse_backend("Chromium").unwrap(), FetchBackend::Browser);
}

#[test]
fn parse_backend_http() {
    assert_eq!(parse_backend("http").unwrap(), FetchBackend::Http);
}

#[test]
fn parse_backend_unknown_fails() {
    let err = parse_backend("selenium").unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "REVSENT_FETCH_BACKEND")
    );
}

#[test]
fn parse_policy_stop_and_continue() {
    assert_eq!(parse_policy("stop").unwrap(), EmptyPagePolicy::Stop);
    assert_eq!(parse_policy(" CONTINUE ").unwrap(), EmptyPagePolicy::Continue);
}

#[test]
fn parse_policy_unknown_fails() {
    let err = parse_policy("retry").unwrap_err();
    assert!(
        matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "REVSENT_EMPTY_PAGE_POLICY")
    );
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.fetch_backend, FetchBackend::Browser);
    assert!(cfg.browser_executable.is_none());
    assert!(cfg.browser_remote_url.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.review_cap, 100);
    assert_eq!(cfg.max_pages, 10);
    assert_eq!(cfg.inter_page_delay_ms, 2000);
    assert_eq!(cfg.empty_page_policy, EmptyPagePolicy::Stop);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert_eq!(cfg.output_path, PathBuf::from("reviews.csv"));
    assert_eq!(cfg.model_dir, PathBuf::from("./model"));
    assert!(cfg.stopwords_path.is_none());
    assert!(cfg.site_profile_path.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("REVSENT_FETCH_BACKEND", "http");
    map.insert("REVSENT_REVIEW_CAP", "25");
    map.insert("REVSENT_MAX_PAGES", "3");
    map.insert("REVSENT_INTER_PAGE_DELAY_MS", "0");
    map.insert("REVSENT_EMPTY_PAGE_POLICY", "continue");
    map.insert("REVSENT_MODEL_DIR", "/opt/models");
    map.insert("REVSENT_STOPWORDS_PATH", "/etc/stopwords.txt");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.fetch_backend, FetchBackend::Http);
    assert_eq!(cfg.review_cap, 25);
    assert_eq!(cfg.max_pages, 3);
    assert_eq!(cfg.inter_page_delay_ms, 0);
    assert_eq!(cfg.empty_page_policy, EmptyPagePolicy::Continue);
    assert_eq!(cfg.model_dir, PathBuf::from("/opt/models"));
    assert_eq!(
        cfg.stopwords_path,
        Some(PathBuf::from("/etc/stopwords.txt"))
    );
}

#[test]
fn build_app_config_blank_optional_is_none() {
    let mut map = HashMap::new();
    map.insert("REVSENT_BROWSER_REMOTE_URL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.browser_remote_url.is_none());
}

#[test]
fn build_app_config_rejects_invalid_cap() {
    let mut map = HashMap::new();
    map.insert("REVSENT_REVIEW_CAP", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSENT_REVIEW_CAP"),
        "expected InvalidEnvVar(REVSENT_REVIEW_CAP), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_max_pages() {
    let mut map = HashMap::new();
    map.insert("REVSENT_MAX_PAGES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSENT_MAX_PAGES"),
        "expected InvalidEnvVar(REVSENT_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_retry_backoff() {
    let mut map = HashMap::new();
    map.insert("REVSENT_RETRY_BACKOFF_BASE_MS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSENT_RETRY_BACKOFF_BASE_MS"
    ));
}
