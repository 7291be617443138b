use std::path::PathBuf;

/// Which page session backend the scraper opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchBackend {
    /// Headless Chromium; renders JavaScript before returning markup.
    Browser,
    /// Plain HTTP GET; markup as served.
    Http,
}

impl std::fmt::Display for FetchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchBackend::Browser => write!(f, "browser"),
            FetchBackend::Http => write!(f, "http"),
        }
    }
}

/// What review collection does when a page yields no review containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPagePolicy {
    /// End collection at the first empty page.
    #[default]
    Stop,
    /// Skip the empty page and keep going until the cap or page limit.
    Continue,
}

impl std::fmt::Display for EmptyPagePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyPagePolicy::Stop => write!(f, "stop"),
            EmptyPagePolicy::Continue => write!(f, "continue"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub fetch_backend: FetchBackend,
    pub browser_executable: Option<PathBuf>,
    pub browser_remote_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub review_cap: usize,
    pub max_pages: u32,
    pub inter_page_delay_ms: u64,
    pub empty_page_policy: EmptyPagePolicy,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub output_path: PathBuf,
    pub model_dir: PathBuf,
    pub stopwords_path: Option<PathBuf>,
    pub site_profile_path: Option<PathBuf>,
}
