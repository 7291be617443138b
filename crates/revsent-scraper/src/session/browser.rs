//! Headless Chromium backend built on `chromiumoxide`.
//!
//! Each session owns one browser (launched locally, or a tab on a remote
//! DevTools endpoint) and navigates a single tab for every fetch, so the
//! page's JavaScript has rendered the review list before markup is read.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{PageSession, PageSource};
use crate::error::ScraperError;

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Per-page load timeout.
    pub timeout: Duration,
    pub user_agent: String,
    /// Chromium binary to launch. `None` lets chromiumoxide search the usual locations.
    pub executable: Option<PathBuf>,
    /// DevTools websocket URL of an already running browser. When set,
    /// nothing is launched and only the session's tab is closed on release.
    pub remote_url: Option<String>,
}

pub struct BrowserSource {
    options: BrowserOptions,
}

impl BrowserSource {
    #[must_use]
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }

    async fn start(&self) -> Result<(Browser, JoinHandle<()>, bool), ScraperError> {
        let (browser, mut handler, owned) = if let Some(url) = &self.options.remote_url {
            tracing::info!(url = %url, "connecting to remote Chrome instance");
            let (browser, handler) = Browser::connect(url.as_str())
                .await
                .map_err(|e| ScraperError::Browser(format!("connect to {url}: {e}")))?;
            (browser, handler, false)
        } else {
            let mut builder = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(self.options.timeout)
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage");
            if let Some(path) = &self.options.executable {
                builder = builder.chrome_executable(path);
            }
            let config = builder.build().map_err(ScraperError::Browser)?;
            let (browser, handler) = Browser::launch(config)
                .await
                .map_err(|e| ScraperError::Browser(format!("launch: {e}")))?;
            (browser, handler, true)
        };

        // The handler stream drives all CDP traffic; it ends when the browser goes away.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, events, owned))
    }
}

#[async_trait]
impl PageSource for BrowserSource {
    async fn open(&self) -> Result<Box<dyn PageSession>, ScraperError> {
        let (browser, events, owned) = self.start().await?;

        let mut session = BrowserSession {
            browser,
            page: None,
            events: Some(events),
            owned,
            timeout: self.options.timeout,
            closed: false,
        };

        let page = match session.browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let err = ScraperError::Browser(format!("open tab: {e}"));
                if let Err(close_err) = session.close().await {
                    tracing::warn!(error = %close_err, "failed to close browser after tab error");
                }
                return Err(err);
            }
        };
        if let Err(e) = page.set_user_agent(self.options.user_agent.as_str()).await {
            tracing::debug!(error = %e, "could not override user agent");
        }
        session.page = Some(page);

        tracing::debug!(owned, "browser session opened");
        Ok(Box::new(session))
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

struct BrowserSession {
    browser: Browser,
    page: Option<Page>,
    events: Option<JoinHandle<()>>,
    owned: bool,
    timeout: Duration,
    closed: bool,
}

#[async_trait]
impl PageSession for BrowserSession {
    async fn fetch(&mut self, url: &str) -> Result<String, ScraperError> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| ScraperError::Browser("session already closed".to_string()))?;

        let load = async {
            page.goto(url)
                .await
                .map_err(|e| ScraperError::Browser(format!("navigate to {url}: {e}")))?;
            page.content()
                .await
                .map_err(|e| ScraperError::Browser(format!("read content of {url}: {e}")))
        };

        tokio::time::timeout(self.timeout, load)
            .await
            .map_err(|_| ScraperError::Timeout {
                url: url.to_owned(),
                secs: self.timeout.as_secs(),
            })?
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let mut first_err = None;

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                first_err = Some(ScraperError::Browser(format!("close tab: {e}")));
            }
        }

        if self.owned {
            if let Err(e) = self.browser.close().await {
                first_err.get_or_insert(ScraperError::Browser(format!("close browser: {e}")));
            }
            if let Err(e) = self.browser.wait().await {
                first_err.get_or_insert(ScraperError::Browser(format!("reap browser: {e}")));
            }
        }

        if let Some(events) = self.events.take() {
            events.abort();
        }

        tracing::debug!("browser session closed");
        first_err.map_or(Ok(()), Err)
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Reached without `close` only on panic or cancellation; dropping
        // `Browser` kills the launched child process.
        if let Some(events) = self.events.take() {
            events.abort();
        }
    }
}
