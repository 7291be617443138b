//! Plain HTTP backend. No JavaScript runs, so this only works for pages
//! whose reviews are server-rendered (and for tests).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{PageSession, PageSource};
use crate::error::ScraperError;

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Creates an `HttpSource` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn open(&self) -> Result<Box<dyn PageSession>, ScraperError> {
        Ok(Box::new(HttpSession {
            client: self.client.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

struct HttpSession {
    client: Client,
}

#[async_trait]
impl PageSession for HttpSession {
    async fn fetch(&mut self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ScraperError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        Ok(())
    }
}
