//! Page sessions: the scoped resource every fetch goes through.
//!
//! A [`PageSource`] opens a [`PageSession`]; the session must be closed
//! once the batch that opened it is done, whether the batch succeeded or
//! not. Batch operations route through [`release`] so closing happens on
//! every exit path.

mod browser;
mod http;

use async_trait::async_trait;

use crate::error::ScraperError;

pub use browser::{BrowserOptions, BrowserSource};
pub use http::HttpSource;

/// Opens page sessions. One session is opened per batch operation.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Acquires a new session.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the backing browser or client cannot start.
    async fn open(&self) -> Result<Box<dyn PageSession>, ScraperError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// A live session that can load pages one at a time.
#[async_trait]
pub trait PageSession: Send {
    /// Loads `url` and returns the rendered markup.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] on navigation failure, timeout, or a crashed session.
    async fn fetch(&mut self, url: &str) -> Result<String, ScraperError>;

    /// Releases the session. Calling it twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the backend reports a failure while shutting down.
    async fn close(&mut self) -> Result<(), ScraperError>;
}

/// Closes `session`, logging instead of propagating a close failure so the
/// batch result (success or error) is what reaches the caller.
pub(crate) async fn release(mut session: Box<dyn PageSession>) {
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "failed to close page session");
    }
}
