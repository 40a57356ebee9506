/*!
 * In-memory page source for tests
 *
 * Serves saved HTML by exact URL and records every request so tests can
 * check which pages the controller visited. Unknown URLs answer 404.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use litclock::errors::SiteError;
use litclock::site::PageSource;

/// Page source backed by a URL -> HTML map
#[derive(Debug, Default)]
pub struct FixturePageSource {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FixturePageSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from a prepared page map
    pub fn from_pages(pages: HashMap<String, String>) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve `html` at `url`
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    /// URLs requested so far, in order
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FixturePageSource {
    async fn fetch(&self, url: &str) -> Result<String, SiteError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| SiteError::HttpStatus {
            url: url.to_string(),
            status_code: 404,
        })
    }
}
