use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

use crate::app_config::SiteConfig;
use crate::errors::SiteError;

/// Anything that can hand back the HTML of a page by URL
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page body
    async fn fetch(&self, url: &str) -> Result<String, SiteError>;
}

/// Backoff before retry number `attempt` (1-based): the base doubled per retry, saturating
fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    base_ms.saturating_mul(factor)
}

/// Page source backed by HTTP requests
pub struct HttpPageSource {
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Pause before every request
    request_delay_ms: u64,
}

impl HttpPageSource {
    /// Create a page source from the site configuration
    pub fn new(config: &SiteConfig) -> Result<Self, SiteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SiteError::RequestFailed {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_retries: config.retry_count,
            backoff_base_ms: config.retry_backoff_ms,
            request_delay_ms: config.request_delay_ms,
        })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String, SiteError> {
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            if self.request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.request_delay_ms)).await;
            }

            debug!("GET {} (attempt {}/{})", url, attempt + 1, self.max_retries + 1);

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.as_u16() == 200 {
                        return response.text().await.map_err(|e| SiteError::RequestFailed {
                            url: url.to_string(),
                            message: e.to_string(),
                        });
                    } else if status.is_server_error() {
                        // Server error - can retry
                        error!("HTTP {} for {} - attempt {}/{}", status, url, attempt + 1, self.max_retries + 1);
                        last_error = Some(SiteError::HttpStatus {
                            url: url.to_string(),
                            status_code: status.as_u16(),
                        });
                    } else {
                        // Anything else that is not 200 - don't retry
                        return Err(SiteError::HttpStatus {
                            url: url.to_string(),
                            status_code: status.as_u16(),
                        });
                    }
                }
                Err(e) => {
                    // Network error - can retry
                    error!("Request to {} failed: {} - attempt {}/{}", url, e, attempt + 1, self.max_retries + 1);
                    last_error = Some(SiteError::RequestFailed {
                        url: url.to_string(),
                        message: e.to_string(),
                    });
                }
            }

            attempt += 1;

            if attempt <= self.max_retries {
                let backoff_ms = backoff_delay_ms(self.backoff_base_ms, attempt);
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| SiteError::RequestFailed {
            url: url.to_string(),
            message: format!("failed after {} attempts", self.max_retries + 1),
        }))
    }
}
