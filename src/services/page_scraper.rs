use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{configuration::ScraperSettings, domain::html_page::main_text};

use super::{Clock, RetryPolicy};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ScrapeError>,
    },
}

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn scrape(&self, url: &Url) -> Result<String, ScrapeError>;
}

/// Fetches single pages over one persistent client and returns their visible text.
pub struct PageScraper<C> {
    client: Client,
    retry_policy: RetryPolicy,
    clock: C,
}

impl<C: Clock> PageScraper<C> {
    pub fn new(settings: &ScraperSettings, clock: C) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.page_user_agent.as_str())
            .timeout(settings.timeout())
            .cookie_store(true)
            .build()?;

        Ok(PageScraper {
            client,
            retry_policy: settings.retry_policy(),
            clock,
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    async fn fetch_once(&self, url: &Url) -> Result<String, ScrapeError> {
        let res = self.client.get(url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        Ok(res.text().await?)
    }

    async fn fetch_with_retry(&self, url: &Url) -> Result<String, ScrapeError> {
        let mut retries = 0;

        loop {
            let err = match self.fetch_once(url).await {
                Ok(html_content) => return Ok(html_content),
                Err(e) => e,
            };

            if !self.is_retryable(&err) {
                return Err(err);
            }
            if retries >= self.retry_policy.max_retries() {
                return Err(ScrapeError::RetriesExhausted {
                    attempts: retries + 1,
                    last: Box::new(err),
                });
            }

            retries += 1;
            let delay = self.retry_policy.delay(retries);
            log::warn!(
                "Retry {} for {} in {:?} after error: {}",
                retries,
                url,
                delay,
                err
            );
            if !delay.is_zero() {
                self.clock.sleep(delay).await;
            }
        }
    }

    fn is_retryable(&self, err: &ScrapeError) -> bool {
        match err {
            ScrapeError::Status(status) => self.retry_policy.retries_status(*status),
            ScrapeError::Request(e) => e.is_connect() || e.is_timeout(),
            ScrapeError::RetriesExhausted { .. } => false,
        }
    }
}

#[async_trait]
impl<C: Clock> PageSource for PageScraper<C> {
    async fn scrape(&self, url: &Url) -> Result<String, ScrapeError> {
        let html_content = self.fetch_with_retry(url).await?;

        Ok(main_text(&html_content))
    }
}
