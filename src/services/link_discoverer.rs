use async_trait::async_trait;
use itertools::Itertools;
use reqwest::Client;
use url::Url;

use crate::{
    configuration::ScraperSettings,
    domain::{
        html_page::resolved_anchor_urls,
        keyword::{contains_relevant_keyword, same_domain},
    },
};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),
}

#[async_trait]
pub trait LinkSource: Send + Sync {
    async fn discover(&self, base_url: &Url) -> Result<Vec<Url>, DiscoveryError>;
}

/// Finds same-domain "about us" style pages linked from a site's home page.
pub struct LinkDiscoverer {
    client: Client,
}

impl LinkDiscoverer {
    pub fn new(settings: &ScraperSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.discovery_user_agent.as_str())
            .timeout(settings.timeout())
            .build()?;

        Ok(LinkDiscoverer { client })
    }
}

#[async_trait]
impl LinkSource for LinkDiscoverer {
    async fn discover(&self, base_url: &Url) -> Result<Vec<Url>, DiscoveryError> {
        let res = self.client.get(base_url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status.as_u16()));
        }
        let html_content = res.text().await?;

        let links = relevant_links(&html_content, base_url);
        log::info!("Found {} relevant links on {}", links.len(), base_url);

        Ok(links)
    }
}

/// Same-domain anchors whose URL mentions a relevant keyword, first occurrence order.
pub fn relevant_links(html_content: &str, base_url: &Url) -> Vec<Url> {
    resolved_anchor_urls(html_content, base_url)
        .into_iter()
        .filter(|url| same_domain(url, base_url) && contains_relevant_keyword(url))
        .unique()
        .collect()
}
