use url::Url;

use crate::domain::corpus::Corpus;

use super::{Clock, LinkSource, PageSource, RequestPacer};

/// Gathers the text of a site's relevant pages plus its home page.
pub struct CorpusBuilder<L, P, C> {
    link_source: L,
    page_source: P,
    pacer: RequestPacer<C>,
}

impl<L, P, C> CorpusBuilder<L, P, C>
where
    L: LinkSource,
    P: PageSource,
    C: Clock,
{
    pub fn new(link_source: L, page_source: P, pacer: RequestPacer<C>) -> Self {
        CorpusBuilder {
            link_source,
            page_source,
            pacer,
        }
    }

    /// Discovered links first, then the base URL unless it was already discovered.
    pub async fn pages_to_scrape(&self, base_url: &Url) -> Vec<Url> {
        let mut links = match self.link_source.discover(base_url).await {
            Ok(links) => links,
            Err(e) => {
                log::error!("Error fetching links from {}: {}", base_url, e);
                vec![]
            }
        };

        if !links.contains(base_url) {
            links.push(base_url.clone());
        }

        links
    }

    pub async fn build(&mut self, base_url: &Url) -> Corpus {
        let links = self.pages_to_scrape(base_url).await;
        let mut corpus = Corpus::new();

        for link in links.iter() {
            self.pacer.wait_turn().await;
            log::info!("Scraping: {}", link);

            match self.page_source.scrape(link).await {
                Ok(text) => corpus.push_page(&text),
                Err(e) => log::error!("Error scraping {}: {}", link, e),
            }
        }

        log::info!(
            "Collected {} characters from {} of {} pages on {}",
            corpus.len(),
            corpus.page_count(),
            links.len(),
            base_url
        );

        corpus
    }
}
