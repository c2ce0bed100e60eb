use url::Url;

use crate::domain::company::{CompanyRow, ExtractionOutcome};

use super::{Clock, CompanyExtractor, CorpusBuilder, LinkSource, PageSource};

/// Runs every site through corpus building and extraction, one at a time.
pub struct Pipeline<L, P, C, E> {
    corpus_builder: CorpusBuilder<L, P, C>,
    extractor: E,
}

impl<L, P, C, E> Pipeline<L, P, C, E>
where
    L: LinkSource,
    P: PageSource,
    C: Clock,
    E: CompanyExtractor,
{
    pub fn new(corpus_builder: CorpusBuilder<L, P, C>, extractor: E) -> Self {
        Pipeline {
            corpus_builder,
            extractor,
        }
    }

    pub async fn process_site(&mut self, site: &str) -> CompanyRow {
        log::info!("Processing base URL: {}", site);

        let base_url = match Url::parse(site) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Invalid site URL {}: {}", site, e);
                return CompanyRow::new(site, ExtractionOutcome::ScrapingFailed);
            }
        };

        let corpus = self.corpus_builder.build(&base_url).await;
        if corpus.is_empty() {
            log::error!("No page text collected for {}", site);
            return CompanyRow::new(site, ExtractionOutcome::ScrapingFailed);
        }

        let outcome = match self.extractor.extract(corpus.as_str()).await {
            Ok(text) => ExtractionOutcome::Extracted(text),
            Err(e) => {
                log::error!("Error extracting info for {}: {}", site, e);
                ExtractionOutcome::ExtractionFailed {
                    reason: e.to_string(),
                }
            }
        };

        CompanyRow::new(site, outcome)
    }

    /// One row per site, in input order.
    pub async fn run(&mut self, sites: &[String]) -> Vec<CompanyRow> {
        let mut rows = Vec::with_capacity(sites.len());

        for site in sites {
            rows.push(self.process_site(site).await);
        }

        let extracted = rows.iter().filter(|row| row.outcome.is_success()).count();
        log::info!("Extracted details for {} of {} sites", extracted, rows.len());

        rows
    }
}
