use anyhow::Context;

use crate::{
    configuration::Settings,
    dal::company_csv,
    domain::company::CompanyRow,
    services::{
        CorpusBuilder, LinkDiscoverer, LlmClient, PageScraper, Pipeline, RequestPacer, TokioClock,
    },
};

/// Builds the clients, processes every configured site and writes the CSV.
/// A missing credential aborts before any site is fetched.
pub async fn run(settings: Settings) -> anyhow::Result<Vec<CompanyRow>> {
    let api_key = settings.extractor.api_key_from_env();
    let llm_client = LlmClient::new(&settings.extractor, api_key)
        .context("Failed to configure the extraction model")?;

    let link_discoverer =
        LinkDiscoverer::new(&settings.scraper).context("Failed to build discovery client")?;
    let page_scraper = PageScraper::new(&settings.scraper, TokioClock)
        .context("Failed to build scraping client")?;
    let pacer = RequestPacer::new(TokioClock, settings.scraper.politeness_interval());

    let corpus_builder = CorpusBuilder::new(link_discoverer, page_scraper, pacer);
    let mut pipeline = Pipeline::new(corpus_builder, llm_client);

    let rows = pipeline.run(&settings.sites).await;

    company_csv::save_company_rows(&settings.application.output_path, &rows)
        .with_context(|| format!("Failed to write {}", settings.application.output_path))?;
    log::info!("Data saved to {}", settings.application.output_path);

    Ok(rows)
}
