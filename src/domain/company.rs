use std::fmt;

pub const SCRAPING_FAILED: &str = "Scraping failed";
pub const EXTRACTION_FAILED: &str = "Extraction failed";

/// What the pipeline recorded for one site.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Extracted(String),
    /// No page text could be gathered; the extractor was never called.
    ScrapingFailed,
    ExtractionFailed {
        reason: String,
    },
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Extracted(_))
    }

    /// Text written to the output cell.
    pub fn cell(&self) -> &str {
        match self {
            ExtractionOutcome::Extracted(text) => text,
            ExtractionOutcome::ScrapingFailed => SCRAPING_FAILED,
            ExtractionOutcome::ExtractionFailed { .. } => EXTRACTION_FAILED,
        }
    }
}

impl fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cell())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRow {
    pub website: String,
    pub outcome: ExtractionOutcome,
}

impl CompanyRow {
    pub fn new(website: impl Into<String>, outcome: ExtractionOutcome) -> Self {
        CompanyRow {
            website: website.into(),
            outcome,
        }
    }
}
