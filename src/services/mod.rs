pub mod clock;
pub mod corpus_builder;
pub mod link_discoverer;
pub mod llm_client;
pub mod page_scraper;
pub mod pipeline;
pub mod retry_policy;

pub use clock::*;
pub use corpus_builder::*;
pub use link_discoverer::*;
pub use llm_client::*;
pub use page_scraper::*;
pub use pipeline::*;
pub use retry_policy::*;
