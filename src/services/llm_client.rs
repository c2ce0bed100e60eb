use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;

use crate::configuration::ExtractorSettings;

const EXTRACTION_PROMPT: &str = r#"Extract the following company details from the given text. If a detail is not found, explicitly state "Not Available".
Mission statement or core values
Products or services offered
Founding year and founders
Headquarters location
Key executives or leadership team
Notable awards or recognitions

Text:
"#;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no API key configured in {0}")]
    MissingApiKey(String),

    #[error("model API call failed: {0}")]
    Api(#[from] OpenAIError),

    #[error("model returned no text")]
    EmptyResponse,
}

#[async_trait]
pub trait CompanyExtractor: Send + Sync {
    async fn extract(&self, corpus: &str) -> Result<String, ExtractionError>;
}

pub fn build_extraction_prompt(corpus: &str) -> String {
    format!("{}{}", EXTRACTION_PROMPT, corpus)
}

pub fn strip_bold_markers(text: &str) -> String {
    text.replace("**", "")
}

/// Chat-completions client for the extraction model.
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmClient {
    /// Fails when `api_key` is absent, so a usable client always has a credential.
    pub fn new(settings: &ExtractorSettings, api_key: Option<String>) -> Result<Self, ExtractionError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ExtractionError::MissingApiKey(settings.api_key_env.clone()))?;

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(settings.api_base.trim_end_matches('/'));

        Ok(LlmClient {
            client: Client::with_config(config),
            model: settings.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, ExtractionError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::debug!("Response from {}: {:?}", self.model, response);

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ExtractionError::EmptyResponse)
    }
}

#[async_trait]
impl CompanyExtractor for LlmClient {
    async fn extract(&self, corpus: &str) -> Result<String, ExtractionError> {
        let prompt = build_extraction_prompt(corpus);
        let text = self.complete(&prompt).await?;

        Ok(strip_bold_markers(&text))
    }
}
