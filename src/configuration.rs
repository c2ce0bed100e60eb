use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::services::RetryPolicy;

const BASE_CONFIGURATION: &str = include_str!("../configuration/base.yaml");
const LOCAL_CONFIGURATION: &str = "configuration/local.yaml";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub scraper: ScraperSettings,
    pub extractor: ExtractorSettings,
    pub sites: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub output_path: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_retries: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub backoff_factor_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_backoff_secs: u64,
    pub retry_statuses: Vec<u16>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub politeness_interval_ms: u64,
    pub discovery_user_agent: String,
    pub page_user_agent: String,
}

impl ScraperSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn politeness_interval(&self) -> Duration {
        Duration::from_millis(self.politeness_interval_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_secs(self.backoff_factor_secs),
            Duration::from_secs(self.max_backoff_secs),
        )
        .with_statuses(self.retry_statuses.clone())
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ExtractorSettings {
    pub model: String,
    pub api_base: String,
    pub api_key_env: String,
}

impl ExtractorSettings {
    /// Reads the credential from the environment variable named by `api_key_env`.
    /// Empty values count as missing.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    build_settings(Path::new(LOCAL_CONFIGURATION), app_environment())
}

/// Layers the embedded defaults, an optional local file and the environment.
pub fn build_settings(local_file: &Path, environment: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::from_str(BASE_CONFIGURATION, FileFormat::Yaml))
        .add_source(File::from(local_file).required(false))
        .add_source(environment)
        .build()?
        .try_deserialize::<Settings>()
}

// e.g. APP_SCRAPER__TIMEOUT_SECS=10 or APP_SITES=https://a.com,https://b.com
fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("sites")
}
