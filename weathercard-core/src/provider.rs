use crate::{Config, WeatherResult, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod weatherapi;

/// Why a lookup failed. The controller reports every variant to the user the
/// same way; the distinction only reaches the logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather lookup failed: transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("weather lookup failed: HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("weather lookup failed: response body is not JSON: {0}")]
    Decode(#[source] serde_json::Error),

    /// The task running the lookup panicked or was cancelled.
    #[error("weather lookup failed: lookup ended early: {0}")]
    Interrupted(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `query`. Callers never pass an empty query.
    async fn current(&self, query: &str) -> Result<WeatherResult, FetchError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for weatherapi.com.\n\
                 Hint: run `weathercard configure` or pass --api-key."
        )
    })?;

    Ok(WeatherApiProvider::new(api_key.to_owned(), config.base_url.clone()))
}
