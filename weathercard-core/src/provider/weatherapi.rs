use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::model::WeatherResult;

use super::{FetchError, WeatherProvider};

const CURRENT_PATH: &str = "/v1/current.json";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{CURRENT_PATH}", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(endpoint = %self.endpoint()))]
    async fn current(&self, query: &str) -> Result<WeatherResult, FetchError> {
        debug!("requesting current conditions");

        let res = self
            .http
            .get(self.endpoint())
            .query(&[("key", self.api_key.as_str()), ("q", query), ("aqi", "no")])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "weatherapi request could not be sent");
                FetchError::Transport(e)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "failed to read weatherapi response body");
            FetchError::Transport(e)
        })?;

        if !status.is_success() {
            let body = truncate_body(&body);
            warn!(%status, %body, "weatherapi returned an error status");
            return Err(FetchError::Status { status, body });
        }

        let document = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "weatherapi body is not valid JSON");
            FetchError::Decode(e)
        })?;

        Ok(WeatherResult::from_json(document))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
