use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{error::FetchError, model::WeatherSnapshot};

use super::WeatherProvider;

/// Public WeatherAPI.com base URL.
pub const DEFAULT_ENDPOINT: &str = "https://api.weatherapi.com/v1";

/// Host that requires a `key` parameter on every request.
pub const PUBLIC_HOST: &str = "api.weatherapi.com";

/// Client for WeatherAPI.com's `current.json`, or for a proxy exposing the same
/// path that injects the key server-side.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    endpoint: String,
    api_key: Option<String>,
    http: Client,
}

impl WeatherApiProvider {
    /// Talk to WeatherAPI.com directly with the given key.
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, Some(api_key))
    }

    /// Talk to an arbitrary base URL. With `api_key = None` no `key` parameter
    /// is sent at all.
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { endpoint, api_key, http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.endpoint)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn current(&self, city: &str) -> Result<Option<WeatherSnapshot>, FetchError> {
        let url = self.current_url();

        let mut req = self.http.get(&url);
        if let Some(key) = &self.api_key {
            req = req.query(&[("key", key.as_str())]);
        }

        // reqwest percent-encodes query values, so "New York" or "São Paulo" are sent intact.
        let res = req
            .query(&[("q", city)])
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint: url.clone(), source })?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Body)?;

        if !status.is_success() {
            warn!(
                %status,
                body = %truncate_body(&body),
                "WeatherAPI returned a non-success status"
            );
        }

        // Error responses carry a JSON body too; the shape check decides, not the status.
        let value: Value = serde_json::from_str(&body).map_err(|_| FetchError::Decode {
            status: status.as_u16(),
            body: truncate_body(&body),
        })?;

        let snapshot = WeatherSnapshot::from_body(&value);
        debug!(found = snapshot.is_some(), "weather lookup completed");

        Ok(snapshot)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
