use crate::{Config, FetchError, WeatherSnapshot, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Source of current conditions for a free-text city query.
///
/// `Ok(None)` means the lookup completed but the body did not describe a
/// location (unknown city, bad key, quota exceeded, ...).
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<Option<WeatherSnapshot>, FetchError>;
}

/// Construct the WeatherAPI client from config.
///
/// A missing key is only accepted when the endpoint is not the public
/// WeatherAPI.com one, i.e. a proxy that adds the key itself.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.api_key().map(str::to_owned);

    if api_key.is_none() && config.uses_public_endpoint() {
        return Err(anyhow::anyhow!(
            "No API key configured for {}.\n\
             Hint: run `weather configure` and enter your API key, or point `endpoint` at a proxy.",
            config.endpoint
        ));
    }

    Ok(WeatherApiProvider::with_endpoint(config.endpoint.clone(), api_key))
}
