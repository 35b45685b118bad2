use crate::{Config, Coordinates, WeatherPayload, error::WeatherError, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Unit system requested from the API. Temperatures are displayed as received.
pub const METRIC_UNIT: &str = "metric";

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One attempt, no retry.
    async fn get_weather(&self, coordinates: Coordinates) -> Result<WeatherPayload, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.effective_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `myweather configure` and enter your OpenWeather API key."
        )
    })?;

    let mut provider = OpenWeatherProvider::new(api_key);
    if let Some(base_url) = config.base_url.as_deref() {
        provider = provider.with_base_url(base_url);
    }

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `myweather configure`"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            base_url: Some("http://localhost:9999".to_string()),
            ..Default::default()
        };

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
