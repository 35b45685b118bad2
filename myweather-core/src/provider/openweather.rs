use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    error::WeatherError,
    model::{Coordinates, WeatherPayload},
    provider::METRIC_UNIT,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }

    async fn fetch_current(&self, coordinates: Coordinates) -> Result<WeatherPayload, WeatherError> {
        let lat = coordinates.latitude.to_string();
        let lon = coordinates.longitude.to_string();

        let res = self
            .http
            .get(self.weather_url())
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", METRIC_UNIT),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(
                "OpenWeather request failed with status {}: {}",
                status,
                truncate_body(&body),
            );
            return Err(WeatherError::Http {
                status: status.as_u16(),
            });
        }

        let payload: WeatherPayload = serde_json::from_str(&body).inspect_err(|e| {
            warn!("Failed to parse OpenWeather JSON: {e}: {}", truncate_body(&body));
        })?;

        debug!("Data: {payload:?}");
        Ok(payload)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, coordinates: Coordinates) -> Result<WeatherPayload, WeatherError> {
        self.fetch_current(coordinates).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let end = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
