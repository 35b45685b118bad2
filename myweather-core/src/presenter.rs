use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use crate::{error::WeatherError, model::WeatherPayload};

/// Text of every field on the weather screen. Empty until the first render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherView {
    /// Drawable resource name, e.g. `ic_04d`.
    pub icon: String,
    pub description: String,
    pub city_name: String,
    pub current_temp: String,
    pub feels_like: String,
    pub min_temp: String,
    pub max_temp: String,
    pub pressure: String,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub sunrise: String,
    pub sunset: String,
}

impl WeatherView {
    pub fn is_empty(&self) -> bool {
        *self == WeatherView::default()
    }
}

/// Fills a [`WeatherView`] from a payload, formatting clock times in `Tz`.
#[derive(Debug, Clone)]
pub struct Presenter<Tz: TimeZone = Local> {
    tz: Tz,
}

impl Presenter<Local> {
    pub fn local() -> Self {
        Self { tz: Local }
    }
}

impl<Tz> Presenter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    /// Populates `view` from the cached JSON.
    ///
    /// Returns `Ok(false)` and leaves `view` untouched when nothing is cached.
    pub fn present(&self, cached: Option<&str>, view: &mut WeatherView) -> Result<bool, WeatherError> {
        let Some(json) = cached.filter(|s| !s.is_empty()) else {
            return Ok(false);
        };

        let payload: WeatherPayload = serde_json::from_str(json)?;
        self.populate(&payload, view);
        Ok(true)
    }

    pub fn populate(&self, payload: &WeatherPayload, view: &mut WeatherView) {
        // Each condition overwrites the previous one; the last entry is what shows.
        for condition in &payload.weather {
            view.description = condition.description.clone();
            debug!("Icon type: {}", condition.icon);
            view.icon = format!("ic_{}", condition.icon);
            view.city_name = payload.name.clone();
            view.current_temp = format!("{}℃", celsius_text(payload.main.temp));
            view.feels_like = format!("Feels like {}℃", celsius_text(payload.main.feels_like));

            view.sunrise = self.clock_time(payload.sys.sunrise);
            view.sunset = self.clock_time(payload.sys.sunset);
            view.wind_speed = format!("{:?} m/s", payload.wind.speed);
            view.wind_direction = format!("{}°", payload.wind.deg);
            view.min_temp = celsius_text(payload.main.temp_min);
            view.max_temp = celsius_text(payload.main.temp_max);
            view.pressure = format!("{}hPa", payload.main.pressure as i64);
            view.humidity = format!("{}%", payload.main.humidity);
        }
    }

    /// `HH:MM` wall-clock time of `epoch_secs` in this presenter's timezone.
    pub fn clock_time(&self, epoch_secs: i64) -> String {
        DateTime::from_timestamp(epoch_secs, 0)
            .map(|utc| utc.with_timezone(&self.tz).format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// The API is already asked for metric units, so the value is shown as stored.
pub fn celsius_text(temp: f64) -> String {
    format!("{temp:?}")
}
