//! Core library for the `myweather` app.
//!
//! This crate defines:
//! - The location-to-weather pipeline and its two gates
//! - The OpenWeather client and the single-entry payload cache
//! - The presenter that turns a cached payload into screen text
//! - Traits for the device services the pipeline depends on
//!
//! It is used by `myweather-cli`, but the platform traits can be implemented by any front end.

pub mod app;
pub mod cache;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod location;
pub mod model;
pub mod permission;
pub mod presenter;
pub mod provider;
pub mod ui;

pub use app::{Platform, WeatherApp};
pub use cache::{FileStore, KeyValueStore, MemoryStore, WeatherCache};
pub use config::Config;
pub use error::WeatherError;
pub use model::{Coordinates, WeatherPayload};
pub use presenter::{Presenter, WeatherView};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
