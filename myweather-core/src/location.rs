use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::Coordinates;

/// OS-level sources a location fix can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationProvider {
    /// Satellite positioning.
    Gps,
    /// Cell towers and Wi-Fi.
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    HighAccuracy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRequest {
    pub priority: Priority,
    /// `None` keeps the subscription open; the pipeline always asks for one fix.
    pub num_updates: Option<u32>,
}

impl LocationRequest {
    /// One-shot, most precise fix available.
    pub fn high_accuracy() -> Self {
        Self {
            priority: Priority::HighAccuracy,
            num_updates: Some(1),
        }
    }
}

/// A batch of fixes delivered by one location callback, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationResult {
    pub locations: Vec<Coordinates>,
}

impl LocationResult {
    pub fn new(locations: Vec<Coordinates>) -> Self {
        Self { locations }
    }

    pub fn last_location(&self) -> Option<Coordinates> {
        self.locations.last().copied()
    }
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("no location fix available")]
    NoFix,
    #[error("location service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait LocationServices: Send + Sync + Debug {
    fn is_provider_enabled(&self, provider: LocationProvider) -> bool;

    /// Resolves once with the location update for `request`.
    ///
    /// No timeout is applied by callers: an implementation that never
    /// resolves stalls the pipeline.
    async fn request_location_updates(
        &self,
        request: &LocationRequest,
    ) -> Result<LocationResult, LocationError>;
}

pub fn is_location_enabled(services: &dyn LocationServices) -> bool {
    services.is_provider_enabled(LocationProvider::Gps)
        || services.is_provider_enabled(LocationProvider::Network)
}
