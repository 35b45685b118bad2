//! The screen controller: gates, location, fetch, persist, render.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

use crate::{
    cache::WeatherCache,
    connectivity::{Connectivity, is_network_available},
    error::WeatherError,
    location::{LocationError, LocationRequest, LocationServices, is_location_enabled},
    model::Coordinates,
    permission::{LOCATION_PERMISSIONS, PermissionDecision, PermissionRequester},
    presenter::{Presenter, WeatherView},
    provider::WeatherProvider,
    ui::{Dialog, ProgressGuard, SettingsScreen, Ui},
};

/// Device services the controller talks to.
#[derive(Debug)]
pub struct Platform {
    pub connectivity: Box<dyn Connectivity>,
    pub location: Box<dyn LocationServices>,
    pub permissions: Box<dyn PermissionRequester>,
    pub ui: Box<dyn Ui>,
}

#[derive(Debug)]
pub struct WeatherApp {
    provider: Box<dyn WeatherProvider>,
    cache: WeatherCache,
    platform: Platform,
    presenter: Presenter,
    view: Mutex<WeatherView>,
}

impl WeatherApp {
    pub fn new(provider: Box<dyn WeatherProvider>, cache: WeatherCache, platform: Platform) -> Self {
        Self {
            provider,
            cache,
            platform,
            presenter: Presenter::local(),
            view: Mutex::new(WeatherView::default()),
        }
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Snapshot of what is currently on screen.
    pub fn view(&self) -> WeatherView {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Renders whatever is cached. Returns `false` if the cache was empty.
    pub fn setup_ui(&self) -> Result<bool, WeatherError> {
        let cached = self.cache.load()?;

        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        let rendered = self.presenter.present(cached.as_deref(), &mut view)?;
        if rendered {
            self.platform.ui.render(&view);
        }
        Ok(rendered)
    }

    /// Startup: show the cached weather, then run both gates and fetch.
    pub async fn launch(&self) -> Result<WeatherView, WeatherError> {
        if let Err(e) = self.setup_ui() {
            warn!("Cached weather could not be shown: {e}");
            self.report(&e);
        }

        let result = if is_location_enabled(self.platform.location.as_ref()) {
            self.permission_requester().await
        } else {
            self.turn_location_settings_on();
            Err(WeatherError::LocationDisabled)
        };

        result.inspect_err(|e| self.report(e))
    }

    /// The refresh action: straight to a new location fix, skipping both gates.
    pub async fn refresh(&self) -> Result<WeatherView, WeatherError> {
        self.request_location_data()
            .await
            .inspect_err(|e| self.report(e))
    }

    /// Fetch, persist and render the weather at `coordinates`.
    pub async fn get_location_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherView, WeatherError> {
        self.fetch_and_render(coordinates)
            .await
            .inspect_err(|e| self.report(e))
    }

    fn turn_location_settings_on(&self) {
        let ui = self.platform.ui.as_ref();
        if ui.confirm(&Dialog::LOCATIONS_DISABLED) {
            ui.open_settings(SettingsScreen::LocationSource);
        }
    }

    fn open_rationale_dialog_for_permission(&self) {
        let ui = self.platform.ui.as_ref();
        if ui.confirm(&Dialog::PERMISSIONS_REQUIRED) {
            ui.open_settings(SettingsScreen::ApplicationDetails);
        }
    }

    async fn permission_requester(&self) -> Result<WeatherView, WeatherError> {
        let report = self.platform.permissions.check(&LOCATION_PERMISSIONS).await;

        match report.decision() {
            PermissionDecision::RequestLocation => self.request_location_data().await,
            PermissionDecision::RedirectToSettings => {
                info!(?report, "location permissions missing");
                self.open_rationale_dialog_for_permission();
                Err(WeatherError::PermissionDenied)
            }
        }
    }

    async fn request_location_data(&self) -> Result<WeatherView, WeatherError> {
        let result = self
            .platform
            .location
            .request_location_updates(&LocationRequest::high_accuracy())
            .await?;

        let coordinates = result.last_location().ok_or(LocationError::NoFix)?;
        self.fetch_and_render(coordinates).await
    }

    async fn fetch_and_render(&self, coordinates: Coordinates) -> Result<WeatherView, WeatherError> {
        if !is_network_available(self.platform.connectivity.as_ref()) {
            return Err(WeatherError::NetworkUnavailable);
        }

        info!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "requesting current weather"
        );

        let payload = {
            let _progress = ProgressGuard::show(self.platform.ui.as_ref());
            self.provider.get_weather(coordinates).await?
        };

        self.cache.save(&payload)?;
        self.setup_ui()?;
        Ok(self.view())
    }

    fn report(&self, e: &WeatherError) {
        if e.is_prompted() {
            return;
        }
        error!("Weather update failed: {e}");
        self.platform.ui.toast(&e.user_message());
    }
}
