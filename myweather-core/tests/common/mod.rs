//! Fake device services shared by the integration tests.
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use myweather_core::{
    Coordinates, OpenWeatherProvider, Platform, WeatherApp, WeatherCache,
    connectivity::{Connectivity, Transport},
    location::{LocationError, LocationProvider, LocationRequest, LocationResult, LocationServices},
    permission::{LOCATION_PERMISSIONS, Permission, PermissionReport, PermissionRequester},
    presenter::WeatherView,
    ui::{Dialog, SettingsScreen, Ui},
};

pub const API_KEY: &str = "TEST_KEY";

pub fn london_json() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.13, "lat": 51.51},
        "weather": [
            {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"},
            {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}
        ],
        "base": "stations",
        "main": {"temp": 12.5, "feels_like": 11.84, "temp_min": 11.0, "temp_max": 14.0,
                 "pressure": 1008, "humidity": 81},
        "visibility": 9000,
        "wind": {"speed": 6.2, "deg": 230},
        "clouds": {"all": 90},
        "dt": 1697450000,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1697437462, "sunset": 1697475400},
        "timezone": 3600,
        "id": 2643743,
        "name": "London",
        "cod": 200
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Toast(String),
    Dialog(&'static str),
    Settings(SettingsScreen),
    ShowProgress,
    HideProgress,
    Render(WeatherView),
}

#[derive(Debug, Default)]
pub struct UiLog {
    events: Mutex<Vec<UiEvent>>,
    visible: AtomicUsize,
    max_visible: AtomicUsize,
}

impl UiLog {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Toast(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn renders(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, UiEvent::Render(_)))
            .count()
    }

    pub fn visible_progress(&self) -> usize {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn max_visible_progress(&self) -> usize {
        self.max_visible.load(Ordering::SeqCst)
    }

    fn push(&self, event: UiEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Debug)]
pub struct RecordingUi {
    log: Arc<UiLog>,
    answer: bool,
}

impl Ui for RecordingUi {
    fn toast(&self, message: &str) {
        self.log.push(UiEvent::Toast(message.to_string()));
    }

    fn confirm(&self, dialog: &Dialog) -> bool {
        self.log.push(UiEvent::Dialog(dialog.title));
        self.answer
    }

    fn open_settings(&self, screen: SettingsScreen) {
        self.log.push(UiEvent::Settings(screen));
    }

    fn show_progress(&self) {
        let now = self.log.visible.fetch_add(1, Ordering::SeqCst) + 1;
        self.log.max_visible.fetch_max(now, Ordering::SeqCst);
        self.log.push(UiEvent::ShowProgress);
    }

    fn hide_progress(&self) {
        self.log.visible.fetch_sub(1, Ordering::SeqCst);
        self.log.push(UiEvent::HideProgress);
    }

    fn render(&self, view: &WeatherView) {
        self.log.push(UiEvent::Render(view.clone()));
    }
}

#[derive(Debug)]
pub struct FakeConnectivity(pub Vec<Transport>);

impl Connectivity for FakeConnectivity {
    fn active_transports(&self) -> Vec<Transport> {
        self.0.clone()
    }
}

#[derive(Debug)]
pub struct FakeLocation {
    pub enabled: bool,
    pub fix: Option<Coordinates>,
}

#[async_trait]
impl LocationServices for FakeLocation {
    fn is_provider_enabled(&self, provider: LocationProvider) -> bool {
        self.enabled && provider == LocationProvider::Network
    }

    async fn request_location_updates(
        &self,
        _request: &LocationRequest,
    ) -> Result<LocationResult, LocationError> {
        match self.fix {
            Some(fix) => Ok(LocationResult::new(vec![Coordinates::new(0.0, 0.0), fix])),
            None => Err(LocationError::Unavailable("no provider answered".into())),
        }
    }
}

#[derive(Debug)]
pub struct FakePermissions(pub PermissionReport);

#[async_trait]
impl PermissionRequester for FakePermissions {
    async fn check(&self, permissions: &[Permission]) -> PermissionReport {
        assert_eq!(permissions, LOCATION_PERMISSIONS.as_slice());
        self.0.clone()
    }
}

pub fn granted() -> PermissionReport {
    PermissionReport {
        granted: LOCATION_PERMISSIONS.to_vec(),
        ..Default::default()
    }
}

pub fn denied() -> PermissionReport {
    PermissionReport {
        granted: Vec::new(),
        denied: LOCATION_PERMISSIONS.to_vec(),
        should_show_rationale: true,
    }
}

/// Builder for a [`WeatherApp`] wired to fakes.
pub struct Harness {
    pub base_url: String,
    pub online: bool,
    pub location_enabled: bool,
    pub fix: Option<Coordinates>,
    pub permissions: PermissionReport,
    pub confirm_dialogs: bool,
    pub cache: WeatherCache,
}

impl Harness {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            online: true,
            location_enabled: true,
            fix: Some(Coordinates::new(51.51, -0.13)),
            permissions: granted(),
            confirm_dialogs: true,
            cache: WeatherCache::in_memory(),
        }
    }

    pub fn build(self) -> (WeatherApp, Arc<UiLog>) {
        let log = Arc::new(UiLog::default());
        let transports = if self.online {
            vec![Transport::Loopback, Transport::Wifi]
        } else {
            vec![Transport::Loopback]
        };

        let platform = Platform {
            connectivity: Box::new(FakeConnectivity(transports)),
            location: Box::new(FakeLocation {
                enabled: self.location_enabled,
                fix: self.fix,
            }),
            permissions: Box::new(FakePermissions(self.permissions)),
            ui: Box::new(RecordingUi {
                log: Arc::clone(&log),
                answer: self.confirm_dialogs,
            }),
        };

        let provider = OpenWeatherProvider::new(API_KEY).with_base_url(self.base_url);
        let app = WeatherApp::new(Box::new(provider), self.cache, platform);
        (app, log)
    }
}
