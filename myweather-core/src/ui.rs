use std::fmt::Debug;

use crate::presenter::WeatherView;

/// Settings screens the app can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScreen {
    LocationSource,
    ApplicationDetails,
}

/// A blocking two-button confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm: &'static str,
    pub cancel: &'static str,
}

impl Dialog {
    pub const LOCATIONS_DISABLED: Dialog = Dialog {
        title: "Locations Disabled",
        message: "Your location provider is turned off. Turn on locations to receive accurate weather data?",
        confirm: "Ok",
        cancel: "Cancel",
    };

    pub const PERMISSIONS_REQUIRED: Dialog = Dialog {
        title: "Permissions Required",
        message: "This app requires Coarse and Fine location to provide you weather service. Please enable permissions from the Settings.",
        confirm: "OK",
        cancel: "Cancel",
    };
}

/// The single screen and its transient widgets.
pub trait Ui: Send + Sync + Debug {
    /// Short-lived notice.
    fn toast(&self, message: &str);

    /// Returns `true` when the confirm button was chosen.
    fn confirm(&self, dialog: &Dialog) -> bool;

    fn open_settings(&self, screen: SettingsScreen);

    fn show_progress(&self);

    fn hide_progress(&self);

    fn render(&self, view: &WeatherView);
}

/// Shows the progress indicator until dropped.
#[must_use]
pub struct ProgressGuard<'a> {
    ui: &'a dyn Ui,
}

impl<'a> ProgressGuard<'a> {
    pub fn show(ui: &'a dyn Ui) -> Self {
        ui.show_progress();
        Self { ui }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.ui.hide_progress();
    }
}
