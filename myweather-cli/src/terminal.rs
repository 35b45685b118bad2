use inquire::Select;
use myweather_core::{
    Config, WeatherView,
    ui::{Dialog, SettingsScreen, Ui},
};
use tracing::{debug, warn};

/// Dialogs on stdin, notices on stderr, the weather screen on stdout.
#[derive(Debug, Default)]
pub struct TerminalUi;

impl TerminalUi {
    pub fn new() -> Self {
        Self
    }

    fn config_location() -> String {
        Config::config_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the config file".to_string())
    }
}

impl Ui for TerminalUi {
    fn toast(&self, message: &str) {
        eprintln!("{message}");
    }

    fn confirm(&self, dialog: &Dialog) -> bool {
        let question = format!("{}\n{}", dialog.title, dialog.message);
        let choice = tokio::task::block_in_place(|| {
            Select::new(&question, vec![dialog.confirm, dialog.cancel]).prompt()
        });
        match choice {
            Ok(choice) => choice == dialog.confirm,
            Err(e) => {
                warn!("Dialog '{}' dismissed: {e}", dialog.title);
                false
            }
        }
    }

    fn open_settings(&self, screen: SettingsScreen) {
        let path = Self::config_location();
        match screen {
            SettingsScreen::LocationSource => eprintln!(
                "Set a location under [location] in {path}, run `myweather configure`, \
                 or pass --lat and --lon."
            ),
            SettingsScreen::ApplicationDetails => eprintln!(
                "Location permissions are stored under [permissions] in {path}. \
                 Set them to true or run `myweather configure`."
            ),
        }
    }

    fn show_progress(&self) {
        eprintln!("Please wait...");
    }

    fn hide_progress(&self) {
        debug!("progress hidden");
    }

    fn render(&self, view: &WeatherView) {
        println!("{}", format_view(view));
    }
}

fn format_view(view: &WeatherView) -> String {
    let rows = [
        ("Temperature", format!("{} ({})", view.current_temp, view.feels_like)),
        ("Min / Max", format!("{} / {}", view.min_temp, view.max_temp)),
        ("Pressure", view.pressure.clone()),
        ("Humidity", view.humidity.clone()),
        ("Wind", format!("{} from {}", view.wind_speed, view.wind_direction)),
        ("Sunrise", view.sunrise.clone()),
        ("Sunset", view.sunset.clone()),
    ];

    let mut out = format!("{}: {} [{}]", view.city_name, view.description, view.icon);
    for (label, value) in rows {
        out.push_str(&format!("\n  {label:<12} {value}"));
    }
    out
}
