use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use myweather_core::{
    Config, Coordinates, FileStore, Platform, Presenter, WeatherApp, WeatherCache, WeatherView,
    connectivity::SystemConnectivity, provider::provider_from_config, ui::Ui,
};
use tracing::debug;

use crate::{
    configure,
    platform::{ConfiguredLocation, StoredPermissions},
    terminal::TerminalUi,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "myweather", version, about = "Current weather where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key, a default location and the location permissions.
    Configure,

    /// Show cached weather, then check location and fetch fresh data.
    Show {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Fetch fresh weather without re-checking location settings or permissions.
    Refresh {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show the last fetched weather without going online.
    Cached,
}

/// A one-off position fix given on the command line.
#[derive(Debug, Clone, Copy, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,
}

impl LocationArgs {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lon?))
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure::run()?,
            Command::Show { location } => {
                let app = build_app(location)?;
                // Failures were already shown to the user.
                if let Err(e) = app.launch().await {
                    debug!("launch ended early: {e}");
                }
            }
            Command::Refresh { location } => {
                let app = build_app(location)?;
                if let Err(e) = app.refresh().await {
                    debug!("refresh ended early: {e}");
                }
            }
            Command::Cached => show_cached()?,
        }

        Ok(())
    }
}

fn open_cache() -> anyhow::Result<WeatherCache> {
    let dir = Config::data_dir()?;
    Ok(WeatherCache::new(Box::new(FileStore::in_dir(&dir))))
}

fn build_app(location: LocationArgs) -> anyhow::Result<WeatherApp> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let platform = Platform {
        connectivity: Box::new(SystemConnectivity::new()),
        location: Box::new(ConfiguredLocation::new(
            location.coordinates(),
            config.location.map(Coordinates::from),
        )),
        permissions: Box::new(StoredPermissions::new(config.permissions)),
        ui: Box::new(TerminalUi::new()),
    };

    Ok(WeatherApp::new(provider, open_cache()?, platform))
}

fn show_cached() -> anyhow::Result<()> {
    let cache = open_cache()?;
    let cached = cache.load().context("Failed to read cached weather")?;

    let mut view = WeatherView::default();
    let rendered = Presenter::local()
        .present(cached.as_deref(), &mut view)
        .context("Cached weather is unreadable")?;

    if rendered {
        TerminalUi::new().render(&view);
    } else {
        println!("No weather cached yet. Run `myweather show` first.");
    }

    Ok(())
}
