use anyhow::Context;
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode};
use myweather_core::{Config, Coordinates, permission::LOCATION_PERMISSIONS};

/// Interactive setup of the API key, default location and location permissions.
pub fn run() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let prompt = if config.api_key().is_some() {
        "OpenWeather API key (leave empty to keep the current one):"
    } else {
        "OpenWeather API key:"
    };
    let api_key = Password::new(prompt)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("API key prompt aborted")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let latitude = CustomType::<f64>::new("Default latitude (Esc to skip):")
        .with_error_message("Please enter a number, e.g. 51.5")
        .prompt_skippable()
        .context("Latitude prompt aborted")?;
    if let Some(latitude) = latitude {
        let longitude = CustomType::<f64>::new("Default longitude:")
            .with_error_message("Please enter a number, e.g. -0.12")
            .prompt()
            .context("Longitude prompt aborted")?;
        config.set_location(Coordinates::new(latitude, longitude));
    }

    let granted = Confirm::new("Allow myweather to use your location (coarse and fine)?")
        .with_default(true)
        .prompt()
        .context("Permission prompt aborted")?;
    for permission in LOCATION_PERMISSIONS {
        config.permissions.set(permission, granted);
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}
