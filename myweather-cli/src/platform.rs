//! Location and permission services for a machine without positioning hardware.
//!
//! A position comes from `--lat/--lon` (standing in for the satellite
//! provider) or from the `[location]` config table (standing in for the
//! network provider). Permission answers live in the `[permissions]` table.

use async_trait::async_trait;
use inquire::Confirm;
use myweather_core::{
    Config, Coordinates,
    config::PermissionsConfig,
    location::{LocationError, LocationProvider, LocationRequest, LocationResult, LocationServices},
    permission::{Permission, PermissionReport, PermissionRequester},
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct ConfiguredLocation {
    explicit: Option<Coordinates>,
    configured: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(explicit: Option<Coordinates>, configured: Option<Coordinates>) -> Self {
        Self {
            explicit,
            configured,
        }
    }
}

#[async_trait]
impl LocationServices for ConfiguredLocation {
    fn is_provider_enabled(&self, provider: LocationProvider) -> bool {
        match provider {
            LocationProvider::Gps => self.explicit.is_some(),
            LocationProvider::Network => self.configured.is_some(),
        }
    }

    async fn request_location_updates(
        &self,
        request: &LocationRequest,
    ) -> Result<LocationResult, LocationError> {
        debug!(?request, "location requested");

        // Oldest first, so an explicit position is the one reported last.
        let locations: Vec<Coordinates> =
            self.configured.into_iter().chain(self.explicit).collect();

        if locations.is_empty() {
            return Err(LocationError::NoFix);
        }
        Ok(LocationResult::new(locations))
    }
}

/// Remembers permission answers in the config file, asking once for undecided ones.
#[derive(Debug, Clone, Copy)]
pub struct StoredPermissions {
    answers: PermissionsConfig,
}

impl StoredPermissions {
    pub fn new(answers: PermissionsConfig) -> Self {
        Self { answers }
    }

    fn ask(permissions: &[Permission]) -> Option<bool> {
        let names: Vec<&str> = permissions.iter().map(Permission::as_str).collect();
        let question = format!("Allow myweather to use your location ({})?", names.join(", "));

        let answer =
            tokio::task::block_in_place(|| Confirm::new(&question).with_default(true).prompt());
        match answer {
            Ok(answer) => Some(answer),
            Err(e) => {
                warn!("Permission prompt dismissed: {e}");
                None
            }
        }
    }

    fn remember(permissions: &[Permission], granted: bool) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        for &permission in permissions {
            config.permissions.set(permission, granted);
        }
        config.save()
    }
}

#[async_trait]
impl PermissionRequester for StoredPermissions {
    async fn check(&self, permissions: &[Permission]) -> PermissionReport {
        let mut report = PermissionReport::default();
        let mut undecided = Vec::new();

        for &permission in permissions {
            match self.answers.get(permission) {
                Some(true) => report.granted.push(permission),
                Some(false) => {
                    report.denied.push(permission);
                    report.should_show_rationale = true;
                }
                None => undecided.push(permission),
            }
        }

        if undecided.is_empty() {
            return report;
        }

        match Self::ask(&undecided) {
            Some(granted) => {
                if let Err(e) = Self::remember(&undecided, granted) {
                    warn!("Could not save permission answer: {e:#}");
                }
                if granted {
                    report.granted.extend(undecided);
                } else {
                    report.denied.extend(undecided);
                }
            }
            None => report.denied.extend(undecided),
        }

        report
    }
}
