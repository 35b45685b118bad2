use async_trait::async_trait;
use std::fmt::{self, Debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    CoarseLocation,
    FineLocation,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CoarseLocation => "coarse_location",
            Permission::FineLocation => "fine_location",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested together, never one at a time.
pub const LOCATION_PERMISSIONS: [Permission; 2] =
    [Permission::CoarseLocation, Permission::FineLocation];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionReport {
    pub granted: Vec<Permission>,
    pub denied: Vec<Permission>,
    /// Set when a permission was denied before and the system wants the user told why.
    pub should_show_rationale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    RequestLocation,
    RedirectToSettings,
}

impl PermissionReport {
    pub fn all_granted(&self) -> bool {
        self.denied.is_empty() && !self.granted.is_empty()
    }

    /// Rationale-required and permanently denied both send the user to settings.
    pub fn decision(&self) -> PermissionDecision {
        if self.all_granted() {
            PermissionDecision::RequestLocation
        } else {
            PermissionDecision::RedirectToSettings
        }
    }
}

#[async_trait]
pub trait PermissionRequester: Send + Sync + Debug {
    async fn check(&self, permissions: &[Permission]) -> PermissionReport;
}
