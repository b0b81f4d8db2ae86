//! Collaborator traits for the device permission API and location provider.

use async_trait::async_trait;

use super::kinds::{LocationPermission, PermissionStatus, Platform};
use crate::error::PermissionError;

/// Raw answer from the platform permission API, before collapsing to the
/// tri-state the rest of the crate uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformGrant {
    Granted,
    /// Partial grant (e.g. limited photo access, provisional notifications).
    Limited,
    /// Not yet decided or denied once; a request will prompt.
    Denied,
    /// Permanently denied; a request will not prompt.
    Blocked,
    Unavailable,
}

impl From<PlatformGrant> for PermissionStatus {
    fn from(grant: PlatformGrant) -> Self {
        match grant {
            PlatformGrant::Granted => PermissionStatus::Granted,
            PlatformGrant::Unavailable => PermissionStatus::Unavailable,
            PlatformGrant::Limited | PlatformGrant::Denied | PlatformGrant::Blocked => {
                PermissionStatus::Denied
            }
        }
    }
}

/// Device permission API, keyed by platform identifier strings.
#[async_trait]
pub trait PermissionPlatform: Send + Sync {
    /// Which platform family this device belongs to.
    fn platform(&self) -> Platform;

    /// Read the current grant without prompting.
    async fn check(&self, identifier: &str) -> Result<PlatformGrant, PermissionError>;

    /// Prompt the user if the permission is still undecided.
    async fn request(&self, identifier: &str) -> Result<PlatformGrant, PermissionError>;
}

/// Authorization level reported by the location-tracking provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationAuthorization {
    Denied,
    WhenInUse,
    Always,
    Unknown(i32),
}

impl LocationAuthorization {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Denied,
            1 => Self::WhenInUse,
            3 => Self::Always,
            other => Self::Unknown(other),
        }
    }

    /// Collapse to a location pair. Anything short of "always" is treated
    /// as background missing, including an outright denial.
    pub fn to_location_permission(self) -> LocationPermission {
        match self {
            Self::Always => {
                LocationPermission::new(PermissionStatus::Granted, PermissionStatus::Granted)
            }
            _ => LocationPermission::new(PermissionStatus::Granted, PermissionStatus::Denied),
        }
    }
}

/// Background location-tracking SDK that owns its own permission flow.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Run the provider's permission prompt and return its authorization code.
    async fn request_permission(&self) -> Result<i32, PermissionError>;
}
