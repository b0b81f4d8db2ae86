//! Permission kinds, statuses, and the per-platform identifier table.

use serde::{Deserialize, Serialize};

/// The permission categories the app tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    Camera,
    Activity,
    Location,
    Notification,
}

impl std::fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Camera => "camera",
            Self::Activity => "activity",
            Self::Location => "location",
            Self::Notification => "notification",
        };
        write!(f, "{s}")
    }
}

/// Tri-state grant status.
///
/// `Unavailable` means the platform does not model the permission at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Unavailable,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Unavailable => "unavailable",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for PermissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(format!("unknown permission status '{other}'")),
        }
    }
}

/// Foreground and background location grants, always updated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPermission {
    pub foreground: PermissionStatus,
    pub background: PermissionStatus,
}

impl LocationPermission {
    pub fn new(foreground: PermissionStatus, background: PermissionStatus) -> Self {
        Self {
            foreground,
            background,
        }
    }

    pub fn denied() -> Self {
        Self::new(PermissionStatus::Denied, PermissionStatus::Denied)
    }

    /// Both foreground and background tracking are allowed.
    pub fn is_fully_granted(&self) -> bool {
        self.foreground.is_granted() && self.background.is_granted()
    }
}

/// Target platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ios,
    Android,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ios => write!(f, "ios"),
            Self::Android => write!(f, "android"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            other => Err(format!("unknown platform '{other}', expected ios or android")),
        }
    }
}

/// A single platform permission probe. Location is two probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformPermission {
    Camera,
    Activity,
    LocationForeground,
    LocationBackground,
    Notifications,
}

/// `(probe, ios identifier, android identifier)`.
///
/// iOS has no separate background grant; it is probed as "always" location.
const IDENTIFIERS: [(PlatformPermission, Option<&str>, Option<&str>); 5] = [
    (
        PlatformPermission::Camera,
        Some("ios.permission.CAMERA"),
        Some("android.permission.CAMERA"),
    ),
    (
        PlatformPermission::Activity,
        Some("ios.permission.MOTION"),
        Some("android.permission.ACTIVITY_RECOGNITION"),
    ),
    (
        PlatformPermission::LocationForeground,
        Some("ios.permission.LOCATION_WHEN_IN_USE"),
        Some("android.permission.ACCESS_FINE_LOCATION"),
    ),
    (
        PlatformPermission::LocationBackground,
        Some("ios.permission.LOCATION_ALWAYS"),
        Some("android.permission.ACCESS_BACKGROUND_LOCATION"),
    ),
    (
        PlatformPermission::Notifications,
        Some("ios.permission.NOTIFICATIONS"),
        Some("android.permission.POST_NOTIFICATIONS"),
    ),
];

/// Resolves a probe to a platform identifier; `None` means not modelled.
pub type IdentifierLookup = fn(Platform, PlatformPermission) -> Option<&'static str>;

/// Look up the platform identifier for a probe. `None` means the platform
/// does not model it.
pub fn identifier(platform: Platform, probe: PlatformPermission) -> Option<&'static str> {
    IDENTIFIERS
        .iter()
        .find(|(p, _, _)| *p == probe)
        .and_then(|(_, ios, android)| match platform {
            Platform::Ios => *ios,
            Platform::Android => *android,
        })
}
