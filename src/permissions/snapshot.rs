//! Point-in-time view of every tracked permission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kinds::{LocationPermission, PermissionKind, PermissionStatus};

/// Best-known status of every permission kind. `None` = never observed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    pub camera: Option<PermissionStatus>,
    pub activity: Option<PermissionStatus>,
    pub location: Option<LocationPermission>,
    pub notification: Option<PermissionStatus>,
    /// When any kind was last written.
    pub checked_at: Option<DateTime<Utc>>,
}

impl PermissionSnapshot {
    /// The two values the permissions gate reads.
    pub fn location_and_notification(
        &self,
    ) -> (Option<LocationPermission>, Option<PermissionStatus>) {
        (self.location, self.notification)
    }

    /// Kinds that keep a driver out of the drive stack, in the order the
    /// Permissions screen should ask for them.
    pub fn missing_for_drive(&self) -> Vec<PermissionKind> {
        let mut missing = Vec::new();
        if !self.location.is_some_and(|l| l.is_fully_granted()) {
            missing.push(PermissionKind::Location);
        }
        if !self.notification.is_some_and(|n| n.is_granted()) {
            missing.push(PermissionKind::Notification);
        }
        missing
    }
}
