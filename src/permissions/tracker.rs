//! Permission tracker: owns the process-wide permission snapshot.
//!
//! Every check/request updates exactly one kind (or the location pair) under
//! a single write lock, then broadcasts the new snapshot to subscribers.
//! Readers always get an owned copy.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use super::kinds::{
    IdentifierLookup, LocationPermission, PermissionKind, PermissionStatus, PlatformPermission,
    identifier,
};
use super::platform::{LocationAuthorization, LocationProvider, PermissionPlatform};
use super::snapshot::PermissionSnapshot;
use crate::error::PermissionError;

/// Broadcast capacity for snapshot updates. Slow subscribers skip ahead.
const DEFAULT_BROADCAST_CAPACITY: usize = 32;

/// Tracks the device's grant status for every permission kind.
pub struct PermissionTracker {
    platform: Arc<dyn PermissionPlatform>,
    location_provider: Arc<dyn LocationProvider>,
    identifiers: IdentifierLookup,
    snapshot: RwLock<PermissionSnapshot>,
    tx: broadcast::Sender<PermissionSnapshot>,
}

impl PermissionTracker {
    pub fn new(
        platform: Arc<dyn PermissionPlatform>,
        location_provider: Arc<dyn LocationProvider>,
    ) -> Arc<Self> {
        Self::with_identifiers(platform, location_provider, identifier)
    }

    /// Build a tracker that resolves platform identifiers through `identifiers`
    /// instead of the built-in table.
    pub fn with_identifiers(
        platform: Arc<dyn PermissionPlatform>,
        location_provider: Arc<dyn LocationProvider>,
        identifiers: IdentifierLookup,
    ) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Arc::new(Self {
            platform,
            location_provider,
            identifiers,
            snapshot: RwLock::new(PermissionSnapshot::default()),
            tx,
        })
    }

    /// Subscribe to snapshot updates. Each write sends the full new snapshot.
    pub fn subscribe(&self) -> broadcast::Receiver<PermissionSnapshot> {
        self.tx.subscribe()
    }

    /// Owned copy of the current snapshot.
    pub async fn snapshot(&self) -> PermissionSnapshot {
        self.snapshot.read().await.clone()
    }

    // ── Checks (no prompt) ──────────────────────────────────────────

    pub async fn check_camera(&self) -> Result<PermissionStatus, PermissionError> {
        let status = self.probe(PlatformPermission::Camera).await?;
        self.store(|s| s.camera = Some(status)).await;
        Ok(status)
    }

    pub async fn check_activity(&self) -> Result<PermissionStatus, PermissionError> {
        let status = self.probe(PlatformPermission::Activity).await?;
        self.store(|s| s.activity = Some(status)).await;
        Ok(status)
    }

    /// Check foreground and background location. The pair is only stored
    /// once both probes succeed.
    pub async fn check_location(&self) -> Result<LocationPermission, PermissionError> {
        let foreground = self.probe(PlatformPermission::LocationForeground).await?;
        let background = self.probe(PlatformPermission::LocationBackground).await?;
        let pair = LocationPermission::new(foreground, background);
        self.store(|s| s.location = Some(pair)).await;
        Ok(pair)
    }

    pub async fn check_notification(&self) -> Result<PermissionStatus, PermissionError> {
        let status = self.probe(PlatformPermission::Notifications).await?;
        self.store(|s| s.notification = Some(status)).await;
        Ok(status)
    }

    // ── Requests (may prompt, never fail) ───────────────────────────

    pub async fn request_camera(&self) -> PermissionStatus {
        let status = self.prompt(PlatformPermission::Camera).await;
        self.store(|s| s.camera = Some(status)).await;
        status
    }

    pub async fn request_activity_permission(&self) -> PermissionStatus {
        let status = self.prompt(PlatformPermission::Activity).await;
        self.store(|s| s.activity = Some(status)).await;
        status
    }

    pub async fn request_notification_permission(&self) -> PermissionStatus {
        let status = self.prompt(PlatformPermission::Notifications).await;
        self.store(|s| s.notification = Some(status)).await;
        status
    }

    /// Run the location provider's permission flow.
    ///
    /// Only an "always" authorization yields a full grant; every other code
    /// is stored as foreground granted, background denied. A provider error
    /// is stored as both denied.
    pub async fn request_location_permission(&self) -> LocationPermission {
        let pair = match self.location_provider.request_permission().await {
            Ok(code) => {
                let authorization = LocationAuthorization::from_code(code);
                debug!(code, ?authorization, "Location provider answered");
                authorization.to_location_permission()
            }
            Err(e) => {
                warn!("Location permission request failed: {e}");
                LocationPermission::denied()
            }
        };
        self.store(|s| s.location = Some(pair)).await;
        pair
    }

    // ── Refresh ─────────────────────────────────────────────────────

    /// Check every kind in turn. A failing check is logged and skipped so the
    /// remaining kinds still update.
    pub async fn refresh(&self) {
        if let Err(e) = self.check_camera().await {
            self.log_refresh_failure(PermissionKind::Camera, &e);
        }
        if let Err(e) = self.check_activity().await {
            self.log_refresh_failure(PermissionKind::Activity, &e);
        }
        if let Err(e) = self.check_location().await {
            self.log_refresh_failure(PermissionKind::Location, &e);
        }
        if let Err(e) = self.check_notification().await {
            self.log_refresh_failure(PermissionKind::Notification, &e);
        }
    }

    fn log_refresh_failure(&self, kind: PermissionKind, error: &PermissionError) {
        warn!(kind = %kind, "Permission refresh check failed: {error}");
    }

    // ── Internals ───────────────────────────────────────────────────

    async fn probe(&self, probe: PlatformPermission) -> Result<PermissionStatus, PermissionError> {
        let Some(id) = (self.identifiers)(self.platform.platform(), probe) else {
            return Ok(PermissionStatus::Unavailable);
        };
        let grant = self.platform.check(id).await?;
        Ok(grant.into())
    }

    /// Prompt for a permission. A failed prompt surfaces as `Denied`.
    async fn prompt(&self, probe: PlatformPermission) -> PermissionStatus {
        let Some(id) = (self.identifiers)(self.platform.platform(), probe) else {
            return PermissionStatus::Unavailable;
        };
        match self.platform.request(id).await {
            Ok(grant) => grant.into(),
            Err(e) => {
                warn!(permission = id, "Permission request failed: {e}");
                PermissionStatus::Denied
            }
        }
    }

    async fn store(&self, update: impl FnOnce(&mut PermissionSnapshot)) {
        let updated = {
            let mut snapshot = self.snapshot.write().await;
            update(&mut snapshot);
            snapshot.checked_at = Some(Utc::now());
            snapshot.clone()
        };
        // No subscribers is fine.
        let _ = self.tx.send(updated);
    }
}
