use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use driver_onboarding::config::OnboardingConfig;
use driver_onboarding::driver::{HttpDriverApi, StaticTokenSource};
use driver_onboarding::error::{ConfigError, PermissionError};
use driver_onboarding::permissions::{
    LocationProvider, PermissionPlatform, PermissionTracker, Platform, PlatformGrant,
    PlatformPermission, identifier, spawn_permission_poller,
};
use driver_onboarding::routing::AuthRouter;

/// Permission grants supplied on the command line instead of a device.
struct FixedPermissions {
    platform: Platform,
    grants: HashMap<&'static str, PlatformGrant>,
}

impl FixedPermissions {
    /// Parse `kind=status` pairs, e.g. `location=granted,notification=denied`.
    fn parse(platform: Platform, spec: &str) -> Result<Self, ConfigError> {
        let mut grants = HashMap::new();
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let invalid = |message: String| ConfigError::InvalidValue {
                key: "DRIVER_PERMISSIONS".to_string(),
                message,
            };
            let (kind, status) = pair
                .split_once('=')
                .ok_or_else(|| invalid(format!("expected kind=status, got '{pair}'")))?;

            let probe = match kind.trim() {
                "camera" => PlatformPermission::Camera,
                "activity" => PlatformPermission::Activity,
                "location" => PlatformPermission::LocationForeground,
                "location_background" => PlatformPermission::LocationBackground,
                "notification" => PlatformPermission::Notifications,
                other => return Err(invalid(format!("unknown permission '{other}'"))),
            };
            let grant = match status.trim() {
                "granted" => PlatformGrant::Granted,
                "limited" => PlatformGrant::Limited,
                "denied" => PlatformGrant::Denied,
                "blocked" => PlatformGrant::Blocked,
                "unavailable" => PlatformGrant::Unavailable,
                other => return Err(invalid(format!("unknown status '{other}'"))),
            };
            if let Some(id) = identifier(platform, probe) {
                grants.insert(id, grant);
            }
        }
        Ok(Self { platform, grants })
    }

    fn lookup(&self, id: &str) -> PlatformGrant {
        self.grants.get(id).copied().unwrap_or(PlatformGrant::Denied)
    }
}

#[async_trait]
impl PermissionPlatform for FixedPermissions {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn check(&self, identifier: &str) -> Result<PlatformGrant, PermissionError> {
        Ok(self.lookup(identifier))
    }

    async fn request(&self, identifier: &str) -> Result<PlatformGrant, PermissionError> {
        Ok(self.lookup(identifier))
    }
}

/// No location SDK is available from a terminal.
struct NoLocationProvider;

#[async_trait]
impl LocationProvider for NoLocationProvider {
    async fn request_permission(&self) -> Result<i32, PermissionError> {
        Err(PermissionError::LocationProvider {
            reason: "no location provider in route-check".to_string(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = OnboardingConfig::from_env()?;

    let token = std::env::var("DRIVER_API_TOKEN")
        .map_err(|_| ConfigError::MissingEnvVar("DRIVER_API_TOKEN".to_string()))?;
    let permission_spec = std::env::var("DRIVER_PERMISSIONS").unwrap_or_default();

    eprintln!("route-check v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Platform: {}", config.platform);
    eprintln!("   Account API: {}", config.api_base_url);

    let platform = Arc::new(FixedPermissions::parse(config.platform, &permission_spec)?);
    let tracker = PermissionTracker::new(platform, Arc::new(NoLocationProvider));
    let poller = spawn_permission_poller(tracker.clone(), config.poll_interval);

    let drivers = Arc::new(HttpDriverApi::new(
        config.api_base_url.clone(),
        config.request_timeout,
    )?);
    let tokens = Arc::new(StaticTokenSource::new(Some(SecretString::from(token))));
    let router = AuthRouter::new(tokens, drivers, tracker.clone());

    let route = router.get_auth_route().await;
    let snapshot = tracker.snapshot().await;

    let report = serde_json::json!({
        "route": route,
        "permissions": snapshot,
        "missing_permissions": snapshot.missing_for_drive(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    poller.shutdown().await;
    Ok(())
}
