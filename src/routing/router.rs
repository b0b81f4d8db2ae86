//! AuthRouter: the single entry point screens call to decide where to go.

use std::sync::Arc;

use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::chain::evaluate;
use super::gates::GateContext;
use super::route::AuthRoute;
use crate::driver::{DriverApi, TokenSource};
use crate::error::{Error, Result};
use crate::permissions::PermissionTracker;

/// Decides which onboarding step (or the main app) a driver sees next.
pub struct AuthRouter {
    tokens: Arc<dyn TokenSource>,
    drivers: Arc<dyn DriverApi>,
    permissions: Arc<PermissionTracker>,
}

impl AuthRouter {
    pub fn new(
        tokens: Arc<dyn TokenSource>,
        drivers: Arc<dyn DriverApi>,
        permissions: Arc<PermissionTracker>,
    ) -> Self {
        Self {
            tokens,
            drivers,
            permissions,
        }
    }

    /// Compute the next route. Never fails: any error routes to Login.
    pub async fn get_auth_route(&self) -> AuthRoute {
        let span = info_span!("auth_route", decision_id = %Uuid::new_v4());
        async {
            match self.decide().await {
                Ok(route) => {
                    info!(route = %route, "Routing decision made");
                    route
                }
                Err(Error::Routing(e)) if e.is_data_integrity() => {
                    error!("Driver record failed integrity check, routing to login: {e}");
                    AuthRoute::login()
                }
                Err(e) => {
                    warn!("Routing decision failed, routing to login: {e}");
                    AuthRoute::login()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn decide(&self) -> Result<AuthRoute> {
        let Some(token) = self.tokens.token().await else {
            debug!("No auth token present");
            return Ok(AuthRoute::login());
        };

        let Some(driver) = self.drivers.fetch_driver(&token).await? else {
            info!("Account service returned no driver for token");
            return Ok(AuthRoute::login());
        };

        let context = self.capture_permissions().await;
        let decision = evaluate(&driver, &context)?;

        match decision.stopped_at {
            Some(gate) => debug!(driver_id = %driver.id, gate = %gate, "Onboarding incomplete"),
            None => debug!(driver_id = %driver.id, "All onboarding gates passed"),
        }
        Ok(decision.route)
    }

    /// Read location and notification once for the whole decision.
    ///
    /// Each is probed fresh through the tracker; if a probe fails the
    /// tracker's last-known value is used instead.
    async fn capture_permissions(&self) -> GateContext {
        let location = match self.permissions.check_location().await {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!("Location probe failed, using last known value: {e}");
                None
            }
        };
        let notification = match self.permissions.check_notification().await {
            Ok(status) => Some(status),
            Err(e) => {
                warn!("Notification probe failed, using last known value: {e}");
                None
            }
        };

        if location.is_some() && notification.is_some() {
            return GateContext {
                location,
                notification,
            };
        }

        let (known_location, known_notification) =
            self.permissions.snapshot().await.location_and_notification();
        GateContext {
            location: location.or(known_location),
            notification: notification.or(known_notification),
        }
    }
}
