//! Background permission poller.
//!
//! Refreshes the tracker immediately on spawn and then every `interval`
//! until shut down. A refresh always runs to completion before the next tick
//! is awaited, so refreshes never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::tracker::PermissionTracker;
use crate::config::OnboardingConfig;

/// Handle to a running poller. Dropping it stops polling after the current
/// refresh; call [`PollerHandle::shutdown`] to also wait for the task.
pub struct PollerHandle {
    handle: Option<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl PollerHandle {
    /// Signal the poller to stop and wait for it to exit.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Permission poller task failed: {e}");
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Spawn a background task that refreshes `tracker` every `interval`.
pub fn spawn_permission_poller(tracker: Arc<PermissionTracker>, interval: Duration) -> PollerHandle {
    let interval = if interval.is_zero() {
        warn!("Zero permission poll interval, falling back to the default");
        OnboardingConfig::default().poll_interval
    } else {
        interval
    };
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs_f64(),
            "Permission poller started"
        );

        let mut tick = tokio::time::interval(interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                // Either a shutdown signal or the handle was dropped.
                _ = shutdown_rx.changed() => {
                    info!("Permission poller shutting down");
                    return;
                }
                _ = tick.tick() => {
                    tracker.refresh().await;
                }
            }
        }
    });

    PollerHandle {
        handle: Some(handle),
        shutdown,
    }
}
