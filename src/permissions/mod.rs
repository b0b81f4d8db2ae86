//! Device permission tracking.
//!
//! The tracker holds the best-known grant for each permission kind; the
//! poller keeps it fresh in the background so routing only ever reads it.

pub mod kinds;
pub mod platform;
pub mod poller;
pub mod snapshot;
pub mod tracker;

pub use kinds::{
    IdentifierLookup, LocationPermission, PermissionKind, PermissionStatus, Platform,
    PlatformPermission, identifier,
};
pub use platform::{LocationAuthorization, LocationProvider, PermissionPlatform, PlatformGrant};
pub use poller::{PollerHandle, spawn_permission_poller};
pub use snapshot::PermissionSnapshot;
pub use tracker::PermissionTracker;
