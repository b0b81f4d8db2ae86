//! Driver onboarding core: permission tracking and auth routing.

pub mod config;
pub mod driver;
pub mod error;
pub mod permissions;
pub mod routing;

pub use config::OnboardingConfig;
pub use error::{Error, Result};
pub use routing::{AuthRoute, AuthRouter};
