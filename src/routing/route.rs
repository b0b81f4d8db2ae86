//! Routing destinations.

use serde::{Deserialize, Serialize};

/// Screens in the main application area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeScreen {
    DriveStack,
}

/// Screens in the onboarding/auth area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthScreen {
    Login,
    Approval,
    LoadUnloadScreen,
    AgreementsScreen,
    UpdateCargoCapacityScreen,
    SetupWalletScreen,
    Permissions,
}

/// Where the app should navigate next.
///
/// Serializes as `{"area": "Home", "screen": "DriveStack"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "area", content = "screen")]
pub enum AuthRoute {
    Home(HomeScreen),
    Auth(AuthScreen),
}

impl AuthRoute {
    pub fn home() -> Self {
        Self::Home(HomeScreen::DriveStack)
    }

    pub fn auth(screen: AuthScreen) -> Self {
        Self::Auth(screen)
    }

    pub fn login() -> Self {
        Self::Auth(AuthScreen::Login)
    }
}

impl std::fmt::Display for AuthRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home(screen) => write!(f, "Home/{screen:?}"),
            Self::Auth(screen) => write!(f, "Auth/{screen:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_wire_shape() {
        let json = serde_json::to_value(AuthRoute::home()).unwrap();
        assert_eq!(json, serde_json::json!({"area": "Home", "screen": "DriveStack"}));
    }

    #[test]
    fn auth_wire_shape() {
        let json = serde_json::to_value(AuthRoute::auth(AuthScreen::UpdateCargoCapacityScreen)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"area": "Auth", "screen": "UpdateCargoCapacityScreen"})
        );

        let parsed: AuthRoute =
            serde_json::from_value(serde_json::json!({"area": "Auth", "screen": "Login"})).unwrap();
        assert_eq!(parsed, AuthRoute::login());
    }

    #[test]
    fn display_is_area_slash_screen() {
        assert_eq!(AuthRoute::home().to_string(), "Home/DriveStack");
        assert_eq!(
            AuthRoute::auth(AuthScreen::SetupWalletScreen).to_string(),
            "Auth/SetupWalletScreen"
        );
    }
}
