//! The individual onboarding gates.
//!
//! Each gate is a pure check of the driver record (and, for the last gate,
//! the captured permission values). A gate either lets the driver through
//! with a tentative route or stops the chain with a definite one.

use super::route::{AuthRoute, AuthScreen};
use crate::driver::{Driver, DriverState};
use crate::error::RoutingError;
use crate::permissions::{LocationPermission, PermissionStatus};

/// Permission values captured once at the start of a routing decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateContext {
    pub location: Option<LocationPermission>,
    pub notification: Option<PermissionStatus>,
}

/// Result of evaluating one gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Passed; carry this tentative route to the next gate.
    Continue(AuthRoute),
    /// Failed; this is the decision.
    Stop(AuthRoute),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    State,
    Documents,
    LoadUnload,
    Agreements,
    CargoCapacity,
    Wallet,
    Permissions,
}

impl Gate {
    /// Evaluation order. Every decision walks this list front to back.
    pub const ORDER: [Gate; 7] = [
        Gate::State,
        Gate::Documents,
        Gate::LoadUnload,
        Gate::Agreements,
        Gate::CargoCapacity,
        Gate::Wallet,
        Gate::Permissions,
    ];

    pub fn apply(
        self,
        driver: &Driver,
        context: &GateContext,
        tentative: AuthRoute,
    ) -> Result<GateOutcome, RoutingError> {
        match self {
            Gate::State => state_gate(driver),
            Gate::Documents => Ok(documents_gate(driver, tentative)),
            Gate::LoadUnload => Ok(load_unload_gate(driver, tentative)),
            Gate::Agreements => Ok(agreements_gate(driver)),
            Gate::CargoCapacity => Ok(cargo_capacity_gate(driver)),
            Gate::Wallet => Ok(wallet_gate(driver)),
            Gate::Permissions => Ok(permissions_gate(context)),
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Gate::State => "state",
            Gate::Documents => "documents",
            Gate::LoadUnload => "load_unload",
            Gate::Agreements => "agreements",
            Gate::CargoCapacity => "cargo_capacity",
            Gate::Wallet => "wallet",
            Gate::Permissions => "permissions",
        };
        write!(f, "{s}")
    }
}

fn state_gate(driver: &Driver) -> Result<GateOutcome, RoutingError> {
    match &driver.state {
        DriverState::Registered => Ok(GateOutcome::Continue(AuthRoute::home())),
        DriverState::Rejected
        | DriverState::Disabled
        | DriverState::Applying
        | DriverState::Screening
        | DriverState::PendingApproval
        | DriverState::Approved => Ok(GateOutcome::Stop(AuthRoute::auth(AuthScreen::Approval))),
        DriverState::Unrecognized(state) => Err(RoutingError::InvalidDriverState {
            state: state.clone(),
        }),
    }
}

fn documents_gate(driver: &Driver, tentative: AuthRoute) -> GateOutcome {
    if driver.needs_updated_documents() {
        GateOutcome::Stop(AuthRoute::auth(AuthScreen::Approval))
    } else {
        GateOutcome::Continue(tentative)
    }
}

fn load_unload_gate(driver: &Driver, tentative: AuthRoute) -> GateOutcome {
    match driver.can_load {
        Some(_) => GateOutcome::Continue(tentative),
        None => GateOutcome::Stop(AuthRoute::auth(AuthScreen::LoadUnloadScreen)),
    }
}

// The agreements, cargo and wallet gates pass with Home regardless of the
// incoming tentative route; documents and load/unload pass it through.

fn agreements_gate(driver: &Driver) -> GateOutcome {
    if driver.pending_agreements.is_empty() {
        GateOutcome::Continue(AuthRoute::home())
    } else {
        GateOutcome::Stop(AuthRoute::auth(AuthScreen::AgreementsScreen))
    }
}

fn cargo_capacity_gate(driver: &Driver) -> GateOutcome {
    if driver.has_cargo_capacity() {
        GateOutcome::Continue(AuthRoute::home())
    } else {
        GateOutcome::Stop(AuthRoute::auth(AuthScreen::UpdateCargoCapacityScreen))
    }
}

fn wallet_gate(driver: &Driver) -> GateOutcome {
    if driver.wallet_state.is_usable() {
        GateOutcome::Continue(AuthRoute::home())
    } else {
        GateOutcome::Stop(AuthRoute::auth(AuthScreen::SetupWalletScreen))
    }
}

fn permissions_gate(context: &GateContext) -> GateOutcome {
    let location_ok = context.location.is_some_and(|l| l.is_fully_granted());
    let notification_ok = context.notification.is_some_and(|n| n.is_granted());
    if location_ok && notification_ok {
        GateOutcome::Continue(AuthRoute::home())
    } else {
        GateOutcome::Stop(AuthRoute::auth(AuthScreen::Permissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Agreement, DocumentStatus, DriverDocument, Vehicle, WalletState};

    fn driver() -> Driver {
        Driver {
            id: "d-1".into(),
            state: DriverState::Registered,
            can_load: Some(false),
            pending_agreements: vec![],
            wallet_state: WalletState::Active,
            vehicle: Some(Vehicle {
                vehicle_class: Some(1),
                capacity_height: Some(50.0),
                capacity_width: Some(50.0),
                capacity_length: Some(80.0),
                capacity_door_height: Some(45.0),
                capacity_door_width: Some(45.0),
                capacity_between_wheel_wells: None,
                capacity_weight: None,
            }),
            documents: vec![],
        }
    }

    fn granted() -> GateContext {
        GateContext {
            location: Some(LocationPermission::new(
                PermissionStatus::Granted,
                PermissionStatus::Granted,
            )),
            notification: Some(PermissionStatus::Granted),
        }
    }

    fn apply(gate: Gate, driver: &Driver, context: &GateContext) -> GateOutcome {
        gate.apply(driver, context, AuthRoute::home()).unwrap()
    }

    #[test]
    fn order_starts_with_state_and_ends_with_permissions() {
        assert_eq!(Gate::ORDER.first(), Some(&Gate::State));
        assert_eq!(Gate::ORDER.last(), Some(&Gate::Permissions));
    }

    #[test]
    fn state_gate_only_registered_continues() {
        let stopped = [
            DriverState::Applying,
            DriverState::Screening,
            DriverState::PendingApproval,
            DriverState::Approved,
            DriverState::Rejected,
            DriverState::Disabled,
        ];
        for state in stopped {
            let d = Driver { state: state.clone(), ..driver() };
            assert_eq!(
                apply(Gate::State, &d, &granted()),
                GateOutcome::Stop(AuthRoute::auth(AuthScreen::Approval)),
                "{state}"
            );
        }
        assert_eq!(
            apply(Gate::State, &driver(), &granted()),
            GateOutcome::Continue(AuthRoute::home())
        );
    }

    #[test]
    fn state_gate_rejects_unrecognized_state() {
        let d = Driver {
            state: DriverState::Unrecognized("archived".into()),
            ..driver()
        };
        let err = Gate::State.apply(&d, &granted(), AuthRoute::home()).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn documents_gate_preserves_tentative_route() {
        let tentative = AuthRoute::auth(AuthScreen::SetupWalletScreen);
        assert_eq!(
            Gate::Documents.apply(&driver(), &granted(), tentative).unwrap(),
            GateOutcome::Continue(tentative)
        );

        let d = Driver {
            documents: vec![DriverDocument {
                kind: "licence".into(),
                status: DocumentStatus::Rejected,
            }],
            ..driver()
        };
        assert_eq!(
            apply(Gate::Documents, &d, &granted()),
            GateOutcome::Stop(AuthRoute::auth(AuthScreen::Approval))
        );
    }

    #[test]
    fn load_unload_gate_needs_an_answer() {
        let tentative = AuthRoute::auth(AuthScreen::Permissions);
        for answer in [true, false] {
            let d = Driver { can_load: Some(answer), ..driver() };
            assert_eq!(
                Gate::LoadUnload.apply(&d, &granted(), tentative).unwrap(),
                GateOutcome::Continue(tentative)
            );
        }
        let d = Driver { can_load: None, ..driver() };
        assert_eq!(
            apply(Gate::LoadUnload, &d, &granted()),
            GateOutcome::Stop(AuthRoute::auth(AuthScreen::LoadUnloadScreen))
        );
    }

    #[test]
    fn agreements_gate_resets_to_home_on_pass() {
        let tentative = AuthRoute::auth(AuthScreen::Permissions);
        assert_eq!(
            Gate::Agreements.apply(&driver(), &granted(), tentative).unwrap(),
            GateOutcome::Continue(AuthRoute::home())
        );

        let d = Driver {
            pending_agreements: vec![Agreement {
                id: "tos-2024".into(),
                title: "Terms of Service".into(),
                url: None,
            }],
            ..driver()
        };
        assert_eq!(
            apply(Gate::Agreements, &d, &granted()),
            GateOutcome::Stop(AuthRoute::auth(AuthScreen::AgreementsScreen))
        );
    }

    #[test]
    fn cargo_gate_resets_to_home_on_pass() {
        let tentative = AuthRoute::auth(AuthScreen::Login);
        assert_eq!(
            Gate::CargoCapacity.apply(&driver(), &granted(), tentative).unwrap(),
            GateOutcome::Continue(AuthRoute::home())
        );

        let d = Driver { vehicle: None, ..driver() };
        assert_eq!(
            apply(Gate::CargoCapacity, &d, &granted()),
            GateOutcome::Stop(AuthRoute::auth(AuthScreen::UpdateCargoCapacityScreen))
        );
    }

    #[test]
    fn wallet_gate() {
        for state in [WalletState::Unclaimed, WalletState::Active] {
            let d = Driver { wallet_state: state, ..driver() };
            assert_eq!(
                apply(Gate::Wallet, &d, &granted()),
                GateOutcome::Continue(AuthRoute::home())
            );
        }
        let d = Driver {
            wallet_state: WalletState::Other("PENDING".into()),
            ..driver()
        };
        assert_eq!(
            apply(Gate::Wallet, &d, &granted()),
            GateOutcome::Stop(AuthRoute::auth(AuthScreen::SetupWalletScreen))
        );
    }

    #[test]
    fn permissions_gate_requires_everything_granted() {
        let stop = GateOutcome::Stop(AuthRoute::auth(AuthScreen::Permissions));

        assert_eq!(
            apply(Gate::Permissions, &driver(), &granted()),
            GateOutcome::Continue(AuthRoute::home())
        );
        assert_eq!(apply(Gate::Permissions, &driver(), &GateContext::default()), stop);

        let no_notification = GateContext {
            notification: None,
            ..granted()
        };
        assert_eq!(apply(Gate::Permissions, &driver(), &no_notification), stop);

        let background_denied = GateContext {
            location: Some(LocationPermission::new(
                PermissionStatus::Granted,
                PermissionStatus::Denied,
            )),
            ..granted()
        };
        assert_eq!(apply(Gate::Permissions, &driver(), &background_denied), stop);

        let notification_unavailable = GateContext {
            notification: Some(PermissionStatus::Unavailable),
            ..granted()
        };
        assert_eq!(
            apply(Gate::Permissions, &driver(), &notification_unavailable),
            stop
        );
    }
}
