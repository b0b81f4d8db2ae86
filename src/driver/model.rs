//! Driver account record as returned by the account service.

use serde::{Deserialize, Serialize};

/// Coarse account state of a driver.
///
/// Values outside the seven known states are kept as `Unrecognized` so the
/// state gate can report them as a data-integrity defect instead of the whole
/// record failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriverState {
    Applying,
    Screening,
    PendingApproval,
    Approved,
    Registered,
    Rejected,
    Disabled,
    Unrecognized(String),
}

impl DriverState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Applying => "applying",
            Self::Screening => "screening",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Registered => "registered",
            Self::Rejected => "rejected",
            Self::Disabled => "disabled",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for DriverState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "applying" => Self::Applying,
            "screening" => Self::Screening,
            "pending_approval" => Self::PendingApproval,
            "approved" => Self::Approved,
            "registered" => Self::Registered,
            "rejected" => Self::Rejected,
            "disabled" => Self::Disabled,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<DriverState> for String {
    fn from(state: DriverState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for DriverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payout wallet setup status. A `null` wire value means setup never started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum WalletState {
    Unclaimed,
    Active,
    /// Any pending or failed setup state reported by the wallet provider.
    Other(String),
}

impl WalletState {
    /// Whether the wallet lets the driver start driving.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Unclaimed | Self::Active)
    }
}

impl Default for WalletState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for WalletState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "UNCLAIMED" => Self::Unclaimed,
            "ACTIVE" => Self::Active,
            _ => Self::Other(raw),
        }
    }
}

impl From<Option<String>> for WalletState {
    fn from(raw: Option<String>) -> Self {
        raw.map(Self::from).unwrap_or_default()
    }
}

impl From<WalletState> for String {
    fn from(state: WalletState) -> Self {
        match state {
            WalletState::Unclaimed => "UNCLAIMED".to_string(),
            WalletState::Active => "ACTIVE".to_string(),
            WalletState::Other(raw) => raw,
        }
    }
}

/// An outstanding legal agreement the driver has not yet accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Review status of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
    Missing,
}

/// A document the driver has to keep on file (licence, insurance, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDocument {
    pub kind: String,
    pub status: DocumentStatus,
}

impl DriverDocument {
    fn needs_update(&self) -> bool {
        matches!(
            self.status,
            DocumentStatus::Rejected | DocumentStatus::Expired | DocumentStatus::Missing
        )
    }
}

/// Vehicle class that must also report wheel-well spacing and weight.
pub const WHEEL_WELL_VEHICLE_CLASS: u8 = 3;

/// Cargo dimensions of the driver's vehicle. Units are whatever the account
/// service stores; only presence matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub vehicle_class: Option<u8>,
    #[serde(default)]
    pub capacity_height: Option<f64>,
    #[serde(default)]
    pub capacity_width: Option<f64>,
    #[serde(default)]
    pub capacity_length: Option<f64>,
    #[serde(default)]
    pub capacity_door_height: Option<f64>,
    #[serde(default)]
    pub capacity_door_width: Option<f64>,
    #[serde(default)]
    pub capacity_between_wheel_wells: Option<f64>,
    #[serde(default)]
    pub capacity_weight: Option<f64>,
}

/// A capacity counts as filled in only when it is a positive number.
fn present(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0)
}

impl Vehicle {
    /// Whether every cargo dimension required for this vehicle class is set.
    pub fn has_cargo_capacity(&self) -> bool {
        let base = [
            self.capacity_height,
            self.capacity_length,
            self.capacity_width,
            self.capacity_door_height,
            self.capacity_door_width,
        ]
        .into_iter()
        .all(present);

        base && (self.vehicle_class != Some(WHEEL_WELL_VEHICLE_CLASS)
            || (present(self.capacity_between_wheel_wells) && present(self.capacity_weight)))
    }
}

/// Account record describing an onboarding or active delivery driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub state: DriverState,
    /// Whether the driver hand-loads cargo. `None` until they answer.
    #[serde(default)]
    pub can_load: Option<bool>,
    #[serde(default)]
    pub pending_agreements: Vec<Agreement>,
    #[serde(default)]
    pub wallet_state: WalletState,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub documents: Vec<DriverDocument>,
}

impl Driver {
    /// True when any document was rejected, has expired, or was never uploaded.
    pub fn needs_updated_documents(&self) -> bool {
        self.documents.iter().any(DriverDocument::needs_update)
    }

    /// True when nothing needs re-uploading but at least one document is
    /// still waiting on review.
    pub fn documents_awaiting_approval(&self) -> bool {
        !self.needs_updated_documents()
            && self
                .documents
                .iter()
                .any(|d| d.status == DocumentStatus::Pending)
    }

    pub fn has_cargo_capacity(&self) -> bool {
        self.vehicle
            .as_ref()
            .is_some_and(Vehicle::has_cargo_capacity)
    }
}
