//! Driver account record and the collaborators that supply it.

pub mod api;
pub mod model;
pub mod token;

pub use api::{DriverApi, HttpDriverApi};
pub use model::{
    Agreement, DocumentStatus, Driver, DriverDocument, DriverState, Vehicle, WalletState,
};
pub use token::{StaticTokenSource, TokenSource};
