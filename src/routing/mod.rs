//! Onboarding routing.
//!
//! A driver record and a permission reading go in; exactly one
//! [`AuthRoute`] comes out. The gates in [`gates`] are evaluated in a fixed
//! order by [`chain::evaluate`]; [`AuthRouter`] wraps that with token lookup,
//! the driver fetch, and the fail-closed error boundary.

pub mod chain;
pub mod gates;
pub mod route;
pub mod router;

pub use chain::{Decision, evaluate};
pub use gates::{Gate, GateContext, GateOutcome};
pub use route::{AuthRoute, AuthScreen, HomeScreen};
pub use router::AuthRouter;
