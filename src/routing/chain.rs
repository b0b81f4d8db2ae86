//! Gate chain evaluation.

use tracing::debug;

use super::gates::{Gate, GateContext, GateOutcome};
use super::route::AuthRoute;
use crate::driver::Driver;
use crate::error::RoutingError;

/// Outcome of a full chain evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub route: AuthRoute,
    /// The gate that stopped the chain, or `None` if every gate passed.
    pub stopped_at: Option<Gate>,
}

/// Walk [`Gate::ORDER`] and stop at the first gate that does not pass.
///
/// Pure and synchronous: the same driver and context always produce the
/// same decision.
pub fn evaluate(driver: &Driver, context: &GateContext) -> Result<Decision, RoutingError> {
    let mut tentative = AuthRoute::home();

    for gate in Gate::ORDER {
        match gate.apply(driver, context, tentative)? {
            GateOutcome::Continue(route) => {
                debug!(gate = %gate, "Gate passed");
                tentative = route;
            }
            GateOutcome::Stop(route) => {
                debug!(gate = %gate, route = %route, "Gate stopped chain");
                return Ok(Decision {
                    route,
                    stopped_at: Some(gate),
                });
            }
        }
    }

    Ok(Decision {
        route: tentative,
        stopped_at: None,
    })
}
