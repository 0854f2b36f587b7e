use mkt_core::{
    models::{PolyLine, Side},
    ports::Diagnostics,
};
use tracing::{Level, event};

/// The default diagnostics sink, which forwards every event to `tracing`.
///
/// Accepted offers are emitted at `DEBUG`, refusals at `INFO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn reservation_denied(&self, market_name: &str, side: Side, reason: &str) {
        event!(
            Level::INFO,
            market = market_name,
            side = %side,
            reason,
            "reservation denied"
        );
    }

    fn offer_accepted(&self, market_name: &str, side: Side, curve: &PolyLine) {
        event!(
            Level::DEBUG,
            market = market_name,
            side = %side,
            curve = %curve,
            "offer made"
        );
    }

    fn offer_rejected(&self, market_name: &str, side: Side, reason: Option<&str>) {
        event!(
            Level::INFO,
            market = market_name,
            side = %side,
            reason = reason.unwrap_or_default(),
            "offer rejected"
        );
    }
}
