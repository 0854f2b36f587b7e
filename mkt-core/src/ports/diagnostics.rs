use crate::models::{PolyLine, Side};

/// A sink for the diagnostic events of the reservation/offer protocol.
///
/// Implementations decide where (and whether) these events end up. None of
/// them affect the protocol's results.
pub trait Diagnostics: Send + Sync {
    /// A reservation was refused or timed out
    fn reservation_denied(&self, market_name: &str, side: Side, reason: &str);

    /// An offer was accepted by the coordinator
    fn offer_accepted(&self, market_name: &str, side: Side, curve: &PolyLine);

    /// An offer was refused or timed out
    fn offer_rejected(&self, market_name: &str, side: Side, reason: Option<&str>);
}

impl<T: Diagnostics> Diagnostics for &T {
    fn reservation_denied(&self, market_name: &str, side: Side, reason: &str) {
        (**self).reservation_denied(market_name, side, reason)
    }

    fn offer_accepted(&self, market_name: &str, side: Side, curve: &PolyLine) {
        (**self).offer_accepted(market_name, side, curve)
    }

    fn offer_rejected(&self, market_name: &str, side: Side, reason: Option<&str>) {
        (**self).offer_rejected(market_name, side, reason)
    }
}

impl<T: Diagnostics> Diagnostics for std::sync::Arc<T> {
    fn reservation_denied(&self, market_name: &str, side: Side, reason: &str) {
        (**self).reservation_denied(market_name, side, reason)
    }

    fn offer_accepted(&self, market_name: &str, side: Side, curve: &PolyLine) {
        (**self).offer_accepted(market_name, side, curve)
    }

    fn offer_rejected(&self, market_name: &str, side: Side, reason: Option<&str>) {
        (**self).offer_rejected(market_name, side, reason)
    }
}
