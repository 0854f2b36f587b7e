use crate::Map;
use mkt_core::models::{Crossing, PointError, PolyLine, Side};
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// A participant's submission for the round
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Offer {
    pub side: Side,
    pub curve: PolyLine,
}

/// Every offer made in one round of one market, keyed by participant
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MarketRound {
    pub market: String,
    pub offers: Map<String, Offer>,
}

/// The aggregate curves of a round and where they meet
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClearingReport {
    pub market: String,
    pub supply: PolyLine,
    pub demand: PolyLine,
    pub crossings: Vec<Crossing>,
}

impl ClearingReport {
    /// The clearing point, provided supply and demand meet in exactly one point
    pub fn unique_clearing(&self) -> Option<(f64, f64)> {
        match self.crossings.as_slice() {
            [crossing] if crossing.is_unique() => Some(crossing.start.into()),
            _ => None,
        }
    }
}

impl MarketRound {
    /// The aggregate curve of one side
    pub fn aggregate(&self, side: Side) -> Result<PolyLine, PointError> {
        PolyLine::aggregate(
            self.offers
                .values()
                .filter(|offer| offer.side == side)
                .map(|offer| &offer.curve),
        )
    }

    /// Sums each side and intersects aggregate supply with aggregate demand
    pub fn clear(&self) -> Result<ClearingReport, PointError> {
        let supply = self.aggregate(Side::Seller)?;
        let demand = self.aggregate(Side::Buyer)?;
        let crossings = PolyLine::crossings(&supply, &demand);

        event!(
            Level::INFO,
            market = self.market,
            offers = self.offers.len(),
            crossings = crossings.len(),
            "cleared round"
        );
        if crossings.len() > 1 || crossings.iter().any(|c| !c.is_unique()) {
            event!(
                Level::WARN,
                market = self.market,
                "clearing point is not unique"
            );
        }

        Ok(ClearingReport {
            market: self.market.clone(),
            supply,
            demand,
            crossings,
        })
    }
}
