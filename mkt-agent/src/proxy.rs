use crate::{ProxyConfig, TracingDiagnostics};
use mkt_core::{
    models::{PolyLine, Side},
    ports::{Diagnostics, RpcCall, RpcError},
};
use serde_json::Value;
use std::time::Duration;

/// The identity of the market coordinator on the platform
pub const PLATFORM_MARKET_SERVICE: &str = "platform.market";

const MAKE_RESERVATION: &str = "make_reservation";
const MAKE_OFFER: &str = "make_offer";

/// Drives the reservation/offer protocol against the market coordinator.
///
/// The proxy holds nothing but the call mechanism, the diagnostics sink and
/// its settings, so one instance can serve a participant for any number of
/// rounds. Each call waits at most `timeout` for an answer and is never
/// retried.
///
/// A refusal by the coordinator and a missed deadline are expected outcomes and
/// are reported through the return value. Anything else (an empty market name,
/// a broken transport) is returned as a [`ProxyError`].
pub struct RpcProxy<R, D = TracingDiagnostics> {
    rpc: R,
    diagnostics: D,
    peer: String,
    timeout: Duration,
    verbose_logging: bool,
}

impl<R: RpcCall> RpcProxy<R> {
    /// Creates a proxy with the default settings, logging through `tracing`
    pub fn new(rpc: R) -> Self {
        Self::from_config(rpc, ProxyConfig::default())
    }

    /// Creates a proxy from explicit settings, logging through `tracing`
    pub fn from_config(rpc: R, config: ProxyConfig) -> Self {
        let ProxyConfig {
            peer,
            timeout,
            verbose_logging,
        } = config;

        Self {
            rpc,
            diagnostics: TracingDiagnostics,
            peer,
            timeout,
            verbose_logging,
        }
    }
}

impl<R: RpcCall, D: Diagnostics> RpcProxy<R, D> {
    /// Replaces the diagnostics sink
    pub fn with_diagnostics<E: Diagnostics>(self, diagnostics: E) -> RpcProxy<R, E> {
        RpcProxy {
            rpc: self.rpc,
            diagnostics,
            peer: self.peer,
            timeout: self.timeout,
            verbose_logging: self.verbose_logging,
        }
    }

    /// Replaces the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables reporting of accepted offers
    pub fn with_verbose_logging(mut self, verbose_logging: bool) -> Self {
        self.verbose_logging = verbose_logging;
        self
    }

    /// The per-call deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The underlying call mechanism
    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Asks the coordinator for a slot in `market_name` for this round.
    ///
    /// Returns `Ok(true)` if the coordinator granted the reservation, and
    /// `Ok(false)` if it refused or did not answer before the deadline.
    pub async fn make_reservation(&self, market_name: &str, side: Side) -> Result<bool, ProxyError> {
        let args = vec![market_arg(market_name)?, serde_json::to_value(side)?];

        match self.invoke(MAKE_RESERVATION, args).await? {
            Ok(_) => Ok(true),
            Err(reason) => {
                self.diagnostics
                    .reservation_denied(market_name, side, &reason);
                Ok(false)
            }
        }
    }

    /// Submits `curve` as this participant's demand (buyer) or supply (seller)
    /// for `market_name`.
    ///
    /// The curve travels as its ordered list of `(x, y)` pairs.
    pub async fn make_offer(
        &self,
        market_name: &str,
        side: Side,
        curve: &PolyLine,
    ) -> Result<OfferOutcome, ProxyError> {
        let args = vec![
            market_arg(market_name)?,
            serde_json::to_value(side)?,
            serde_json::to_value(curve.to_pairs())?,
        ];

        match self.invoke(MAKE_OFFER, args).await? {
            Ok(_) => {
                if self.verbose_logging {
                    self.diagnostics.offer_accepted(market_name, side, curve);
                }
                Ok(OfferOutcome::Accepted)
            }
            Err(reason) => {
                let reason = Some(reason).filter(|reason| !reason.is_empty());
                self.diagnostics
                    .offer_rejected(market_name, side, reason.as_deref());
                Ok(OfferOutcome::Rejected { reason })
            }
        }
    }

    // The outer result carries hard failures, the inner one the reason for an
    // expected refusal.
    async fn invoke(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Result<Value, String>, ProxyError> {
        let call = self.rpc.call(&self.peer, method, args);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(Ok(value)),
            Ok(Err(RpcError::Remote { message })) => Ok(Err(message)),
            Ok(Err(err)) => Err(ProxyError::Rpc(err)),
            Err(elapsed) => Ok(Err(elapsed.to_string())),
        }
    }
}

fn market_arg(market_name: &str) -> Result<Value, ProxyError> {
    if market_name.is_empty() {
        Err(ProxyError::EmptyMarketName)
    } else {
        Ok(Value::from(market_name))
    }
}

/// The coordinator's answer to an offer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OfferOutcome {
    /// The offer is in this round's clearing
    Accepted,
    /// The offer was refused or timed out
    Rejected {
        /// The coordinator's explanation, or the timeout's, when there is one
        reason: Option<String>,
    },
}

impl OfferOutcome {
    /// Whether the offer was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// The rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accepted => None,
            Self::Rejected { reason } => reason.as_deref(),
        }
    }

    /// The outcome as an `(accepted, reason)` pair
    pub fn into_tuple(self) -> (bool, Option<String>) {
        match self {
            Self::Accepted => (true, None),
            Self::Rejected { reason } => (false, reason),
        }
    }
}

/// Failures of the protocol driver that indicate a usage or infrastructure
/// problem rather than a market decision
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The market name was empty
    #[error("market name must not be empty")]
    EmptyMarketName,
    /// The call mechanism failed for a reason other than a remote refusal
    #[error(transparent)]
    Rpc(RpcError),
    /// The call arguments could not be encoded
    #[error("unable to encode call arguments: {0}")]
    Encode(#[from] serde_json::Error),
}
