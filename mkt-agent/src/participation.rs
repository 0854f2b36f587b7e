use crate::{OfferOutcome, ProxyError, RpcProxy};
use mkt_core::{
    models::{Crossing, PolyLine, RoundEvent, RoundState, Side, TransitionError},
    ports::{Diagnostics, RpcCall},
};

/// One participant's progress through one round of one market.
///
/// A `Participation` borrows the participant's [`RpcProxy`] for the length of
/// the round and records what the coordinator answered, so that the round
/// can only be walked in protocol order: reserve, offer, then learn the
/// clearing result.
pub struct Participation<'p, R, D> {
    proxy: &'p RpcProxy<R, D>,
    market_name: String,
    side: Side,
    state: RoundState,
    clearing: Option<Crossing>,
}

impl<'p, R: RpcCall, D: Diagnostics> Participation<'p, R, D> {
    /// Starts a round in the `Unreserved` state
    pub fn new(proxy: &'p RpcProxy<R, D>, market_name: impl Into<String>, side: Side) -> Self {
        Self {
            proxy,
            market_name: market_name.into(),
            side,
            state: RoundState::Unreserved,
            clearing: None,
        }
    }

    /// The market this round belongs to
    pub fn market_name(&self) -> &str {
        &self.market_name
    }

    /// Which side of the market the participant is on
    pub fn side(&self) -> Side {
        self.side
    }

    /// The current state of the round
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The clearing region reported for this round, once cleared
    pub fn clearing(&self) -> Option<&Crossing> {
        self.clearing.as_ref()
    }

    /// Requests the reservation, moving to `Reserved` or `ReservationFailed`
    pub async fn reserve(&mut self) -> Result<RoundState, ParticipationError> {
        self.state.apply(RoundEvent::ReservationAccepted)?;

        let event = if self
            .proxy
            .make_reservation(&self.market_name, self.side)
            .await?
        {
            RoundEvent::ReservationAccepted
        } else {
            RoundEvent::ReservationDenied
        };

        self.advance(event)
    }

    /// Submits the offer curve, moving to `Offered` or `OfferFailed`
    pub async fn offer(&mut self, curve: &PolyLine) -> Result<OfferOutcome, ParticipationError> {
        self.state.apply(RoundEvent::OfferAccepted)?;

        let outcome = self
            .proxy
            .make_offer(&self.market_name, self.side, curve)
            .await?;

        self.advance(if outcome.is_accepted() {
            RoundEvent::OfferAccepted
        } else {
            RoundEvent::OfferDenied
        })?;

        Ok(outcome)
    }

    /// Records the coordinator's clearing report for this participant.
    ///
    /// `Some` clears the round, `None` means the market closed without
    /// clearing it.
    pub fn record_clearing(
        &mut self,
        clearing: Option<Crossing>,
    ) -> Result<RoundState, ParticipationError> {
        let event = if clearing.is_some() {
            RoundEvent::Cleared
        } else {
            RoundEvent::Rejected
        };
        let state = self.advance(event)?;
        self.clearing = clearing;
        Ok(state)
    }

    fn advance(&mut self, event: RoundEvent) -> Result<RoundState, ParticipationError> {
        self.state = self.state.apply(event)?;
        Ok(self.state)
    }
}

/// Failures while walking a round
#[derive(Debug, thiserror::Error)]
pub enum ParticipationError {
    /// The step is not allowed in the current state
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// The protocol driver hit a hard failure
    #[error(transparent)]
    Proxy(#[from] ProxyError),
}
