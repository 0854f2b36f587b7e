/// Where a single participant stands in one round of one market
///
/// ```text
/// Unreserved ──► Reserved ──► Offered ──► Cleared
///     │              │            └─────► Rejected
///     ▼              ▼
/// ReservationFailed  OfferFailed
/// ```
///
/// `Cleared`, `Rejected`, `ReservationFailed` and `OfferFailed` are terminal:
/// a participant that ends up in any of them waits for the next round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RoundState {
    /// No reservation has been requested yet
    #[default]
    Unreserved,
    /// The coordinator granted a reservation
    Reserved,
    /// The coordinator accepted the offer curve
    Offered,
    /// The market cleared and reported a price and quantity
    Cleared,
    /// The market closed without clearing this participant
    Rejected,
    /// The reservation was refused or timed out
    ReservationFailed,
    /// The offer was refused or timed out
    OfferFailed,
}

/// The observations that move a participant through a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundEvent {
    /// `make_reservation` returned true
    ReservationAccepted,
    /// `make_reservation` returned false
    ReservationDenied,
    /// `make_offer` was accepted
    OfferAccepted,
    /// `make_offer` was rejected
    OfferDenied,
    /// The coordinator reported a clearing result
    Cleared,
    /// The coordinator reported no clearing for this participant
    Rejected,
}

impl RoundState {
    /// Whether the round is over for this participant
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Cleared | Self::Rejected | Self::ReservationFailed | Self::OfferFailed
        )
    }

    /// Applies an event, returning the next state.
    ///
    /// # Errors
    ///
    /// Returns a `TransitionError` if the event cannot happen in the current
    /// state; the state itself is left untouched.
    pub fn apply(self, event: RoundEvent) -> Result<Self, TransitionError> {
        use RoundEvent as E;
        match (self, event) {
            (Self::Unreserved, E::ReservationAccepted) => Ok(Self::Reserved),
            (Self::Unreserved, E::ReservationDenied) => Ok(Self::ReservationFailed),
            (Self::Reserved, E::OfferAccepted) => Ok(Self::Offered),
            (Self::Reserved, E::OfferDenied) => Ok(Self::OfferFailed),
            (Self::Offered, E::Cleared) => Ok(Self::Cleared),
            (Self::Offered, E::Rejected) => Ok(Self::Rejected),
            (state, event) => Err(TransitionError { state, event }),
        }
    }
}

/// Error when an event is observed in a state that does not allow it
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("cannot apply {event:?} while {state:?}")]
pub struct TransitionError {
    /// The state the participant was in
    pub state: RoundState,
    /// The event that was rejected
    pub event: RoundEvent,
}
