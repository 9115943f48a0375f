use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The lifecycle of a single purchase request, tracked on the requesting
/// party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestState {
    /// No request in flight.
    Idle,
    /// A request was issued and is walking down the chain.
    Requested,
    /// The good was found in stock or freshly produced; payment is due.
    Located,
    /// Payment settled; the good is on its way to the requester.
    Paid,
    /// The good was handed over. Final for this request.
    Delivered,
    /// The request was rejected (insufficient payment or a rejected
    /// transmission). Final for this request.
    Rejected,
}

impl RequestState {
    /// Whether this request has reached its outcome. A fresh
    /// [`RequestEvent::ProductRequested`] re-arms the cycle; there is no
    /// automatic retry.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected)
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Requested => write!(f, "Requested"),
            Self::Located => write!(f, "Located"),
            Self::Paid => write!(f, "Paid"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Events that drive a request through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    /// The customer issued a request.
    ProductRequested,
    /// A party satisfied the request from stock, or the producer made the
    /// good.
    ProductLocated,
    /// Payment settled down the whole chain.
    PaymentSettled,
    /// The good arrived at the requester.
    GoodsDelivered,
    /// Payment was rejected (wrong amount).
    PaymentRejected,
    /// The goods transmission was rejected (double spend detected).
    TransmissionRejected,
}

/// Manages request state transitions.
///
/// Valid transitions:
/// - Idle | Delivered | Rejected → Requested (ProductRequested)
/// - Requested → Located (ProductLocated)
/// - Requested → Rejected (PaymentRejected)
/// - Located → Paid (PaymentSettled)
/// - Located → Rejected (PaymentRejected)
/// - Paid → Delivered (GoodsDelivered)
/// - Paid → Rejected (TransmissionRejected)
pub struct RequestStateMachine;

impl RequestStateMachine {
    /// Attempt a state transition based on an event.
    /// Returns the new state on success, or an error for invalid transitions.
    pub fn transition(
        current: RequestState,
        event: RequestEvent,
    ) -> Result<RequestState, CoreError> {
        let new_state = match (current, event) {
            (
                RequestState::Idle | RequestState::Delivered | RequestState::Rejected,
                RequestEvent::ProductRequested,
            ) => RequestState::Requested,

            (RequestState::Requested, RequestEvent::ProductLocated) => RequestState::Located,
            (RequestState::Requested, RequestEvent::PaymentRejected) => RequestState::Rejected,

            (RequestState::Located, RequestEvent::PaymentSettled) => RequestState::Paid,
            (RequestState::Located, RequestEvent::PaymentRejected) => RequestState::Rejected,

            (RequestState::Paid, RequestEvent::GoodsDelivered) => RequestState::Delivered,
            (RequestState::Paid, RequestEvent::TransmissionRejected) => RequestState::Rejected,

            _ => {
                return Err(CoreError::InvalidRequestTransition {
                    from: current,
                    event,
                })
            }
        };

        tracing::debug!(
            from = %current,
            to = %new_state,
            event = ?event,
            "request state transition"
        );

        Ok(new_state)
    }
}
