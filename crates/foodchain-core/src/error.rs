use crate::catalog::ProductKind;
use crate::request::{RequestEvent, RequestState};
use crate::state_machine::ProductState;

/// Core simulation errors.
///
/// Every variant here is a contract violation: it indicates a caller bug
/// rather than a recoverable business condition, and it propagates to the
/// immediate caller instead of being absorbed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid lifecycle transition for {kind}: {from} -> {attempted}")]
    InvalidTransition {
        kind: ProductKind,
        from: ProductState,
        attempted: ProductState,
    },

    #[error("{kind} lifecycle is complete: no transition out of {state}")]
    TerminalState { kind: ProductKind, state: ProductState },

    #[error("state {state} does not belong to the {kind} lifecycle")]
    UnknownState { kind: ProductKind, state: ProductState },

    #[error("invalid request transition from {from} on {event:?}")]
    InvalidRequestTransition {
        from: RequestState,
        event: RequestEvent,
    },
}
