use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ProductKind;
use crate::error::CoreError;

/// The lifecycle states a product can pass through.
///
/// Not every kind visits every state: each [`ProductKind`] defines its own
/// canonical ordered subsequence (see [`ProductKind::states`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductState {
    /// Still growing at the farm (fruit before harvest).
    Growing,
    /// Harvested or collected from the producer.
    Collected,
    /// Livestock before slaughter.
    Alive,
    /// Slaughtered, not yet stored.
    Raw,
    /// In storage under controlled conditions.
    Stored,
    /// Processed into its sellable form.
    Processed,
    /// Delivered to the point of sale.
    Delivered,
    /// Packed and ready for sale.
    Packed,
    /// Sold to the customer. Terminal state.
    Sold,
}

impl ProductState {
    /// The state name as it appears in a product's recorded history.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Growing => "Growing",
            Self::Collected => "Collected",
            Self::Alive => "Alive",
            Self::Raw => "Raw",
            Self::Stored => "Stored",
            Self::Processed => "Processed",
            Self::Delivered => "Delivered",
            Self::Packed => "Packed",
            Self::Sold => "Sold",
        }
    }

    /// Whether this is the terminal state of every lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sold)
    }
}

impl fmt::Display for ProductState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Computes lifecycle transitions per product kind.
///
/// The transition rule is purely positional: each kind's canonical sequence
/// is a straight line, and the only legal move is one step forward. Anything
/// else is a contract violation surfaced as a [`CoreError`], never a silent
/// no-op.
pub struct ProductStateMachine;

impl ProductStateMachine {
    /// The state that follows `current` in `kind`'s canonical sequence.
    pub fn next_state(kind: ProductKind, current: ProductState) -> Result<ProductState, CoreError> {
        let states = kind.states();
        let pos = states
            .iter()
            .position(|s| *s == current)
            .ok_or(CoreError::UnknownState { kind, state: current })?;
        match states.get(pos + 1) {
            Some(next) => Ok(*next),
            None => Err(CoreError::TerminalState { kind, state: current }),
        }
    }

    /// Check whether `current` has an outgoing transition for `kind`.
    pub fn can_advance(kind: ProductKind, current: ProductState) -> bool {
        Self::next_state(kind, current).is_ok()
    }
}
