use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ProductKind;
use crate::error::CoreError;
use crate::state_machine::{ProductState, ProductStateMachine};
use crate::types::{ProductId, Role};

/// One physical unit of a catalog good.
///
/// A product is created once by the producer and then owned by successive
/// parties; it is never destroyed. The state history records every lifecycle
/// stage the unit has actually passed through and is always a prefix of the
/// kind's canonical sequence, with the current state as its last entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    kind: ProductKind,
    state: ProductState,
    state_history: Vec<ProductState>,
    currently_processed: bool,
    processing_parties: Vec<Role>,
    storage_parameters: BTreeMap<String, i64>,
    processing_parameters: BTreeMap<String, i64>,
    selling_parameters: BTreeMap<String, i64>,
}

impl Product {
    /// Create a unit in its kind's canonical start state.
    pub fn new(kind: ProductKind) -> Self {
        let initial = kind.initial_state();
        Self {
            id: ProductId::new(),
            kind,
            state: initial,
            state_history: vec![initial],
            currently_processed: false,
            processing_parties: Vec::new(),
            storage_parameters: BTreeMap::new(),
            processing_parameters: BTreeMap::new(),
            selling_parameters: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn price(&self) -> u32 {
        self.kind.price()
    }

    pub fn state(&self) -> ProductState {
        self.state
    }

    /// Every state this unit has passed through, oldest first.
    pub fn state_history(&self) -> &[ProductState] {
        &self.state_history
    }

    /// True only while a transmission of this exact unit is pending
    /// settlement.
    pub fn is_currently_processed(&self) -> bool {
        self.currently_processed
    }

    /// Parties recorded as mid-transfer for this unit.
    pub fn processing_parties(&self) -> &[Role] {
        &self.processing_parties
    }

    pub fn storage_parameters(&self) -> &BTreeMap<String, i64> {
        &self.storage_parameters
    }

    pub fn processing_parameters(&self) -> &BTreeMap<String, i64> {
        &self.processing_parameters
    }

    pub fn selling_parameters(&self) -> &BTreeMap<String, i64> {
        &self.selling_parameters
    }

    /// Advance one step along the kind's canonical sequence.
    pub fn advance(&mut self) -> Result<ProductState, CoreError> {
        let next = ProductStateMachine::next_state(self.kind, self.state)?;
        tracing::debug!(
            product = %self.kind,
            from = %self.state,
            to = %next,
            "product state transition"
        );
        self.state = next;
        self.state_history.push(next);
        Ok(next)
    }

    /// Invoke a specific transition: advance only if `target` is the state
    /// that follows the current one. Models calling the wrong state object
    /// on a product, which must fail loudly rather than do nothing.
    pub fn advance_to(&mut self, target: ProductState) -> Result<(), CoreError> {
        let next = ProductStateMachine::next_state(self.kind, self.state)?;
        if next != target {
            return Err(CoreError::InvalidTransition {
                kind: self.kind,
                from: self.state,
                attempted: target,
            });
        }
        self.advance()?;
        Ok(())
    }

    /// Begin a transmission: flag the unit and record the receiving party.
    pub fn mark_in_transfer(&mut self, receiver: Role) {
        self.currently_processed = true;
        self.processing_parties.push(receiver);
    }

    /// Settle a transmission: drop the flag and the mid-transfer record.
    pub fn clear_in_transfer(&mut self) {
        self.currently_processed = false;
        self.processing_parties.clear();
    }

    /// Discard every party recorded as mid-transfer. The processed flag is
    /// left untouched; double-spend recovery keeps the unit frozen.
    pub fn clear_processing_parties(&mut self) {
        self.processing_parties.clear();
    }

    /// Record the storage conditions for this kind. Called by the storage
    /// party when it takes custody.
    pub fn record_storage_parameters(&mut self) {
        self.storage_parameters = self.kind.storage_parameters();
    }

    /// Record the processing parameters for this kind.
    pub fn record_processing_parameters(&mut self) {
        self.processing_parameters = self.kind.processing_parameters();
    }

    /// Record the packing parameters for this kind.
    pub fn record_selling_parameters(&mut self) {
        self.selling_parameters = self.kind.selling_parameters();
    }
}
