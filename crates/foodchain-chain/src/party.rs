use foodchain_core::{
    CoreError, Product, ProductId, ProductKind, ProductStateMachine, RequestEvent, RequestState,
    RequestStateMachine, Role,
};

use crate::error::ChainError;
use crate::transaction::Transaction;

/// One role-holding node in the supply chain.
///
/// A party owns its inventory and its own transaction ledger; no other
/// component mutates them except through the channel and chain interfaces.
#[derive(Debug)]
pub struct Party {
    role: Role,
    inventory: Vec<Product>,
    own_transactions: Vec<Transaction>,
    money_received: bool,
    requested_product: Option<ProductKind>,
    request_state: RequestState,
    double_spend_flag: bool,
    double_spend_attempts: u32,
}

impl Party {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            inventory: Vec::new(),
            own_transactions: Vec::new(),
            money_received: false,
            requested_product: None,
            request_state: RequestState::Idle,
            double_spend_flag: false,
            double_spend_attempts: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Products currently owned by this party.
    pub fn inventory(&self) -> &[Product] {
        &self.inventory
    }

    /// Transactions this party initiated or received, in settlement order.
    pub fn own_transactions(&self) -> &[Transaction] {
        &self.own_transactions
    }

    pub fn money_received(&self) -> bool {
        self.money_received
    }

    pub fn requested_product(&self) -> Option<ProductKind> {
        self.requested_product
    }

    pub fn request_state(&self) -> RequestState {
        self.request_state
    }

    /// Whether this party has been caught attempting to double spend.
    pub fn is_double_spending(&self) -> bool {
        self.double_spend_flag
    }

    /// Number of double-spend attempts detected against this party.
    pub fn double_spend_attempts(&self) -> u32 {
        self.double_spend_attempts
    }

    /// Put a product into this party's inventory as-is, without a custody
    /// action. Used to seed stock.
    pub fn stock_product(&mut self, product: Product) {
        self.inventory.push(product);
    }

    /// Whether this party holds any unit of `kind`.
    pub fn has_product(&self, kind: ProductKind) -> bool {
        self.inventory.iter().any(|p| p.kind() == kind)
    }

    /// Take custody of a product: advance it into this role's target state
    /// and record the stage parameters this role is responsible for. The
    /// producer instead walks a fresh unit through its grow/collect stages
    /// up to the farm gate.
    pub fn take_custody(&mut self, mut product: Product) -> Result<(), ChainError> {
        match self.role.custody_target() {
            Some(target) => {
                product.advance_to(target)?;
                match self.role {
                    Role::Storage => product.record_storage_parameters(),
                    Role::Processor => product.record_processing_parameters(),
                    Role::Seller => product.record_selling_parameters(),
                    _ => {}
                }
            }
            None => {
                while product.state() != product.kind().farm_gate_state() {
                    product.advance()?;
                }
            }
        }
        tracing::debug!(role = %self.role, product = %product.kind(), state = %product.state(), "took custody");
        self.inventory.push(product);
        Ok(())
    }

    /// Index of a unit of `kind` that is ready to leave this party: its
    /// state matches what this role's stage produces (the farm gate state
    /// for the producer).
    pub(crate) fn sellable_index(&self, kind: ProductKind) -> Option<usize> {
        let expected = match self.role.custody_target() {
            Some(target) => target,
            None => kind.farm_gate_state(),
        };
        self.inventory
            .iter()
            .position(|p| p.kind() == kind && p.state() == expected)
    }

    pub(crate) fn product_at(&self, index: usize) -> &Product {
        &self.inventory[index]
    }

    pub(crate) fn product_at_mut(&mut self, index: usize) -> &mut Product {
        &mut self.inventory[index]
    }

    pub(crate) fn remove_product(&mut self, index: usize) -> Product {
        self.inventory.remove(index)
    }

    pub(crate) fn product_at_mut_by_id(&mut self, id: ProductId) -> Option<&mut Product> {
        self.inventory.iter_mut().find(|p| p.id() == id)
    }

    /// Verify that this party could take custody of `product` right now,
    /// without mutating anything.
    pub(crate) fn validate_custody(&self, product: &Product) -> Result<(), ChainError> {
        if let Some(target) = self.role.custody_target() {
            let next = ProductStateMachine::next_state(product.kind(), product.state())?;
            if next != target {
                return Err(CoreError::InvalidTransition {
                    kind: product.kind(),
                    from: product.state(),
                    attempted: target,
                }
                .into());
            }
        }
        Ok(())
    }

    pub(crate) fn record_transaction(&mut self, transaction: Transaction) {
        self.own_transactions.push(transaction);
    }

    pub(crate) fn receive_money(&mut self) {
        self.money_received = true;
    }

    /// Record a fresh request walking through this party.
    pub(crate) fn begin_request(&mut self, kind: ProductKind) {
        self.requested_product = Some(kind);
        self.money_received = false;
    }

    /// Advance this party's request lifecycle.
    pub(crate) fn advance_request(&mut self, event: RequestEvent) -> Result<(), CoreError> {
        self.request_state = RequestStateMachine::transition(self.request_state, event)?;
        Ok(())
    }

    /// Double-spend bookkeeping: mark this party as the sender of a rejected
    /// transmission.
    pub(crate) fn flag_double_spending(&mut self) {
        self.double_spend_flag = true;
        self.double_spend_attempts += 1;
    }
}
