use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::state_machine::ProductState;

/// Unique identifier for a product instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl ProductId {
    /// Create a new random product ID (UUID v7 — time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a party plays in the supply chain.
///
/// Each role appears exactly once in an assembled chain, ordered from the
/// consumer end down to the producer end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Farmer,
    Storage,
    Processor,
    Distributor,
    Seller,
    Customer,
}

impl Role {
    /// Chain order from the consumer end toward the producer end.
    pub const CHAIN_ORDER: [Role; 6] = [
        Role::Customer,
        Role::Seller,
        Role::Distributor,
        Role::Processor,
        Role::Storage,
        Role::Farmer,
    ];

    /// The lifecycle state this role drives a product into when it takes
    /// custody. The Farmer has no fixed target: it advances a freshly made
    /// product through its grow/collect stages instead.
    pub fn custody_target(&self) -> Option<ProductState> {
        match self {
            Role::Farmer => None,
            Role::Storage => Some(ProductState::Stored),
            Role::Processor => Some(ProductState::Processed),
            Role::Distributor => Some(ProductState::Delivered),
            Role::Seller => Some(ProductState::Packed),
            Role::Customer => Some(ProductState::Sold),
        }
    }

    /// Whether this role may appear as the sender of a money transaction.
    /// The producer end of the chain only ever collects payment.
    pub fn sends_money(&self) -> bool {
        !matches!(self, Role::Farmer)
    }

    /// Whether this role may appear as the receiver of a money transaction.
    /// The consumer end of the chain only ever pays.
    pub fn receives_money(&self) -> bool {
        !matches!(self, Role::Customer)
    }

    /// Whether this role manufactures goods when no party holds stock.
    pub fn is_producer(&self) -> bool {
        matches!(self, Role::Farmer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Farmer => write!(f, "Farmer"),
            Role::Storage => write!(f, "Storage"),
            Role::Processor => write!(f, "Processor"),
            Role::Distributor => write!(f, "Distributor"),
            Role::Seller => write!(f, "Seller"),
            Role::Customer => write!(f, "Customer"),
        }
    }
}
