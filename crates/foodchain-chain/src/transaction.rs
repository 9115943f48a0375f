use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodchain_core::{ProductId, ProductKind, Role};

/// Unique identifier for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    /// Create a new random transaction ID (UUID v7 — time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of value a transaction moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Money,
    Product,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Money => write!(f, "MONEY"),
            Self::Product => write!(f, "PRODUCT"),
        }
    }
}

/// The value carried by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// An amount of money.
    Money(u32),
    /// A reference to a product instance.
    Product { product_id: ProductId, kind: ProductKind },
}

/// A record of one transfer attempt between two parties.
///
/// Immutable after settlement; the `successful` flag is set exactly once,
/// by the channel that settles the transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    sender: Role,
    receiver: Role,
    payload: Payload,
    successful: bool,
    settled_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create an unsettled money transaction.
    pub fn money(sender: Role, receiver: Role, amount: u32) -> Self {
        Self {
            id: TransactionId::new(),
            sender,
            receiver,
            payload: Payload::Money(amount),
            successful: false,
            settled_at: None,
        }
    }

    /// Create an unsettled product transaction.
    pub fn product(sender: Role, receiver: Role, product_id: ProductId, kind: ProductKind) -> Self {
        Self {
            id: TransactionId::new(),
            sender,
            receiver,
            payload: Payload::Product { product_id, kind },
            successful: false,
            settled_at: None,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn sender(&self) -> Role {
        self.sender
    }

    pub fn receiver(&self) -> Role {
        self.receiver
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn kind(&self) -> TransactionKind {
        match self.payload {
            Payload::Money(_) => TransactionKind::Money,
            Payload::Product { .. } => TransactionKind::Product,
        }
    }

    /// The money amount, for money transactions.
    pub fn amount(&self) -> Option<u32> {
        match self.payload {
            Payload::Money(amount) => Some(amount),
            Payload::Product { .. } => None,
        }
    }

    /// The transferred product, for product transactions.
    pub fn product_id(&self) -> Option<ProductId> {
        match self.payload {
            Payload::Money(_) => None,
            Payload::Product { product_id, .. } => Some(product_id),
        }
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    /// Mark the transaction settled. Called once by the settling channel.
    pub(crate) fn settle(&mut self) {
        debug_assert!(!self.successful, "transaction settled twice");
        self.successful = true;
        self.settled_at = Some(Utc::now());
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.successful { "settled" } else { "failed" };
        match self.payload {
            Payload::Money(amount) => write!(
                f,
                "{} {} -> {}: {} ({})",
                self.kind(),
                self.sender,
                self.receiver,
                amount,
                outcome
            ),
            Payload::Product { kind, .. } => write!(
                f,
                "{} {} -> {}: {} ({})",
                self.kind(),
                self.sender,
                self.receiver,
                kind,
                outcome
            ),
        }
    }
}
