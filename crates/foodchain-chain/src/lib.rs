//! Foodchain supply chain layer.
//!
//! Provides the party chain, the payment and goods transmission channels
//! with double-spend detection, and the request/payment orchestration that
//! walks a purchase across the assembled chain.

pub mod chain;
pub mod channel;
pub mod error;
pub mod events;
pub mod factory;
pub mod party;
pub mod transaction;

pub use chain::{Chain, ChainBuilder};
pub use channel::{GoodsChannel, PaymentChannel};
pub use error::ChainError;
pub use events::{ChainEvent, ConsoleSink, EventSink, MemorySink};
pub use factory::{Factory, FoodFactory};
pub use party::Party;
pub use transaction::{Payload, Transaction, TransactionId, TransactionKind};
