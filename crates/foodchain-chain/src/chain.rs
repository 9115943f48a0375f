//! Chain assembly and the request/payment protocols that traverse it.
//!
//! The chain is a fixed, ordered sequence of parties from the consumer end
//! to the producer end. "Next" (toward the producer) is the adjacent higher
//! index; any walk back toward the consumer is derived from the index, so
//! there are no back-references and no cycles.

use std::sync::Arc;

use foodchain_core::{
    OverpaymentPolicy, ProductKind, RequestEvent, RequestState, Role, SimulationConfig,
};

use crate::channel::{GoodsChannel, PaymentChannel};
use crate::error::ChainError;
use crate::events::{ChainEvent, ConsoleSink, EventSink};
use crate::factory::{Factory, FoodFactory};
use crate::party::Party;
use crate::transaction::Transaction;

/// Index of each role in the assembled chain, consumer end first.
const fn index_of(role: Role) -> usize {
    match role {
        Role::Customer => 0,
        Role::Seller => 1,
        Role::Distributor => 2,
        Role::Processor => 3,
        Role::Storage => 4,
        Role::Farmer => 5,
    }
}

/// Split two distinct parties out of the chain for a channel transmission.
fn pair_mut(parties: &mut [Party], first: usize, second: usize) -> (&mut Party, &mut Party) {
    debug_assert_ne!(first, second);
    if first < second {
        let (left, right) = parties.split_at_mut(second);
        (&mut left[first], &mut right[0])
    } else {
        let (left, right) = parties.split_at_mut(first);
        (&mut right[0], &mut left[second])
    }
}

/// The assembled supply chain.
pub struct Chain {
    parties: Vec<Party>,
    factory: Box<dyn Factory>,
    sink: Arc<dyn EventSink>,
    payments: PaymentChannel,
    goods: GoodsChannel,
    log: Vec<Transaction>,
    config: SimulationConfig,
}

/// Builder wiring a chain together before any request runs.
pub struct ChainBuilder {
    config: SimulationConfig,
    factory: Box<dyn Factory>,
    sink: Arc<dyn EventSink>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
            factory: Box::new(FoodFactory),
            sink: Arc::new(ConsoleSink),
        }
    }

    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn factory(mut self, factory: Box<dyn Factory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> Chain {
        let parties = Role::CHAIN_ORDER.into_iter().map(Party::new).collect();
        let payments = PaymentChannel::new(self.sink.clone());
        let goods = GoodsChannel::new(self.sink.clone());
        Chain {
            parties,
            factory: self.factory,
            sink: self.sink,
            payments,
            goods,
            log: Vec::new(),
            config: self.config,
        }
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    /// A chain with the default factory, console notifications, and default
    /// configuration.
    pub fn with_defaults() -> Self {
        ChainBuilder::new().build()
    }

    pub fn party(&self, role: Role) -> &Party {
        &self.parties[index_of(role)]
    }

    pub fn party_mut(&mut self, role: Role) -> &mut Party {
        &mut self.parties[index_of(role)]
    }

    /// Every settlement attempt recorded chain-wide, in order. Each attempt
    /// appears exactly once, successful or not.
    pub fn transaction_log(&self) -> &[Transaction] {
        &self.log
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Issue a request for the named product from the consumer end.
    ///
    /// The request walks down the chain; the first party holding a unit
    /// ready at its own stage satisfies it, and with no stock anywhere the
    /// producer manufactures a fresh unit through the factory. The good then
    /// walks back up one channel hop at a time, each receiving party
    /// performing its custody action, until the seller holds it pending
    /// payment.
    pub fn make_request(&mut self, name: &str) -> Result<(), ChainError> {
        let kind = ProductKind::from_name(name)
            .ok_or_else(|| ChainError::UnknownProduct(name.to_string()))?;

        self.parties[index_of(Role::Customer)].advance_request(RequestEvent::ProductRequested)?;
        tracing::info!(product = %kind, "request issued");

        let mut holder = None;
        for idx in 0..self.parties.len() {
            self.parties[idx].begin_request(kind);
            if idx > 0 && self.parties[idx].sellable_index(kind).is_some() {
                holder = Some(idx);
                break;
            }
        }

        let holder = match holder {
            Some(idx) => {
                tracing::info!(product = %kind, holder = %self.parties[idx].role(), "request satisfied from stock");
                idx
            }
            None => {
                // No stock anywhere: the producer makes the good and walks
                // it through its grow/collect stages.
                let product = self.factory.make_product(kind.name())?;
                let producer = index_of(Role::Farmer);
                self.parties[producer].take_custody(product)?;
                producer
            }
        };

        for idx in ((index_of(Role::Seller) + 1)..=holder).rev() {
            let (receiver, sender) = pair_mut(&mut self.parties, idx - 1, idx);
            match self.goods.make_transmission(sender, receiver, kind)? {
                Some(transaction) => self.log.push(transaction),
                // A rejected hop leaves the good where it is; settlement
                // will fail the same way and reject the request.
                None => break,
            }
        }

        self.parties[index_of(Role::Customer)].advance_request(RequestEvent::ProductLocated)?;
        Ok(())
    }

    /// Settle payment for the customer's current request.
    ///
    /// An exact payment settles money hop by hop down to the producer, then
    /// hands the good over through the goods channel. A mismatched payment
    /// is rejected as a business outcome: a warning is emitted and an
    /// unsuccessful money transaction is recorded against the customer.
    pub fn make_transaction(&mut self, amount: u32) -> Result<(), ChainError> {
        let customer = index_of(Role::Customer);
        if self.parties[customer].request_state() != RequestState::Located {
            return Err(ChainError::NoPendingRequest);
        }
        let kind = self.parties[customer]
            .requested_product()
            .ok_or(ChainError::NoPendingRequest)?;
        let price = kind.price();

        let accepted = amount == price
            || (amount > price && self.config.overpayment == OverpaymentPolicy::Accept);
        if !accepted {
            if amount < price {
                self.sink.emit(ChainEvent::NotEnoughMoney { offered: amount, price });
            } else {
                self.sink.emit(ChainEvent::Overpayment { offered: amount, price });
            }
            let transaction = Transaction::money(Role::Customer, Role::Seller, amount);
            self.parties[customer].record_transaction(transaction.clone());
            self.log.push(transaction);
            self.parties[customer].advance_request(RequestEvent::PaymentRejected)?;
            return Ok(());
        }

        // Each party in turn forwards its own payment obligation one hop
        // toward the producer.
        for idx in 0..self.parties.len() - 1 {
            let (payer, payee) = pair_mut(&mut self.parties, idx, idx + 1);
            if let Some(transaction) = self.payments.make_transmission(payer, payee, amount) {
                self.log.push(transaction);
            }
        }
        self.parties[customer].advance_request(RequestEvent::PaymentSettled)?;

        // The good moves from wherever it currently resides straight to the
        // requester, subject to the double-spend check.
        let holder = (1..self.parties.len())
            .find(|idx| self.parties[*idx].sellable_index(kind).is_some())
            .ok_or(ChainError::ProductUnavailable { kind })?;
        let (receiver, sender) = pair_mut(&mut self.parties, customer, holder);
        match self.goods.make_transmission(sender, receiver, kind)? {
            Some(transaction) => {
                self.log.push(transaction);
                self.parties[customer].advance_request(RequestEvent::GoodsDelivered)?;
            }
            None => {
                self.parties[customer].advance_request(RequestEvent::TransmissionRejected)?;
            }
        }
        Ok(())
    }
}
