//! Transmission channels.
//!
//! Every transfer between two parties passes through a channel. The payment
//! channel validates who may send and receive money; the goods channel moves
//! product custody and detects double spending. Rejections are business
//! outcomes: the channel reports them through the event sink and returns no
//! transaction, leaving both parties untouched apart from the double-spend
//! bookkeeping.

use std::sync::Arc;

use foodchain_core::ProductKind;

use crate::error::ChainError;
use crate::events::{ChainEvent, EventSink};
use crate::party::Party;
use crate::transaction::Transaction;

/// Settles money transactions between adjacent parties.
pub struct PaymentChannel {
    sink: Arc<dyn EventSink>,
}

impl PaymentChannel {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Validate and settle a money transmission.
    ///
    /// The producer end of the chain never sends money and the consumer end
    /// never receives it; either violation emits a warning and rejects the
    /// transmission without mutating any state.
    pub fn make_transmission(
        &self,
        sender: &mut Party,
        receiver: &mut Party,
        amount: u32,
    ) -> Option<Transaction> {
        if !sender.role().sends_money() {
            self.sink.emit(ChainEvent::MoneyNotSent { role: sender.role() });
            return None;
        }
        if !receiver.role().receives_money() {
            self.sink
                .emit(ChainEvent::MoneyNotReceived { role: receiver.role() });
            return None;
        }

        let mut transaction = Transaction::money(sender.role(), receiver.role(), amount);
        transaction.settle();
        receiver.receive_money();
        sender.record_transaction(transaction.clone());
        receiver.record_transaction(transaction.clone());

        tracing::info!(
            from = %transaction.sender(),
            to = %transaction.receiver(),
            amount,
            "money transmission settled"
        );
        Some(transaction)
    }
}

/// Settles product transactions, moving custody one hop at a time.
pub struct GoodsChannel {
    sink: Arc<dyn EventSink>,
}

impl GoodsChannel {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Validate and settle a product transmission of one unit of `kind`
    /// from `sender` to `receiver`.
    ///
    /// If the unit is already mid-transfer, this is a double-spend attempt:
    /// the sender is flagged, the unit's mid-transfer record is discarded,
    /// and the transmission is rejected (`Ok(None)`) with no custody change.
    /// A custody action that does not fit the unit's lifecycle is a contract
    /// violation and propagates as an error.
    pub fn make_transmission(
        &self,
        sender: &mut Party,
        receiver: &mut Party,
        kind: ProductKind,
    ) -> Result<Option<Transaction>, ChainError> {
        let index = sender
            .sellable_index(kind)
            .ok_or(ChainError::ProductMissing { role: sender.role(), kind })?;

        if sender.product_at(index).is_currently_processed() {
            sender.flag_double_spending();
            sender.product_at_mut(index).clear_processing_parties();
            self.sink.emit(ChainEvent::DoubleSpendAttempt { role: sender.role(), kind });
            tracing::warn!(
                sender = %sender.role(),
                product = %kind,
                attempts = sender.double_spend_attempts(),
                "double spend attempt rejected"
            );
            return Ok(None);
        }

        receiver.validate_custody(sender.product_at(index))?;

        let mut product = sender.remove_product(index);
        let product_id = product.id();
        product.mark_in_transfer(receiver.role());
        receiver.take_custody(product)?;

        let mut transaction =
            Transaction::product(sender.role(), receiver.role(), product_id, kind);
        transaction.settle();
        if let Some(delivered) = receiver.product_at_mut_by_id(product_id) {
            delivered.clear_in_transfer();
        }
        sender.record_transaction(transaction.clone());
        receiver.record_transaction(transaction.clone());

        tracing::info!(
            from = %transaction.sender(),
            to = %transaction.receiver(),
            product = %kind,
            "product transmission settled"
        );
        Ok(Some(transaction))
    }
}
