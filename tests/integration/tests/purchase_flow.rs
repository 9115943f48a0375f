//! End-to-end purchase scenarios across the assembled chain.

use std::sync::Arc;

use foodchain_chain::{ChainBuilder, MemorySink, TransactionKind};
use foodchain_core::{
    OverpaymentPolicy, ProductKind, ProductState, RequestState, Role, SimulationConfig,
};
use foodchain_integration_tests::{chain_with_sink, product_in_state};

#[test]
fn milk_purchase_walks_the_full_lifecycle() {
    let (mut chain, sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    let customer = chain.party(Role::Customer);
    assert_eq!(customer.request_state(), RequestState::Delivered);
    assert_eq!(customer.inventory().len(), 1);
    let milk = &customer.inventory()[0];
    assert_eq!(
        milk.state_history(),
        &[
            ProductState::Collected,
            ProductState::Stored,
            ProductState::Processed,
            ProductState::Delivered,
            ProductState::Packed,
            ProductState::Sold,
        ]
    );
    assert!(sink.events().is_empty());
}

#[test]
fn apple_and_pork_follow_their_own_sequences() {
    for (name, price, kind) in [("apple", 20, ProductKind::Apple), ("pork", 80, ProductKind::Pork)] {
        let (mut chain, sink) = chain_with_sink();

        chain.make_request(name).unwrap();
        chain.make_transaction(price).unwrap();

        let bought = &chain.party(Role::Customer).inventory()[0];
        assert_eq!(bought.kind(), kind);
        assert_eq!(bought.state_history(), kind.states());
        assert_eq!(bought.state(), ProductState::Sold);
        assert!(sink.events().is_empty());
    }
}

#[test]
fn underpayment_leaves_everything_in_place() {
    let (mut chain, sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(40).unwrap();

    assert!(sink.contains("Not enough money!"));
    let customer = chain.party(Role::Customer);
    assert!(customer.inventory().is_empty());
    assert_eq!(customer.request_state(), RequestState::Rejected);

    // The failed attempt is the customer's first and only own transaction.
    assert_eq!(customer.own_transactions().len(), 1);
    let failed = &customer.own_transactions()[0];
    assert!(!failed.is_successful());
    assert_eq!(failed.kind(), TransactionKind::Money);
    assert_eq!(failed.amount(), Some(40));

    // The unsold unit waits with the seller, packed.
    assert_eq!(
        chain.party(Role::Seller).inventory()[0].state(),
        ProductState::Packed
    );
    // No party down-chain was paid.
    assert!(!chain.party(Role::Farmer).money_received());
}

#[test]
fn exact_payment_settles_money_then_goods() {
    let (mut chain, _sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    let log = chain.transaction_log();
    assert!(log.iter().all(|t| t.is_successful()));

    // Settlement order: the goods walk up during the request, then money
    // moves down hop by hop, then the final hand-off.
    let money: Vec<_> = log.iter().filter(|t| t.kind() == TransactionKind::Money).collect();
    assert_eq!(money.len(), 5);
    assert_eq!(money[0].sender(), Role::Customer);
    assert_eq!(money[0].receiver(), Role::Seller);
    assert_eq!(money[4].sender(), Role::Storage);
    assert_eq!(money[4].receiver(), Role::Farmer);

    let last = log.last().unwrap();
    assert_eq!(last.kind(), TransactionKind::Product);
    assert_eq!(last.sender(), Role::Seller);
    assert_eq!(last.receiver(), Role::Customer);

    // Every intermediate party collected its payment.
    for role in [Role::Seller, Role::Distributor, Role::Processor, Role::Storage, Role::Farmer] {
        assert!(chain.party(role).money_received());
    }
}

#[test]
fn chain_log_records_each_attempt_exactly_once() {
    let (mut chain, _sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    // 4 goods hops walking up, 5 money hops, 1 final hand-off.
    assert_eq!(chain.transaction_log().len(), 10);

    // The customer's own ledger holds exactly the money transaction it
    // initiated and the product transaction it received.
    let customer = chain.party(Role::Customer);
    assert_eq!(customer.own_transactions().len(), 2);
    assert_eq!(customer.own_transactions()[0].kind(), TransactionKind::Money);
    assert_eq!(customer.own_transactions()[1].kind(), TransactionKind::Product);

    // The seller settled: its payment in, its payment forward, the goods
    // hop it received during walk-up, and the hand-off it sent.
    assert_eq!(chain.party(Role::Seller).own_transactions().len(), 4);
}

#[test]
fn seeded_stock_is_sold_without_the_producer() {
    let (mut chain, sink) = chain_with_sink();
    chain
        .party_mut(Role::Storage)
        .stock_product(product_in_state(ProductKind::Milk, ProductState::Stored));

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    let milk = &chain.party(Role::Customer).inventory()[0];
    assert_eq!(milk.state(), ProductState::Sold);
    // Only the stages from storage onward were appended.
    assert_eq!(
        milk.state_history(),
        &[
            ProductState::Collected,
            ProductState::Stored,
            ProductState::Processed,
            ProductState::Delivered,
            ProductState::Packed,
            ProductState::Sold,
        ]
    );
    assert!(sink.events().is_empty());
}

#[test]
fn overpayment_is_rejected_by_default() {
    let (mut chain, sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(60).unwrap();

    assert!(sink.contains("Overpayment is not accepted!"));
    let customer = chain.party(Role::Customer);
    assert!(customer.inventory().is_empty());
    assert_eq!(customer.request_state(), RequestState::Rejected);
    assert!(!customer.own_transactions()[0].is_successful());
}

#[test]
fn overpayment_settles_under_the_accept_policy() {
    let sink = Arc::new(MemorySink::new());
    let config = SimulationConfig {
        overpayment: OverpaymentPolicy::Accept,
        ..SimulationConfig::default()
    };
    let mut chain = ChainBuilder::new().config(config).sink(sink.clone()).build();

    chain.make_request("milk").unwrap();
    chain.make_transaction(60).unwrap();

    assert!(sink.events().is_empty());
    assert_eq!(chain.party(Role::Customer).inventory().len(), 1);
    assert_eq!(
        chain.party(Role::Customer).request_state(),
        RequestState::Delivered
    );
}

#[test]
fn rejected_request_can_be_retried_with_a_fresh_pair() {
    let (mut chain, sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(40).unwrap();
    assert!(sink.contains("Not enough money!"));

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    let customer = chain.party(Role::Customer);
    assert_eq!(customer.request_state(), RequestState::Delivered);
    assert_eq!(customer.inventory().len(), 1);
}

#[test]
fn transaction_log_serializes_for_audit() {
    let (mut chain, _sink) = chain_with_sink();

    chain.make_request("apple").unwrap();
    chain.make_transaction(20).unwrap();

    let json = serde_json::to_string(chain.transaction_log()).expect("serialize");
    assert!(json.contains("\"Money\""));
    assert!(json.contains("Apple"));
}
