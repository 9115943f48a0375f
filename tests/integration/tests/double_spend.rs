//! Double-spend detection, at the channel and across the whole chain.

use std::sync::Arc;

use foodchain_chain::{GoodsChannel, MemorySink, Party};
use foodchain_core::{ProductKind, ProductState, RequestState, Role};
use foodchain_integration_tests::{chain_with_sink, product_in_state};

#[test]
fn in_flight_unit_cannot_be_sent_again() {
    let sink = Arc::new(MemorySink::new());
    let channel = GoodsChannel::new(sink.clone());
    let mut seller = Party::new(Role::Seller);
    let mut customer = Party::new(Role::Customer);

    let mut milk = product_in_state(ProductKind::Milk, ProductState::Packed);
    milk.mark_in_transfer(Role::Distributor);
    seller.stock_product(milk);

    let result = channel
        .make_transmission(&mut seller, &mut customer, ProductKind::Milk)
        .unwrap();

    assert!(result.is_none());
    assert!(sink.contains("ATTEMPT TO COMMIT DOUBLE SPENDING"));
    assert!(seller.is_double_spending());
    assert_eq!(seller.double_spend_attempts(), 1);

    let frozen = &seller.inventory()[0];
    assert!(frozen.is_currently_processed());
    assert!(frozen.processing_parties().is_empty());
    assert_eq!(frozen.state(), ProductState::Packed);
    assert!(customer.inventory().is_empty());
}

#[test]
fn each_rejected_attempt_increments_the_counter_once() {
    let sink = Arc::new(MemorySink::new());
    let channel = GoodsChannel::new(sink.clone());
    let mut seller = Party::new(Role::Seller);
    let mut customer = Party::new(Role::Customer);

    let mut milk = product_in_state(ProductKind::Milk, ProductState::Packed);
    milk.mark_in_transfer(Role::Customer);
    seller.stock_product(milk);

    for expected in 1..=3 {
        let result = channel
            .make_transmission(&mut seller, &mut customer, ProductKind::Milk)
            .unwrap();
        assert!(result.is_none());
        assert_eq!(seller.double_spend_attempts(), expected);
    }
    assert_eq!(
        sink.events()
            .iter()
            .filter(|e| e.to_string().contains("DOUBLE SPENDING"))
            .count(),
        3
    );
}

#[test]
fn clean_purchase_flags_nobody() {
    let (mut chain, sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    assert!(!sink.contains("ATTEMPT TO COMMIT DOUBLE SPENDING"));
    for role in Role::CHAIN_ORDER {
        assert!(!chain.party(role).is_double_spending());
        assert_eq!(chain.party(role).double_spend_attempts(), 0);
    }
}

#[test]
fn settlement_of_a_still_flagged_unit_is_rejected() {
    let (mut chain, sink) = chain_with_sink();

    // The unit never left its in-flight state after a previous transfer.
    let mut milk = product_in_state(ProductKind::Milk, ProductState::Packed);
    milk.mark_in_transfer(Role::Customer);
    chain.party_mut(Role::Seller).stock_product(milk);

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    assert!(sink.contains("ATTEMPT TO COMMIT DOUBLE SPENDING"));
    let seller = chain.party(Role::Seller);
    assert!(seller.is_double_spending());
    assert_eq!(seller.double_spend_attempts(), 1);
    assert!(seller.inventory()[0].processing_parties().is_empty());

    // No ownership transfer, no state advance.
    let customer = chain.party(Role::Customer);
    assert!(customer.inventory().is_empty());
    assert_eq!(customer.request_state(), RequestState::Rejected);
    assert_eq!(seller.inventory()[0].state(), ProductState::Packed);
}

#[test]
fn buying_twice_cleanly_never_trips_the_detector() {
    let (mut chain, sink) = chain_with_sink();

    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();
    chain.make_request("milk").unwrap();
    chain.make_transaction(45).unwrap();

    assert!(!sink.contains("ATTEMPT TO COMMIT DOUBLE SPENDING"));
    assert_eq!(chain.party(Role::Customer).inventory().len(), 2);
    assert_eq!(chain.party(Role::Seller).double_spend_attempts(), 0);
}
