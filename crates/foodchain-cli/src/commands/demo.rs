//! `foodchain demo` — scripted tour of the chain's behaviors.

use clap::Args;
use foodchain_chain::ChainBuilder;
use foodchain_core::{Product, ProductKind, ProductState, Role, SimulationConfig};

#[derive(Args, Debug)]
pub struct DemoArgs {}

pub fn run(_args: &DemoArgs, config: &SimulationConfig) -> anyhow::Result<()> {
    println!("=== Purchase: milk for the exact price ===");
    let mut chain = ChainBuilder::new().config(config.clone()).build();
    chain.make_request("milk")?;
    chain.make_transaction(ProductKind::Milk.price())?;
    let customer = chain.party(Role::Customer);
    for product in customer.inventory() {
        let history: Vec<&str> = product.state_history().iter().map(|s| s.name()).collect();
        println!("Customer received {} [{}]", product.kind(), history.join(", "));
    }

    println!();
    println!("=== Underpayment: milk for 40 ===");
    let mut chain = ChainBuilder::new().config(config.clone()).build();
    chain.make_request("milk")?;
    chain.make_transaction(40)?;
    println!(
        "Customer request ended {}; inventory holds {} products",
        chain.party(Role::Customer).request_state(),
        chain.party(Role::Customer).inventory().len()
    );

    println!();
    println!("=== Double spend: the seller re-sends an in-flight unit ===");
    let mut chain = ChainBuilder::new().config(config.clone()).build();
    let mut milk = Product::new(ProductKind::Milk);
    while milk.state() != ProductState::Packed {
        milk.advance()?;
    }
    milk.mark_in_transfer(Role::Customer);
    chain.party_mut(Role::Seller).stock_product(milk);
    chain.make_request("milk")?;
    chain.make_transaction(ProductKind::Milk.price())?;
    let seller = chain.party(Role::Seller);
    println!(
        "Seller flagged: {} ({} attempt(s))",
        seller.is_double_spending(),
        seller.double_spend_attempts()
    );

    Ok(())
}
