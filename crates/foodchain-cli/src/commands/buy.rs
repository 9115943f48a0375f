//! `foodchain buy` — run one purchase through a freshly assembled chain.

use clap::Args;
use foodchain_chain::ChainBuilder;
use foodchain_core::{ProductKind, Role, SimulationConfig};

#[derive(Args, Debug)]
pub struct BuyArgs {
    /// Product to request (apple, milk, pork).
    pub product: String,

    /// Amount of money to pay. Defaults to the product's exact price.
    #[arg(short, long)]
    pub pay: Option<u32>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &BuyArgs, config: &SimulationConfig) -> anyhow::Result<()> {
    let kind = ProductKind::from_name(&args.product)
        .ok_or_else(|| anyhow::anyhow!("unknown product: {}", args.product))?;
    let amount = args.pay.unwrap_or_else(|| kind.price());

    let mut chain = ChainBuilder::new().config(config.clone()).build();
    chain.make_request(&args.product)?;
    chain.make_transaction(amount)?;

    let customer = chain.party(Role::Customer);

    if args.json {
        let inventory: Vec<_> = customer
            .inventory()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "product": p.kind().name(),
                    "state": p.state().name(),
                    "history": p.state_history().iter().map(|s| s.name()).collect::<Vec<_>>(),
                })
            })
            .collect();
        let report = serde_json::json!({
            "requested": kind.name(),
            "paid": amount,
            "price": kind.price(),
            "outcome": customer.request_state().to_string(),
            "inventory": inventory,
            "transactions": chain.transaction_log().len(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Requested: {} (price {})", kind.name(), kind.price());
    println!("Paid:      {}", amount);
    println!("Outcome:   {}", customer.request_state());
    for product in customer.inventory() {
        let history: Vec<&str> = product.state_history().iter().map(|s| s.name()).collect();
        println!("Received:  {} [{}]", product.kind(), history.join(", "));
    }
    println!();
    println!("Chain transaction log:");
    for transaction in chain.transaction_log() {
        println!("  {transaction}");
    }
    Ok(())
}
