//! `foodchain catalog` — print the product catalog.

use clap::Args;
use foodchain_core::ProductKind;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &CatalogArgs) -> anyhow::Result<()> {
    if args.json {
        let entries: Vec<_> = ProductKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "name": kind.name(),
                    "price": kind.price(),
                    "states": kind.states().iter().map(|s| s.name()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for kind in ProductKind::ALL {
        let states: Vec<&str> = kind.states().iter().map(|s| s.name()).collect();
        println!(
            "{:<8} price {:>3}   {}",
            kind.name(),
            kind.price(),
            states.join(" -> ")
        );
    }
    Ok(())
}
