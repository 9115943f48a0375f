//! Shared helpers for the integration suite.

use std::sync::Arc;

use foodchain_chain::{Chain, ChainBuilder, MemorySink};
use foodchain_core::{Product, ProductKind, ProductState};

/// A freshly assembled chain wired to a capturing event sink.
pub fn chain_with_sink() -> (Chain, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let chain = ChainBuilder::new().sink(sink.clone()).build();
    (chain, sink)
}

/// A unit advanced along its canonical sequence until it reaches `state`.
pub fn product_in_state(kind: ProductKind, state: ProductState) -> Product {
    let mut product = Product::new(kind);
    while product.state() != state {
        product
            .advance()
            .expect("state is not on this kind's canonical sequence");
    }
    product
}
