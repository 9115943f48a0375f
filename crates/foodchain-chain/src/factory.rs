use foodchain_core::{Product, ProductKind};

use crate::error::ChainError;

/// Manufactures goods from nothing when no party in the chain holds stock.
///
/// The producer-role party invokes this exactly once per unmet request.
pub trait Factory: Send + Sync {
    /// Make one unit of the named product in its canonical start state.
    fn make_product(&self, name: &str) -> Result<Product, ChainError>;
}

/// Catalog-backed factory.
#[derive(Debug, Default)]
pub struct FoodFactory;

impl Factory for FoodFactory {
    fn make_product(&self, name: &str) -> Result<Product, ChainError> {
        let kind = ProductKind::from_name(name)
            .ok_or_else(|| ChainError::UnknownProduct(name.to_string()))?;
        let product = Product::new(kind);
        tracing::info!(product = %kind, id = %product.id(), "manufactured product");
        Ok(product)
    }
}
