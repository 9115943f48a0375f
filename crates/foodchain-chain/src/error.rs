use foodchain_core::{CoreError, ProductKind, Role};

/// Errors raised by the chain layer.
///
/// Business-rule rejections (insufficient payment, wrong sender/receiver
/// role, double spending) are NOT errors: they are reported through the
/// event sink and an absent/unsuccessful transaction. Everything here is a
/// contract violation or a malformed call.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("lifecycle violation: {0}")]
    Core(#[from] CoreError),

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("no pending request to settle")]
    NoPendingRequest,

    #[error("{role} does not hold a {kind} ready for hand-off")]
    ProductMissing { role: Role, kind: ProductKind },

    #[error("no party holds a {kind} ready for hand-off")]
    ProductUnavailable { kind: ProductKind },
}
