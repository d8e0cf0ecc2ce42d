//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, synchronous failures raised by the
/// inventory operations. Storage and transport failures belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced bin or SKU does not exist in the current state.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested quantity is not a positive integer.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// The source bin cannot cover the requested quantity.
    #[error("insufficient stock for {sku} in bin {bin} (available: {available}, requested: {requested})")]
    InsufficientStock {
        bin: String,
        sku: String,
        available: u64,
        requested: u64,
    },

    /// An identifier was invalid (e.g. blank after trimming).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn insufficient_stock(
        bin: impl Into<String>,
        sku: impl Into<String>,
        available: u64,
        requested: u64,
    ) -> Self {
        Self::InsufficientStock {
            bin: bin.into(),
            sku: sku.into(),
            available,
            requested,
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
