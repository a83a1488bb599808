//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is an expected outcome the caller must handle; none of them
/// leave the ledger or item map partially updated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A numeric argument was non-positive or non-finite, or a required name was empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A reservation asked for more than the currently free space.
    #[error("capacity exceeded: requested {requested}, free {free}")]
    CapacityExceeded { requested: f64, free: f64 },

    /// A release/removal asked for more than is currently held.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: f64, available: f64 },

    /// The referenced item is not stored in the warehouse.
    #[error("item not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn capacity_exceeded(requested: f64, free: f64) -> Self {
        Self::CapacityExceeded { requested, free }
    }

    pub fn insufficient_stock(requested: f64, available: f64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn not_found(item: impl Into<String>) -> Self {
        Self::NotFound(item.into())
    }

    /// Stable, machine-readable name of the error kind.
    ///
    /// Outer layers key their user-facing messages off this instead of `Display`.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InvalidArgument(_) => "invalid_argument",
            DomainError::CapacityExceeded { .. } => "capacity_exceeded",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::NotFound(_) => "not_found",
        }
    }
}
