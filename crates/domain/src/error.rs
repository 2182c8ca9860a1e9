//! Domain error types.

use event_dispatcher::DispatchError;
use thiserror::Error;

use crate::customer::CustomerError;
use crate::order::OrderError;
use crate::product::ProductError;
use crate::repository::RepositoryError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A customer invariant was violated.
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    /// A product invariant was violated.
    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    /// An order invariant was violated.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// The repository failed to load or store an entity.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The change was stored but a handler failed while it was being announced.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
