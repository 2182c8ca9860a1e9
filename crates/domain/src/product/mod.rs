//! Product entity, its events and handlers.

mod entity;
mod events;
mod handlers;
mod service;

pub use entity::Product;
pub use events::ProductEvent;
pub use handlers::SendEmailWhenProductIsCreatedHandler;
pub use service::ProductService;

use thiserror::Error;

use crate::repository::Repository;

/// Errors that can occur during product operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// Product ID is required.
    #[error("Id is required")]
    IdRequired,

    /// Product name is required.
    #[error("Name is required")]
    NameRequired,

    /// Price must not be negative.
    #[error("Price must be greater than or equal to zero, got {cents} cents")]
    NegativePrice { cents: i64 },
}

/// Persistence for products.
pub trait ProductRepository: Repository<Product> {}

impl<T: Repository<Product> + ?Sized> ProductRepository for T {}
