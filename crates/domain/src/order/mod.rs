//! Order entity and its items.

mod entity;
mod item;

pub use entity::Order;
pub use item::OrderItem;

use common::EntityId;
use thiserror::Error;

use crate::repository::Repository;

/// Errors that can occur during order operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Order ID is required.
    #[error("Id is required")]
    IdRequired,

    /// Customer ID is required.
    #[error("CustomerId is required")]
    CustomerIdRequired,

    /// Order has no items.
    #[error("Items are required")]
    NoItems,

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Item ID, name or product ID missing.
    #[error("Item {field} is required")]
    InvalidItem { field: &'static str },

    /// Price must not be negative.
    #[error("Invalid price: {price} (must not be negative)")]
    InvalidPrice { price: i64 },

    /// A line or order total does not fit in `Money`.
    #[error("Total overflows: {context}")]
    TotalOverflow { context: String },

    /// Two items share the same ID.
    #[error("Duplicate item: {item_id}")]
    DuplicateItem { item_id: EntityId },
}

/// Persistence for orders.
///
/// Updating an order replaces its whole item set.
pub trait OrderRepository: Repository<Order> {}

impl<T: Repository<Order> + ?Sized> OrderRepository for T {}
