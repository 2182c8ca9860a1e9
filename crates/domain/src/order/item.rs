//! Order line items.

use common::EntityId;
use serde::{Deserialize, Serialize};

use super::OrderError;
use crate::money::Money;

/// An item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: EntityId,
    name: String,
    price: Money,
    product_id: EntityId,
    quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<EntityId>,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        };

        if item.id.is_blank() {
            return Err(OrderError::InvalidItem { field: "id" });
        }
        if item.name.trim().is_empty() {
            return Err(OrderError::InvalidItem { field: "name" });
        }
        if item.product_id.is_blank() {
            return Err(OrderError::InvalidItem {
                field: "product_id",
            });
        }
        if item.quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity: 0 });
        }
        if item.price.is_negative() {
            return Err(OrderError::InvalidPrice {
                price: item.price.cents(),
            });
        }
        if item.price.checked_multiply(item.quantity).is_none() {
            return Err(OrderError::TotalOverflow {
                context: format!("item {} ({} x {})", item.id, item.price, item.quantity),
            });
        }
        Ok(item)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &EntityId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the total price for this item (quantity * price).
    ///
    /// `new` rejects items whose total overflows.
    pub fn total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}
