//! Order entity.

use std::collections::HashSet;

use common::EntityId;
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderItem};
use crate::money::Money;

/// An order placed by a customer.
///
/// Items keep the order in which they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: EntityId,
    customer_id: EntityId,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates a validated order.
    pub fn new(
        id: impl Into<EntityId>,
        customer_id: impl Into<EntityId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    fn validate(&self) -> Result<(), OrderError> {
        if self.id.is_blank() {
            return Err(OrderError::IdRequired);
        }
        if self.customer_id.is_blank() {
            return Err(OrderError::CustomerIdRequired);
        }
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id()) {
                return Err(OrderError::DuplicateItem {
                    item_id: item.id().clone(),
                });
            }
        }
        Self::checked_total(&self.id, &self.items)?;
        Ok(())
    }

    fn checked_total<'a>(
        id: &EntityId,
        items: impl IntoIterator<Item = &'a OrderItem>,
    ) -> Result<Money, OrderError> {
        items
            .into_iter()
            .try_fold(Money::zero(), |acc, item| acc.checked_add(item.total()))
            .ok_or_else(|| OrderError::TotalOverflow {
                context: format!("order {id}"),
            })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn customer_id(&self) -> &EntityId {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the sum of all item totals.
    ///
    /// Construction and `add_item` reject orders whose total overflows.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Adds an item to the order.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        if self.items.iter().any(|existing| existing.id() == item.id()) {
            return Err(OrderError::DuplicateItem {
                item_id: item.id().clone(),
            });
        }
        Self::checked_total(&self.id, self.items.iter().chain([&item]))?;
        self.items.push(item);
        Ok(())
    }

    /// Removes an item by ID. The last item cannot be removed.
    pub fn remove_item(&mut self, item_id: &EntityId) -> Result<OrderItem, OrderError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| OrderError::InvalidItem { field: "id" })?;

        if self.items.len() == 1 {
            return Err(OrderError::NoItems);
        }
        Ok(self.items.remove(index))
    }
}
