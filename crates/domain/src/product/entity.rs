//! Product entity.

use common::EntityId;
use event_dispatcher::Event;
use serde::{Deserialize, Serialize};

use super::{ProductError, ProductEvent};
use crate::money::Money;

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: EntityId,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a validated product.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, ProductError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), ProductError> {
        if self.id.is_blank() {
            return Err(ProductError::IdRequired);
        }
        if self.name.trim().is_empty() {
            return Err(ProductError::NameRequired);
        }
        if self.price.is_negative() {
            return Err(ProductError::NegativePrice {
                cents: self.price.cents(),
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Renames the product.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::NameRequired);
        }
        self.name = name;
        Ok(())
    }

    /// Reprices the product.
    pub fn change_price(&mut self, price: Money) -> Result<(), ProductError> {
        if price.is_negative() {
            return Err(ProductError::NegativePrice {
                cents: price.cents(),
            });
        }
        self.price = price;
        Ok(())
    }

    /// Returns the event announcing this product's creation.
    pub fn created_event(&self) -> Event<ProductEvent> {
        Event::new(ProductEvent::Created(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product() {
        let product = Product::new("123", "Product 1", Money::from_dollars(10)).unwrap();
        assert_eq!(product.id().as_str(), "123");
        assert_eq!(product.name(), "Product 1");
        assert_eq!(product.price(), Money::from_dollars(10));
    }

    #[test]
    fn test_new_product_validation() {
        assert_eq!(
            Product::new("", "Product 1", Money::zero()),
            Err(ProductError::IdRequired)
        );
        assert_eq!(
            Product::new("123", "", Money::zero()),
            Err(ProductError::NameRequired)
        );
        assert_eq!(
            Product::new("123", "Product 1", Money::from_cents(-1)),
            Err(ProductError::NegativePrice { cents: -1 })
        );
    }

    #[test]
    fn test_change_name_and_price() {
        let mut product = Product::new("123", "Product 1", Money::from_dollars(10)).unwrap();
        product.change_name("Product 2").unwrap();
        product.change_price(Money::from_dollars(150)).unwrap();
        assert_eq!(product.name(), "Product 2");
        assert_eq!(product.price(), Money::from_dollars(150));

        assert!(product.change_price(Money::from_cents(-5)).is_err());
        assert_eq!(product.price(), Money::from_dollars(150));
    }

    #[test]
    fn test_created_event() {
        let product = Product::new("123", "Product 1", Money::from_dollars(10)).unwrap();
        let event = product.created_event();
        assert_eq!(event.kind(), ProductEvent::CREATED);
        let ProductEvent::Created(snapshot) = event.payload();
        assert_eq!(snapshot, &product);
    }
}
