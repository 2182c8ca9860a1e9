//! Product service: persists new products and announces them.

use std::sync::Arc;

use common::EntityId;
use event_dispatcher::EventDispatcher;

use crate::error::Result;
use crate::money::Money;

use super::{Product, ProductEvent, ProductRepository};

/// Service for managing products.
pub struct ProductService<R: ProductRepository> {
    repository: R,
    dispatcher: Arc<EventDispatcher<ProductEvent>>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a new product service.
    pub fn new(repository: R, dispatcher: Arc<EventDispatcher<ProductEvent>>) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates and stores a product, then notifies `ProductCreatedEvent`.
    #[tracing::instrument(skip(self, id, name), fields(product_id = %id))]
    pub async fn create_product(
        &self,
        id: EntityId,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Product> {
        let product = Product::new(id, name, price)?;
        self.repository.create(&product).await?;
        metrics::counter!("products_created").increment(1);

        self.dispatcher.notify(&product.created_event())?;
        Ok(product)
    }

    /// Changes a product's price.
    #[tracing::instrument(skip(self), fields(product_id = %id))]
    pub async fn change_price(&self, id: &EntityId, price: Money) -> Result<Product> {
        let mut product = self.repository.find(id).await?;
        product.change_price(price)?;
        self.repository.update(&product).await?;
        Ok(product)
    }

    /// Loads a product by ID.
    pub async fn find(&self, id: &EntityId) -> Result<Product> {
        Ok(self.repository.find(id).await?)
    }
}
