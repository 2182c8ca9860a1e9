//! Product domain events.

use event_dispatcher::DomainEvent;
use serde::{Deserialize, Serialize};

use super::Product;

/// Events raised by products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProductEvent {
    /// A product was created; carries the new product.
    Created(Product),
}

impl ProductEvent {
    pub const CREATED: &'static str = "ProductCreatedEvent";
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::Created(_) => Self::CREATED,
        }
    }
}
