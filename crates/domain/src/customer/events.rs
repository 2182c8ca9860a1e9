//! Customer domain events.

use common::EntityId;
use event_dispatcher::DomainEvent;
use serde::{Deserialize, Serialize};

use super::Customer;

/// Events raised by customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    /// A customer was created.
    Created(CustomerCreatedData),

    /// A customer moved; carries the customer after the change.
    ChangedAddress(Customer),
}

impl CustomerEvent {
    pub const CREATED: &'static str = "CustomerCreatedEvent";
    pub const CHANGED_ADDRESS: &'static str = "CustomerChangedAddressEvent";
}

impl DomainEvent for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::Created(_) => Self::CREATED,
            CustomerEvent::ChangedAddress(_) => Self::CHANGED_ADDRESS,
        }
    }
}

/// Data for the CustomerCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreatedData {
    /// The new customer's ID.
    pub id: EntityId,

    /// The new customer's name.
    pub name: String,
}
