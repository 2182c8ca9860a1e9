//! Customer service: persists customer changes and announces them.

use std::sync::Arc;

use common::EntityId;
use event_dispatcher::EventDispatcher;

use crate::error::Result;

use super::{Address, Customer, CustomerEvent, CustomerRepository};

/// Service for managing customers.
///
/// Every change is stored first and then handed to the dispatcher, so
/// handlers always observe persisted state.
pub struct CustomerService<R: CustomerRepository> {
    repository: R,
    dispatcher: Arc<EventDispatcher<CustomerEvent>>,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a new customer service.
    pub fn new(repository: R, dispatcher: Arc<EventDispatcher<CustomerEvent>>) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns the dispatcher customer events are sent to.
    pub fn dispatcher(&self) -> &Arc<EventDispatcher<CustomerEvent>> {
        &self.dispatcher
    }

    /// Creates and stores a customer, then notifies `CustomerCreatedEvent`.
    #[tracing::instrument(skip(self, id, name), fields(customer_id = %id))]
    pub async fn create_customer(
        &self,
        id: EntityId,
        name: impl Into<String>,
    ) -> Result<Customer> {
        let customer = Customer::new(id, name)?;
        self.repository.create(&customer).await?;
        metrics::counter!("customers_created").increment(1);

        self.dispatcher.notify(&customer.created_event())?;
        Ok(customer)
    }

    /// Moves a customer, then notifies `CustomerChangedAddressEvent`.
    #[tracing::instrument(skip(self, address), fields(customer_id = %id))]
    pub async fn change_address(&self, id: &EntityId, address: Address) -> Result<Customer> {
        let mut customer = self.repository.find(id).await?;
        let event = customer.change_address(address);
        self.repository.update(&customer).await?;

        self.dispatcher.notify(&event)?;
        Ok(customer)
    }

    /// Activates a customer that has an address.
    #[tracing::instrument(skip(self), fields(customer_id = %id))]
    pub async fn activate(&self, id: &EntityId) -> Result<Customer> {
        let mut customer = self.repository.find(id).await?;
        customer.activate()?;
        self.repository.update(&customer).await?;
        Ok(customer)
    }

    /// Loads a customer by ID.
    pub async fn find(&self, id: &EntityId) -> Result<Customer> {
        Ok(self.repository.find(id).await?)
    }
}
