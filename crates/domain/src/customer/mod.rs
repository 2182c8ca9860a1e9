//! Customer entity, its address, events and handlers.

mod address;
mod entity;
mod events;
mod handlers;
mod service;

pub use address::Address;
pub use entity::Customer;
pub use events::{CustomerCreatedData, CustomerEvent};
pub use handlers::{
    SendConsoleLogWhenCustomerChangedAddressHandler,
    SendFirstConsoleLogWhenCustomerIsCreatedHandler,
    SendSecondConsoleLogWhenCustomerIsCreatedHandler,
};
pub use service::CustomerService;

use thiserror::Error;

use crate::repository::Repository;

/// Errors that can occur during customer operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerError {
    /// Customer ID is required.
    #[error("Id is required")]
    IdRequired,

    /// Customer name is required.
    #[error("Name is required")]
    NameRequired,

    /// An address field is empty or invalid.
    #[error("Address {field} is required")]
    InvalidAddress { field: &'static str },

    /// Only customers with an address can be activated.
    #[error("Address is mandatory to activate a customer")]
    AddressRequired,
}

/// Persistence for customers.
pub trait CustomerRepository: Repository<Customer> {}

impl<T: Repository<Customer> + ?Sized> CustomerRepository for T {}
