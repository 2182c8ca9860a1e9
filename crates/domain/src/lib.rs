//! Domain layer for the shop.
//!
//! This crate provides the business entities and their contracts:
//! - Customer, product and order entities with their value objects
//! - Domain events raised by customers and products, and their handlers
//! - Repository traits implemented by the infrastructure crate
//! - Services that persist changes and then notify the event dispatcher

pub mod customer;
pub mod error;
pub mod money;
pub mod order;
pub mod product;
pub mod repository;

pub use common::EntityId;
pub use customer::{
    Address, Customer, CustomerCreatedData, CustomerError, CustomerEvent, CustomerRepository,
    CustomerService, SendConsoleLogWhenCustomerChangedAddressHandler,
    SendFirstConsoleLogWhenCustomerIsCreatedHandler,
    SendSecondConsoleLogWhenCustomerIsCreatedHandler,
};
pub use error::DomainError;
pub use money::Money;
pub use order::{Order, OrderError, OrderItem, OrderRepository};
pub use product::{
    Product, ProductError, ProductEvent, ProductRepository, ProductService,
    SendEmailWhenProductIsCreatedHandler,
};
pub use repository::{Repository, RepositoryError};
