//! Repository implementations for the shop domain.
//!
//! - [`memory`]: in-memory repositories for tests and local runs
//! - [`postgres`]: PostgreSQL repositories backed by sqlx

pub mod memory;
pub mod postgres;

pub use memory::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryRepository, Record,
};
pub use postgres::{
    PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository, connect,
    run_migrations,
};
