//! Shared types for the shop domain.

mod types;

pub use types::EntityId;
