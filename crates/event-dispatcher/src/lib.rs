//! In-process domain event dispatching.
//!
//! This crate provides the publish/subscribe core of the shop:
//! - [`Event`] envelope carrying a timestamp and an immutable payload
//! - [`DomainEvent`] trait giving every payload a stable kind discriminator
//! - [`EventHandler`] contract implemented by side-effect handlers
//! - [`EventDispatcher`] registry routing events to handlers in registration order

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;

pub use dispatcher::{DeliveryPolicy, EventDispatcher};
pub use error::{DispatchError, HandlerFailure, InvalidDeliveryPolicy, Result};
pub use event::{DomainEvent, Event, EventId};
pub use handler::{EventHandler, HandlerError, HandlerRef, same_handler};
