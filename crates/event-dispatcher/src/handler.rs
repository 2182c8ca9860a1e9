//! Handler contract for side effects triggered by events.

use std::sync::Arc;

use crate::event::{DomainEvent, Event};

/// Error a handler reports when its side effect fails.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A unit of side-effecting work invoked for every matching event.
///
/// Handlers must not assume they are the only handler registered for a kind.
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Returns the name of this handler, used in logs and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Handles a single event.
    fn handle(&self, event: &Event<E>) -> Result<(), HandlerError>;
}

/// Shared reference to a registered handler.
///
/// The dispatcher tells handlers apart by the allocation the `Arc` points to,
/// so two instances of the same handler type stay distinct.
pub type HandlerRef<E> = Arc<dyn EventHandler<E>>;

/// Returns true if both references point at the same handler instance.
pub fn same_handler<E: DomainEvent>(a: &HandlerRef<E>, b: &HandlerRef<E>) -> bool {
    // Compare data addresses only; vtable pointers may differ across codegen units.
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
