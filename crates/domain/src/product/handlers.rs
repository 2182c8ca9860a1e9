//! Handlers reacting to product events.

use event_dispatcher::{Event, EventHandler, HandlerError};

use super::ProductEvent;

/// Announces a new product by email.
///
/// Delivery is simulated: the message is written to the log.
#[derive(Debug, Default)]
pub struct SendEmailWhenProductIsCreatedHandler;

impl EventHandler<ProductEvent> for SendEmailWhenProductIsCreatedHandler {
    fn name(&self) -> &'static str {
        "SendEmailWhenProductIsCreatedHandler"
    }

    fn handle(&self, event: &Event<ProductEvent>) -> Result<(), HandlerError> {
        let ProductEvent::Created(product) = event.payload();
        tracing::info!(
            product_id = %product.id(),
            product_name = product.name(),
            price = %product.price(),
            "sending email: product created"
        );
        Ok(())
    }
}
