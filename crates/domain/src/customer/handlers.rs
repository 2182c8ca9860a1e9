//! Handlers reacting to customer events.

use event_dispatcher::{Event, EventHandler, HandlerError};

use super::CustomerEvent;

/// Logs the first message for every created customer.
#[derive(Debug, Default)]
pub struct SendFirstConsoleLogWhenCustomerIsCreatedHandler;

impl EventHandler<CustomerEvent> for SendFirstConsoleLogWhenCustomerIsCreatedHandler {
    fn name(&self) -> &'static str {
        "SendFirstConsoleLogWhenCustomerIsCreatedHandler"
    }

    fn handle(&self, event: &Event<CustomerEvent>) -> Result<(), HandlerError> {
        if let CustomerEvent::Created(data) = event.payload() {
            tracing::info!(customer_id = %data.id, "first log for CustomerCreated event");
        }
        Ok(())
    }
}

/// Logs the second message for every created customer.
#[derive(Debug, Default)]
pub struct SendSecondConsoleLogWhenCustomerIsCreatedHandler;

impl EventHandler<CustomerEvent> for SendSecondConsoleLogWhenCustomerIsCreatedHandler {
    fn name(&self) -> &'static str {
        "SendSecondConsoleLogWhenCustomerIsCreatedHandler"
    }

    fn handle(&self, event: &Event<CustomerEvent>) -> Result<(), HandlerError> {
        if let CustomerEvent::Created(data) = event.payload() {
            tracing::info!(customer_id = %data.id, "second log for CustomerCreated event");
        }
        Ok(())
    }
}

/// Logs a customer's new address.
#[derive(Debug, Default)]
pub struct SendConsoleLogWhenCustomerChangedAddressHandler;

impl EventHandler<CustomerEvent> for SendConsoleLogWhenCustomerChangedAddressHandler {
    fn name(&self) -> &'static str {
        "SendConsoleLogWhenCustomerChangedAddressHandler"
    }

    fn handle(&self, event: &Event<CustomerEvent>) -> Result<(), HandlerError> {
        let CustomerEvent::ChangedAddress(customer) = event.payload() else {
            return Ok(());
        };

        let address = customer
            .address()
            .ok_or_else(|| format!("customer {} changed address but has none", customer.id()))?;

        tracing::info!(
            customer_id = %customer.id(),
            customer_name = customer.name(),
            %address,
            occurred_at = %event.timestamp(),
            "customer address changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::{Address, Customer};

    #[test]
    fn test_created_handlers_accept_created_event() {
        let event = Customer::new("1", "Customer 1").unwrap().created_event();
        assert!(
            SendFirstConsoleLogWhenCustomerIsCreatedHandler
                .handle(&event)
                .is_ok()
        );
        assert!(
            SendSecondConsoleLogWhenCustomerIsCreatedHandler
                .handle(&event)
                .is_ok()
        );
    }

    #[test]
    fn test_changed_address_handler_accepts_changed_address_event() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        let address = Address::new("Rua 1", 2, "ZipCode 3", "Cidade 4").unwrap();
        let event = customer.change_address(address);
        assert!(
            SendConsoleLogWhenCustomerChangedAddressHandler
                .handle(&event)
                .is_ok()
        );
    }

    #[test]
    fn test_changed_address_handler_rejects_snapshot_without_address() {
        let customer = Customer::new("1", "Customer 1").unwrap();
        let event = Event::new(CustomerEvent::ChangedAddress(customer));
        let err = SendConsoleLogWhenCustomerChangedAddressHandler
            .handle(&event)
            .unwrap_err();
        assert!(err.to_string().contains("has none"));
    }

    #[test]
    fn test_handlers_ignore_other_kinds() {
        let event = Customer::new("1", "Customer 1").unwrap().created_event();
        assert!(
            SendConsoleLogWhenCustomerChangedAddressHandler
                .handle(&event)
                .is_ok()
        );
    }
}
