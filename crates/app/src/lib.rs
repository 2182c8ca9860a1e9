//! Wiring for the shop binary.
//!
//! Builds one dispatcher per event family, registers the logging handlers
//! and runs a short customer, product and order walkthrough against any
//! set of repositories.

pub mod config;
pub mod error;

use std::sync::Arc;

use common::EntityId;
use domain::{
    Address, CustomerEvent, CustomerRepository, CustomerService, DomainError, Money, Order,
    OrderItem, OrderRepository, ProductEvent, ProductRepository, ProductService,
    SendConsoleLogWhenCustomerChangedAddressHandler, SendEmailWhenProductIsCreatedHandler,
    SendFirstConsoleLogWhenCustomerIsCreatedHandler,
    SendSecondConsoleLogWhenCustomerIsCreatedHandler,
};
use event_dispatcher::{DeliveryPolicy, EventDispatcher, HandlerRef};

pub use config::Config;
pub use error::{AppError, Result};

/// Creates the customer dispatcher with the console log handlers registered.
pub fn customer_dispatcher(policy: DeliveryPolicy) -> Arc<EventDispatcher<CustomerEvent>> {
    let dispatcher = EventDispatcher::with_policy(policy);

    let first: HandlerRef<CustomerEvent> =
        Arc::new(SendFirstConsoleLogWhenCustomerIsCreatedHandler);
    let second: HandlerRef<CustomerEvent> =
        Arc::new(SendSecondConsoleLogWhenCustomerIsCreatedHandler);
    let changed_address: HandlerRef<CustomerEvent> =
        Arc::new(SendConsoleLogWhenCustomerChangedAddressHandler);

    dispatcher.register(CustomerEvent::CREATED, first);
    dispatcher.register(CustomerEvent::CREATED, second);
    dispatcher.register(CustomerEvent::CHANGED_ADDRESS, changed_address);

    Arc::new(dispatcher)
}

/// Creates the product dispatcher with the e-mail handler registered.
pub fn product_dispatcher(policy: DeliveryPolicy) -> Arc<EventDispatcher<ProductEvent>> {
    let dispatcher = EventDispatcher::with_policy(policy);

    let email: HandlerRef<ProductEvent> = Arc::new(SendEmailWhenProductIsCreatedHandler);
    dispatcher.register(ProductEvent::CREATED, email);

    Arc::new(dispatcher)
}

/// What the walkthrough stored.
#[derive(Debug, Clone)]
pub struct Summary {
    pub customer_id: EntityId,
    pub product_id: EntityId,
    pub order: Order,
    pub orders_stored: usize,
}

/// Creates a customer and moves them, creates a product, then places an
/// order for it.
pub async fn walkthrough<C, P, O>(
    customers: &CustomerService<C>,
    products: &ProductService<P>,
    orders: &O,
) -> Result<Summary>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    let customer = customers
        .create_customer(EntityId::generate(), "Customer 1")
        .await?;

    let address =
        Address::new("Street 1", 123, "13330-250", "São Paulo").map_err(DomainError::from)?;
    customers.change_address(customer.id(), address).await?;

    let product = products
        .create_product(EntityId::generate(), "Product 1", Money::from_dollars(10))
        .await?;

    let item = OrderItem::new(
        EntityId::generate(),
        product.name(),
        product.price(),
        product.id().clone(),
        2,
    )
    .map_err(DomainError::from)?;
    let order = Order::new(EntityId::generate(), customer.id().clone(), vec![item])
        .map_err(DomainError::from)?;
    orders.create(&order).await?;

    tracing::info!(
        order_id = %order.id(),
        customer_id = %order.customer_id(),
        total = %order.total(),
        "Order placed"
    );

    let orders_stored = orders.find_all().await?.len();

    Ok(Summary {
        customer_id: customer.id().clone(),
        product_id: product.id().clone(),
        order,
        orders_stored,
    })
}
