use std::sync::Arc;

use app::{customer_dispatcher, product_dispatcher, walkthrough};
use domain::repository::Repository;
use domain::{CustomerEvent, CustomerService, Money, ProductEvent, ProductService};
use event_dispatcher::DeliveryPolicy;
use infrastructure::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
};

#[test]
fn test_customer_dispatcher_registers_both_created_handlers_in_order() {
    let dispatcher = customer_dispatcher(DeliveryPolicy::FailFast);

    let names: Vec<_> = dispatcher
        .handlers(CustomerEvent::CREATED)
        .iter()
        .map(|h| h.name())
        .collect();

    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("SendFirstConsoleLogWhenCustomerIsCreatedHandler"));
    assert!(names[1].ends_with("SendSecondConsoleLogWhenCustomerIsCreatedHandler"));
    assert_eq!(dispatcher.handler_count(CustomerEvent::CHANGED_ADDRESS), 1);
}

#[test]
fn test_product_dispatcher_uses_requested_policy() {
    let dispatcher = product_dispatcher(DeliveryPolicy::Isolate);

    assert_eq!(dispatcher.policy(), DeliveryPolicy::Isolate);
    assert!(dispatcher.has_handlers(ProductEvent::CREATED));
}

#[tokio::test]
async fn test_walkthrough_stores_customer_product_and_order() {
    let customers = CustomerService::new(
        InMemoryCustomerRepository::new(),
        customer_dispatcher(DeliveryPolicy::FailFast),
    );
    let products = ProductService::new(
        InMemoryProductRepository::new(),
        product_dispatcher(DeliveryPolicy::FailFast),
    );
    let orders = InMemoryOrderRepository::new();

    let summary = walkthrough(&customers, &products, &orders).await.unwrap();

    let customer = customers.find(&summary.customer_id).await.unwrap();
    assert!(customer.address().is_some());
    assert_eq!(
        products.find(&summary.product_id).await.unwrap().price(),
        Money::from_dollars(10)
    );
    assert_eq!(summary.order.total(), Money::from_dollars(20));
    assert_eq!(summary.orders_stored, 1);
    assert_eq!(
        orders.find(summary.order.id()).await.unwrap(),
        summary.order
    );
}

#[tokio::test]
async fn test_walkthrough_shares_dispatchers_between_runs() {
    let customer_events = customer_dispatcher(DeliveryPolicy::Isolate);
    let customers = CustomerService::new(
        InMemoryCustomerRepository::new(),
        Arc::clone(&customer_events),
    );
    let products = ProductService::new(
        InMemoryProductRepository::new(),
        product_dispatcher(DeliveryPolicy::Isolate),
    );
    let orders = InMemoryOrderRepository::new();

    walkthrough(&customers, &products, &orders).await.unwrap();
    let second = walkthrough(&customers, &products, &orders).await.unwrap();

    assert_eq!(second.orders_stored, 2);
    assert_eq!(customers.repository().len().await, 2);
    assert_eq!(customer_events.handler_count(CustomerEvent::CREATED), 2);
}
