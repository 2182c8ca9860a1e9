//! Shop entry point.

use app::{Config, Summary};
use domain::{CustomerService, OrderRepository, ProductService};
use infrastructure::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> app::Result<()> {
    // 1. Load configuration
    let config = Config::from_env()?;

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. Install Prometheus metrics recorder
    let metrics_handle = PrometheusBuilder::new().install_recorder()?;

    // 4. Build dispatchers and register handlers
    let customer_events = app::customer_dispatcher(config.delivery_policy);
    let product_events = app::product_dispatcher(config.delivery_policy);
    tracing::info!(
        policy = %config.delivery_policy,
        customer_kinds = ?customer_events.kinds(),
        product_kinds = ?product_events.kinds(),
        "dispatchers ready"
    );

    // 5. Pick storage and run
    let summary = match &config.database_url {
        Some(url) => {
            tracing::info!("using PostgreSQL storage");
            let pool = infrastructure::connect(url).await?;
            infrastructure::run_migrations(&pool).await?;

            let customers = CustomerService::new(
                PostgresCustomerRepository::new(pool.clone()),
                customer_events,
            );
            let products =
                ProductService::new(PostgresProductRepository::new(pool.clone()), product_events);
            run(&customers, &products, &PostgresOrderRepository::new(pool)).await?
        }
        None => {
            tracing::info!("using in-memory storage");
            let customers =
                CustomerService::new(InMemoryCustomerRepository::new(), customer_events);
            let products = ProductService::new(InMemoryProductRepository::new(), product_events);
            run(&customers, &products, &InMemoryOrderRepository::new()).await?
        }
    };

    match serde_json::to_string_pretty(&summary.order) {
        Ok(order) => tracing::info!(orders_stored = summary.orders_stored, "{order}"),
        Err(e) => tracing::warn!(error = %e, "could not render order"),
    }
    tracing::info!("metrics snapshot:\n{}", metrics_handle.render());
    Ok(())
}

async fn run<C, P, O>(
    customers: &CustomerService<C>,
    products: &ProductService<P>,
    orders: &O,
) -> app::Result<Summary>
where
    C: domain::CustomerRepository,
    P: domain::ProductRepository,
    O: OrderRepository,
{
    let summary = app::walkthrough(customers, products, orders).await?;
    tracing::info!(
        customer_id = %summary.customer_id,
        product_id = %summary.product_id,
        "walkthrough finished"
    );
    Ok(summary)
}
