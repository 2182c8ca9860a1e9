use std::collections::HashMap;

use async_trait::async_trait;
use common::EntityId;
use domain::repository::{Repository, Result};
use domain::{Address, Customer, Money, Order, OrderItem, Product, RepositoryError};
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgPoolOptions, postgres::PgRow};

/// Opens a connection pool to the given database.
pub async fn connect(database_url: &str) -> std::result::Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Runs the database migrations.
pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

fn database_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(Box::new(e))
}

/// Maps an insert failure, turning a primary key violation into `AlreadyExists`.
fn insert_error(entity: &'static str, id: &EntityId, e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::AlreadyExists {
            entity,
            id: id.clone(),
        };
    }
    database_error(e)
}

fn invalid_record(entity: &'static str, id: &EntityId, reason: impl ToString) -> RepositoryError {
    RepositoryError::InvalidRecord {
        entity,
        id: id.clone(),
        reason: reason.to_string(),
    }
}

fn not_found(entity: &'static str, id: &EntityId) -> RepositoryError {
    RepositoryError::NotFound {
        entity,
        id: id.clone(),
    }
}

/// PostgreSQL-backed customer repository.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    const ENTITY: &'static str = "Customer";

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_customer(row: PgRow) -> Result<Customer> {
        let id = EntityId::new(row.try_get::<String, _>("id").map_err(database_error)?);
        let street: Option<String> = row.try_get("street").map_err(database_error)?;
        let number: Option<i32> = row.try_get("number").map_err(database_error)?;
        let zip: Option<String> = row.try_get("zip").map_err(database_error)?;
        let city: Option<String> = row.try_get("city").map_err(database_error)?;

        let address = match (street, number, zip, city) {
            (Some(street), Some(number), Some(zip), Some(city)) => {
                let number = u32::try_from(number)
                    .map_err(|e| invalid_record(Self::ENTITY, &id, e))?;
                Some(
                    Address::new(street, number, zip, city)
                        .map_err(|e| invalid_record(Self::ENTITY, &id, e))?,
                )
            }
            _ => None,
        };

        let reward_points: i64 = row.try_get("reward_points").map_err(database_error)?;
        let reward_points =
            u64::try_from(reward_points).map_err(|e| invalid_record(Self::ENTITY, &id, e))?;

        Customer::restore(
            id.clone(),
            row.try_get::<String, _>("name").map_err(database_error)?,
            address,
            row.try_get("active").map_err(database_error)?,
            reward_points,
        )
        .map_err(|e| invalid_record(Self::ENTITY, &id, e))
    }

    fn columns(customer: &Customer) -> Result<(Option<i32>, i64)> {
        let number = customer
            .address()
            .map(|a| i32::try_from(a.number()))
            .transpose()
            .map_err(|e| invalid_record(Self::ENTITY, customer.id(), e))?;
        let reward_points = i64::try_from(customer.reward_points())
            .map_err(|e| invalid_record(Self::ENTITY, customer.id(), e))?;
        Ok((number, reward_points))
    }
}

#[async_trait]
impl Repository<Customer> for PostgresCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<()> {
        let (number, reward_points) = Self::columns(customer)?;
        let address = customer.address();

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zip, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(number)
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(reward_points)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(Self::ENTITY, customer.id(), e))?;

        tracing::debug!(customer_id = %customer.id(), "Customer inserted");
        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        let (number, reward_points) = Self::columns(customer)?;
        let address = customer.address();

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zip = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(number)
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(reward_points)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(Self::ENTITY, customer.id()));
        }
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<Customer> {
        let row = sqlx::query(
            r#"
            SELECT id, name, street, number, zip, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .ok_or_else(|| not_found(Self::ENTITY, id))?;

        Self::row_to_customer(row)
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zip, city, active, reward_points
            FROM customers
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }
}

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    const ENTITY: &'static str = "Product";

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        let id = EntityId::new(row.try_get::<String, _>("id").map_err(database_error)?);
        let name: String = row.try_get("name").map_err(database_error)?;
        let price: i64 = row.try_get("price_cents").map_err(database_error)?;

        Product::new(id.clone(), name, Money::from_cents(price))
            .map_err(|e| invalid_record(Self::ENTITY, &id, e))
    }
}

#[async_trait]
impl Repository<Product> for PostgresProductRepository {
    async fn create(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price_cents) VALUES ($1, $2, $3)")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price().cents())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(Self::ENTITY, product.id(), e))?;

        tracing::debug!(product_id = %product.id(), "Product inserted");
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let result = sqlx::query("UPDATE products SET name = $2, price_cents = $3 WHERE id = $1")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price().cents())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(Self::ENTITY, product.id()));
        }
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<Product> {
        let row = sqlx::query("SELECT id, name, price_cents FROM products WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .ok_or_else(|| not_found(Self::ENTITY, id))?;

        Self::row_to_product(row)
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query("SELECT id, name, price_cents FROM products ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}

/// PostgreSQL-backed order repository.
///
/// An order and its items are written in one transaction. Updating an
/// order deletes its items and inserts the new set.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    const ENTITY: &'static str = "Order";

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_items(tx: &mut Transaction<'_, Postgres>, order: &Order) -> Result<()> {
        for (position, item) in order.items().iter().enumerate() {
            let position =
                i32::try_from(position).map_err(|e| invalid_record(Self::ENTITY, order.id(), e))?;
            let quantity = i32::try_from(item.quantity())
                .map_err(|e| invalid_record(Self::ENTITY, order.id(), e))?;

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, id, product_id, position, name, price_cents, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(order.id().as_str())
            .bind(item.id().as_str())
            .bind(item.product_id().as_str())
            .bind(position)
            .bind(item.name())
            .bind(item.price().cents())
            .bind(quantity)
            .execute(&mut **tx)
            .await
            .map_err(database_error)?;
        }
        Ok(())
    }

    fn row_to_item(order_id: &EntityId, row: &PgRow) -> Result<OrderItem> {
        let quantity: i32 = row.try_get("quantity").map_err(database_error)?;
        let quantity =
            u32::try_from(quantity).map_err(|e| invalid_record(Self::ENTITY, order_id, e))?;

        OrderItem::new(
            row.try_get::<String, _>("id").map_err(database_error)?,
            row.try_get::<String, _>("name").map_err(database_error)?,
            Money::from_cents(row.try_get("price_cents").map_err(database_error)?),
            row.try_get::<String, _>("product_id")
                .map_err(database_error)?,
            quantity,
        )
        .map_err(|e| invalid_record(Self::ENTITY, order_id, e))
    }

    fn build_order(id: EntityId, customer_id: String, items: Vec<OrderItem>) -> Result<Order> {
        Order::new(id.clone(), customer_id, items).map_err(|e| invalid_record(Self::ENTITY, &id, e))
    }
}

#[async_trait]
impl Repository<Order> for PostgresOrderRepository {
    async fn create(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query("INSERT INTO orders (id, customer_id, total_cents) VALUES ($1, $2, $3)")
            .bind(order.id().as_str())
            .bind(order.customer_id().as_str())
            .bind(order.total().cents())
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(Self::ENTITY, order.id(), e))?;

        Self::insert_items(&mut tx, order).await?;
        tx.commit().await.map_err(database_error)?;

        tracing::debug!(
            order_id = %order.id(),
            items = order.items().len(),
            total = %order.total(),
            "Order inserted"
        );
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let result =
            sqlx::query("UPDATE orders SET customer_id = $2, total_cents = $3 WHERE id = $1")
                .bind(order.id().as_str())
                .bind(order.customer_id().as_str())
                .bind(order.total().cents())
                .execute(&mut *tx)
                .await
                .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(Self::ENTITY, order.id()));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order.id().as_str())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        Self::insert_items(&mut tx, order).await?;
        tx.commit().await.map_err(database_error)?;
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<Order> {
        let row = sqlx::query("SELECT id, customer_id FROM orders WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .ok_or_else(|| not_found(Self::ENTITY, id))?;

        let customer_id: String = row.try_get("customer_id").map_err(database_error)?;

        let item_rows = sqlx::query(
            r#"
            SELECT id, product_id, name, price_cents, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let items = item_rows
            .iter()
            .map(|row| Self::row_to_item(id, row))
            .collect::<Result<Vec<_>>>()?;

        Self::build_order(id.clone(), customer_id, items)
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let order_rows = sqlx::query("SELECT id, customer_id FROM orders ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        let item_rows = sqlx::query(
            r#"
            SELECT order_id, id, product_id, name, price_cents, quantity
            FROM order_items
            ORDER BY order_id, position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let order_id: String = row.try_get("order_id").map_err(database_error)?;
            let item = Self::row_to_item(&EntityId::new(order_id.as_str()), row)?;
            items_by_order.entry(order_id).or_default().push(item);
        }

        order_rows
            .into_iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(database_error)?;
                let customer_id: String = row.try_get("customer_id").map_err(database_error)?;
                let items = items_by_order.remove(&id).unwrap_or_default();
                Self::build_order(EntityId::new(id), customer_id, items)
            })
            .collect()
    }
}
