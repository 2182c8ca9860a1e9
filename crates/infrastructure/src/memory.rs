use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::EntityId;
use domain::repository::{Repository, Result};
use domain::{Customer, Order, Product, RepositoryError};
use tokio::sync::RwLock;

/// An entity that can be kept by [`InMemoryRepository`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in errors, e.g. `"Order"`.
    const ENTITY: &'static str;

    fn record_id(&self) -> &EntityId;
}

impl Record for Customer {
    const ENTITY: &'static str = "Customer";

    fn record_id(&self) -> &EntityId {
        self.id()
    }
}

impl Record for Product {
    const ENTITY: &'static str = "Product";

    fn record_id(&self) -> &EntityId {
        self.id()
    }
}

impl Record for Order {
    const ENTITY: &'static str = "Order";

    fn record_id(&self) -> &EntityId {
        self.id()
    }
}

#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    index: HashMap<EntityId, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// In-memory repository implementation for testing.
///
/// Entities are stored by value and returned as clones; `find_all` yields
/// them in the order they were created.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    table: Arc<RwLock<Table<T>>>,
}

pub type InMemoryCustomerRepository = InMemoryRepository<Customer>;
pub type InMemoryProductRepository = InMemoryRepository<Product>;
pub type InMemoryOrderRepository = InMemoryRepository<Order>;

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns whether an entity is stored, without waiting for the lock.
    ///
    /// Returns `None` while a writer holds the lock.
    pub fn try_contains(&self, id: &EntityId) -> Option<bool> {
        self.table
            .try_read()
            .ok()
            .map(|table| table.index.contains_key(id))
    }

    /// Removes every stored entity.
    pub async fn clear(&self) {
        let mut table = self.table.write().await;
        table.rows.clear();
        table.index.clear();
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: &T) -> Result<()> {
        let mut table = self.table.write().await;
        let id = entity.record_id();

        if table.index.contains_key(id) {
            return Err(RepositoryError::AlreadyExists {
                entity: T::ENTITY,
                id: id.clone(),
            });
        }

        let position = table.rows.len();
        table.index.insert(id.clone(), position);
        table.rows.push(entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &T) -> Result<()> {
        let mut table = self.table.write().await;
        let id = entity.record_id();

        let Some(&position) = table.index.get(id) else {
            return Err(RepositoryError::NotFound {
                entity: T::ENTITY,
                id: id.clone(),
            });
        };
        table.rows[position] = entity.clone();
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<T> {
        let table = self.table.read().await;
        table
            .index
            .get(id)
            .map(|&position| table.rows[position].clone())
            .ok_or_else(|| RepositoryError::NotFound {
                entity: T::ENTITY,
                id: id.clone(),
            })
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        Ok(self.table.read().await.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use domain::{Money, OrderItem};

    use super::*;

    fn order(id: &str, items: Vec<OrderItem>) -> Order {
        Order::new(id, "c1", items).unwrap()
    }

    fn item(id: &str, dollars: i64, quantity: u32) -> OrderItem {
        OrderItem::new(id, "Item", Money::from_dollars(dollars), "p1", quantity).unwrap()
    }

    #[tokio::test]
    async fn create_and_find() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("p1", "Product 1", Money::from_dollars(100)).unwrap();

        repo.create(&product).await.unwrap();

        assert_eq!(repo.find(&EntityId::new("p1")).await.unwrap(), product);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn create_rejects_existing_id() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("p1", "Product 1", Money::from_dollars(100)).unwrap();
        repo.create(&product).await.unwrap();

        let result = repo.create(&product).await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { entity: "Product", .. })
        ));
    }

    #[tokio::test]
    async fn update_replaces_items_and_total() {
        let repo = InMemoryOrderRepository::new();
        let mut stored = order("o1", vec![item("i1", 10, 2)]);
        repo.create(&stored).await.unwrap();

        stored.add_item(item("i2", 5, 1)).unwrap();
        stored.remove_item(&EntityId::new("i1")).unwrap();
        repo.update(&stored).await.unwrap();

        let found = repo.find(&EntityId::new("o1")).await.unwrap();
        assert_eq!(found.items().len(), 1);
        assert_eq!(found.total(), Money::from_dollars(5));
    }

    #[tokio::test]
    async fn update_of_missing_entity_fails() {
        let repo = InMemoryOrderRepository::new();
        let err = repo
            .update(&order("o1", vec![item("i1", 10, 1)]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn find_missing_reports_entity_name() {
        let repo = InMemoryOrderRepository::new();
        let err = repo.find(&EntityId::new("123")).await.unwrap_err();
        assert_eq!(err.to_string(), "Order not found");
    }

    #[tokio::test]
    async fn find_all_keeps_creation_order() {
        let repo = InMemoryCustomerRepository::new();
        for id in ["c3", "c1", "c2"] {
            repo.create(&Customer::new(id, "Customer").unwrap())
                .await
                .unwrap();
        }

        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(ids, vec!["c3", "c1", "c2"]);
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryCustomerRepository::new();
        let clone = repo.clone();
        clone
            .create(&Customer::new("c1", "Customer").unwrap())
            .await
            .unwrap();

        assert!(!repo.is_empty().await);
        repo.clear().await;
        assert!(clone.is_empty().await);
    }
}
