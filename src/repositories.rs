use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::Order;

#[async_trait]
pub trait OrderRepository {
    async fn create(&self, id: String, order: Order) -> Result<Order, String>;
    async fn read(&self, id: &str) -> Result<Order, String>;
    async fn read_all(&self) -> Result<Vec<Order>, String>;
}

#[async_trait]
pub trait TrackingRepository {
    async fn set_status(&self, id: String, status: String) -> Result<(), String>;
    async fn get_status(&self, id: &str) -> Result<Option<String>, String>;
    async fn read_all(&self) -> Result<HashMap<String, String>, String>;
}

#[derive(Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<Mutex<Vec<Order>>>,
}

#[derive(Clone)]
pub struct InMemoryTrackingRepository {
    statuses: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        InMemoryOrderRepository {
            orders: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl InMemoryTrackingRepository {
    pub fn new() -> Self {
        InMemoryTrackingRepository {
            statuses: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, id: String, order: Order) -> Result<Order, String> {
        let mut lock = self.orders.lock().await;
        lock.push(order);
        match lock.iter().find(|o| o.order_id == id) {
            Some(x) => Ok(x.clone()),
            None => Err(format!("Order with id {} did not exist", id)),
        }
    }

    async fn read(&self, id: &str) -> Result<Order, String> {
        let lock = self.orders.lock().await;
        match lock.iter().find(|o| o.order_id == id) {
            Some(x) => Ok(x.clone()),
            None => Err(format!("Order with id {} did not exist", id)),
        }
    }

    async fn read_all(&self) -> Result<Vec<Order>, String> {
        let lock = self.orders.lock().await;
        Ok(lock.clone())
    }
}

#[async_trait]
impl TrackingRepository for InMemoryTrackingRepository {
    async fn set_status(&self, id: String, status: String) -> Result<(), String> {
        let mut lock = self.statuses.lock().await;
        lock.insert(id, status);
        Ok(())
    }

    async fn get_status(&self, id: &str) -> Result<Option<String>, String> {
        let lock = self.statuses.lock().await;
        Ok(lock.get(id).cloned())
    }

    async fn read_all(&self) -> Result<HashMap<String, String>, String> {
        let lock = self.statuses.lock().await;
        Ok(lock.clone())
    }
}

/// Orders live in a flat JSON array that is read and fully rewritten on every
/// mutation. There is no locking and no partial-write protection.
#[derive(Clone)]
pub struct JsonFileOrderRepository {
    path: PathBuf,
}

#[derive(Clone)]
pub struct JsonFileTrackingRepository {
    path: PathBuf,
}

impl JsonFileOrderRepository {
    pub async fn new(path: PathBuf) -> Result<Self, String> {
        ensure_file(&path, "[]").await?;
        Ok(JsonFileOrderRepository { path })
    }

    async fn load(&self) -> Result<Vec<Order>, String> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;

        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))
    }

    async fn store(&self, orders: &[Order]) -> Result<(), String> {
        let contents = serde_json::to_string_pretty(orders)
            .map_err(|e| format!("Failed to serialize orders: {}", e))?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

impl JsonFileTrackingRepository {
    pub async fn new(path: PathBuf) -> Result<Self, String> {
        ensure_file(&path, "{}").await?;
        Ok(JsonFileTrackingRepository { path })
    }

    async fn load(&self) -> Result<HashMap<String, String>, String> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;

        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))
    }

    async fn store(&self, statuses: &HashMap<String, String>) -> Result<(), String> {
        let contents = serde_json::to_string_pretty(statuses)
            .map_err(|e| format!("Failed to serialize tracking map: {}", e))?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

async fn ensure_file(path: &PathBuf, empty: &str) -> Result<(), String> {
    if tokio::fs::try_exists(path)
        .await
        .map_err(|e| format!("Failed to stat {}: {}", path.display(), e))?
    {
        return Ok(());
    }

    tokio::fs::write(path, empty)
        .await
        .map_err(|e| format!("Failed to seed {}: {}", path.display(), e))
}

#[async_trait]
impl OrderRepository for JsonFileOrderRepository {
    async fn create(&self, id: String, order: Order) -> Result<Order, String> {
        let mut orders = self.load().await?;
        orders.push(order);
        self.store(&orders).await?;

        match orders.into_iter().find(|o| o.order_id == id) {
            Some(x) => Ok(x),
            None => Err(format!("Order with id {} did not exist", id)),
        }
    }

    async fn read(&self, id: &str) -> Result<Order, String> {
        let orders = self.load().await?;
        match orders.into_iter().find(|o| o.order_id == id) {
            Some(x) => Ok(x),
            None => Err(format!("Order with id {} did not exist", id)),
        }
    }

    async fn read_all(&self) -> Result<Vec<Order>, String> {
        self.load().await
    }
}

#[async_trait]
impl TrackingRepository for JsonFileTrackingRepository {
    async fn set_status(&self, id: String, status: String) -> Result<(), String> {
        let mut statuses = self.load().await?;
        statuses.insert(id, status);
        self.store(&statuses).await
    }

    async fn get_status(&self, id: &str) -> Result<Option<String>, String> {
        let statuses = self.load().await?;
        Ok(statuses.get(id).cloned())
    }

    async fn read_all(&self) -> Result<HashMap<String, String>, String> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn sample_order(id: &str, customer: &str) -> Order {
        Order {
            order_id: String::from(id),
            customer_name: String::from(customer),
            items: HashMap::new(),
            total: 55,
            created_at_utc: 1_700_000_000,
        }
    }

    fn temp_path(suffix: &str) -> PathBuf {
        std::env::temp_dir().join(format!("grocery-orders-{}-{}", uuid::Uuid::new_v4(), suffix))
    }

    #[tokio::test]
    async fn seeds_missing_orders_file_with_empty_array() {
        let path = temp_path("orders.json");
        let repository = JsonFileOrderRepository::new(path.clone()).await.unwrap();

        assert_eq!(repository.read_all().await.unwrap().len(), 0);
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn created_orders_survive_a_reopen() {
        let path = temp_path("orders.json");
        let repository = JsonFileOrderRepository::new(path.clone()).await.unwrap();

        let created = repository
            .create(String::from("order-1"), sample_order("order-1", "Asha"))
            .await
            .unwrap();
        assert_eq!(created.customer_name, "Asha");

        let reopened = JsonFileOrderRepository::new(path).await.unwrap();
        let all = reopened.read_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(reopened.read("order-1").await.unwrap().total, 55);
    }

    #[tokio::test]
    async fn reading_a_missing_order_is_an_error() {
        let path = temp_path("orders.json");
        let repository = JsonFileOrderRepository::new(path).await.unwrap();

        assert!(repository.read("no-such-order").await.is_err());
    }

    #[tokio::test]
    async fn orders_file_uses_camel_case_fields() {
        let path = temp_path("orders.json");
        let repository = JsonFileOrderRepository::new(path.clone()).await.unwrap();

        repository
            .create(String::from("order-1"), sample_order("order-1", "Asha"))
            .await
            .unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("\"orderId\""));
        assert!(contents.contains("\"customerName\""));
    }

    #[tokio::test]
    async fn tracking_statuses_round_trip_through_the_file() {
        let path = temp_path("order_tracking.json");
        let repository = JsonFileTrackingRepository::new(path.clone()).await.unwrap();

        repository
            .set_status(String::from("order-1"), String::from("preparing"))
            .await
            .unwrap();

        assert_eq!(
            repository.get_status("order-1").await.unwrap().as_deref(),
            Some("preparing")
        );
        assert_eq!(repository.get_status("order-2").await.unwrap(), None);

        let reopened = JsonFileTrackingRepository::new(path).await.unwrap();
        assert_eq!(reopened.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn in_memory_repositories_mirror_the_file_behavior() {
        let orders = InMemoryOrderRepository::new();
        orders
            .create(String::from("order-1"), sample_order("order-1", "Ravi"))
            .await
            .unwrap();
        assert_eq!(orders.read_all().await.unwrap().len(), 1);
        assert!(orders.read("order-2").await.is_err());

        let tracking = InMemoryTrackingRepository::new();
        tracking
            .set_status(String::from("order-1"), String::from("preparing"))
            .await
            .unwrap();
        assert_eq!(
            tracking.get_status("order-1").await.unwrap().as_deref(),
            Some("preparing")
        );
    }
}
