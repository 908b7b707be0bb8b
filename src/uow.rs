use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use tokio::sync::Mutex;

use crate::{
    catalog::Catalog,
    domain::{Cart, CartLine},
    repositories::{OrderRepository, TrackingRepository},
};

/// Shared context the handlers work through: the two repositories, the single
/// in-memory cart, and the catalog.
pub struct RepositoryContext<T1: OrderRepository, T2: TrackingRepository> {
    pub order_repository: Arc<T1>,
    pub tracking_repository: Arc<T2>,
    pub cart: Arc<Mutex<Cart>>,
    pub catalog: Catalog,
}

impl<T1: OrderRepository, T2: TrackingRepository> RepositoryContext<T1, T2> {
    pub fn new(
        order_repository: Arc<T1>,
        tracking_repository: Arc<T2>,
        catalog: Catalog,
    ) -> Self {
        RepositoryContext {
            order_repository,
            tracking_repository,
            cart: Arc::new(Mutex::new(Cart::default())),
            catalog,
        }
    }

    /// Inserts or increments a cart line, snapshotting the catalog price.
    /// Returns false when the item is not in the catalog.
    pub async fn add_catalog_item_to_cart(&self, item: &str, qty: u32) -> bool {
        let price = match self.catalog.find(item) {
            Some(catalog_item) => catalog_item.price,
            None => return false,
        };

        let mut cart = self.cart.lock().await;
        match cart.items.get_mut(item) {
            Some(line) => {
                line.qty += qty;
            }
            None => {
                cart.items.insert(String::from(item), CartLine { qty, price });
            }
        }

        true
    }
}

pub fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(_) => 0,
    }
}
