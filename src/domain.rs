use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub qty: u32,
    pub price: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: HashMap<String, CartLine>,
    pub total: u64,
    pub order_id: Option<String>,
    pub placed_at_utc: Option<i64>,
}

impl Cart {
    pub fn total_of_items(&self) -> u64 {
        self.items
            .values()
            .map(|line| u64::from(line.qty) * line.price)
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer_name: String,
    pub items: HashMap<String, CartLine>,
    pub total: u64,
    pub created_at_utc: i64,
}
