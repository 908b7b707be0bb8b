use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Order;

pub trait Response {}

#[derive(Serialize, Deserialize)]
pub struct AddItemToCartResponse {
    pub message: String,
}
impl Response for AddItemToCartResponse {}

#[derive(Serialize, Deserialize)]
pub struct UpdateItemQuantityResponse {
    pub message: String,
}
impl Response for UpdateItemQuantityResponse {}

#[derive(Serialize, Deserialize)]
pub struct RemoveItemFromCartResponse {
    pub message: String,
}
impl Response for RemoveItemFromCartResponse {}

#[derive(Serialize, Deserialize)]
pub struct ListCartResponse {
    pub items: HashMap<String, u32>,
    pub message: String,
}
impl Response for ListCartResponse {}

#[derive(Serialize, Deserialize)]
pub struct AddRecipeIngredientsResponse {
    pub added: Vec<String>,
    pub message: String,
}
impl Response for AddRecipeIngredientsResponse {}

#[derive(Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: Option<String>,
    pub total: u64,
    pub message: String,
}
impl Response for PlaceOrderResponse {}

#[derive(Serialize, Deserialize)]
pub struct OrderStatusResponse {
    pub order_id: String,
    pub status: String,
}
impl Response for OrderStatusResponse {}

#[derive(Serialize, Deserialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<Order>,
    pub message: String,
}
impl Response for ListOrdersResponse {}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}
impl Response for ApiError {}
