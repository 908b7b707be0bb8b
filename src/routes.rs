use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    cqrs::{
        AddItemToCartCommand, AddRecipeIngredientsCommand, CommandHandler, GetOrderStatusQuery,
        ListCartQuery, ListOrdersQuery, PlaceOrderCommand, QueryHandler,
        RemoveItemFromCartCommand, UpdateItemQuantityCommand,
    },
    dtos::ApiError,
    state::AppState,
};

pub async fn index() -> &'static str {
    "Grocery order service"
}

pub async fn list_cart(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.list_cart_query_handler.handle(Some(ListCartQuery {})).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}

pub async fn add_item_to_cart(
    state: State<Arc<AppState>>,
    Json(add_item_to_cart_command): Json<AddItemToCartCommand>,
) -> (StatusCode, Json<Value>) {
    match state
        .add_item_to_cart_command_handler
        .handle(&add_item_to_cart_command)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}

pub async fn update_item_quantity(
    state: State<Arc<AppState>>,
    Json(update_item_quantity_command): Json<UpdateItemQuantityCommand>,
) -> (StatusCode, Json<Value>) {
    match state
        .update_item_quantity_command_handler
        .handle(&update_item_quantity_command)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}

pub async fn remove_item_from_cart(
    state: State<Arc<AppState>>,
    Json(remove_item_from_cart_command): Json<RemoveItemFromCartCommand>,
) -> (StatusCode, Json<Value>) {
    match state
        .remove_item_from_cart_command_handler
        .handle(&remove_item_from_cart_command)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}

pub async fn add_recipe_ingredients(
    state: State<Arc<AppState>>,
    Json(add_recipe_ingredients_command): Json<AddRecipeIngredientsCommand>,
) -> (StatusCode, Json<Value>) {
    match state
        .add_recipe_ingredients_command_handler
        .handle(&add_recipe_ingredients_command)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}

pub async fn place_order(
    state: State<Arc<AppState>>,
    Json(place_order_command): Json<PlaceOrderCommand>,
) -> (StatusCode, Json<Value>) {
    match state
        .place_order_command_handler
        .handle(&place_order_command)
        .await
    {
        Ok(response) => (StatusCode::CREATED, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}

pub async fn get_order_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<Value>) {
    let input = GetOrderStatusQuery { order_id: id };

    match state.get_order_status_query_handler.handle(Some(input)).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}

pub async fn list_orders(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.list_orders_query_handler.handle(Some(ListOrdersQuery {})).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!(ApiError { error: e }))),
    }
}
