use std::{path::PathBuf, sync::Arc};

use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use axum_prometheus::PrometheusMetricLayer;
use catalog::Catalog;
use cqrs::{
    AddItemToCartCommandHandler, AddRecipeIngredientsCommandHandler, GetOrderStatusQueryHandler,
    ListCartQueryHandler, ListOrdersQueryHandler, PlaceOrderCommandHandler,
    RemoveItemFromCartCommandHandler, UpdateItemQuantityCommandHandler,
};
use dotenv::dotenv;
use repositories::{JsonFileOrderRepository, JsonFileTrackingRepository};
use routes::{
    add_item_to_cart, add_recipe_ingredients, get_order_status, index, list_cart, list_orders,
    place_order, remove_item_from_cart, update_item_quantity,
};
use state::AppState;
use std::env;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uow::RepositoryContext;

mod catalog;
mod cqrs;
mod domain;
mod dtos;
mod repositories;
mod routes;
mod state;
mod uow;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let orders_path = PathBuf::from(
        env::var("ORDERS_FILE_PATH").unwrap_or_else(|_| String::from("orders.json")),
    );
    let tracking_path = PathBuf::from(
        env::var("TRACKING_FILE_PATH").unwrap_or_else(|_| String::from("order_tracking.json")),
    );

    let order_repository = Arc::new(JsonFileOrderRepository::new(orders_path).await.unwrap());
    let tracking_repository = Arc::new(
        JsonFileTrackingRepository::new(tracking_path)
            .await
            .unwrap(),
    );
    let uow = Arc::new(RepositoryContext::new(
        order_repository,
        tracking_repository,
        Catalog::standard(),
    ));

    let state = Arc::new(AppState {
        add_item_to_cart_command_handler: Arc::new(AddItemToCartCommandHandler::new(uow.clone())),
        update_item_quantity_command_handler: Arc::new(UpdateItemQuantityCommandHandler::new(
            uow.clone(),
        )),
        remove_item_from_cart_command_handler: Arc::new(RemoveItemFromCartCommandHandler::new(
            uow.clone(),
        )),
        add_recipe_ingredients_command_handler: Arc::new(AddRecipeIngredientsCommandHandler::new(
            uow.clone(),
        )),
        place_order_command_handler: Arc::new(PlaceOrderCommandHandler::new(uow.clone())),
        list_cart_query_handler: Arc::new(ListCartQueryHandler::new(uow.clone())),
        get_order_status_query_handler: Arc::new(GetOrderStatusQueryHandler::new(uow.clone())),
        list_orders_query_handler: Arc::new(ListOrdersQueryHandler::new(uow.clone())),
    });

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_ansi(false)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .init();

    tracing::event!(
        tracing::Level::INFO,
        "catalog loaded with {} items",
        uow.catalog.items().len()
    );

    let (prometheus_layer, metrics_handle) = PrometheusMetricLayer::pair();

    let port = env::var("AXUM_PORT").unwrap_or_else(|_| String::from("3000"));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();

    axum::serve(
        listener,
        Router::new()
            .route("/", get(index))
            .route("/metrics", get(|| async move { metrics_handle.render() }))
            .route("/cart", get(list_cart))
            .route("/cart/addItem", post(add_item_to_cart))
            .route("/cart/updateItemQuantity", put(update_item_quantity))
            .route("/cart/removeItem", put(remove_item_from_cart))
            .route("/cart/addRecipeIngredients", post(add_recipe_ingredients))
            .route("/orders", post(place_order).get(list_orders))
            .route("/orders/{id}/status", get(get_order_status))
            .with_state(state)
            .layer(prometheus_layer)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::very_permissive().allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::DELETE,
                    ])),
            ),
    )
    .await
    .unwrap();
}
