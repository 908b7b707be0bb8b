use std::sync::Arc;

use crate::{
    cqrs::{
        AddItemToCartCommandHandler, AddRecipeIngredientsCommandHandler,
        GetOrderStatusQueryHandler, ListCartQueryHandler, ListOrdersQueryHandler,
        PlaceOrderCommandHandler, RemoveItemFromCartCommandHandler,
        UpdateItemQuantityCommandHandler,
    },
    repositories::{JsonFileOrderRepository, JsonFileTrackingRepository},
};

type Orders = JsonFileOrderRepository;
type Tracking = JsonFileTrackingRepository;

#[derive(Clone)]
pub struct AppState {
    pub add_item_to_cart_command_handler: Arc<AddItemToCartCommandHandler<Orders, Tracking>>,
    pub update_item_quantity_command_handler: Arc<UpdateItemQuantityCommandHandler<Orders, Tracking>>,
    pub remove_item_from_cart_command_handler: Arc<RemoveItemFromCartCommandHandler<Orders, Tracking>>,
    pub add_recipe_ingredients_command_handler: Arc<AddRecipeIngredientsCommandHandler<Orders, Tracking>>,
    pub place_order_command_handler: Arc<PlaceOrderCommandHandler<Orders, Tracking>>,
    pub list_cart_query_handler: Arc<ListCartQueryHandler<Orders, Tracking>>,
    pub get_order_status_query_handler: Arc<GetOrderStatusQueryHandler<Orders, Tracking>>,
    pub list_orders_query_handler: Arc<ListOrdersQueryHandler<Orders, Tracking>>,
}
