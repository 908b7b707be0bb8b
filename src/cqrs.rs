use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{event, Level};

use crate::{
    domain::Order,
    dtos::{
        AddItemToCartResponse, AddRecipeIngredientsResponse, ListCartResponse,
        ListOrdersResponse, OrderStatusResponse, PlaceOrderResponse,
        RemoveItemFromCartResponse, Response, UpdateItemQuantityResponse,
    },
    repositories::{OrderRepository, TrackingRepository},
    uow::{unix_now, RepositoryContext},
};

// traits
pub trait Command {}
pub trait Query {}

pub trait CommandHandler<C: Command, R: Response> {
    async fn handle(&self, input: &C) -> Result<R, String>;
}

pub trait QueryHandler<Q: Query, R: Response> {
    async fn handle(&self, input: Option<Q>) -> Result<R, String>;
}

#[derive(Serialize, Deserialize)]
pub struct AddItemToCartCommand {
    pub item: String,
    pub qty: u32,
}
impl Command for AddItemToCartCommand {}

#[derive(Serialize, Deserialize)]
pub struct UpdateItemQuantityCommand {
    pub item: String,
    pub qty: u32,
}
impl Command for UpdateItemQuantityCommand {}

#[derive(Serialize, Deserialize)]
pub struct RemoveItemFromCartCommand {
    pub item: String,
}
impl Command for RemoveItemFromCartCommand {}

#[derive(Serialize, Deserialize)]
pub struct AddRecipeIngredientsCommand {
    pub recipe: String,
}
impl Command for AddRecipeIngredientsCommand {}

#[derive(Serialize, Deserialize)]
pub struct PlaceOrderCommand {
    pub customer_name: String,
}
impl Command for PlaceOrderCommand {}

#[derive(Serialize, Deserialize)]
pub struct ListCartQuery {}
impl Query for ListCartQuery {}

#[derive(Serialize, Deserialize)]
pub struct GetOrderStatusQuery {
    pub order_id: String,
}
impl Query for GetOrderStatusQuery {}

#[derive(Serialize, Deserialize)]
pub struct ListOrdersQuery {}
impl Query for ListOrdersQuery {}

pub struct AddItemToCartCommandHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> AddItemToCartCommandHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        AddItemToCartCommandHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository>
    CommandHandler<AddItemToCartCommand, AddItemToCartResponse>
    for AddItemToCartCommandHandler<T1, T2>
{
    async fn handle(&self, input: &AddItemToCartCommand) -> Result<AddItemToCartResponse, String> {
        if input.item.is_empty() {
            return Err(String::from("Item name cannot be null or empty!!!"));
        }

        if self.uow.add_catalog_item_to_cart(&input.item, input.qty).await {
            Ok(AddItemToCartResponse {
                message: format!("Added {} {} to your cart.", input.qty, input.item),
            })
        } else {
            event!(Level::DEBUG, "item {} not in catalog", input.item);
            Ok(AddItemToCartResponse {
                message: format!("{} is not available.", input.item),
            })
        }
    }
}

pub struct UpdateItemQuantityCommandHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> UpdateItemQuantityCommandHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        UpdateItemQuantityCommandHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository>
    CommandHandler<UpdateItemQuantityCommand, UpdateItemQuantityResponse>
    for UpdateItemQuantityCommandHandler<T1, T2>
{
    async fn handle(
        &self,
        input: &UpdateItemQuantityCommand,
    ) -> Result<UpdateItemQuantityResponse, String> {
        let mut cart = self.uow.cart.lock().await;
        match cart.items.get_mut(&input.item) {
            Some(line) => {
                line.qty = input.qty;
                Ok(UpdateItemQuantityResponse {
                    message: format!("Updated {} quantity to {}.", input.item, input.qty),
                })
            }
            None => Ok(UpdateItemQuantityResponse {
                message: format!("{} is not in your cart.", input.item),
            }),
        }
    }
}

pub struct RemoveItemFromCartCommandHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> RemoveItemFromCartCommandHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        RemoveItemFromCartCommandHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository>
    CommandHandler<RemoveItemFromCartCommand, RemoveItemFromCartResponse>
    for RemoveItemFromCartCommandHandler<T1, T2>
{
    async fn handle(
        &self,
        input: &RemoveItemFromCartCommand,
    ) -> Result<RemoveItemFromCartResponse, String> {
        let mut cart = self.uow.cart.lock().await;
        if cart.items.remove(&input.item).is_some() {
            Ok(RemoveItemFromCartResponse {
                message: format!("Removed {} from your cart.", input.item),
            })
        } else {
            Ok(RemoveItemFromCartResponse {
                message: format!("{} is not in your cart.", input.item),
            })
        }
    }
}

pub struct AddRecipeIngredientsCommandHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> AddRecipeIngredientsCommandHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        AddRecipeIngredientsCommandHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository>
    CommandHandler<AddRecipeIngredientsCommand, AddRecipeIngredientsResponse>
    for AddRecipeIngredientsCommandHandler<T1, T2>
{
    async fn handle(
        &self,
        input: &AddRecipeIngredientsCommand,
    ) -> Result<AddRecipeIngredientsResponse, String> {
        let recipe = input.recipe.to_lowercase();

        let ingredients = match self.uow.catalog.recipe_ingredients(&recipe) {
            Some(ingredients) => ingredients.to_vec(),
            None => {
                return Ok(AddRecipeIngredientsResponse {
                    added: Vec::new(),
                    message: String::from("Sorry, I don’t know that recipe."),
                })
            }
        };

        let mut added = Vec::new();
        for ingredient in ingredients {
            if self.uow.add_catalog_item_to_cart(&ingredient, 1).await {
                added.push(ingredient);
            } else {
                event!(Level::WARN, "recipe {} names {} which is not in the catalog", recipe, ingredient);
            }
        }

        let message = format!("Added ingredients for {}: {}.", recipe, added.join(", "));
        Ok(AddRecipeIngredientsResponse { added, message })
    }
}

pub struct PlaceOrderCommandHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> PlaceOrderCommandHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        PlaceOrderCommandHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository>
    CommandHandler<PlaceOrderCommand, PlaceOrderResponse>
    for PlaceOrderCommandHandler<T1, T2>
{
    async fn handle(&self, input: &PlaceOrderCommand) -> Result<PlaceOrderResponse, String> {
        if input.customer_name.is_empty() {
            return Err(String::from("Customer name cannot be null or empty!!!"));
        }

        let mut cart = self.uow.cart.lock().await;
        if cart.items.is_empty() {
            return Ok(PlaceOrderResponse {
                order_id: None,
                total: 0,
                message: String::from("Your cart is empty, cannot place order."),
            });
        }

        let total = cart.total_of_items();
        cart.total = total;

        let order = Order {
            order_id: uuid::Uuid::new_v4().to_string(),
            customer_name: input.customer_name.clone(),
            items: cart.items.clone(),
            total,
            created_at_utc: unix_now(),
        };

        match self
            .uow
            .order_repository
            .create(order.order_id.clone(), order.clone())
            .await
        {
            Ok(created_order) => {
                match self
                    .uow
                    .tracking_repository
                    .set_status(created_order.order_id.clone(), String::from("preparing"))
                    .await
                {
                    Ok(()) => {
                        // The cart keeps its items after checkout; only the
                        // order bookkeeping fields change.
                        cart.order_id = Some(created_order.order_id.clone());
                        cart.placed_at_utc = Some(unix_now());

                        Ok(PlaceOrderResponse {
                            order_id: Some(created_order.order_id),
                            total,
                            message: format!("Order placed successfully! Total: ₹{}", total),
                        })
                    }
                    Err(e) => {
                        event!(Level::WARN, "Error occurred while tracking order: {}", e);
                        Err(e)
                    }
                }
            }
            Err(e) => {
                event!(Level::WARN, "Error occurred while placing order: {}", e);
                Err(e)
            }
        }
    }
}

pub struct ListCartQueryHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> ListCartQueryHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        ListCartQueryHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository> QueryHandler<ListCartQuery, ListCartResponse>
    for ListCartQueryHandler<T1, T2>
{
    async fn handle(&self, _input: Option<ListCartQuery>) -> Result<ListCartResponse, String> {
        let cart = self.uow.cart.lock().await;

        if cart.items.is_empty() {
            return Ok(ListCartResponse {
                items: Default::default(),
                message: String::from("Your cart is empty."),
            });
        }

        let mut message = String::from("Your cart contains:\n");
        for (name, line) in cart.items.iter() {
            message.push_str(&format!("- {}: {}\n", name, line.qty));
        }

        Ok(ListCartResponse {
            items: cart
                .items
                .iter()
                .map(|(name, line)| (name.clone(), line.qty))
                .collect(),
            message: String::from(message.trim_end()),
        })
    }
}

pub struct GetOrderStatusQueryHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> GetOrderStatusQueryHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        GetOrderStatusQueryHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository>
    QueryHandler<GetOrderStatusQuery, OrderStatusResponse>
    for GetOrderStatusQueryHandler<T1, T2>
{
    async fn handle(&self, input_option: Option<GetOrderStatusQuery>) -> Result<OrderStatusResponse, String> {
        match input_option {
            Some(input) => {
                match self.uow.tracking_repository.get_status(&input.order_id).await {
                    Ok(status_option) => Ok(OrderStatusResponse {
                        order_id: input.order_id,
                        status: status_option.unwrap_or_else(|| String::from("unknown")),
                    }),
                    Err(e) => {
                        event!(Level::WARN, "Error occurred while reading tracking: {}", e);
                        Err(e)
                    }
                }
            }
            None => Err(String::from("Order ID cannot be null or empty!!!")),
        }
    }
}

pub struct ListOrdersQueryHandler<T1: OrderRepository, T2: TrackingRepository> {
    uow: Arc<RepositoryContext<T1, T2>>,
}

impl<T1: OrderRepository, T2: TrackingRepository> ListOrdersQueryHandler<T1, T2> {
    pub fn new(uow: Arc<RepositoryContext<T1, T2>>) -> Self {
        ListOrdersQueryHandler { uow }
    }
}

impl<T1: OrderRepository, T2: TrackingRepository> QueryHandler<ListOrdersQuery, ListOrdersResponse>
    for ListOrdersQueryHandler<T1, T2>
{
    async fn handle(&self, _input: Option<ListOrdersQuery>) -> Result<ListOrdersResponse, String> {
        match self.uow.order_repository.read_all().await {
            Ok(orders) => {
                let message = if orders.is_empty() {
                    String::from("No previous orders found.")
                } else {
                    format!("Orders found: {}", orders.len())
                };

                Ok(ListOrdersResponse { orders, message })
            }
            Err(e) => {
                event!(Level::WARN, "Error occurred while reading orders: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::Catalog,
        repositories::{InMemoryOrderRepository, InMemoryTrackingRepository},
    };

    type TestContext = RepositoryContext<InMemoryOrderRepository, InMemoryTrackingRepository>;

    fn test_context() -> Arc<TestContext> {
        Arc::new(RepositoryContext::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryTrackingRepository::new()),
            Catalog::standard(),
        ))
    }

    #[tokio::test]
    async fn adding_a_catalog_item_increments_its_quantity() {
        let uow = test_context();
        let handler = AddItemToCartCommandHandler::new(uow.clone());

        let response = handler
            .handle(&AddItemToCartCommand {
                item: String::from("milk"),
                qty: 2,
            })
            .await
            .unwrap();
        assert_eq!(response.message, "Added 2 milk to your cart.");

        handler
            .handle(&AddItemToCartCommand {
                item: String::from("milk"),
                qty: 3,
            })
            .await
            .unwrap();

        let cart = uow.cart.lock().await;
        let line = cart.items.get("milk").unwrap();
        assert_eq!(line.qty, 5);
        assert_eq!(line.price, 30);
    }

    #[tokio::test]
    async fn unknown_items_are_reported_unavailable() {
        let uow = test_context();
        let handler = AddItemToCartCommandHandler::new(uow.clone());

        let response = handler
            .handle(&AddItemToCartCommand {
                item: String::from("caviar"),
                qty: 1,
            })
            .await
            .unwrap();

        assert_eq!(response.message, "caviar is not available.");
        assert!(uow.cart.lock().await.items.is_empty());
    }

    #[tokio::test]
    async fn updating_quantity_overwrites_the_line() {
        let uow = test_context();
        AddItemToCartCommandHandler::new(uow.clone())
            .handle(&AddItemToCartCommand {
                item: String::from("bread"),
                qty: 1,
            })
            .await
            .unwrap();

        let response = UpdateItemQuantityCommandHandler::new(uow.clone())
            .handle(&UpdateItemQuantityCommand {
                item: String::from("bread"),
                qty: 4,
            })
            .await
            .unwrap();

        assert_eq!(response.message, "Updated bread quantity to 4.");
        assert_eq!(uow.cart.lock().await.items.get("bread").unwrap().qty, 4);
    }

    #[tokio::test]
    async fn updating_an_item_missing_from_the_cart_reports_it() {
        let uow = test_context();

        let response = UpdateItemQuantityCommandHandler::new(uow)
            .handle(&UpdateItemQuantityCommand {
                item: String::from("rice"),
                qty: 2,
            })
            .await
            .unwrap();

        assert_eq!(response.message, "rice is not in your cart.");
    }

    #[tokio::test]
    async fn removing_items_from_the_cart() {
        let uow = test_context();
        AddItemToCartCommandHandler::new(uow.clone())
            .handle(&AddItemToCartCommand {
                item: String::from("eggs"),
                qty: 6,
            })
            .await
            .unwrap();

        let handler = RemoveItemFromCartCommandHandler::new(uow.clone());

        let response = handler
            .handle(&RemoveItemFromCartCommand {
                item: String::from("eggs"),
            })
            .await
            .unwrap();
        assert_eq!(response.message, "Removed eggs from your cart.");
        assert!(uow.cart.lock().await.items.is_empty());

        let response = handler
            .handle(&RemoveItemFromCartCommand {
                item: String::from("eggs"),
            })
            .await
            .unwrap();
        assert_eq!(response.message, "eggs is not in your cart.");
    }

    #[tokio::test]
    async fn listing_an_empty_cart() {
        let uow = test_context();

        let response = ListCartQueryHandler::new(uow)
            .handle(Some(ListCartQuery {}))
            .await
            .unwrap();

        assert_eq!(response.message, "Your cart is empty.");
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn listing_the_cart_shows_one_line_per_item() {
        let uow = test_context();
        let add = AddItemToCartCommandHandler::new(uow.clone());
        add.handle(&AddItemToCartCommand {
            item: String::from("milk"),
            qty: 2,
        })
        .await
        .unwrap();

        let response = ListCartQueryHandler::new(uow)
            .handle(Some(ListCartQuery {}))
            .await
            .unwrap();

        assert!(response.message.starts_with("Your cart contains:"));
        assert!(response.message.contains("- milk: 2"));
        assert!(!response.message.ends_with('\n'));
        assert_eq!(response.items.get("milk"), Some(&2));
    }

    #[tokio::test]
    async fn recipes_add_each_ingredient_once() {
        let uow = test_context();

        let response = AddRecipeIngredientsCommandHandler::new(uow.clone())
            .handle(&AddRecipeIngredientsCommand {
                recipe: String::from("Peanut Butter Sandwich"),
            })
            .await
            .unwrap();

        assert_eq!(response.added, ["bread", "peanut butter"]);
        assert_eq!(
            response.message,
            "Added ingredients for peanut butter sandwich: bread, peanut butter."
        );

        let cart = uow.cart.lock().await;
        assert_eq!(cart.items.get("bread").unwrap().qty, 1);
        assert_eq!(cart.items.get("peanut butter").unwrap().qty, 1);
    }

    #[tokio::test]
    async fn unknown_recipes_get_a_fixed_message() {
        let uow = test_context();

        let response = AddRecipeIngredientsCommandHandler::new(uow.clone())
            .handle(&AddRecipeIngredientsCommand {
                recipe: String::from("lasagna"),
            })
            .await
            .unwrap();

        assert_eq!(response.message, "Sorry, I don’t know that recipe.");
        assert!(response.added.is_empty());
        assert!(uow.cart.lock().await.items.is_empty());
    }

    #[tokio::test]
    async fn placing_an_order_totals_the_cart_and_tracks_it() {
        let uow = test_context();
        let add = AddItemToCartCommandHandler::new(uow.clone());
        add.handle(&AddItemToCartCommand {
            item: String::from("milk"),
            qty: 2,
        })
        .await
        .unwrap();
        add.handle(&AddItemToCartCommand {
            item: String::from("bread"),
            qty: 1,
        })
        .await
        .unwrap();

        let response = PlaceOrderCommandHandler::new(uow.clone())
            .handle(&PlaceOrderCommand {
                customer_name: String::from("Asha"),
            })
            .await
            .unwrap();

        assert_eq!(response.total, 85);
        assert_eq!(response.message, "Order placed successfully! Total: ₹85");

        let order_id = response.order_id.unwrap();
        let stored = uow.order_repository.read(&order_id).await.unwrap();
        assert_eq!(stored.customer_name, "Asha");
        assert_eq!(stored.total, 85);

        let status = uow.tracking_repository.get_status(&order_id).await.unwrap();
        assert_eq!(status.as_deref(), Some("preparing"));

        let cart = uow.cart.lock().await;
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total, 85);
        assert_eq!(cart.order_id.as_deref(), Some(order_id.as_str()));
        assert!(cart.placed_at_utc.is_some());
    }

    #[tokio::test]
    async fn an_empty_cart_cannot_place_an_order() {
        let uow = test_context();

        let response = PlaceOrderCommandHandler::new(uow.clone())
            .handle(&PlaceOrderCommand {
                customer_name: String::from("Asha"),
            })
            .await
            .unwrap();

        assert_eq!(response.message, "Your cart is empty, cannot place order.");
        assert!(response.order_id.is_none());
        assert_eq!(uow.order_repository.read_all().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn order_status_is_unknown_for_untracked_ids() {
        let uow = test_context();

        let response = GetOrderStatusQueryHandler::new(uow)
            .handle(Some(GetOrderStatusQuery {
                order_id: String::from("no-such-order"),
            }))
            .await
            .unwrap();

        assert_eq!(response.status, "unknown");
    }

    #[tokio::test]
    async fn listing_previous_orders_counts_them() {
        let uow = test_context();
        let handler = ListOrdersQueryHandler::new(uow.clone());

        let response = handler.handle(Some(ListOrdersQuery {})).await.unwrap();
        assert_eq!(response.message, "No previous orders found.");

        AddItemToCartCommandHandler::new(uow.clone())
            .handle(&AddItemToCartCommand {
                item: String::from("rice"),
                qty: 1,
            })
            .await
            .unwrap();
        PlaceOrderCommandHandler::new(uow.clone())
            .handle(&PlaceOrderCommand {
                customer_name: String::from("Ravi"),
            })
            .await
            .unwrap();

        let response = handler.handle(Some(ListOrdersQuery {})).await.unwrap();
        assert_eq!(response.message, "Orders found: 1");
        assert_eq!(response.orders.len(), 1);
    }
}
