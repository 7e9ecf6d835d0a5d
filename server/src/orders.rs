use std::sync::Arc;

use mongodb::bson::DateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{Order, OrderItem, OrderItemInput, OrderItemView, OrderStatus, OrderView},
    error::ApiError,
    policy::{self, OrderSelector, TRANSITION_ROLES},
    store::{MenuItemStore, OrderStore},
    token::Claims,
};

/// Creates, lists and transitions orders. Checkout and cancel are the two
/// status transitions, both delegated to the store's atomic
/// find-matching-and-update through an [`OrderSelector`].
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    menu_items: Arc<dyn MenuItemStore>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>, menu_items: Arc<dyn MenuItemStore>) -> Self {
        Self { orders, menu_items }
    }

    /// Any authenticated role may order. The order's country comes from the
    /// caller's claims; there is no way to supply one over the wire.
    pub async fn create(
        &self,
        claims: &Claims,
        items: Vec<OrderItemInput>,
    ) -> Result<OrderView, ApiError> {
        if items.is_empty() {
            return Err(ApiError::Validation(
                "Order must have at least one item".into(),
            ));
        }

        for item in &items {
            if item.quantity < 1 {
                return Err(ApiError::Validation(format!(
                    "Quantity for menu item {} must be at least 1",
                    item.menu_item_id
                )));
            }
            if self.menu_items.find_by_id(&item.menu_item_id).await?.is_none() {
                return Err(ApiError::Validation(format!(
                    "MenuItem {} not found",
                    item.menu_item_id
                )));
            }
        }

        let now = DateTime::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: claims.sub.clone(),
            country: claims.country,
            status: OrderStatus::Created,
            items: items
                .into_iter()
                .map(|item| OrderItem {
                    menu_item_id: item.menu_item_id,
                    quantity: item.quantity,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };

        self.orders.insert(&order).await?;
        info!(order = %order.id, user = %claims.sub, "Order created");

        self.populate(&order).await
    }

    /// Owner scoped only; the country claim plays no part here, unlike the
    /// single-order fetch below.
    pub async fn list(&self, claims: &Claims) -> Result<Vec<OrderView>, ApiError> {
        let orders = self.orders.list_for_user(&claims.sub).await?;

        let mut views = Vec::with_capacity(orders.len());
        for order in &orders {
            views.push(self.populate(order).await?);
        }
        Ok(views)
    }

    pub async fn get(&self, claims: &Claims, order_id: &str) -> Result<OrderView, ApiError> {
        let selector = OrderSelector::read(claims, order_id);
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .filter(|order| selector.matches(order))
            .ok_or(ApiError::NotFoundOrForbidden("Order"))?;

        self.populate(&order).await
    }

    pub async fn checkout(&self, claims: &Claims, order_id: &str) -> Result<OrderView, ApiError> {
        policy::require_role(claims, TRANSITION_ROLES)?;

        let selector = OrderSelector::checkout(claims, order_id);
        let order = self
            .orders
            .transition(&selector, OrderStatus::Paid)
            .await?
            .ok_or(ApiError::NotFoundOrForbidden("Order"))?;

        info!(order = %order.id, "Order paid");
        self.populate(&order).await
    }

    pub async fn cancel(&self, claims: &Claims, order_id: &str) -> Result<OrderView, ApiError> {
        policy::require_role(claims, TRANSITION_ROLES)?;

        let selector = OrderSelector::cancel(claims, order_id);
        let order = self
            .orders
            .transition(&selector, OrderStatus::Cancelled)
            .await?
            .ok_or(ApiError::NotFoundOrForbidden("Order"))?;

        info!(order = %order.id, "Order cancelled");
        self.populate(&order).await
    }

    /// Joins each order line with its menu item's name and image.
    async fn populate(&self, order: &Order) -> Result<OrderView, ApiError> {
        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let menu_item = self
                .menu_items
                .find_by_id(&item.menu_item_id)
                .await?
                .ok_or_else(|| {
                    ApiError::Internal(format!(
                        "Order {} references missing menu item {}",
                        order.id, item.menu_item_id
                    ))
                })?;

            items.push(OrderItemView {
                menu_item_id: item.menu_item_id.clone(),
                name: menu_item.name,
                image_url: menu_item.image_url,
                quantity: item.quantity,
            });
        }

        Ok(OrderView {
            id: order.id.clone(),
            user_id: order.user_id.clone(),
            country: order.country,
            status: order.status,
            items,
        })
    }
}
