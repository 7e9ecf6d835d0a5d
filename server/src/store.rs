//! Repository interfaces, one per entity. The production backend is MongoDB;
//! tests and local runs use the in-memory backend. Order status transitions
//! go through [`OrderStore::transition`], the single atomic
//! find-matching-and-update the whole system relies on for correctness under
//! concurrent requests.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{Country, MenuItem, Order, OrderStatus, PaymentMethod, Restaurant, User},
    policy::OrderSelector,
};

pub mod memory;
pub mod mongo;

#[derive(Error, Debug)]
#[error("Store error: {0}")]
pub struct StoreError(pub String);

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError(err.to_string())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), StoreError>;
    async fn list_all(&self) -> Result<Vec<Restaurant>, StoreError>;
    /// `None` matches restaurants with no country, of which there are none,
    /// so a countryless caller sees an empty list.
    async fn list_by_country(&self, country: Option<Country>) -> Result<Vec<Restaurant>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait MenuItemStore: Send + Sync {
    async fn insert(&self, item: &MenuItem) -> Result<(), StoreError>;
    async fn list_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: &Order) -> Result<(), StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StoreError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError>;
    /// Atomically set `status` on the single order matching `selector`,
    /// returning the updated order, or `None` when nothing matched. Two
    /// concurrent checkouts of the same order cannot both get `Some`.
    async fn transition(
        &self,
        selector: &OrderSelector,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, method: &PaymentMethod) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<PaymentMethod>, StoreError>;
}

/// The full set of repositories, wired once at startup and handed to the
/// services. Cloning shares the underlying backends.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub restaurants: Arc<dyn RestaurantStore>,
    pub menu_items: Arc<dyn MenuItemStore>,
    pub orders: Arc<dyn OrderStore>,
    pub payments: Arc<dyn PaymentStore>,
}
