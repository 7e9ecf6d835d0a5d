//! In-memory repositories for tests and local runs. A single write lock per
//! entity map stands in for the document store's atomic
//! find-matching-and-update.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::bson::DateTime;
use tokio::sync::RwLock;

use super::{
    MenuItemStore, OrderStore, PaymentStore, RestaurantStore, StoreError, Stores, UserStore,
};
use crate::{
    domain::{Country, MenuItem, Order, OrderStatus, PaymentMethod, Restaurant, User},
    policy::OrderSelector,
};

impl Stores {
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            restaurants: Arc::new(MemoryRestaurantStore::default()),
            menu_items: Arc::new(MemoryMenuItemStore::default()),
            orders: Arc::new(MemoryOrderStore::default()),
            payments: Arc::new(MemoryPaymentStore::default()),
        }
    }
}

#[derive(Default)]
struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.users.write().await.clear();
        Ok(())
    }
}

#[derive(Default)]
struct MemoryRestaurantStore {
    restaurants: RwLock<HashMap<String, Restaurant>>,
}

#[async_trait]
impl RestaurantStore for MemoryRestaurantStore {
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        self.restaurants
            .write()
            .await
            .insert(restaurant.id.clone(), restaurant.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.restaurants.read().await.values().cloned().collect())
    }

    async fn list_by_country(
        &self,
        country: Option<Country>,
    ) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self
            .restaurants
            .read()
            .await
            .values()
            .filter(|r| country.is_some_and(|c| r.country == c))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, StoreError> {
        Ok(self.restaurants.read().await.get(id).cloned())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.restaurants.write().await.clear();
        Ok(())
    }
}

#[derive(Default)]
struct MemoryMenuItemStore {
    items: RwLock<HashMap<String, MenuItem>>,
}

#[async_trait]
impl MenuItemStore for MemoryMenuItemStore {
    async fn insert(&self, item: &MenuItem) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn list_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, StoreError> {
        let mut items: Vec<MenuItem> = self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, StoreError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.items.write().await.clear();
        Ok(())
    }
}

#[derive(Default)]
struct MemoryOrderStore {
    orders: RwLock<HashMap<String, Order>>,
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        self.orders
            .write()
            .await
            .insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(orders)
    }

    async fn transition(
        &self,
        selector: &OrderSelector,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        // Match and mutate under one write lock; that is the whole atomicity
        // story, same as findOneAndUpdate on the real store.
        let mut orders = self.orders.write().await;
        match orders.get_mut(&selector.order_id) {
            Some(order) if selector.matches(order) => {
                order.status = status;
                order.updated_at = DateTime::now();
                Ok(Some(order.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
struct MemoryPaymentStore {
    methods: RwLock<Vec<PaymentMethod>>,
}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn insert(&self, method: &PaymentMethod) -> Result<(), StoreError> {
        self.methods.write().await.push(method.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PaymentMethod>, StoreError> {
        Ok(self.methods.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::DateTime;

    use crate::{
        domain::{Country, Order, OrderItem, OrderStatus, Role},
        policy::OrderSelector,
        store::Stores,
        token::Claims,
    };

    fn manager_claims() -> Claims {
        Claims {
            sub: "manager-1".into(),
            email: "manager@example.com".into(),
            role: Role::Manager,
            country: Some(Country::India),
            iat: 0,
            exp: i64::MAX,
        }
    }

    fn created_order(id: &str) -> Order {
        Order {
            id: id.into(),
            user_id: "manager-1".into(),
            country: Some(Country::India),
            status: OrderStatus::Created,
            items: vec![OrderItem {
                menu_item_id: "menu-1".into(),
                quantity: 2,
            }],
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[tokio::test]
    async fn transition_is_compare_and_set() {
        let stores = Stores::memory();
        stores.orders.insert(&created_order("order-1")).await.unwrap();

        let selector = OrderSelector::checkout(&manager_claims(), "order-1");

        let first = stores
            .orders
            .transition(&selector, OrderStatus::Paid)
            .await
            .unwrap();
        assert_eq!(first.unwrap().status, OrderStatus::Paid);

        // The status precondition no longer holds, so the same transition
        // finds nothing the second time.
        let second = stores
            .orders
            .transition(&selector, OrderStatus::Paid)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn cancel_matches_paid_orders() {
        let stores = Stores::memory();
        let mut order = created_order("order-1");
        order.status = OrderStatus::Paid;
        stores.orders.insert(&order).await.unwrap();

        let selector = OrderSelector::cancel(&manager_claims(), "order-1");
        let cancelled = stores
            .orders
            .transition(&selector, OrderStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(cancelled.unwrap().status, OrderStatus::Cancelled);
    }
}
