//! MongoDB-backed repositories. Field names match the stored documents
//! (camelCase, `_id` string keys). The order transition maps straight onto
//! `findOneAndUpdate`, which is what makes it atomic.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Bson, DateTime, Document},
    options::ReturnDocument,
    Collection, Database,
};

use super::{
    MenuItemStore, OrderStore, PaymentStore, RestaurantStore, StoreError, Stores, UserStore,
};
use crate::{
    domain::{Country, MenuItem, Order, OrderStatus, PaymentMethod, Restaurant, User},
    policy::OrderSelector,
};

const USERS: &str = "users";
const RESTAURANTS: &str = "restaurants";
const MENU_ITEMS: &str = "menuitems";
const ORDERS: &str = "orders";
const PAYMENT_METHODS: &str = "paymentmethods";

impl Stores {
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserStore {
                coll: db.collection(USERS),
            }),
            restaurants: Arc::new(MongoRestaurantStore {
                coll: db.collection(RESTAURANTS),
            }),
            menu_items: Arc::new(MongoMenuItemStore {
                coll: db.collection(MENU_ITEMS),
            }),
            orders: Arc::new(MongoOrderStore {
                coll: db.collection(ORDERS),
            }),
            payments: Arc::new(MongoPaymentStore {
                coll: db.collection(PAYMENT_METHODS),
            }),
        }
    }
}

fn country_bson(country: &Option<Country>) -> Result<Bson, StoreError> {
    to_bson(country).map_err(|e| StoreError(e.to_string()))
}

struct MongoUserStore {
    coll: Collection<User>,
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        self.coll.insert_one(user).await?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.coll.find_one(doc! { "email": email }).await?)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.coll.delete_many(doc! {}).await?;
        Ok(())
    }
}

struct MongoRestaurantStore {
    coll: Collection<Restaurant>,
}

#[async_trait]
impl RestaurantStore for MongoRestaurantStore {
    async fn insert(&self, restaurant: &Restaurant) -> Result<(), StoreError> {
        self.coll.insert_one(restaurant).await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.coll.find(doc! {}).await?.try_collect().await?)
    }

    async fn list_by_country(
        &self,
        country: Option<Country>,
    ) -> Result<Vec<Restaurant>, StoreError> {
        let filter = doc! { "country": country_bson(&country)? };
        Ok(self.coll.find(filter).await?.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, StoreError> {
        Ok(self.coll.find_one(doc! { "_id": id }).await?)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.coll.delete_many(doc! {}).await?;
        Ok(())
    }
}

struct MongoMenuItemStore {
    coll: Collection<MenuItem>,
}

#[async_trait]
impl MenuItemStore for MongoMenuItemStore {
    async fn insert(&self, item: &MenuItem) -> Result<(), StoreError> {
        self.coll.insert_one(item).await?;
        Ok(())
    }

    async fn list_for_restaurant(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, StoreError> {
        let filter = doc! { "restaurantId": restaurant_id };
        Ok(self.coll.find(filter).await?.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, StoreError> {
        Ok(self.coll.find_one(doc! { "_id": id }).await?)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.coll.delete_many(doc! {}).await?;
        Ok(())
    }
}

struct MongoOrderStore {
    coll: Collection<Order>,
}

fn selector_filter(selector: &OrderSelector) -> Result<Document, StoreError> {
    let mut filter = doc! {
        "_id": &selector.order_id,
        "userId": &selector.user_id,
        "country": country_bson(&selector.country)?,
    };
    if let Some(status) = selector.status {
        filter.insert(
            "status",
            to_bson(&status).map_err(|e| StoreError(e.to_string()))?,
        );
    }
    Ok(filter)
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), StoreError> {
        self.coll.insert_one(order).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.coll.find_one(doc! { "_id": id }).await?)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
        let filter = doc! { "userId": user_id };
        Ok(self.coll.find(filter).await?.try_collect().await?)
    }

    async fn transition(
        &self,
        selector: &OrderSelector,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        let update = doc! {
            "$set": {
                "status": to_bson(&status).map_err(|e| StoreError(e.to_string()))?,
                "updatedAt": DateTime::now(),
            }
        };

        Ok(self
            .coll
            .find_one_and_update(selector_filter(selector)?, update)
            .return_document(ReturnDocument::After)
            .await?)
    }
}

struct MongoPaymentStore {
    coll: Collection<PaymentMethod>,
}

#[async_trait]
impl PaymentStore for MongoPaymentStore {
    async fn insert(&self, method: &PaymentMethod) -> Result<(), StoreError> {
        self.coll.insert_one(method).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PaymentMethod>, StoreError> {
        Ok(self.coll.find(doc! {}).await?.try_collect().await?)
    }
}
