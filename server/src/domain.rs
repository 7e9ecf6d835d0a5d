//! # Domain Records
//!
//! Plain data records as stored in the document database, plus the view
//! types exposed over the API.
//!
//! Records keep the camelCase field names of the underlying documents.
//! Views are what resolvers return; an order view carries its items joined
//! with menu item name and image so the client never does a second fetch.

use async_graphql::{Enum, InputObject, SimpleObject};
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Member,
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
    India,
    America,
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Paid,
    Cancelled,
}

/// Admins carry no country and are global-scope.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub country: Option<Country>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub country: Country,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub quantity: u32,
}

/// `country` is fixed at creation to the creator's country. An admin has no
/// country, so admin-created orders store a null country.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub country: Option<Country>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "_id")]
    pub id: String,
    pub kind: String,
    pub details: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "User")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub country: Option<Country>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            country: user.country,
        }
    }
}

#[derive(SimpleObject, Debug)]
#[graphql(name = "LoginPayload")]
pub struct LoginPayload {
    pub access_token: String,
    pub user: UserView,
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "MenuItem")]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
        }
    }
}

#[derive(SimpleObject, Debug)]
#[graphql(name = "Restaurant")]
pub struct RestaurantView {
    pub id: String,
    pub name: String,
    pub country: Country,
    pub menu_items: Vec<MenuItemView>,
}

#[derive(SimpleObject, Debug)]
#[graphql(name = "OrderItem")]
pub struct OrderItemView {
    pub menu_item_id: String,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
}

#[derive(SimpleObject, Debug)]
#[graphql(name = "Order")]
pub struct OrderView {
    pub id: String,
    pub user_id: String,
    pub country: Option<Country>,
    pub status: OrderStatus,
    pub items: Vec<OrderItemView>,
}

#[derive(SimpleObject, Debug)]
#[graphql(name = "PaymentMethod")]
pub struct PaymentMethodView {
    pub id: String,
    #[graphql(name = "type")]
    pub kind: String,
    pub details: String,
}

impl From<&PaymentMethod> for PaymentMethodView {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            id: method.id.clone(),
            kind: method.kind.clone(),
            details: method.details.clone(),
        }
    }
}

#[derive(InputObject, Clone, Debug)]
#[graphql(name = "OrderItemInput")]
pub struct OrderItemInput {
    pub menu_item_id: String,
    pub quantity: u32,
}
