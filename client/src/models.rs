//! GraphQL documents sent to the API and the response shapes they come back
//! in. Field names mirror the wire format.

use serde::{Deserialize, Serialize};

pub const LOGIN: &str = r#"
    mutation Login($email: String!, $password: String!) {
        login(email: $email, password: $password) {
            accessToken
            user { id name email role country }
        }
    }
"#;

pub const RESTAURANTS: &str = r#"
    query {
        restaurants { id name country menuItems { id name price } }
    }
"#;

pub const RESTAURANT: &str = r#"
    query Restaurant($id: String!) {
        restaurant(id: $id) { id name country menuItems { id name price } }
    }
"#;

pub const CREATE_ORDER: &str = r#"
    mutation CreateOrder($items: [OrderItemInput!]!) {
        createOrder(items: $items) {
            id userId country status
            items { menuItemId name imageUrl quantity }
        }
    }
"#;

pub const ORDERS: &str = r#"
    query {
        orders {
            id userId country status
            items { menuItemId name imageUrl quantity }
        }
    }
"#;

pub const ORDER: &str = r#"
    query Order($id: String!) {
        order(id: $id) {
            id userId country status
            items { menuItemId name imageUrl quantity }
        }
    }
"#;

pub const CHECKOUT_ORDER: &str = r#"
    mutation Checkout($orderId: String!) {
        checkoutOrder(orderId: $orderId) { id status }
    }
"#;

pub const CANCEL_ORDER: &str = r#"
    mutation Cancel($orderId: String!) {
        cancelOrder(orderId: $orderId) { id status }
    }
"#;

pub const ADD_PAYMENT_METHOD: &str = r#"
    mutation AddPayment($type: String!, $details: String!) {
        addPaymentMethod(type: $type, details: $details) { id type details }
    }
"#;

pub const PAYMENT_METHODS: &str = r#"
    query {
        paymentMethods { id type details }
    }
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub country: String,
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    #[allow(dead_code)]
    pub image_url: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[allow(dead_code)]
    pub user_id: String,
    pub country: Option<String>,
    pub status: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub details: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub login: LoginPayload,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantsData {
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Deserialize)]
pub struct RestaurantData {
    pub restaurant: Restaurant,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderData {
    pub create_order: Order,
}

#[derive(Debug, Deserialize)]
pub struct OrdersData {
    pub orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
pub struct OrderData {
    pub order: Order,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub checkout_order: OrderSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelData {
    pub cancel_order: OrderSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentMethodData {
    pub add_payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodsData {
    pub payment_methods: Vec<PaymentMethod>,
}

#[cfg(test)]
mod tests {
    use super::{LoginData, OrdersData};

    #[test]
    fn login_payload_parses() {
        let data: LoginData = serde_json::from_value(serde_json::json!({
            "login": {
                "accessToken": "abc.def.ghi",
                "user": {
                    "id": "user-1",
                    "name": "Thanos",
                    "email": "thanos@example.com",
                    "role": "MEMBER",
                    "country": "INDIA"
                }
            }
        }))
        .unwrap();

        assert_eq!(data.login.access_token, "abc.def.ghi");
        assert_eq!(data.login.user.country.as_deref(), Some("INDIA"));
    }

    #[test]
    fn admin_orders_parse_with_null_country() {
        let data: OrdersData = serde_json::from_value(serde_json::json!({
            "orders": [{
                "id": "order-1",
                "userId": "admin-1",
                "country": null,
                "status": "CREATED",
                "items": [{
                    "menuItemId": "menu-1",
                    "name": "Burger Item 1",
                    "imageUrl": "https://images.tiffin.example/burger/item-1.jpg",
                    "quantity": 1
                }]
            }]
        }))
        .unwrap();

        assert!(data.orders[0].country.is_none());
    }
}
