use anyhow::{bail, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::{
    self, LoginPayload, Order, OrderSummary, PaymentMethod, Restaurant,
};

/// Thin GraphQL client over the platform API. Errors reported by the server
/// come back as plain `anyhow` errors carrying the server's message.
pub struct Api {
    http: Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

impl Api {
    pub fn new(endpoint: &str, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.to_string(),
            token,
        }
    }

    async fn call(&self, query: &str, variables: Value) -> Result<Value> {
        let payload = json!({ "query": query, "variables": variables });

        let mut request = self.http.post(&self.endpoint).json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            bail!("{}: {}", response.status(), response.text().await?);
        }

        let body: GraphqlResponse = response.json().await?;
        if let Some(errors) = body.errors {
            match errors.first() {
                Some(error) => bail!("{}", error.message),
                None => bail!("Request failed without an error message"),
            }
        }

        match body.data {
            Some(data) => Ok(data),
            None => bail!("Response carried no data"),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginPayload> {
        let data = self
            .call(
                models::LOGIN,
                json!({ "email": email, "password": password }),
            )
            .await?;
        Ok(serde_json::from_value::<models::LoginData>(data)?.login)
    }

    pub async fn restaurants(&self) -> Result<Vec<Restaurant>> {
        let data = self.call(models::RESTAURANTS, json!({})).await?;
        Ok(serde_json::from_value::<models::RestaurantsData>(data)?.restaurants)
    }

    pub async fn restaurant(&self, id: &str) -> Result<Restaurant> {
        let data = self.call(models::RESTAURANT, json!({ "id": id })).await?;
        Ok(serde_json::from_value::<models::RestaurantData>(data)?.restaurant)
    }

    pub async fn create_order(&self, items: &[(String, u32)]) -> Result<Order> {
        let items: Vec<Value> = items
            .iter()
            .map(|(menu_item_id, quantity)| {
                json!({ "menuItemId": menu_item_id, "quantity": quantity })
            })
            .collect();

        let data = self
            .call(models::CREATE_ORDER, json!({ "items": items }))
            .await?;
        Ok(serde_json::from_value::<models::CreateOrderData>(data)?.create_order)
    }

    pub async fn orders(&self) -> Result<Vec<Order>> {
        let data = self.call(models::ORDERS, json!({})).await?;
        Ok(serde_json::from_value::<models::OrdersData>(data)?.orders)
    }

    pub async fn order(&self, id: &str) -> Result<Order> {
        let data = self.call(models::ORDER, json!({ "id": id })).await?;
        Ok(serde_json::from_value::<models::OrderData>(data)?.order)
    }

    pub async fn checkout_order(&self, order_id: &str) -> Result<OrderSummary> {
        let data = self
            .call(models::CHECKOUT_ORDER, json!({ "orderId": order_id }))
            .await?;
        Ok(serde_json::from_value::<models::CheckoutData>(data)?.checkout_order)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<OrderSummary> {
        let data = self
            .call(models::CANCEL_ORDER, json!({ "orderId": order_id }))
            .await?;
        Ok(serde_json::from_value::<models::CancelData>(data)?.cancel_order)
    }

    pub async fn add_payment_method(&self, kind: &str, details: &str) -> Result<PaymentMethod> {
        let data = self
            .call(
                models::ADD_PAYMENT_METHOD,
                json!({ "type": kind, "details": details }),
            )
            .await?;
        Ok(serde_json::from_value::<models::AddPaymentMethodData>(data)?.add_payment_method)
    }

    pub async fn payment_methods(&self) -> Result<Vec<PaymentMethod>> {
        let data = self.call(models::PAYMENT_METHODS, json!({})).await?;
        Ok(serde_json::from_value::<models::PaymentMethodsData>(data)?.payment_methods)
    }
}
