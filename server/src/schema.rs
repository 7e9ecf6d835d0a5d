//! GraphQL surface. Resolvers stay thin: pull the caller's claims out of the
//! request data, hand off to a service, map the error. Services are built
//! here from the stores and dropped into schema data, so the whole wiring is
//! visible in one constructor call chain.

use async_graphql::{
    Context, EmptySubscription, Error, ErrorExtensions, Object, Result as GqlResult, Schema,
};
use chrono::Duration;

use crate::{
    auth::AuthService,
    catalog::CatalogService,
    domain::{LoginPayload, OrderItemInput, OrderView, PaymentMethodView, RestaurantView},
    error::ApiError,
    orders::OrderService,
    payments::PaymentService,
    store::Stores,
    token::{Claims, TokenKeys},
};

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(stores: Stores, tokens: TokenKeys, token_ttl_hours: i64) -> AppSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(AuthService::new(
            stores.users.clone(),
            tokens,
            Duration::hours(token_ttl_hours),
        ))
        .data(CatalogService::new(
            stores.restaurants.clone(),
            stores.menu_items.clone(),
        ))
        .data(OrderService::new(
            stores.orders.clone(),
            stores.menu_items.clone(),
        ))
        .data(PaymentService::new(stores.payments.clone()))
        .finish()
}

/// Claims are attached to the request by the HTTP layer when a valid bearer
/// token was presented. Everything except `login` starts here.
fn require_claims<'a>(ctx: &Context<'a>) -> GqlResult<&'a Claims> {
    ctx.data_opt::<Claims>()
        .ok_or_else(|| ApiError::Unauthenticated.extend())
}

fn extend(err: ApiError) -> Error {
    err.extend()
}

pub struct Query;

#[Object]
impl Query {
    async fn restaurants(&self, ctx: &Context<'_>) -> GqlResult<Vec<RestaurantView>> {
        let claims = require_claims(ctx)?;
        let catalog = ctx.data::<CatalogService>()?;
        catalog.list_restaurants(claims).await.map_err(extend)
    }

    async fn restaurant(&self, ctx: &Context<'_>, id: String) -> GqlResult<RestaurantView> {
        require_claims(ctx)?;
        let catalog = ctx.data::<CatalogService>()?;
        catalog.get_restaurant(&id).await.map_err(extend)
    }

    async fn orders(&self, ctx: &Context<'_>) -> GqlResult<Vec<OrderView>> {
        let claims = require_claims(ctx)?;
        let orders = ctx.data::<OrderService>()?;
        orders.list(claims).await.map_err(extend)
    }

    async fn order(&self, ctx: &Context<'_>, id: String) -> GqlResult<OrderView> {
        let claims = require_claims(ctx)?;
        let orders = ctx.data::<OrderService>()?;
        orders.get(claims, &id).await.map_err(extend)
    }

    async fn payment_methods(&self, ctx: &Context<'_>) -> GqlResult<Vec<PaymentMethodView>> {
        let claims = require_claims(ctx)?;
        let payments = ctx.data::<PaymentService>()?;
        payments.list(claims).await.map_err(extend)
    }
}

pub struct Mutation;

#[Object]
impl Mutation {
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> GqlResult<LoginPayload> {
        let auth = ctx.data::<AuthService>()?;
        auth.login(&email, &password).await.map_err(extend)
    }

    async fn create_order(
        &self,
        ctx: &Context<'_>,
        items: Vec<OrderItemInput>,
    ) -> GqlResult<OrderView> {
        let claims = require_claims(ctx)?;
        let orders = ctx.data::<OrderService>()?;
        orders.create(claims, items).await.map_err(extend)
    }

    async fn checkout_order(&self, ctx: &Context<'_>, order_id: String) -> GqlResult<OrderView> {
        let claims = require_claims(ctx)?;
        let orders = ctx.data::<OrderService>()?;
        orders.checkout(claims, &order_id).await.map_err(extend)
    }

    async fn cancel_order(&self, ctx: &Context<'_>, order_id: String) -> GqlResult<OrderView> {
        let claims = require_claims(ctx)?;
        let orders = ctx.data::<OrderService>()?;
        orders.cancel(claims, &order_id).await.map_err(extend)
    }

    async fn add_payment_method(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "type")] kind: String,
        details: String,
    ) -> GqlResult<PaymentMethodView> {
        let claims = require_claims(ctx)?;
        let payments = ctx.data::<PaymentService>()?;
        payments.add(claims, &kind, &details).await.map_err(extend)
    }
}
